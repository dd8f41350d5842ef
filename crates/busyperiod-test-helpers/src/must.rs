//! Unwrap helpers that keep the caller's location in the panic message.

use std::fmt::Debug;

/// Unwrap a `Result`, panicking with the error value.
///
/// ```rust
/// use busyperiod_test_helpers::must;
///
/// let value = must("7".parse::<i64>());
/// assert_eq!(value, 7);
/// ```
///
/// # Panics
///
/// Panics if the result is `Err`.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Unwrap an `Option` with a message.
///
/// # Panics
///
/// Panics with `msg` if the option is `None`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Unwrap the error of a `Result` that is expected to fail.
///
/// # Panics
///
/// Panics with the success value if the result is `Ok`.
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("must_err: unexpected Ok: {v:?}"),
        Err(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_ok() {
        let result: Result<u8, &str> = Ok(3);
        assert_eq!(must(result), 3);
    }

    #[test]
    #[should_panic(expected = "must: unexpected Err")]
    fn test_must_err_panics() {
        let result: Result<u8, &str> = Err("boom");
        must(result);
    }

    #[test]
    fn test_must_err_returns_error() {
        let result: Result<u8, &str> = Err("boom");
        assert_eq!(must_err(result), "boom");
    }

    #[test]
    #[should_panic(expected = "must_some: missing")]
    fn test_must_some_panics() {
        must_some(None::<u8>, "missing");
    }
}
