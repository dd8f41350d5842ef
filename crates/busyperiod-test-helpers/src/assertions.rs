//! Assertion macros for analysis results.

/// Assert that two `f64` values differ by at most a tolerance.
///
/// Without an explicit tolerance [`DEFAULT_TOLERANCE`](crate::DEFAULT_TOLERANCE)
/// is used.
///
/// ```rust
/// use busyperiod_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(1.0, 1.0001, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::DEFAULT_TOLERANCE)
    };
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {{
        let left: f64 = $left;
        let right: f64 = $right;
        let tolerance: f64 = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    }};
}

/// Assert that a sequence is strictly ascending (sorted, no duplicates).
///
/// ```rust
/// use busyperiod_test_helpers::assert_strictly_ascending;
///
/// assert_strictly_ascending!(&[7, 12, 14, 15]);
/// ```
#[macro_export]
macro_rules! assert_strictly_ascending {
    ($collection:expr $(,)?) => {{
        let collection = $collection;
        let mut iter = collection.iter();
        if let Some(mut prev) = iter.next() {
            for (i, curr) in iter.enumerate() {
                if prev >= curr {
                    panic!(
                        "assertion failed: sequence is not strictly ascending\n  violation at index {}: {:?} >= {:?}",
                        i + 1,
                        prev,
                        curr
                    );
                }
                prev = curr;
            }
        }
    }};
}

/// Assert that a value lies in a closed interval.
///
/// ```rust
/// use busyperiod_test_helpers::assert_in_range;
///
/// assert_in_range!(0.4, 0.0, 1.0);
/// ```
#[macro_export]
macro_rules! assert_in_range {
    ($value:expr, $min:expr, $max:expr $(,)?) => {{
        let value = $value;
        let min = $min;
        let max = $max;
        if !(min <= value && value <= max) {
            panic!(
                "assertion failed: value out of range\n  value: `{:?}`,\n  range: `[{:?}, {:?}]`",
                value, min, max
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_default_tolerance() {
        assert_approx_eq!(1.0 / 3.0 * 3.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "left ≈ right")]
    fn test_approx_eq_fails_outside_tolerance() {
        assert_approx_eq!(1.0, 1.1, 0.01);
    }

    #[test]
    #[should_panic(expected = "not strictly ascending")]
    fn test_strictly_ascending_rejects_duplicates() {
        assert_strictly_ascending!(&[1, 2, 2]);
    }

    #[test]
    fn test_strictly_ascending_accepts_empty() {
        let empty: [i64; 0] = [];
        assert_strictly_ascending!(&empty);
    }

    #[test]
    #[should_panic(expected = "value out of range")]
    fn test_in_range_rejects_outside() {
        assert_in_range!(1.5, 0.0, 1.0);
    }
}
