//! Output formatting for search results

use std::io::{self, Write};

use anyhow::Error;
use busyperiod_search::{Counterexample, SearchSummary};
use colored::Colorize;
use serde_json::json;

use crate::error::CliError;

/// Render checkpoints as a space-separated bracketed list, e.g. `[7 12 14]`.
pub fn format_checkpoints(checkpoints: &[i64]) -> String {
    let items: Vec<String> = checkpoints.iter().map(i64::to_string).collect();
    format!("[{}]", items.join(" "))
}

/// Write one counterexample, either as a report block or as one JSON line.
pub fn write_counterexample<W: Write>(
    out: &mut W,
    found: &Counterexample,
    json: bool,
) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, found)?;
        writeln!(out)?;
    } else {
        write!(
            out,
            "\ntaskset not EDF schedulable according to busy period check:\n{}\n",
            found.task_set
        )?;
        writeln!(out, "checkpoints: {}", format_checkpoints(&found.checkpoints))?;
        writeln!(out, "checked t: {}", found.violated_at)?;
    }
    out.flush()
}

/// Print the end-of-search summary to stderr.
pub fn print_summary(summary: &SearchSummary) {
    let status = if summary.counterexamples == 0 {
        "no counterexample found".green()
    } else {
        "counterexamples found".red().bold()
    };
    eprintln!("{status}: {summary}");
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let kind = error
        .downcast_ref::<CliError>()
        .map_or("other", CliError::kind);
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": kind
        }
    });
    println!("{error_json}");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}
