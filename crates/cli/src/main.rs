//! busyp - randomized counterexample search for EDF-NUVD
//!
//! Generates random minimal dual-criticality task sets, scales their virtual
//! deadlines with EDF-NUVD and reports every task set that fails the
//! busy-period demand test.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod error;
mod output;
mod record;
mod settings;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use anyhow::Result;
use busyperiod_search::Searcher;
use busyperiod_taskset::ScalingPolicy;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;
use crate::record::Recorder;
use crate::settings::Overrides;

#[derive(Parser, Debug)]
#[command(name = "busyp")]
#[command(about = "Search for task sets that are EDF-NUVD feasible but fail the busy-period check")]
#[command(version)]
#[command(long_about = "
busyp generates random task sets with one low and two high criticality tasks,
scales the virtual deadlines of the high criticality tasks with EDF-NUVD and
checks the demand bound at every checkpoint of the synchronous busy period.

Every task set whose demand exceeds the elapsed time at a checkpoint is printed
as soon as it is found. Use --json for one JSON object per counterexample.
")]
struct Cli {
    /// Number of attempts to find a counterexample, 0 for an endless search
    #[arg(short = 'n', long = "tries", value_name = "N")]
    tries: Option<u64>,

    /// Worker threads (default: number of CPUs)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Seed for reproducible searches (default: time-based)
    #[arg(long)]
    seed: Option<u64>,

    /// Lambda used for virtual-deadline scaling: plain, optimistic or midpoint
    #[arg(long, value_name = "POLICY")]
    policy: Option<ScalingPolicy>,

    /// YAML search configuration; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append every counterexample as a JSON line to this file
    #[arg(long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Output in JSON format for machine parsing
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            tries: self.tries,
            workers: self.workers,
            seed: self.seed,
            policy: self.policy,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(e.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("busyp={log_level},busyperiod_search={log_level},busyperiod_taskset={log_level}")
                    .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = settings::resolve(cli.config.as_deref(), &cli.overrides())?;
    let mut recorder = cli.record.as_deref().map(Recorder::create).transpose()?;
    if let Some(recorder) = &recorder {
        info!(path = %recorder.path().display(), "recording counterexamples");
    }

    let searcher = Searcher::new(config).map_err(CliError::from)?;
    let stop = searcher.stop_flag();
    let json = cli.json;
    let mut failure: Option<CliError> = None;

    let summary = searcher
        .run(|found| {
            if failure.is_some() {
                return;
            }
            let written = output::write_counterexample(&mut io::stdout().lock(), &found, json)
                .map_err(CliError::Output);
            let recorded = match recorder.as_mut() {
                Some(recorder) => recorder.record(&found),
                None => Ok(()),
            };
            if let Err(e) = written.and(recorded) {
                error!(error = %e, "stopping search");
                failure = Some(e);
                stop.store(true, Ordering::Relaxed);
            }
        })
        .map_err(CliError::from)?;

    if let Some(e) = failure {
        return Err(e.into());
    }
    output::print_summary(&summary);
    Ok(())
}
