//! bisect-helper - run one firmware bisection step
//!
//! Exits 0 (good), 1 (bad) or 125 (skip) and nothing else, so that
//! `git bisect run bisect-helper ...` can drive it directly.

use std::process;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use bisect_helper::{app, Cli, Verdict, NAME, VERSION};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                // A bad command line tests nothing
                _ => Verdict::Skip.exit_code(),
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose);
    debug!("Starting {} v{}", NAME, VERSION);

    let verdict = match app::run(&cli).context("bisect step could not start") {
        Ok(verdict) => verdict,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}: {:#}", NAME, e);
            Verdict::Skip
        }
    };

    process::exit(verdict.exit_code());
}
