mod cell;
mod error;
mod filter;
mod kml_sink;
mod options;
mod sink;
mod text;

use env_logger::{Builder, Env};
use error::H3ToGeoError;
use log::error;
use options::{Cli, ParseOutcome};
use std::{io, process::ExitCode};

fn main() -> Result<ExitCode, H3ToGeoError> {
    log_builder(Env::default()).init();

    let cli = match Cli::parse_outcome(std::env::args_os()) {
        ParseOutcome::Help(help) => {
            help.print()?;
            return Ok(ExitCode::SUCCESS);
        }
        ParseOutcome::Error(err) => {
            err.print()?;
            return Ok(ExitCode::FAILURE);
        }
        ParseOutcome::Run(cli) => cli,
    };

    match cli.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(_tally) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            error!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Logs at `warn` and above unless `RUST_LOG` says otherwise, so
/// skipped input lines are reported.
fn log_builder(env: Env) -> Builder {
    Builder::from_env(env.default_filter_or("warn"))
}
