//! Binary crate for the `forecast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and location selection
//! - Rendering the forecast table, charts, and JSON/CSV exports

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod render;

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::init_from_env(env);
}

/// One-line description of a failure: the error and each cause, outermost first.
fn failure_message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    init_logger(cmd.verbose);

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use forecast_core::ForecastError;

    #[test]
    fn failure_message_lists_each_cause_once() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Err::<(), _>(ForecastError::from(inner))
            .context("Could not load the forecast")
            .unwrap_err();

        assert_eq!(
            failure_message(&err),
            "Could not load the forecast: Failed to read forecast file: no such file"
        );
    }

    #[test]
    fn failure_message_for_unknown_location() {
        let err = anyhow::Error::from(ForecastError::NotFound("高雄市".into()));
        assert_eq!(failure_message(&err), "Location '高雄市' not found in forecast");
    }
}
