//! Command-line arguments.

use crate::error::AppError;
use std::path::PathBuf;

pub const USAGE: &str = "\
Laneshift - three-lane endless runner for the terminal

Usage: laneshift [options]

Options:
  --config <path>  Load run tuning from a JSON file
  --seed <n>       Seed obstacle generation for a reproducible run
  --version        Show version information
  --help           Show this help message

Logs are written to the platform data directory; set RUST_LOG to adjust.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunArgs),
    Help,
    Version,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command, AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut run = RunArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| AppError::InvalidArgument("--config needs a path".into()))?;
                run.config = Some(PathBuf::from(path));
            }
            "--seed" | "-s" => {
                let raw = args
                    .next()
                    .ok_or_else(|| AppError::InvalidArgument("--seed needs a number".into()))?;
                let seed = raw.parse().map_err(|_| {
                    AppError::InvalidArgument(format!("--seed expects an unsigned integer, got '{raw}'"))
                })?;
                run.seed = Some(seed);
            }
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "unknown argument '{other}' (run 'laneshift --help' for usage)"
                )))
            }
        }
    }

    Ok(Command::Run(run))
}
