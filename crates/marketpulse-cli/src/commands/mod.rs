mod analyze;
mod levels;
mod predict;
mod resample;

use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<Value, CliError> {
    match &cli.command {
        Command::Analyze(args) => analyze::run(args),
        Command::Resample(args) => resample::run(args),
        Command::Levels(args) => levels::run(args),
        Command::Predict(args) => predict::run(args),
    }
}
