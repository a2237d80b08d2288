use serde::Serialize;
use serde_json::Value;

use marketpulse_core::{resample_str, AggregatedCandle};

use crate::cli::ResampleArgs;
use crate::error::CliError;
use crate::input;

#[derive(Debug, Serialize)]
struct ResampleReport {
    interval: String,
    candles: Vec<AggregatedCandle>,
}

pub fn run(args: &ResampleArgs) -> Result<Value, CliError> {
    let candles = input::load_series(&args.series)?;
    // unrecognized intervals intentionally degrade to an empty series
    let resampled = resample_str(&candles, &args.interval);

    Ok(serde_json::to_value(ResampleReport {
        interval: args.interval.clone(),
        candles: resampled,
    })?)
}
