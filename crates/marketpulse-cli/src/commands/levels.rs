use serde::Serialize;
use serde_json::Value;

use marketpulse_core::{daily_pivots, DailyPivots};

use crate::cli::LevelsArgs;
use crate::error::CliError;
use crate::input;

#[derive(Debug, Serialize)]
struct LevelsReport {
    pivots: Option<DailyPivots>,
}

pub fn run(args: &LevelsArgs) -> Result<Value, CliError> {
    let candles = if args.series.sample {
        input::sample_daily()
    } else {
        input::load_series(&args.series)?
    };

    Ok(serde_json::to_value(LevelsReport {
        pivots: daily_pivots(&candles),
    })?)
}
