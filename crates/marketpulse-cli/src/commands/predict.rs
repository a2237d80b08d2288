use serde::Serialize;
use serde_json::Value;

use marketpulse_core::{
    analyze, compute, daily_pivots, nifty_market_status, predict_open, AssetKind, OpenPrediction,
    UtcDateTime,
};

use crate::cli::PredictArgs;
use crate::error::CliError;
use crate::input;

#[derive(Debug, Serialize)]
struct PredictReport {
    asset: AssetKind,
    prediction: OpenPrediction,
}

pub fn run(args: &PredictArgs) -> Result<Value, CliError> {
    let candles = if args.series.sample {
        input::sample_daily()
    } else {
        input::load_series(&args.series)?
    };

    // basis bar mirrors the pivot selection: the most recent daily bar
    // may still be forming
    let basis = match candles.len() {
        0 => {
            return Err(CliError::Command(String::from(
                "candle series is empty, nothing to predict from",
            )))
        }
        1 => &candles[0],
        n => &candles[n - 2],
    };

    let asset = AssetKind::from(args.asset);
    let now = UtcDateTime::now();
    let market_open = match asset {
        AssetKind::Nifty => nifty_market_status(now).is_open,
        AssetKind::Bitcoin => true,
    };

    let features = compute(&candles);
    let decision = analyze(&features, asset, market_open);
    let pivots = daily_pivots(&candles);

    let prediction = predict_open(
        basis.close,
        basis.high,
        basis.low,
        pivots.as_ref(),
        &decision,
        now,
    );

    Ok(serde_json::to_value(PredictReport { asset, prediction })?)
}
