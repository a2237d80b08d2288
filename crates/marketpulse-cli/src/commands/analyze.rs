use serde::Serialize;
use serde_json::Value;

use marketpulse_core::{
    analyze, classify, compute, daily_pivots, generate_commentary, nifty_market_status, AssetKind,
    Commentary, DailyPivots, Decision, FeatureSnapshot, MarketStatus, RegimeAssessment,
    UtcDateTime,
};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::input;

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    asset: AssetKind,
    market_status: MarketStatus,
    features: FeatureSnapshot,
    decision: Decision,
    regime: RegimeAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    levels: Option<DailyPivots>,
    commentary: Commentary,
}

pub fn run(args: &AnalyzeArgs) -> Result<Value, CliError> {
    let candles = input::load_series(&args.series)?;
    let asset = AssetKind::from(args.asset);
    let now = UtcDateTime::now();

    let market_status = nifty_market_status(now);
    let market_open = match asset {
        AssetKind::Nifty => args.assume_open || market_status.is_open,
        // crypto never closes
        AssetKind::Bitcoin => true,
    };

    let features = compute(&candles);
    let decision = analyze(&features, asset, market_open);
    let regime = classify(&features, args.adx, args.news_impact);

    let daily = match &args.daily {
        Some(path) => input::read_candles(path)?,
        None if args.series.sample => input::sample_daily(),
        None => Vec::new(),
    };
    let levels = daily_pivots(&daily);

    let commentary = generate_commentary(
        asset,
        features.close,
        &decision,
        levels.as_ref(),
        market_open,
        now,
    );

    Ok(serde_json::to_value(AnalyzeReport {
        asset,
        market_status,
        features,
        decision,
        regime,
        levels,
        commentary,
    })?)
}
