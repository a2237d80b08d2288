//! Core analysis pipeline for marketpulse.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - Candle resampling for chart timeframes
//! - Indicator computation (EMA/RSI/ATR/VWAP)
//! - Decision scoring, regime classification, pivot levels
//! - Narrative commentary and next-open prediction
//! - The candle-source capability trait hosts implement
//!
//! Every stage is a synchronous pure function of its inputs; malformed but
//! well-typed input degrades to neutral/empty output instead of erroring.

pub mod aggregate;
pub mod decision;
pub mod domain;
pub mod error;
pub mod expert;
pub mod features;
pub mod levels;
pub mod predictor;
pub mod regime;
pub mod session;
pub mod source;

pub use aggregate::{resample, resample_str, AggregatedCandle};
pub use decision::{analyze, Action, Bias, Decision, OptionsDirection, OptionsSignal};
pub use domain::{AssetKind, Candle, Interval, UtcDateTime};
pub use error::{CoreError, ValidationError};
pub use expert::{
    generate_commentary, BeginnerGuidance, Commentary, LevelsOutlook, MarketSnapshot, NearestLevel,
};
pub use features::{compute, FeatureSnapshot};
pub use levels::{
    calculate_pivots, daily_pivots, daily_pivots_from_source, DailyPivots, PivotLevels,
};
pub use predictor::{predict_open, GapDirection, OpenPrediction};
pub use regime::{classify, Regime, RegimeAssessment};
pub use session::{nifty_market_status, MarketStatus, SessionState};
pub use source::{AssetProfile, CandleSource, FixtureSource, SourceError};
