//! CLI argument definitions for marketpulse.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Indicators, scored decision, regime, and commentary |
//! | `resample` | Resample a base series into a coarser interval |
//! | `levels` | Daily pivot support/resistance levels |
//! | `predict` | Next-session open prediction |
//!
//! Every command takes either `--input <file.json>` (an array of candle
//! objects) or `--sample` for a bundled deterministic series, and emits a
//! single JSON document.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use marketpulse_core::AssetKind;

/// Deterministic candle analysis: indicators, signals, levels, and
/// next-open prediction. Every output traces back to an explicit numeric
/// rule.
#[derive(Debug, Parser)]
#[command(name = "marketpulse", version, about = "Deterministic candle-analysis toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline over an intraday series.
    Analyze(AnalyzeArgs),
    /// Resample a base series into a coarser interval.
    Resample(ResampleArgs),
    /// Compute pivot levels from a daily series.
    Levels(LevelsArgs),
    /// Predict the next session open from a daily series.
    Predict(PredictArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssetArg {
    Nifty,
    Bitcoin,
}

impl From<AssetArg> for AssetKind {
    fn from(value: AssetArg) -> Self {
        match value {
            AssetArg::Nifty => Self::Nifty,
            AssetArg::Bitcoin => Self::Bitcoin,
        }
    }
}

/// Candle series input shared by all commands.
#[derive(Debug, Args)]
pub struct SeriesInput {
    /// JSON file with an array of candle objects.
    #[arg(long, conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Use the bundled deterministic sample series instead of a file.
    #[arg(long)]
    pub sample: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub series: SeriesInput,

    #[arg(long, value_enum, default_value_t = AssetArg::Nifty)]
    pub asset: AssetArg,

    /// Treat the session as open regardless of the NSE clock.
    #[arg(long)]
    pub assume_open: bool,

    /// Optional daily series file used for pivot levels.
    #[arg(long)]
    pub daily: Option<PathBuf>,

    /// News impact score (0-100) fed to the regime classifier.
    #[arg(long, default_value_t = 0.0)]
    pub news_impact: f64,

    /// Trend strength (ADX) when an external source provides one.
    #[arg(long, default_value_t = 0.0)]
    pub adx: f64,
}

#[derive(Debug, Args)]
pub struct ResampleArgs {
    #[command(flatten)]
    pub series: SeriesInput,

    /// Target interval (1m, 2m, 3m, 5m, 10m, 15m, 30m, 1h, 2h, 1d).
    #[arg(long, default_value = "5m")]
    pub interval: String,
}

#[derive(Debug, Args)]
pub struct LevelsArgs {
    #[command(flatten)]
    pub series: SeriesInput,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub series: SeriesInput,

    #[arg(long, value_enum, default_value_t = AssetArg::Nifty)]
    pub asset: AssetArg,
}
