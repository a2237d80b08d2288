//! Classic pivot points and daily support/resistance bands.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::source::CandleSource;
use crate::{Candle, Interval};

/// Classic pivot set, 2-decimal rounded. With `high >= low` and `close`
/// inside the range, `s3 <= s2 <= s1 <= p <= r1 <= r2 <= r3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    pub p: f64,
    pub r1: f64,
    pub s1: f64,
    pub r2: f64,
    pub s2: f64,
    pub r3: f64,
    pub s3: f64,
}

/// Pivot set anchored to a completed daily bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPivots {
    pub basis: String,
    pub date: String,
    pub levels: PivotLevels,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classic formula: `P = (H+L+C)/3`, `R1 = 2P-L`, `S1 = 2P-H`,
/// `R2 = P+(H-L)`, `S2 = P-(H-L)`, `R3 = H+2(P-L)`, `S3 = L-2(H-P)`.
pub fn calculate_pivots(high: f64, low: f64, close: f64) -> PivotLevels {
    let p = (high + low + close) / 3.0;
    PivotLevels {
        p: round2(p),
        r1: round2(2.0 * p - low),
        s1: round2(2.0 * p - high),
        r2: round2(p + (high - low)),
        s2: round2(p - (high - low)),
        r3: round2(high + 2.0 * (p - low)),
        s3: round2(low - 2.0 * (high - p)),
    }
}

/// Picks the completed prior session from a daily series and computes its
/// pivots. The most recent daily bar may still be forming, so with two or
/// more bars the second-to-last is the basis; a single bar is used as-is;
/// no bars means no levels.
pub fn daily_pivots(daily_candles: &[Candle]) -> Option<DailyPivots> {
    let basis_candle = match daily_candles.len() {
        0 => return None,
        1 => &daily_candles[0],
        n => &daily_candles[n - 2],
    };

    Some(DailyPivots {
        basis: String::from("Daily (Previous Day)"),
        date: basis_candle.ts.format_date(),
        levels: calculate_pivots(basis_candle.high, basis_candle.low, basis_candle.close),
    })
}

/// Fetches the last two daily bars from `source` and computes pivots for
/// the completed prior session. Source failures degrade to `None`, the
/// same as an empty series.
pub fn daily_pivots_from_source<S: CandleSource>(source: &S, symbol: &str) -> Option<DailyPivots> {
    match source.historical_candles(symbol, Interval::OneDay, 2) {
        Ok(candles) => daily_pivots(&candles),
        Err(error) => {
            warn!(%symbol, %error, "daily pivot fetch failed");
            None
        }
    }
}
