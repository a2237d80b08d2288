//! Technical-indicator snapshot over a candle window.
//!
//! Always recomputed from scratch per call; the window is bounded (a few
//! hundred to ~1000 candles) so an O(n) pass is cheaper than carrying
//! incremental state across invocations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Candle;

const RSI_PERIOD: usize = 14;
const ATR_PERIOD: usize = 14;

/// Latest-bar indicator values plus raw close/volume.
///
/// Fields an unfilled window cannot produce stay at their defaults: 0.0
/// everywhere except `rsi`, which defaults to the neutral 50.0 so the
/// decision bands stay inert on short histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub ema_20: f64,
    pub ema_50: f64,
    pub ema_200: f64,
    pub rsi: f64,
    pub atr: f64,
    pub vwap: f64,
    pub close: f64,
    pub volume: f64,
}

impl Default for FeatureSnapshot {
    fn default() -> Self {
        Self {
            ema_20: 0.0,
            ema_50: 0.0,
            ema_200: 0.0,
            rsi: 50.0,
            atr: 0.0,
            vwap: 0.0,
            close: 0.0,
            volume: 0.0,
        }
    }
}

impl FeatureSnapshot {
    /// True when no price data was available (downstream engines treat a
    /// zero close as "insufficient data").
    pub fn is_empty(&self) -> bool {
        self.close == 0.0
    }
}

/// Computes the indicator snapshot for the latest bar of `candles`.
///
/// The input is re-sorted ascending defensively before computing; an empty
/// input yields the default (empty) snapshot.
pub fn compute(candles: &[Candle]) -> FeatureSnapshot {
    if candles.is_empty() {
        debug!("no candles provided, returning empty snapshot");
        return FeatureSnapshot::default();
    }

    let mut sorted: Vec<&Candle> = candles.iter().collect();
    sorted.sort_by_key(|c| c.ts);

    let closes: Vec<f64> = sorted.iter().map(|c| c.close).collect();
    let latest = sorted[sorted.len() - 1];

    let mut snapshot = FeatureSnapshot {
        ema_20: ema(&closes, 20),
        ema_50: ema(&closes, 50),
        ema_200: ema(&closes, 200),
        close: latest.close,
        volume: latest.volume,
        ..FeatureSnapshot::default()
    };

    if let Some(rsi) = rsi(&closes, RSI_PERIOD) {
        snapshot.rsi = rsi;
    }
    if let Some(atr) = atr(&sorted, ATR_PERIOD) {
        snapshot.atr = atr;
    }
    snapshot.vwap = vwap(&sorted);

    snapshot
}

/// Exponential moving average seeded with the first close
/// (`EMA_t = alpha * close_t + (1 - alpha) * EMA_{t-1}`, alpha = 2/(span+1)).
fn ema(closes: &[f64], span: usize) -> f64 {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut value = closes[0];
    for close in &closes[1..] {
        value = alpha * close + (1.0 - alpha) * value;
    }
    value
}

/// RSI over rolling-mean gains/losses. The first delta is unknowable and
/// counts as zero gain and zero loss, so the window fills after `period`
/// bars. Returns None until then; a loss-free window saturates at 100.
fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if closes.len() < period {
        return None;
    }

    let mut gains = vec![0.0; closes.len()];
    let mut losses = vec![0.0; closes.len()];
    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }

    let avg_gain = mean_tail(&gains, period);
    let avg_loss = mean_tail(&losses, period);

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Average true range: rolling mean of
/// `max(high - low, |high - prev_close|, |low - prev_close|)`.
fn atr(candles: &[&Candle], period: usize) -> Option<f64> {
    if candles.len() < period {
        return None;
    }

    let mut true_ranges = Vec::with_capacity(candles.len());
    for (i, candle) in candles.iter().enumerate() {
        let mut tr = candle.high - candle.low;
        if i > 0 {
            let prev_close = candles[i - 1].close;
            tr = tr
                .max((candle.high - prev_close).abs())
                .max((candle.low - prev_close).abs());
        }
        true_ranges.push(tr);
    }

    Some(mean_tail(&true_ranges, period))
}

/// Volume-weighted average price over the whole window; zero-volume feeds
/// (common for free index data) degrade to 0.
fn vwap(candles: &[&Candle]) -> f64 {
    let total_volume: f64 = candles.iter().map(|c| c.volume).sum();
    if total_volume <= 0.0 {
        return 0.0;
    }

    let weighted: f64 = candles.iter().map(|c| c.close * c.volume).sum();
    weighted / total_volume
}

fn mean_tail(values: &[f64], window: usize) -> f64 {
    let tail = &values[values.len() - window..];
    tail.iter().sum::<f64>() / window as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;

    fn series(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Candle::new(
                    UtcDateTime::from_unix_timestamp(i as i64 * 60).expect("in range"),
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    10.0,
                    "test",
                )
                .expect("valid candle")
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_snapshot() {
        let snapshot = compute(&[]);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.rsi, 50.0);
        assert_eq!(snapshot.ema_20, 0.0);
    }

    #[test]
    fn ema_seeds_with_first_close() {
        assert_eq!(ema(&[100.0], 20), 100.0);

        // two bars: alpha * c1 + (1 - alpha) * c0 with alpha = 2/21
        let alpha = 2.0 / 21.0;
        let expected = alpha * 110.0 + (1.0 - alpha) * 100.0;
        assert!((ema(&[100.0, 110.0], 20) - expected).abs() < 1e-12);
    }

    #[test]
    fn rsi_is_100_when_losses_absent() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let snapshot = compute(&series(&closes));
        assert_eq!(snapshot.rsi, 100.0);
    }

    #[test]
    fn rsi_stays_within_bounds() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + ((i * 37) % 11) as f64 - 5.0)
            .collect();
        let snapshot = compute(&series(&closes));
        assert!(snapshot.rsi >= 0.0 && snapshot.rsi <= 100.0);
    }

    #[test]
    fn rsi_defaults_to_neutral_on_short_history() {
        let snapshot = compute(&series(&[100.0, 101.0, 99.0]));
        assert_eq!(snapshot.rsi, 50.0);
        assert_eq!(snapshot.atr, 0.0);
    }

    #[test]
    fn atr_matches_constant_range() {
        // every bar spans exactly 2.0 and closes mid-range of its neighbor
        let closes: Vec<f64> = vec![100.0; 20];
        let snapshot = compute(&series(&closes));
        assert!((snapshot.atr - 2.0).abs() < 1e-12);
    }

    #[test]
    fn vwap_weights_by_volume() {
        let mut candles = series(&[100.0, 200.0]);
        candles[0].volume = 30.0;
        candles[1].volume = 10.0;

        let snapshot = compute(&candles);
        assert!((snapshot.vwap - 125.0).abs() < 1e-12);
    }

    #[test]
    fn vwap_is_zero_without_volume() {
        let mut candles = series(&[100.0, 101.0]);
        for candle in &mut candles {
            candle.volume = 0.0;
        }
        assert_eq!(compute(&candles).vwap, 0.0);
    }

    #[test]
    fn resorts_unordered_input() {
        let mut candles = series(&[100.0, 105.0, 110.0]);
        candles.reverse();
        let snapshot = compute(&candles);
        assert_eq!(snapshot.close, 110.0);
    }
}
