//! Resamples a base candle series into coarser fixed-width buckets.
//!
//! Needed because free index feeds often serve only a 1m base series while
//! the chart wants 2m/3m/10m views. Buckets are UTC-epoch-aligned; empty
//! buckets are omitted rather than gap-filled.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Candle, Interval};

/// Resampled OHLCV bucket in the chart wire shape (`time` = unix seconds
/// of the bucket start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedCandle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Resamples `candles` into non-overlapping buckets of `target` width.
///
/// Per bucket: first open, max high, min low, last close, summed volume.
/// Relies on the caller-ordered ascending series invariant; an empty input
/// yields an empty output.
pub fn resample(candles: &[Candle], target: Interval) -> Vec<AggregatedCandle> {
    let width = target.duration_secs();
    let mut out: Vec<AggregatedCandle> = Vec::new();

    for candle in candles {
        let ts = candle.ts.unix_timestamp();
        let bucket = ts - ts.rem_euclid(width);

        match out.last_mut() {
            Some(current) if current.time == bucket => {
                current.high = current.high.max(candle.high);
                current.low = current.low.min(candle.low);
                current.close = candle.close;
                current.volume += candle.volume;
            }
            _ => out.push(AggregatedCandle {
                time: bucket,
                open: candle.open,
                high: candle.high,
                low: candle.low,
                close: candle.close,
                volume: candle.volume,
            }),
        }
    }

    out
}

/// Parses `target` and resamples; an unrecognized interval degrades to an
/// empty result (soft failure) instead of an error, mirroring how the
/// chart endpoint treats it.
pub fn resample_str(candles: &[Candle], target: &str) -> Vec<AggregatedCandle> {
    match Interval::from_str(target) {
        Ok(interval) => resample(candles, interval),
        Err(error) => {
            debug!(%target, %error, "unrecognized resample interval");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;

    fn candle(secs: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
        Candle::new(
            UtcDateTime::from_unix_timestamp(secs).expect("in range"),
            open,
            high,
            low,
            close,
            volume,
            "test",
        )
        .expect("valid candle")
    }

    #[test]
    fn merges_minute_candles_into_five_minute_buckets() {
        let candles = vec![
            candle(0, 10.0, 12.0, 9.0, 11.0, 100.0),
            candle(60, 11.0, 15.0, 10.0, 14.0, 200.0),
            candle(240, 14.0, 14.5, 13.0, 13.5, 50.0),
            candle(300, 13.5, 16.0, 13.0, 15.0, 75.0),
        ];

        let buckets = resample(&candles, Interval::FiveMinutes);
        assert_eq!(buckets.len(), 2);

        let first = &buckets[0];
        assert_eq!(first.time, 0);
        assert_eq!(first.open, 10.0);
        assert_eq!(first.high, 15.0);
        assert_eq!(first.low, 9.0);
        assert_eq!(first.close, 13.5);
        assert_eq!(first.volume, 350.0);

        let second = &buckets[1];
        assert_eq!(second.time, 300);
        assert_eq!(second.open, 13.5);
        assert_eq!(second.volume, 75.0);
    }

    #[test]
    fn omits_empty_buckets() {
        let candles = vec![
            candle(0, 10.0, 10.0, 10.0, 10.0, 1.0),
            // next candle is two full buckets later
            candle(600, 11.0, 11.0, 11.0, 11.0, 1.0),
        ];

        let buckets = resample(&candles, Interval::FiveMinutes);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].time, 0);
        assert_eq!(buckets[1].time, 600);
    }

    #[test]
    fn identity_resample_preserves_series() {
        let candles = vec![
            candle(0, 10.0, 12.0, 9.0, 11.0, 100.0),
            candle(60, 11.0, 13.0, 10.0, 12.0, 150.0),
        ];

        let buckets = resample(&candles, Interval::OneMinute);
        assert_eq!(buckets.len(), 2);
        for (bucket, source) in buckets.iter().zip(&candles) {
            assert_eq!(bucket.time, source.ts.unix_timestamp());
            assert_eq!(bucket.open, source.open);
            assert_eq!(bucket.high, source.high);
            assert_eq!(bucket.low, source.low);
            assert_eq!(bucket.close, source.close);
            assert_eq!(bucket.volume, source.volume);
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(resample(&[], Interval::FiveMinutes).is_empty());
    }

    #[test]
    fn unrecognized_interval_degrades_to_empty() {
        let candles = vec![candle(0, 10.0, 10.0, 10.0, 10.0, 1.0)];
        assert!(resample_str(&candles, "7m").is_empty());
        assert_eq!(resample_str(&candles, "1m").len(), 1);
    }
}
