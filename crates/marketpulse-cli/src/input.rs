//! Candle series loading: JSON files or a bundled deterministic sample.

use std::fs;
use std::path::Path;

use marketpulse_core::{Candle, UtcDateTime};

use crate::cli::SeriesInput;
use crate::error::CliError;

pub fn load_series(series: &SeriesInput) -> Result<Vec<Candle>, CliError> {
    match (&series.input, series.sample) {
        (Some(path), _) => read_candles(path),
        (None, true) => Ok(sample_intraday()),
        (None, false) => Err(CliError::Command(String::from(
            "provide --input <file.json> or --sample",
        ))),
    }
}

pub fn read_candles(path: &Path) -> Result<Vec<Candle>, CliError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Small multiplicative congruential generator so sample data is
/// reproducible across runs and platforms.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn walk(seed: u64, start_secs: i64, step_secs: i64, bars: usize, base: f64, swing: f64) -> Vec<Candle> {
    let mut rng = Lcg(seed);
    let mut price = base;
    let mut out = Vec::with_capacity(bars);

    for i in 0..bars {
        let drift = (rng.next_f64() - 0.48) * swing;
        let open = price;
        let close = (price + drift).max(1.0);
        let high = open.max(close) + rng.next_f64() * swing * 0.25;
        let low = (open.min(close) - rng.next_f64() * swing * 0.25).max(0.5);
        let volume = 1_000.0 + (rng.next_f64() * 500.0).floor();

        let ts = UtcDateTime::from_unix_timestamp(start_secs + i as i64 * step_secs)
            .expect("sample timestamps are in range");
        out.push(
            Candle::new(ts, open, high, low, close, volume, "sample")
                .expect("sample walk stays within candle invariants"),
        );
        price = close;
    }

    out
}

/// 240 one-minute bars starting at the 2024-01-03 NSE open.
pub fn sample_intraday() -> Vec<Candle> {
    walk(0x5eed_cafe, 1_704_253_500, 60, 240, 22_000.0, 40.0)
}

/// 30 daily bars ending just before the intraday sample.
pub fn sample_daily() -> Vec<Candle> {
    walk(0xdead_beef, 1_701_388_800, 86_400, 30, 22_000.0, 300.0)
}
