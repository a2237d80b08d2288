//! Candle-source capability consumed by the pipeline's callers.
//!
//! The core never fetches data itself; hosts implement [`CandleSource`]
//! over whatever feed they have (exchange REST, files, a warehouse) and
//! hand the resulting series to the pipeline functions.

use thiserror::Error;

use crate::{AssetKind, Candle, Interval};

/// Source-side failures. Callers surface these; the pipeline itself only
/// ever sees the (possibly empty) series that survived.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no data available for '{symbol}'")]
    NoData { symbol: String },
    #[error("source failure: {0}")]
    Upstream(String),
}

/// Capability interface over a market data feed.
pub trait CandleSource {
    /// Ascending candle series, at most `limit` bars. May legitimately be
    /// empty when the feed has nothing.
    fn historical_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, SourceError>;

    fn latest_price(&self, symbol: &str) -> Result<f64, SourceError>;
}

/// Per-invocation asset context, passed explicitly by the caller.
/// Replaces any notion of a "currently selected" asset: the pipeline
/// holds no cross-call state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetProfile {
    pub kind: AssetKind,
    pub symbol: String,
    /// Suggested polling cadence for the host; slow free feeds get a
    /// longer one.
    pub refresh_secs: u64,
}

impl AssetProfile {
    pub fn nifty() -> Self {
        Self {
            kind: AssetKind::Nifty,
            symbol: String::from("^NSEI"),
            refresh_secs: 15,
        }
    }

    pub fn bitcoin() -> Self {
        Self {
            kind: AssetKind::Bitcoin,
            symbol: String::from("BTC/USDT"),
            refresh_secs: 3,
        }
    }

    pub fn for_kind(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Nifty => Self::nifty(),
            AssetKind::Bitcoin => Self::bitcoin(),
        }
    }
}

/// In-memory source backed by a fixed series. Stands in for network
/// connectors in tests and the CLI's sample mode.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    candles: Vec<Candle>,
}

impl FixtureSource {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }
}

impl CandleSource for FixtureSource {
    fn historical_candles(
        &self,
        _symbol: &str,
        _interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, SourceError> {
        let start = self.candles.len().saturating_sub(limit);
        Ok(self.candles[start..].to_vec())
    }

    fn latest_price(&self, symbol: &str) -> Result<f64, SourceError> {
        self.candles
            .last()
            .map(|c| c.close)
            .ok_or_else(|| SourceError::NoData {
                symbol: symbol.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UtcDateTime;

    fn candle(secs: i64, close: f64) -> Candle {
        Candle::new(
            UtcDateTime::from_unix_timestamp(secs).expect("in range"),
            close,
            close,
            close,
            close,
            1.0,
            "fixture",
        )
        .expect("valid candle")
    }

    #[test]
    fn fixture_source_serves_tail() {
        let source = FixtureSource::new(vec![candle(0, 1.0), candle(60, 2.0), candle(120, 3.0)]);
        let tail = source
            .historical_candles("X", Interval::OneMinute, 2)
            .expect("has data");
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].close, 2.0);
        assert_eq!(source.latest_price("X").expect("has data"), 3.0);
    }

    #[test]
    fn empty_fixture_reports_no_data() {
        let source = FixtureSource::default();
        assert!(source
            .historical_candles("X", Interval::OneMinute, 10)
            .expect("empty ok")
            .is_empty());
        assert!(matches!(
            source.latest_price("X"),
            Err(SourceError::NoData { .. })
        ));
    }

    #[test]
    fn profiles_carry_asset_defaults() {
        let profile = AssetProfile::for_kind(AssetKind::Bitcoin);
        assert_eq!(profile.symbol, "BTC/USDT");
        assert!(profile.refresh_secs < AssetProfile::nifty().refresh_secs);
    }
}
