//! Market regime classification.
//!
//! Deliberately independent from the simpler narrative heuristic inside
//! the expert commentary: this one is tuned for the analytical consumer
//! and checked first against news/volatility shocks.

use serde::{Deserialize, Serialize};

use crate::FeatureSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    TrendingBullish,
    TrendingBearish,
    RangeBound,
    VolatileNews,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeAssessment {
    pub regime: Regime,
    pub confidence: f64,
    pub details: Vec<String>,
}

/// Classifies the market regime from a snapshot.
///
/// `adx` is not produced by the feature engine; callers without a trend
/// strength source pass 0.0, which leaves the trend branches unreachable
/// and the classifier oscillating between VOLATILE_NEWS and RANGE_BOUND.
/// First matching rule wins.
pub fn classify(snapshot: &FeatureSnapshot, adx: f64, news_impact_score: f64) -> RegimeAssessment {
    let close = snapshot.close;
    let ema_20 = snapshot.ema_20;
    let ema_50 = snapshot.ema_50;

    // 1% ATR threshold treated as a news-grade volatility spike
    if news_impact_score > 70.0 || snapshot.atr > close * 0.01 {
        return RegimeAssessment {
            regime: Regime::VolatileNews,
            confidence: 80.0,
            details: vec![String::from(
                "High volatility or significant news impact detected.",
            )],
        };
    }

    if adx > 25.0 {
        if close > ema_20 && ema_20 > ema_50 {
            return RegimeAssessment {
                regime: Regime::TrendingBullish,
                confidence: (70.0 + (adx - 25.0)).min(100.0),
                details: vec![format!("Strong uptrend (ADX {adx:.1}). Price above EMAs.")],
            };
        }
        if close < ema_20 && ema_20 < ema_50 {
            return RegimeAssessment {
                regime: Regime::TrendingBearish,
                confidence: (70.0 + (adx - 25.0)).min(100.0),
                details: vec![format!("Strong downtrend (ADX {adx:.1}). Price below EMAs.")],
            };
        }
    }

    RegimeAssessment {
        regime: Regime::RangeBound,
        confidence: 60.0,
        details: vec![String::from("Low ADX indicates sideways market.")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(close: f64, ema_20: f64, ema_50: f64, atr: f64) -> FeatureSnapshot {
        FeatureSnapshot {
            ema_20,
            ema_50,
            atr,
            close,
            ..FeatureSnapshot::default()
        }
    }

    #[test]
    fn news_shock_wins_over_trend() {
        let assessment = classify(&snapshot(110.0, 105.0, 100.0, 0.0), 40.0, 90.0);
        assert_eq!(assessment.regime, Regime::VolatileNews);
        assert_eq!(assessment.confidence, 80.0);
    }

    #[test]
    fn atr_spike_is_volatile_even_without_news() {
        // atr 2.0 > 1% of close 110
        let assessment = classify(&snapshot(110.0, 105.0, 100.0, 2.0), 0.0, 0.0);
        assert_eq!(assessment.regime, Regime::VolatileNews);
    }

    #[test]
    fn strong_adx_with_aligned_emas_trends_bullish() {
        let assessment = classify(&snapshot(110.0, 105.0, 100.0, 0.5), 35.0, 0.0);
        assert_eq!(assessment.regime, Regime::TrendingBullish);
        assert_eq!(assessment.confidence, 80.0);
    }

    #[test]
    fn trend_confidence_caps_at_100() {
        let assessment = classify(&snapshot(90.0, 95.0, 100.0, 0.5), 80.0, 0.0);
        assert_eq!(assessment.regime, Regime::TrendingBearish);
        assert_eq!(assessment.confidence, 100.0);
    }

    #[test]
    fn defaults_to_range_bound() {
        let assessment = classify(&snapshot(100.0, 100.0, 100.0, 0.5), 0.0, 0.0);
        assert_eq!(assessment.regime, Regime::RangeBound);
        assert_eq!(assessment.confidence, 60.0);
    }
}
