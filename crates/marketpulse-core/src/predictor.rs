//! Next-session open prediction from prior-session momentum and pivot
//! proximity. No external news inputs; everything derives from the bar,
//! the levels, and the latest decision.

use serde::{Deserialize, Serialize};

use crate::levels::round2;
use crate::{Bias, DailyPivots, Decision, UtcDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPrediction {
    pub predicted_open: f64,
    pub gap_direction: GapDirection,
    pub gap_pct: f64,
    pub confidence: f64,
    pub last_close: f64,
    pub reasons: Vec<String>,
    pub suggestion: String,
    pub timestamp: UtcDateTime,
}

/// Predicts the next open from the prior session's bar.
///
/// Momentum continuation fires when a confident directional decision
/// closed near the session extreme; the level-proximity overlay can then
/// raise confidence or set a direction, but never flips one the momentum
/// rule already committed to.
pub fn predict_open(
    last_close: f64,
    last_high: f64,
    last_low: f64,
    pivots: Option<&DailyPivots>,
    decision: &Decision,
    now: UtcDateTime,
) -> OpenPrediction {
    let daily_range = last_high - last_low;
    let close_position = if daily_range > 0.0 {
        (last_close - last_low) / daily_range
    } else {
        0.5
    };

    let mut direction = GapDirection::Flat;
    let mut gap_pct = 0.0;
    let mut predicted_open = last_close;
    let mut confidence: f64 = 50.0;
    let mut reasons = Vec::new();

    if decision.bias == Bias::Bullish && decision.buy_confidence > 70.0 && close_position > 0.7 {
        direction = GapDirection::Up;
        gap_pct = 0.3;
        predicted_open = last_close * (1.0 + gap_pct / 100.0);
        confidence = 65.0;
        reasons.push(String::from("Strong bullish close near session high"));
        reasons.push(format!("Buy confidence: {}%", decision.buy_confidence));
    } else if decision.bias == Bias::Bearish
        && decision.sell_confidence > 70.0
        && close_position < 0.3
    {
        direction = GapDirection::Down;
        gap_pct = -0.3;
        predicted_open = last_close * (1.0 + gap_pct / 100.0);
        confidence = 65.0;
        reasons.push(String::from("Weak bearish close near session low"));
        reasons.push(format!("Sell pressure: {}%", decision.sell_confidence));
    }

    let (r1, s1) = pivots
        .map(|p| (p.levels.r1, p.levels.s1))
        .unwrap_or((0.0, 0.0));

    if r1 != 0.0 && last_close > r1 * 0.998 {
        if direction != GapDirection::Down {
            direction = GapDirection::Up;
        }
        gap_pct = 0.2;
        predicted_open = last_close * 1.002;
        confidence = confidence.max(60.0);
        reasons.push(format!("Close above resistance (R1: {r1})"));
    }

    if s1 != 0.0 && last_close < s1 * 1.002 {
        if direction != GapDirection::Up {
            direction = GapDirection::Down;
        }
        gap_pct = -0.2;
        predicted_open = last_close * 0.998;
        confidence = confidence.max(60.0);
        reasons.push(format!("Close below support (S1: {s1})"));
    }

    if reasons.is_empty() {
        reasons.push(String::from("Neutral momentum - expect flat opening"));
        reasons.push(String::from("No clear overnight catalysts detected"));
    }

    let suggestion = match direction {
        GapDirection::Up => format!(
            "If opens above {predicted_open:.0}, look for continuation or wait for pullback to {last_close:.0}"
        ),
        GapDirection::Down => format!(
            "If opens below {predicted_open:.0}, avoid catching falling knife. Wait for stabilization"
        ),
        GapDirection::Flat => format!(
            "Flat opening expected near {last_close:.0}. Trade within range or wait for breakout"
        ),
    };

    OpenPrediction {
        predicted_open: round2(predicted_open),
        gap_direction: direction,
        gap_pct: round2(gap_pct),
        confidence,
        last_close,
        reasons,
        suggestion,
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calculate_pivots, Action, FeatureSnapshot};

    fn now() -> UtcDateTime {
        UtcDateTime::from_unix_timestamp(1_700_000_000).expect("in range")
    }

    fn decision(bias: Bias, buy: f64, sell: f64) -> Decision {
        Decision {
            action: Action::Neutral,
            bias,
            buy_confidence: buy,
            sell_confidence: sell,
            rationale: Vec::new(),
            indicators_snapshot: FeatureSnapshot::default(),
            options_signal: None,
            intraday_volatility: None,
        }
    }

    fn pivots_for(high: f64, low: f64, close: f64) -> DailyPivots {
        DailyPivots {
            basis: String::from("Daily (Previous Day)"),
            date: String::from("2024-01-01"),
            levels: calculate_pivots(high, low, close),
        }
    }

    #[test]
    fn neutral_mid_range_close_predicts_flat() {
        let prediction = predict_open(
            100.0,
            102.0,
            98.0,
            None,
            &decision(Bias::Neutral, 0.0, 0.0),
            now(),
        );
        assert_eq!(prediction.gap_direction, GapDirection::Flat);
        assert_eq!(prediction.predicted_open, 100.0);
        assert_eq!(prediction.gap_pct, 0.0);
        assert_eq!(prediction.confidence, 50.0);
        assert!(prediction.reasons[0].contains("Neutral momentum"));
    }

    #[test]
    fn bullish_close_near_high_gaps_up() {
        let prediction = predict_open(
            101.5,
            102.0,
            98.0,
            None,
            &decision(Bias::Bullish, 80.0, 0.0),
            now(),
        );
        assert_eq!(prediction.gap_direction, GapDirection::Up);
        assert_eq!(prediction.gap_pct, 0.3);
        assert_eq!(prediction.confidence, 65.0);
        assert_eq!(prediction.predicted_open, round2(101.5 * 1.003));
    }

    #[test]
    fn bearish_close_near_low_gaps_down() {
        let prediction = predict_open(
            98.5,
            102.0,
            98.0,
            None,
            &decision(Bias::Bearish, 0.0, 80.0),
            now(),
        );
        assert_eq!(prediction.gap_direction, GapDirection::Down);
        assert_eq!(prediction.gap_pct, -0.3);
    }

    #[test]
    fn close_above_r1_triggers_up_overlay() {
        // r1 = 106.33 for 105/95/102; close within 0.2% above it
        let pivots = pivots_for(105.0, 95.0, 102.0);
        let prediction = predict_open(
            106.5,
            107.0,
            100.0,
            Some(&pivots),
            &decision(Bias::Neutral, 0.0, 0.0),
            now(),
        );
        assert_eq!(prediction.gap_direction, GapDirection::Up);
        assert_eq!(prediction.gap_pct, 0.2);
        assert_eq!(prediction.confidence, 60.0);
        assert!(prediction.reasons[0].contains("R1"));
    }

    #[test]
    fn down_momentum_is_not_flipped_by_r1_overlay() {
        // bearish continuation fires first; the R1 proximity rule may not
        // overwrite the committed direction
        let pivots = pivots_for(105.0, 95.0, 102.0);
        let prediction = predict_open(
            106.4,
            130.0,
            106.0,
            Some(&pivots),
            &decision(Bias::Bearish, 0.0, 80.0),
            now(),
        );
        assert_eq!(prediction.gap_direction, GapDirection::Down);
    }

    #[test]
    fn zero_range_session_reads_as_mid_close() {
        let prediction = predict_open(
            100.0,
            100.0,
            100.0,
            None,
            &decision(Bias::Bullish, 90.0, 0.0),
            now(),
        );
        // close_position defaults to 0.5, so no continuation fires
        assert_eq!(prediction.gap_direction, GapDirection::Flat);
    }
}
