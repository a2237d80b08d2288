//! Rule-based narrative commentary.
//!
//! Purely deterministic templating over the decision and pivot levels, so
//! the text can always be traced back to a numeric rule. The regime label
//! here is a simpler heuristic than the analytical classifier, tuned for
//! narrative audiences; the two are intentionally not unified.

use serde::{Deserialize, Serialize};

use crate::{AssetKind, Bias, DailyPivots, Decision, PivotLevels, UtcDateTime};
use crate::levels::round2;

/// Closest pivot on one side of the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestLevel {
    pub level: String,
    pub value: f64,
    pub dist_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeginnerGuidance {
    pub summary: String,
    pub simple_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub bias: Bias,
    pub regime: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelsOutlook {
    pub nearest_support: Option<NearestLevel>,
    pub nearest_resistance: Option<NearestLevel>,
    pub all_levels: Option<PivotLevels>,
}

/// Structured narrative output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    pub beginner: BeginnerGuidance,
    pub snapshot: MarketSnapshot,
    pub levels: LevelsOutlook,
    pub expert_action: String,
    pub playbook: Vec<String>,
    pub risk_tip: String,
    pub timestamp: UtcDateTime,
}

/// Synthesizes commentary for the current price from a decision and the
/// daily pivot set. `now` is caller-supplied so the function stays pure.
pub fn generate_commentary(
    asset: AssetKind,
    price: f64,
    decision: &Decision,
    pivots: Option<&DailyPivots>,
    market_open: bool,
    now: UtcDateTime,
) -> Commentary {
    let indicators = &decision.indicators_snapshot;
    let ema_20 = indicators.ema_20;
    let ema_50 = indicators.ema_50;
    let rsi = indicators.rsi;

    // Narrative regime label: diverging EMAs read as trending, an ATR
    // spike overrides everything.
    let mut regime = "Range Bound";
    if (ema_20 - ema_50).abs() > price * 0.005 {
        regime = "Trending";
    }
    if indicators.atr > price * 0.01 {
        regime = "High Volatility";
    }

    let mut reasons = Vec::new();
    if price > ema_20 {
        reasons.push(String::from("Price > EMA20"));
    } else {
        reasons.push(String::from("Price < EMA20"));
    }
    if rsi > 60.0 {
        reasons.push(String::from("Momentum Strong (RSI > 60)"));
    } else if rsi < 40.0 {
        reasons.push(String::from("Momentum Weak (RSI < 40)"));
    } else {
        reasons.push(String::from("RSI Neutral"));
    }

    let levels = pivots.map(|p| p.levels);
    let nearest_support = nearest_level(price, levels.as_ref(), Side::Support);
    let nearest_resistance = nearest_level(price, levels.as_ref(), Side::Resistance);

    let expert_action = match decision.bias {
        Bias::Bullish => String::from(
            "Look for pullbacks to nearest support (EMA20 or S1) to enter. Confirm with volume.",
        ),
        Bias::Bearish => String::from(
            "Sell rallies towards resistance (EMA20 or R1). Watch for rejection wicks.",
        ),
        Bias::Neutral => String::from(
            "Market is choppy/neutral. Trade edges of the range (Buy S1, Sell R1) or wait for a breakout.",
        ),
    };

    let mut playbook = Vec::new();
    if let Some(resistance) = &nearest_resistance {
        playbook.push(format!(
            "IF price breaks above {} ({}) with volume -> THEN Bullish Continuation.",
            resistance.level, resistance.value
        ));
    }
    if let Some(support) = &nearest_support {
        playbook.push(format!(
            "IF price breaks below {} ({}) -> THEN Bearish Breakdown to next level.",
            support.level, support.value
        ));
    }
    if rsi > 70.0 {
        playbook.push(String::from(
            "IF RSI prints Bearish Divergence -> THEN Possible Reversal top.",
        ));
    } else if rsi < 30.0 {
        playbook.push(String::from(
            "IF RSI prints Bullish Divergence -> THEN Possible Reversal bottom.",
        ));
    }

    let mut risk_tip = String::from("Always use a stop loss.");
    if regime == "High Volatility" {
        risk_tip = String::from("Volatility is high. Reduce position size and widen stops.");
    }
    if asset == AssetKind::Nifty && !market_open {
        risk_tip = String::from(
            "Standard Market Closed. Use these levels for next session planning.",
        );
    }

    let beginner = beginner_guidance(
        decision.bias,
        price,
        nearest_support.as_ref(),
        nearest_resistance.as_ref(),
    );

    Commentary {
        beginner,
        snapshot: MarketSnapshot {
            bias: decision.bias,
            regime: regime.to_owned(),
            reasons,
        },
        levels: LevelsOutlook {
            nearest_support,
            nearest_resistance,
            all_levels: levels,
        },
        expert_action,
        playbook,
        risk_tip,
        timestamp: now,
    }
}

enum Side {
    Support,
    Resistance,
}

/// Minimum-distance-fraction pivot strictly on the given side of `price`.
/// Zero price would make the distance fraction undefined, so the scan is
/// skipped; zero levels (absent data) never qualify.
fn nearest_level(price: f64, levels: Option<&PivotLevels>, side: Side) -> Option<NearestLevel> {
    let levels = levels?;
    if price <= 0.0 {
        return None;
    }

    let candidates: [(&str, f64); 3] = match side {
        Side::Support => [("S1", levels.s1), ("S2", levels.s2), ("S3", levels.s3)],
        Side::Resistance => [("R1", levels.r1), ("R2", levels.r2), ("R3", levels.r3)],
    };

    let mut best: Option<NearestLevel> = None;
    let mut best_dist = f64::INFINITY;
    for (name, value) in candidates {
        if value == 0.0 {
            continue;
        }
        let dist = match side {
            Side::Support if price > value => (price - value) / price,
            Side::Resistance if price < value => (value - price) / price,
            _ => continue,
        };
        if dist < best_dist {
            best_dist = dist;
            best = Some(NearestLevel {
                level: name.to_owned(),
                value,
                dist_pct: round2(dist * 100.0),
            });
        }
    }
    best
}

fn beginner_guidance(
    bias: Bias,
    price: f64,
    support: Option<&NearestLevel>,
    resistance: Option<&NearestLevel>,
) -> BeginnerGuidance {
    match bias {
        Bias::Bullish => {
            let summary = String::from(
                "The market is showing upward momentum. Price is above key averages and momentum is strong.",
            );
            let simple_action = match resistance {
                Some(r) => {
                    let dip_target = support
                        .map(|s| s.value.to_string())
                        .unwrap_or_else(|| ((price * 0.98) as i64).to_string());
                    format!(
                        "Wait for a dip towards ₹{dip_target} to buy, or wait for a clear break above ₹{} to confirm strength.",
                        r.value
                    )
                }
                None => String::from("Price is in an uptrend. Consider buying on small pullbacks."),
            };
            BeginnerGuidance {
                summary,
                simple_action,
            }
        }
        Bias::Bearish => {
            let summary = String::from(
                "The market is showing downward pressure. Price is below key levels and momentum is weak.",
            );
            let simple_action = match support {
                Some(s) => {
                    let bounce_target = resistance
                        .map(|r| r.value.to_string())
                        .unwrap_or_else(|| ((price * 1.02) as i64).to_string());
                    format!(
                        "Avoid buying. If you're trading, wait for price to break below ₹{} to confirm weakness, or wait for a bounce to ₹{bounce_target} to sell.",
                        s.value
                    )
                }
                None => String::from(
                    "Price is in a downtrend. Avoid buying or consider selling rallies.",
                ),
            };
            BeginnerGuidance {
                summary,
                simple_action,
            }
        }
        Bias::Neutral => {
            let summary = String::from(
                "The market is moving sideways without clear direction. This is a choppy, uncertain phase.",
            );
            let simple_action = match (support, resistance) {
                (Some(s), Some(r)) => format!(
                    "Best to wait and watch. If you must trade, buy near support (₹{}) and sell near resistance (₹{}). A breakout above ₹{} or below ₹{} will give clearer signals.",
                    s.value, r.value, r.value, s.value
                ),
                _ => String::from(
                    "Avoid trading until a clear trend emerges. Wait for a breakout signal.",
                ),
            };
            BeginnerGuidance {
                summary,
                simple_action,
            }
        }
    }
}
