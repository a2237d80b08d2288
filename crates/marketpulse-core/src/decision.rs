//! Two-track confidence scoring over an indicator snapshot.
//!
//! Buy and sell evidence accumulate independently; a trade signal needs
//! one track to clear 60 points *and* beat the other. Every point awarded
//! leaves a rationale line so the output stays auditable.

use serde::{Deserialize, Serialize};

use crate::{AssetKind, FeatureSnapshot};

const ACTION_THRESHOLD: f64 = 60.0;
const OPTIONS_SPREAD: f64 = 15.0;
const OPTIONS_CONFIDENCE_CAP: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Sell,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionsDirection {
    Call,
    Put,
    Neutral,
}

/// Options overlay derived from the confidence spread (NIFTY only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsSignal {
    pub direction: OptionsDirection,
    pub confidence: f64,
    pub reasoning: String,
}

/// Scored trading decision with full rationale and the snapshot it was
/// derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub bias: Bias,
    pub buy_confidence: f64,
    pub sell_confidence: f64,
    pub rationale: Vec<String>,
    pub indicators_snapshot: FeatureSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_signal: Option<OptionsSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intraday_volatility: Option<f64>,
}

impl Decision {
    fn neutral(rationale: Vec<String>, snapshot: FeatureSnapshot) -> Self {
        Self {
            action: Action::Neutral,
            bias: Bias::Neutral,
            buy_confidence: 0.0,
            sell_confidence: 0.0,
            rationale,
            indicators_snapshot: snapshot,
            options_signal: None,
            intraday_volatility: None,
        }
    }
}

/// Scores `snapshot` into a BUY/SELL/NEUTRAL decision.
///
/// `market_open` only matters for NIFTY: it gates the VWAP rule (an
/// intraday signal) and adds a staleness warning to the rationale when the
/// session is closed.
pub fn analyze(snapshot: &FeatureSnapshot, asset: AssetKind, market_open: bool) -> Decision {
    if snapshot.close == 0.0 {
        return Decision::neutral(
            vec![String::from("Price data missing or zero.")],
            snapshot.clone(),
        );
    }

    let close = snapshot.close;
    let ema_20 = snapshot.ema_20;
    let ema_50 = snapshot.ema_50;
    let rsi = snapshot.rsi;
    let vwap = snapshot.vwap;

    let mut buy: f64 = 0.0;
    let mut sell: f64 = 0.0;
    let mut rationale = Vec::new();

    // Trend
    if close > ema_20 {
        buy += 20.0;
        rationale.push(String::from("Price above EMA20 (Short-term Bullish)."));
    }
    if ema_20 > ema_50 {
        buy += 20.0;
        rationale.push(String::from("EMA20 > EMA50 (Trend Alignment)."));
    }
    if close < ema_20 {
        sell += 20.0;
        rationale.push(String::from("Price below EMA20 (Short-term Bearish)."));
    }
    if ema_20 < ema_50 {
        sell += 20.0;
        rationale.push(String::from("EMA20 < EMA50 (Trend Alignment)."));
    }

    // Momentum (RSI), exclusive bands per track
    if rsi > 50.0 && rsi < 70.0 {
        buy += 10.0;
        rationale.push(String::from("RSI Bullish Momentum (50-70)."));
    } else if rsi >= 70.0 {
        sell += 30.0;
        rationale.push(String::from("RSI Overbought (>70) - Partial Reversal Risk."));
    }
    if rsi > 30.0 && rsi < 50.0 {
        sell += 10.0;
        rationale.push(String::from("RSI Bearish Momentum (30-50)."));
    } else if rsi <= 30.0 {
        buy += 30.0;
        rationale.push(String::from("RSI Oversold (<30) - Value Territory."));
    }

    // Asset specifics
    match asset {
        AssetKind::Nifty => {
            if !market_open {
                rationale.push(String::from(
                    "[WARN] Market Closed - Signals based on EOD/Last Tick.",
                ));
            }
            // VWAP is an intraday signal only
            if market_open && vwap > 0.0 {
                if close > vwap {
                    buy += 10.0;
                    rationale.push(String::from("Price > VWAP (Intraday Strength)."));
                } else {
                    sell += 10.0;
                    rationale.push(String::from("Price < VWAP (Intraday Weakness)."));
                }
            }
        }
        AssetKind::Bitcoin => {
            if rsi > 60.0 && close > ema_20 {
                buy += 10.0;
                rationale.push(String::from("Strong Crypto Momentum."));
            }
            if rsi < 40.0 && close < ema_20 {
                sell += 10.0;
                rationale.push(String::from("Crypto Clean Breakdown."));
            }
        }
    }

    let buy = buy.min(100.0);
    let sell = sell.min(100.0);

    let (action, bias) = if buy > ACTION_THRESHOLD && buy > sell {
        (Action::Buy, Bias::Bullish)
    } else if sell > ACTION_THRESHOLD && sell > buy {
        (Action::Sell, Bias::Bearish)
    } else {
        rationale.push(String::from(
            "Confidence below threshold or conflicting signals.",
        ));
        (Action::Neutral, Bias::Neutral)
    };

    let (options_signal, intraday_volatility) = if asset == AssetKind::Nifty {
        (
            Some(options_signal(buy, sell)),
            Some((rsi - 50.0).abs() * 2.0),
        )
    } else {
        (None, None)
    };

    Decision {
        action,
        bias,
        buy_confidence: buy,
        sell_confidence: sell,
        rationale,
        indicators_snapshot: snapshot.clone(),
        options_signal,
        intraday_volatility,
    }
}

fn options_signal(buy: f64, sell: f64) -> OptionsSignal {
    if buy > sell + OPTIONS_SPREAD {
        OptionsSignal {
            direction: OptionsDirection::Call,
            confidence: buy.min(OPTIONS_CONFIDENCE_CAP),
            reasoning: String::from("Bullish momentum favors CALL options"),
        }
    } else if sell > buy + OPTIONS_SPREAD {
        OptionsSignal {
            direction: OptionsDirection::Put,
            confidence: sell.min(OPTIONS_CONFIDENCE_CAP),
            reasoning: String::from("Bearish momentum favors PUT options"),
        }
    } else {
        OptionsSignal {
            direction: OptionsDirection::Neutral,
            confidence: buy.max(sell),
            reasoning: String::from("Mixed signals - consider straddles or avoid options"),
        }
    }
}
