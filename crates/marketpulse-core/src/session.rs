//! NSE session-hours check for NIFTY.
//!
//! The clock is caller-supplied; the core never reads system time on its
//! own, which keeps session-dependent rules replayable in tests.

use serde::{Deserialize, Serialize};
use time::{Time, UtcOffset, Weekday};

use crate::UtcDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub is_open: bool,
    pub status: SessionState,
    pub message: String,
    pub timestamp: String,
}

/// NSE trading hours: 09:15-15:30 IST, Monday through Friday.
pub fn nifty_market_status(now: UtcDateTime) -> MarketStatus {
    let ist = UtcOffset::from_hms(5, 30, 0).expect("IST offset is valid");
    let now_ist = now.into_inner().to_offset(ist);

    let stamp = format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} IST",
        now_ist.year(),
        u8::from(now_ist.month()),
        now_ist.day(),
        now_ist.hour(),
        now_ist.minute(),
        now_ist.second()
    );

    if matches!(now_ist.weekday(), Weekday::Saturday | Weekday::Sunday) {
        return MarketStatus {
            is_open: false,
            status: SessionState::Closed,
            message: String::from("Market Closed (Weekend)"),
            timestamp: stamp,
        };
    }

    let open = Time::from_hms(9, 15, 0).expect("valid time");
    let close = Time::from_hms(15, 30, 0).expect("valid time");
    let current = now_ist.time();

    if current >= open && current <= close {
        MarketStatus {
            is_open: true,
            status: SessionState::Open,
            message: String::from("Market Open"),
            timestamp: stamp,
        }
    } else {
        MarketStatus {
            is_open: false,
            status: SessionState::Closed,
            message: String::from("Market Closed (Outside Hours)"),
            timestamp: stamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> UtcDateTime {
        UtcDateTime::parse(rfc3339).expect("must parse")
    }

    #[test]
    fn open_during_weekday_session() {
        // 2024-01-03 is a Wednesday; 06:00 UTC = 11:30 IST
        let status = nifty_market_status(at("2024-01-03T06:00:00Z"));
        assert!(status.is_open);
        assert_eq!(status.status, SessionState::Open);
        assert!(status.timestamp.ends_with("IST"));
    }

    #[test]
    fn closed_on_weekend() {
        // 2024-01-06 is a Saturday
        let status = nifty_market_status(at("2024-01-06T06:00:00Z"));
        assert!(!status.is_open);
        assert_eq!(status.message, "Market Closed (Weekend)");
    }

    #[test]
    fn closed_outside_hours() {
        // 16:00 UTC = 21:30 IST on a Wednesday
        let status = nifty_market_status(at("2024-01-03T16:00:00Z"));
        assert!(!status.is_open);
        assert_eq!(status.message, "Market Closed (Outside Hours)");
    }

    #[test]
    fn session_boundaries_are_inclusive() {
        // 03:45 UTC = 09:15 IST exactly
        assert!(nifty_market_status(at("2024-01-03T03:45:00Z")).is_open);
        // 10:00 UTC = 15:30 IST exactly
        assert!(nifty_market_status(at("2024-01-03T10:00:00Z")).is_open);
        // one second later
        assert!(!nifty_market_status(at("2024-01-03T10:00:01Z")).is_open);
    }
}
