//! Engine configuration.

use chrono::Timelike;
use chrono_tz::Tz;
use kudos_core::EventTime;

use crate::error::{AchievementError, Result};

/// Which wall clock "local time" means for time-of-day rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalClock {
    /// The offset recorded in the event's own timestamp
    EventOffset,
    /// Coordinated Universal Time
    Utc,
    /// A named IANA time zone
    Zone(Tz),
}

impl LocalClock {
    /// Hour of day (0-23) of `timestamp` on this clock.
    ///
    /// A wall-clock time without an offset is already agent-local: it is
    /// read as-is under `EventOffset` and cannot be placed on any other
    /// clock, which yields `None`.
    pub fn local_hour(&self, timestamp: &EventTime) -> Option<u32> {
        match (self, timestamp) {
            (LocalClock::EventOffset, ts) => Some(ts.wall_clock_hour()),
            (LocalClock::Utc, EventTime::Aware(ts)) => {
                Some(ts.with_timezone(&chrono::Utc).hour())
            }
            (LocalClock::Zone(tz), EventTime::Aware(ts)) => {
                Some(ts.with_timezone(tz).hour())
            }
            (_, EventTime::Local(_)) => None,
        }
    }
}

impl std::fmt::Display for LocalClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalClock::EventOffset => f.write_str("event"),
            LocalClock::Utc => f.write_str("utc"),
            LocalClock::Zone(tz) => f.write_str(tz.name()),
        }
    }
}

impl std::str::FromStr for LocalClock {
    type Err = AchievementError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "event" | "event-offset" => Ok(LocalClock::EventOffset),
            "utc" | "z" => Ok(LocalClock::Utc),
            _ => s
                .parse::<Tz>()
                .map(LocalClock::Zone)
                .map_err(|_| AchievementError::InvalidClock(s.to_string())),
        }
    }
}

/// Configuration for the achievement engine.
///
/// No `Default`: callers choose whose clock `night_owl` reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Clock used to decide the local hour of an event
    pub clock: LocalClock,
}

impl EngineConfig {
    /// Create a configuration with the given clock.
    pub fn new(clock: LocalClock) -> Self {
        Self { clock }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: LocalClock) -> Self {
        self.clock = clock;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> EventTime {
        match chrono::DateTime::parse_from_rfc3339(s) {
            Ok(aware) => EventTime::Aware(aware),
            Err(_) => EventTime::Local(
                chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap(),
            ),
        }
    }

    #[test]
    fn test_parse_clock_keywords() {
        assert_eq!("event".parse::<LocalClock>().unwrap(), LocalClock::EventOffset);
        assert_eq!("UTC".parse::<LocalClock>().unwrap(), LocalClock::Utc);
        assert_eq!(
            "Europe/Berlin".parse::<LocalClock>().unwrap(),
            LocalClock::Zone(chrono_tz::Europe::Berlin)
        );
    }

    #[test]
    fn test_parse_clock_invalid() {
        let err = "Mars/Olympus".parse::<LocalClock>().unwrap_err();
        assert_eq!(err, AchievementError::InvalidClock("Mars/Olympus".to_string()));
    }

    #[test]
    fn test_local_hour_per_clock() {
        let t = ts("2026-01-15T03:30:00+09:00");
        assert_eq!(LocalClock::EventOffset.local_hour(&t), Some(3));
        assert_eq!(LocalClock::Utc.local_hour(&t), Some(18));
        // Berlin is UTC+1 in January
        assert_eq!(LocalClock::Zone(chrono_tz::Europe::Berlin).local_hour(&t), Some(19));
    }

    #[test]
    fn test_local_hour_of_offsetless_time() {
        let t = ts("2026-01-15T03:30:00");
        assert_eq!(LocalClock::EventOffset.local_hour(&t), Some(3));
        assert_eq!(LocalClock::Utc.local_hour(&t), None);
        assert_eq!(LocalClock::Zone(chrono_tz::Asia::Tokyo).local_hour(&t), None);
    }

    #[test]
    fn test_clock_display_round_trips() {
        for clock in [
            LocalClock::EventOffset,
            LocalClock::Utc,
            LocalClock::Zone(chrono_tz::America::New_York),
        ] {
            assert_eq!(clock.to_string().parse::<LocalClock>().unwrap(), clock);
        }
    }

    #[test]
    fn test_engine_config_with_clock() {
        let config = EngineConfig::new(LocalClock::Utc).with_clock(LocalClock::EventOffset);
        assert_eq!(config.clock, LocalClock::EventOffset);
    }
}
