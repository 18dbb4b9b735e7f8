//! Event model - one recorded invocation by an agent.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EventId;

/// An event is one recorded invocation/action by an agent.
///
/// Events are immutable once recorded. Histories handed to the
/// achievement engine are in chronological order, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    #[serde(default)]
    pub id: EventId,

    /// Acting agent
    pub agent_name: String,

    /// Logical work session
    pub session_id: String,

    /// Project or ticket the work belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// When it happened: RFC 3339 with offset, or a local wall-clock
    /// time without one (`2026-03-01T03:00:00`, `2026-03-01 03:00:00`)
    pub timestamp: String,

    /// What was the result
    pub outcome: Outcome,

    /// Elapsed time of the invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    /// Monetary cost of the invocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
}

impl Event {
    /// Create a new event stamped with the current time.
    pub fn new(
        agent_name: impl Into<String>,
        session_id: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            id: EventId::default(),
            agent_name: agent_name.into(),
            session_id: session_id.into(),
            project_id: None,
            timestamp: Utc::now().to_rfc3339(),
            outcome,
            duration_seconds: None,
            cost_usd: None,
        }
    }

    /// Shorthand for a successful event.
    pub fn success(agent_name: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::new(agent_name, session_id, Outcome::Success)
    }

    /// Shorthand for a failed event.
    pub fn error(agent_name: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::new(agent_name, session_id, Outcome::Error)
    }

    /// Set the project/ticket.
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the raw timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Set the cost.
    pub fn with_cost(mut self, usd: f64) -> Self {
        self.cost_usd = Some(usd);
        self
    }

    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Whether the invocation failed.
    pub fn is_error(&self) -> bool {
        self.outcome == Outcome::Error
    }

    /// Parse the timestamp.
    ///
    /// Offset-carrying RFC 3339 values become [`EventTime::Aware`];
    /// offset-less wall-clock values become [`EventTime::Local`].
    /// Returns `None` for anything else.
    pub fn parsed_timestamp(&self) -> Option<EventTime> {
        let raw = self.timestamp.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(EventTime::Aware(ts));
        }
        LOCAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(EventTime::Local)
    }

    /// Whether `other` records the same invocation, ignoring `id`.
    pub fn same_record(&self, other: &Event) -> bool {
        self.agent_name == other.agent_name
            && self.session_id == other.session_id
            && self.project_id == other.project_id
            && self.timestamp == other.timestamp
            && self.outcome == other.outcome
            && self.duration_seconds == other.duration_seconds
            && self.cost_usd == other.cost_usd
    }
}

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A parsed event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// Instant with its recorded UTC offset
    Aware(DateTime<FixedOffset>),
    /// Wall-clock time already in the agent's local time, no offset
    Local(NaiveDateTime),
}

impl EventTime {
    /// Hour of day as written in the timestamp.
    pub fn wall_clock_hour(&self) -> u32 {
        match self {
            EventTime::Aware(ts) => ts.hour(),
            EventTime::Local(ts) => ts.hour(),
        }
    }
}

/// Result of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Completed without error
    Success,
    /// Failed
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builders() {
        let event = Event::success("claude", "s1")
            .with_project("TICKET-1")
            .with_duration(12.5)
            .with_cost(0.02);

        assert!(event.is_success());
        assert!(!event.is_error());
        assert_eq!(event.project_id.as_deref(), Some("TICKET-1"));
        assert_eq!(event.duration_seconds, Some(12.5));
        assert_eq!(event.cost_usd, Some(0.02));
    }

    #[test]
    fn test_parsed_timestamp_keeps_offset() {
        let event = Event::error("claude", "s1").with_timestamp("2026-03-01T02:15:00+09:00");
        let Some(EventTime::Aware(ts)) = event.parsed_timestamp() else {
            panic!("expected an offset-aware timestamp");
        };
        assert_eq!(ts.hour(), 2);
        assert_eq!(ts.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_parsed_timestamp_local_wall_clock() {
        for raw in [
            "2026-03-01T03:00:00",
            "2026-03-01 03:00:00",
            "2026-03-01T03:00:00.123456",
        ] {
            let event = Event::success("claude", "s1").with_timestamp(raw);
            let parsed = event.parsed_timestamp().unwrap();
            assert!(matches!(parsed, EventTime::Local(_)), "{raw}");
            assert_eq!(parsed.wall_clock_hour(), 3, "{raw}");
        }
    }

    #[test]
    fn test_same_record_ignores_id() {
        let json = r#"{
            "agent_name": "claude",
            "session_id": "s1",
            "timestamp": "2026-03-01T10:00:00Z",
            "outcome": "success",
            "cost_usd": 0.2
        }"#;
        let a: Event = serde_json::from_str(json).unwrap();
        let b: Event = serde_json::from_str(json).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.same_record(&b));
        assert!(!a.same_record(&b.clone().with_cost(0.3)));
    }

    #[test]
    fn test_parsed_timestamp_invalid() {
        let event = Event::success("claude", "s1").with_timestamp("yesterday-ish");
        assert!(event.parsed_timestamp().is_none());

        let event = Event::success("claude", "s1").with_timestamp("");
        assert!(event.parsed_timestamp().is_none());
    }

    #[test]
    fn test_event_from_json_defaults() {
        let json = r#"{
            "agent_name": "claude",
            "session_id": "s1",
            "timestamp": "2026-03-01T10:00:00Z",
            "outcome": "error"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_error());
        assert!(event.project_id.is_none());
        assert!(event.duration_seconds.is_none());
        assert!(event.cost_usd.is_none());
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Outcome::Success).unwrap(), "\"success\"");
        assert_eq!(serde_json::to_string(&Outcome::Error).unwrap(), "\"error\"");
    }
}
