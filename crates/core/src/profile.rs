//! Agent profile - running aggregate state for one agent.

use serde::{Deserialize, Serialize};

use crate::event::{Event, Outcome};

/// Running aggregate state for one agent.
///
/// Created and updated by the collector. The achievement engine only
/// reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Agent this profile belongs to
    pub agent_name: String,

    /// Earned achievement ids, in the order they were earned
    #[serde(default)]
    pub achievements: Vec<String>,

    /// Aggregate counters
    #[serde(default)]
    pub stats: ProfileStats,
}

/// Aggregate counters kept alongside a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    /// Every recorded invocation
    pub total_invocations: u64,
    /// Successful invocations
    pub total_successes: u64,
    /// Failed invocations
    pub total_errors: u64,
    /// Sum of recorded costs
    pub total_cost_usd: f64,
    /// Sum of recorded durations
    pub total_duration_seconds: f64,
}

impl AgentProfile {
    /// Create an empty profile.
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            achievements: Vec::new(),
            stats: ProfileStats::default(),
        }
    }

    /// Whether the achievement id has already been earned.
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Append newly earned ids, skipping any already present.
    ///
    /// Returns how many ids were added.
    pub fn merge_achievements<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let mut added = 0;
        for id in ids {
            let id = id.as_ref();
            if !self.has_achievement(id) {
                self.achievements.push(id.to_string());
                added += 1;
            }
        }
        added
    }

    /// Fold a recorded event into the counters.
    pub fn record_event(&mut self, event: &Event) {
        self.stats.total_invocations += 1;
        match event.outcome {
            Outcome::Success => self.stats.total_successes += 1,
            Outcome::Error => self.stats.total_errors += 1,
        }
        self.stats.total_cost_usd += event.cost_usd.unwrap_or(0.0);
        self.stats.total_duration_seconds += event.duration_seconds.unwrap_or(0.0);
    }

    /// Fraction of invocations that succeeded (0.0 with no invocations).
    pub fn success_rate(&self) -> f64 {
        if self.stats.total_invocations == 0 {
            0.0
        } else {
            self.stats.total_successes as f64 / self.stats.total_invocations as f64
        }
    }
}
