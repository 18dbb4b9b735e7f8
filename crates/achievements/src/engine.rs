//! Achievement engine - runs every rule and filters out earned ones.

use kudos_core::{AgentProfile, Event};
use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::Achievement;
use crate::config::EngineConfig;
use crate::progress::{progress_for, AchievementProgress};
use crate::rules::RuleContext;

/// Verdict of one rule for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    /// Achievement evaluated
    pub achievement: Achievement,
    /// Whether its predicate matched
    pub satisfied: bool,
    /// Whether the profile already holds it
    pub already_earned: bool,
}

impl RuleOutcome {
    /// Matched and not yet earned.
    pub fn is_new(&self) -> bool {
        self.satisfied && !self.already_earned
    }
}

/// Evaluates achievements for agent events.
///
/// Holds only configuration; every call is a pure function of its
/// arguments and never mutates them.
#[derive(Debug, Clone)]
pub struct AchievementEngine {
    config: EngineConfig,
}

impl AchievementEngine {
    /// Create a new engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every rule, in catalog order, and report each verdict.
    pub fn evaluate(
        &self,
        profile: &AgentProfile,
        event: &Event,
        agent_history: &[Event],
        session_history: &[Event],
    ) -> Vec<RuleOutcome> {
        let ctx = RuleContext::new(
            profile,
            event,
            agent_history,
            session_history,
            self.config.clock,
        );

        Achievement::ALL
            .into_iter()
            .map(|achievement| RuleOutcome {
                achievement,
                satisfied: achievement.is_satisfied(&ctx),
                already_earned: profile.has_achievement(achievement.id()),
            })
            .collect()
    }

    /// Achievements newly earned by `event`, in catalog order.
    ///
    /// Ids already present in `profile.achievements` are never returned.
    /// Merging the result into the profile is up to the caller.
    pub fn check_all_achievements(
        &self,
        profile: &AgentProfile,
        event: &Event,
        agent_history: &[Event],
        session_history: &[Event],
    ) -> Vec<Achievement> {
        let mut earned = Vec::new();
        for outcome in self.evaluate(profile, event, agent_history, session_history) {
            if outcome.is_new() {
                debug!(
                    "Achievement unlocked for {}: {}",
                    profile.agent_name, outcome.achievement
                );
                earned.push(outcome.achievement);
            } else if outcome.satisfied {
                trace!(
                    "Achievement {} already earned by {}",
                    outcome.achievement,
                    profile.agent_name
                );
            }
        }
        earned
    }

    /// Progress toward every trackable achievement the profile lacks.
    pub fn progress(
        &self,
        profile: &AgentProfile,
        event: &Event,
        agent_history: &[Event],
        session_history: &[Event],
    ) -> Vec<AchievementProgress> {
        let ctx = RuleContext::new(
            profile,
            event,
            agent_history,
            session_history,
            self.config.clock,
        );

        Achievement::ALL
            .into_iter()
            .filter(|a| !profile.has_achievement(a.id()))
            .filter_map(|a| progress_for(a, &ctx))
            .collect()
    }
}
