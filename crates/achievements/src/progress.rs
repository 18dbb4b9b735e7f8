//! Progress toward count-based achievements.

use kudos_core::Event;
use serde::{Deserialize, Serialize};

use crate::catalog::Achievement;
use crate::rules::{self, RuleContext};

/// How far an agent is from earning an achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    /// Achievement being tracked
    pub achievement: Achievement,
    /// Current count
    pub current: usize,
    /// Count needed
    pub target: usize,
}

impl AchievementProgress {
    /// Completion percentage, capped at 100.
    pub fn percentage(&self) -> f32 {
        if self.target == 0 {
            return 100.0;
        }
        (self.current as f32 / self.target as f32 * 100.0).min(100.0)
    }

    /// Whether the target has been reached.
    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

/// Progress for `achievement` as of the triggering event.
///
/// Returns `None` for achievements decided by a single event
/// (`first_blood`, `comeback_kid`, `big_spender`, `night_owl`).
pub fn progress_for(
    achievement: Achievement,
    ctx: &RuleContext<'_>,
) -> Option<AchievementProgress> {
    let agent: &[Event] = ctx.agent_events().unwrap_or(&[]);
    let session: &[Event] = ctx.session_events().unwrap_or(&[]);

    let (current, target) = match achievement {
        Achievement::FirstBlood
        | Achievement::ComebackKid
        | Achievement::BigSpender
        | Achievement::NightOwl => return None,
        Achievement::CenturyClub => (rules::success_count(agent), rules::CENTURY_SUCCESSES),
        Achievement::PerfectDay => {
            // One error spoils the whole session.
            let clean = if session.iter().all(Event::is_success) {
                session.len()
            } else {
                0
            };
            (clean, rules::PERFECT_DAY_EVENTS)
        }
        Achievement::SpeedDemon => (
            rules::trailing_run(agent, rules::is_fast_completion),
            rules::SPEED_DEMON_RUN,
        ),
        Achievement::PennyPincher => (
            agent.iter().filter(|e| rules::is_cheap_success(e)).count(),
            rules::PENNY_PINCHER_SUCCESSES,
        ),
        Achievement::Marathon => {
            let count = ctx
                .event
                .project_id
                .as_deref()
                .map_or(0, |p| rules::project_event_count(agent, p));
            (count, rules::MARATHON_EVENTS)
        }
        Achievement::Polyglot => (rules::distinct_projects(agent), rules::POLYGLOT_PROJECTS),
        Achievement::Streak10 => (
            rules::trailing_run(agent, Event::is_success),
            rules::STREAK_SHORT,
        ),
        Achievement::Streak25 => (
            rules::trailing_run(agent, Event::is_success),
            rules::STREAK_LONG,
        ),
    };

    Some(AchievementProgress {
        achievement,
        current,
        target,
    })
}
