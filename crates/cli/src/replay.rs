//! Replays an event log through the achievement engine, the way the
//! collector does when events arrive live.

use std::collections::BTreeMap;
use std::io::BufRead;

use anyhow::{Context, Result};
use kudos_achievements::{Achievement, AchievementEngine, AchievementProgress};
use kudos_core::{AgentProfile, Event};
use serde::Serialize;
use tracing::{debug, info};

/// One newly earned achievement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Award {
    /// Event that earned it
    pub event_id: String,
    /// Agent that earned it
    pub agent_name: String,
    /// Achievement id
    pub achievement: Achievement,
    /// Display name
    pub name: &'static str,
}

#[derive(Debug, Default)]
struct AgentState {
    profile: AgentProfile,
    history: Vec<Event>,
    sessions: BTreeMap<String, Vec<Event>>,
}

/// Per-agent histories and profiles built up while replaying.
pub struct Replay {
    engine: AchievementEngine,
    agents: BTreeMap<String, AgentState>,
}

impl Replay {
    /// Start a replay with existing profiles.
    pub fn new(engine: AchievementEngine, profiles: Vec<AgentProfile>) -> Self {
        let agents = profiles
            .into_iter()
            .map(|profile| {
                (
                    profile.agent_name.clone(),
                    AgentState {
                        profile,
                        ..Default::default()
                    },
                )
            })
            .collect();
        Self { engine, agents }
    }

    /// Record one event and return what it earned.
    pub fn ingest(&mut self, event: Event) -> Vec<Award> {
        let state = self
            .agents
            .entry(event.agent_name.clone())
            .or_insert_with(|| AgentState {
                profile: AgentProfile::new(event.agent_name.clone()),
                ..Default::default()
            });

        state.history.push(event.clone());
        let session = state.sessions.entry(event.session_id.clone()).or_default();
        session.push(event.clone());
        state.profile.record_event(&event);

        let earned =
            self.engine
                .check_all_achievements(&state.profile, &event, &state.history, session);
        state.profile.merge_achievements(&earned);

        earned
            .into_iter()
            .map(|achievement| Award {
                event_id: event.id.to_string(),
                agent_name: event.agent_name.clone(),
                achievement,
                name: achievement.name(),
            })
            .collect()
    }

    /// Read newline-delimited JSON events and ingest them in order.
    pub fn ingest_lines<R: BufRead>(&mut self, reader: R) -> Result<Vec<Award>> {
        let mut awards = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            let event: Event = serde_json::from_str(&line)
                .with_context(|| format!("Invalid event on line {}", index + 1))?;
            debug!("Ingesting event {} for {}", event.id, event.agent_name);
            awards.extend(self.ingest(event));
        }
        info!("Replayed {} agents, {} new achievements", self.agents.len(), awards.len());
        Ok(awards)
    }

    /// Progress for each agent as of its latest event.
    pub fn progress(&self) -> BTreeMap<String, Vec<AchievementProgress>> {
        self.agents
            .iter()
            .filter_map(|(name, state)| {
                let last = state.history.last()?;
                let session = state.sessions.get(&last.session_id)?;
                let progress = self
                    .engine
                    .progress(&state.profile, last, &state.history, session);
                Some((name.clone(), progress))
            })
            .collect()
    }

    /// Consume the replay, returning the updated profiles.
    pub fn into_profiles(self) -> Vec<AgentProfile> {
        self.agents.into_values().map(|s| s.profile).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudos_achievements::{EngineConfig, LocalClock};

    fn replay(profiles: Vec<AgentProfile>) -> Replay {
        Replay::new(AchievementEngine::new(EngineConfig::new(LocalClock::Utc)), profiles)
    }

    fn line(agent: &str, session: &str, outcome: &str, ts: &str) -> String {
        serde_json::json!({
            "agent_name": agent,
            "session_id": session,
            "timestamp": ts,
            "outcome": outcome,
        })
        .to_string()
    }

    #[test]
    fn test_ingest_lines_awards_per_agent() {
        let input = [
            line("alpha", "s1", "success", "2026-03-01T12:00:00Z"),
            String::new(),
            line("beta", "s9", "error", "2026-03-01T12:01:00Z"),
            line("beta", "s9", "success", "2026-03-01T02:02:00Z"),
            line("alpha", "s1", "success", "2026-03-01T12:03:00Z"),
        ]
        .join("\n");

        let mut replay = replay(Vec::new());
        let awards = replay.ingest_lines(input.as_bytes()).unwrap();
        let summary: Vec<(&str, Achievement)> = awards
            .iter()
            .map(|a| (a.agent_name.as_str(), a.achievement))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("alpha", Achievement::FirstBlood),
                ("beta", Achievement::FirstBlood),
                ("beta", Achievement::NightOwl),
            ]
        );

        let profiles = replay.into_profiles();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].agent_name, "alpha");
        assert_eq!(profiles[0].stats.total_invocations, 2);
        assert_eq!(profiles[1].achievements, vec!["first_blood", "night_owl"]);
    }

    #[test]
    fn test_existing_profile_is_not_re_awarded() {
        let mut known = AgentProfile::new("alpha");
        known.merge_achievements(&["first_blood"]);

        let mut replay = replay(vec![known]);
        let input = line("alpha", "s1", "success", "2026-03-01T12:00:00Z");
        assert!(replay.ingest_lines(input.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_line_reports_position() {
        let first = line("alpha", "s1", "success", "2026-03-01T12:00:00Z");
        let input = format!("{first}\n{{not json}}");
        let err = replay(Vec::new()).ingest_lines(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_progress_per_agent() {
        let mut replay = replay(Vec::new());
        for _ in 0..4 {
            replay.ingest(Event::success("alpha", "s1"));
        }
        let progress = replay.progress();
        let alpha = &progress["alpha"];
        let streak = alpha
            .iter()
            .find(|p| p.achievement == Achievement::Streak10)
            .unwrap();
        assert_eq!(streak.current, 4);
    }
}
