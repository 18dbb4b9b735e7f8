//! Achievement predicates.
//!
//! Each predicate is a pure function of a [`RuleContext`]. Histories are
//! read as supplied (chronological, oldest first) and never re-sorted.
//! History-based rules only look at the history as of the triggering
//! event: the prefix ending at its last occurrence. When the triggering
//! event is missing from a history, the rule does not match.

use std::collections::HashSet;

use kudos_core::{AgentProfile, Event};

use crate::config::LocalClock;

pub(crate) const CENTURY_SUCCESSES: usize = 100;
pub(crate) const PERFECT_DAY_EVENTS: usize = 10;
pub(crate) const SPEED_DEMON_RUN: usize = 5;
pub(crate) const SPEED_DEMON_MAX_SECONDS: f64 = 30.0;
pub(crate) const COMEBACK_ERRORS: usize = 3;
pub(crate) const BIG_SPENDER_USD: f64 = 1.0;
pub(crate) const PENNY_PINCHER_SUCCESSES: usize = 50;
pub(crate) const PENNY_PINCHER_MAX_USD: f64 = 0.01;
pub(crate) const MARATHON_EVENTS: usize = 100;
pub(crate) const POLYGLOT_PROJECTS: usize = 5;
pub(crate) const NIGHT_OWL_END_HOUR: u32 = 5;
pub(crate) const STREAK_SHORT: usize = 10;
pub(crate) const STREAK_LONG: usize = 25;

/// Everything a predicate may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Profile of the acting agent
    pub profile: &'a AgentProfile,
    /// The event that just occurred
    pub event: &'a Event,
    /// The agent's full history, oldest first
    pub agent_history: &'a [Event],
    /// The current session's history, oldest first
    pub session_history: &'a [Event],
    /// Clock for time-of-day rules
    pub clock: LocalClock,
}

impl<'a> RuleContext<'a> {
    /// Bundle the inputs of one evaluation.
    pub fn new(
        profile: &'a AgentProfile,
        event: &'a Event,
        agent_history: &'a [Event],
        session_history: &'a [Event],
        clock: LocalClock,
    ) -> Self {
        Self {
            profile,
            event,
            agent_history,
            session_history,
            clock,
        }
    }

    /// Agent history up to and including the triggering event.
    pub fn agent_events(&self) -> Option<&'a [Event]> {
        history_through(self.event, self.agent_history)
    }

    /// Session history up to and including the triggering event.
    pub fn session_events(&self) -> Option<&'a [Event]> {
        history_through(self.event, self.session_history)
    }
}

/// Prefix of `history` ending at the last occurrence of `event`.
///
/// Matched by id. A trigger whose id is not in the list still matches when
/// the list ends with the same record, as happens when the trigger and the
/// history were deserialized separately from id-less input.
pub fn history_through<'a>(event: &Event, history: &'a [Event]) -> Option<&'a [Event]> {
    if let Some(i) = history.iter().rposition(|e| e.id == event.id) {
        return Some(&history[..=i]);
    }
    match history.last() {
        Some(last) if last.same_record(event) => Some(history),
        _ => None,
    }
}

/// Length of the unbroken run at the end of `events` matching `pred`.
pub(crate) fn trailing_run(events: &[Event], pred: impl Fn(&Event) -> bool) -> usize {
    events.iter().rev().take_while(|e| pred(e)).count()
}

/// Whether the last `n` events all match `pred`. Looks at no more than `n`.
fn ends_with_run(events: &[Event], n: usize, pred: impl Fn(&Event) -> bool) -> bool {
    events.len() >= n && events[events.len() - n..].iter().rev().all(pred)
}

pub(crate) fn is_fast_completion(event: &Event) -> bool {
    event.is_success()
        && event
            .duration_seconds
            .is_some_and(|d| d < SPEED_DEMON_MAX_SECONDS)
}

pub(crate) fn is_cheap_success(event: &Event) -> bool {
    event.is_success() && event.cost_usd.is_some_and(|c| c < PENNY_PINCHER_MAX_USD)
}

pub(crate) fn success_count(events: &[Event]) -> usize {
    events.iter().filter(|e| e.is_success()).count()
}

pub(crate) fn project_event_count(events: &[Event], project_id: &str) -> usize {
    events
        .iter()
        .filter(|e| e.project_id.as_deref() == Some(project_id))
        .count()
}

pub(crate) fn distinct_projects(events: &[Event]) -> usize {
    events
        .iter()
        .filter_map(|e| e.project_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// First success the agent has ever had.
///
/// Earlier duplicates of the same timestamp still count as prior events;
/// only list position matters.
pub fn first_blood(ctx: &RuleContext<'_>) -> bool {
    if !ctx.event.is_success() {
        return false;
    }
    match ctx.agent_events() {
        Some(events) => !events[..events.len() - 1].iter().any(Event::is_success),
        None => false,
    }
}

/// At least 100 successes as of this event.
///
/// Fires on every later event too; the orchestrator's already-earned
/// filter makes the award happen once.
pub fn century_club(ctx: &RuleContext<'_>) -> bool {
    ctx.agent_events()
        .is_some_and(|events| success_count(events) >= CENTURY_SUCCESSES)
}

/// Session of at least 10 events with no errors.
pub fn perfect_day(ctx: &RuleContext<'_>) -> bool {
    ctx.session_events().is_some_and(|events| {
        events.len() >= PERFECT_DAY_EVENTS && events.iter().all(Event::is_success)
    })
}

/// Last 5 events are successes that each took under 30 seconds.
pub fn speed_demon(ctx: &RuleContext<'_>) -> bool {
    ctx.agent_events()
        .is_some_and(|events| ends_with_run(events, SPEED_DEMON_RUN, is_fast_completion))
}

/// Success directly after a run of 3 or more errors.
pub fn comeback_kid(ctx: &RuleContext<'_>) -> bool {
    if !ctx.event.is_success() {
        return false;
    }
    ctx.agent_events().is_some_and(|events| {
        let before = &events[..events.len() - 1];
        trailing_run(before, Event::is_error) >= COMEBACK_ERRORS
    })
}

/// Single invocation costing more than $1.00.
pub fn big_spender(ctx: &RuleContext<'_>) -> bool {
    ctx.event.cost_usd.is_some_and(|c| c > BIG_SPENDER_USD)
}

/// 50 successes with a recorded cost under $0.01.
pub fn penny_pincher(ctx: &RuleContext<'_>) -> bool {
    ctx.agent_events().is_some_and(|events| {
        events.iter().filter(|e| is_cheap_success(e)).count() >= PENNY_PINCHER_SUCCESSES
    })
}

/// 100 events on the triggering event's project.
pub fn marathon(ctx: &RuleContext<'_>) -> bool {
    let Some(project_id) = ctx.event.project_id.as_deref() else {
        return false;
    };
    ctx.agent_events()
        .is_some_and(|events| project_event_count(events, project_id) >= MARATHON_EVENTS)
}

/// Work recorded on 5 distinct projects.
pub fn polyglot(ctx: &RuleContext<'_>) -> bool {
    ctx.agent_events()
        .is_some_and(|events| distinct_projects(events) >= POLYGLOT_PROJECTS)
}

/// Event whose local hour falls in [00:00, 05:00).
pub fn night_owl(ctx: &RuleContext<'_>) -> bool {
    let Some(ts) = ctx.event.parsed_timestamp() else {
        tracing::debug!(
            "Skipping night_owl for event {}: unparseable timestamp {:?}",
            ctx.event.id,
            ctx.event.timestamp
        );
        return false;
    };
    match ctx.clock.local_hour(&ts) {
        Some(hour) => hour < NIGHT_OWL_END_HOUR,
        None => {
            tracing::debug!(
                "Skipping night_owl for event {}: {:?} has no offset to convert to {}",
                ctx.event.id,
                ctx.event.timestamp,
                ctx.clock
            );
            false
        }
    }
}

/// Last 10 events are all successes.
pub fn streak_10(ctx: &RuleContext<'_>) -> bool {
    ctx.agent_events()
        .is_some_and(|events| ends_with_run(events, STREAK_SHORT, Event::is_success))
}

/// Last 25 events are all successes.
pub fn streak_25(ctx: &RuleContext<'_>) -> bool {
    ctx.agent_events()
        .is_some_and(|events| ends_with_run(events, STREAK_LONG, Event::is_success))
}
