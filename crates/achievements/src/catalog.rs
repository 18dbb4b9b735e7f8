//! Achievement catalog - the fixed set of badges and their metadata.

use serde::{Deserialize, Serialize};

use crate::error::{AchievementError, Result};
use crate::rules::{self, RuleContext};

/// Every achievement an agent can earn.
///
/// Closed set: adding a variant forces a matching predicate, name and
/// description through the exhaustive matches below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// First successful invocation
    FirstBlood,
    /// 100 successful invocations
    CenturyClub,
    /// Clean session of 10+ invocations
    PerfectDay,
    /// 5 fast completions in a row
    SpeedDemon,
    /// Success right after 3+ errors
    ComebackKid,
    /// Single invocation over $1.00
    BigSpender,
    /// 50 successes under $0.01
    PennyPincher,
    /// 100 invocations on one project
    Marathon,
    /// 5 distinct projects
    Polyglot,
    /// Invocation between 00:00 and 05:00 local time
    NightOwl,
    /// 10 successes in a row
    #[serde(rename = "streak_10")]
    Streak10,
    /// 25 successes in a row
    #[serde(rename = "streak_25")]
    Streak25,
}

impl Achievement {
    /// All achievements in evaluation order.
    pub const ALL: [Achievement; 12] = [
        Achievement::FirstBlood,
        Achievement::CenturyClub,
        Achievement::PerfectDay,
        Achievement::SpeedDemon,
        Achievement::ComebackKid,
        Achievement::BigSpender,
        Achievement::PennyPincher,
        Achievement::Marathon,
        Achievement::Polyglot,
        Achievement::NightOwl,
        Achievement::Streak10,
        Achievement::Streak25,
    ];

    /// Stable string key.
    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstBlood => "first_blood",
            Achievement::CenturyClub => "century_club",
            Achievement::PerfectDay => "perfect_day",
            Achievement::SpeedDemon => "speed_demon",
            Achievement::ComebackKid => "comeback_kid",
            Achievement::BigSpender => "big_spender",
            Achievement::PennyPincher => "penny_pincher",
            Achievement::Marathon => "marathon",
            Achievement::Polyglot => "polyglot",
            Achievement::NightOwl => "night_owl",
            Achievement::Streak10 => "streak_10",
            Achievement::Streak25 => "streak_25",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstBlood => "First Blood",
            Achievement::CenturyClub => "Century Club",
            Achievement::PerfectDay => "Perfect Day",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::ComebackKid => "Comeback Kid",
            Achievement::BigSpender => "Big Spender",
            Achievement::PennyPincher => "Penny Pincher",
            Achievement::Marathon => "Marathon",
            Achievement::Polyglot => "Polyglot",
            Achievement::NightOwl => "Night Owl",
            Achievement::Streak10 => "On a Roll",
            Achievement::Streak25 => "Unstoppable",
        }
    }

    /// Human-readable condition.
    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstBlood => "Complete your first successful invocation",
            Achievement::CenturyClub => "Reach 100 successful invocations",
            Achievement::PerfectDay => {
                "Finish a session of at least 10 invocations without a single error"
            }
            Achievement::SpeedDemon => {
                "Complete 5 invocations in a row, each in under 30 seconds"
            }
            Achievement::ComebackKid => "Succeed right after 3 or more consecutive errors",
            Achievement::BigSpender => "Run a single invocation costing more than $1.00",
            Achievement::PennyPincher => {
                "Complete 50 successful invocations costing less than $0.01 each"
            }
            Achievement::Marathon => "Record 100 invocations on a single project",
            Achievement::Polyglot => "Work on 5 different projects",
            Achievement::NightOwl => "Run an invocation between midnight and 5 AM local time",
            Achievement::Streak10 => "Succeed 10 times in a row",
            Achievement::Streak25 => "Succeed 25 times in a row",
        }
    }

    /// Predicate deciding whether this achievement is satisfied.
    pub fn predicate(self) -> fn(&RuleContext<'_>) -> bool {
        match self {
            Achievement::FirstBlood => rules::first_blood,
            Achievement::CenturyClub => rules::century_club,
            Achievement::PerfectDay => rules::perfect_day,
            Achievement::SpeedDemon => rules::speed_demon,
            Achievement::ComebackKid => rules::comeback_kid,
            Achievement::BigSpender => rules::big_spender,
            Achievement::PennyPincher => rules::penny_pincher,
            Achievement::Marathon => rules::marathon,
            Achievement::Polyglot => rules::polyglot,
            Achievement::NightOwl => rules::night_owl,
            Achievement::Streak10 => rules::streak_10,
            Achievement::Streak25 => rules::streak_25,
        }
    }

    /// Evaluate this achievement's predicate.
    pub fn is_satisfied(self, ctx: &RuleContext<'_>) -> bool {
        (self.predicate())(ctx)
    }
}

impl AsRef<str> for Achievement {
    fn as_ref(&self) -> &str {
        self.id()
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Achievement {
    type Err = AchievementError;

    fn from_str(s: &str) -> Result<Self> {
        Achievement::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| AchievementError::UnknownId(s.to_string()))
    }
}

/// Display name for an achievement id.
pub fn achievement_name(id: &str) -> Result<&'static str> {
    Ok(id.parse::<Achievement>()?.name())
}

/// Human-readable condition for an achievement id.
pub fn achievement_description(id: &str) -> Result<&'static str> {
    Ok(id.parse::<Achievement>()?.description())
}

/// The twelve canonical ids, in evaluation order.
pub fn all_achievement_ids() -> Vec<&'static str> {
    Achievement::ALL.iter().map(|a| a.id()).collect()
}
