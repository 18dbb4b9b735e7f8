//! Achievement engine for agent activity.
//!
//! Decides which badges an agent has newly earned from its event history
//! and profile, and exposes the catalog of names and descriptions.
//! Evaluation is pure: no I/O, no shared state, no mutation of inputs.

#![warn(missing_docs)]

mod error;
mod config;
pub mod catalog;
pub mod rules;
pub mod progress;
pub mod engine;

pub use error::{AchievementError, Result};
pub use config::{EngineConfig, LocalClock};
pub use catalog::{achievement_description, achievement_name, all_achievement_ids, Achievement};
pub use rules::RuleContext;
pub use progress::{progress_for, AchievementProgress};
pub use engine::{AchievementEngine, RuleOutcome};
