//! Kudos core data models.
//!
//! Events recorded for an agent and the profile aggregated from them.
//! These are the shapes the achievement engine reads.

#![warn(missing_docs)]

mod id;
mod event;
mod profile;

pub use id::EventId;
pub use event::{Event, EventTime, Outcome};
pub use profile::{AgentProfile, ProfileStats};
