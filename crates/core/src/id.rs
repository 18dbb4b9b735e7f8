//! Event identity.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifier assigned to an event when it is recorded.
///
/// Events deserialized without an id get a fresh one, so two copies of
/// the same id-less record never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Ulid);

impl Default for EventId {
    fn default() -> Self {
        Self(Ulid::new())
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids_are_unique() {
        assert_ne!(EventId::default(), EventId::default());
    }

    #[test]
    fn test_serializes_as_ulid_string() {
        let id = EventId::default();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        assert_eq!(serde_json::from_str::<EventId>(&json).unwrap(), id);
    }
}
