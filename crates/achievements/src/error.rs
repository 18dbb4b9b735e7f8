//! Error types for the achievement engine.

/// Result type for catalog and configuration lookups.
pub type Result<T> = std::result::Result<T, AchievementError>;

/// Errors surfaced to callers of the achievement engine.
///
/// Rule evaluation itself never fails; these cover lookups that indicate
/// a wiring mistake on the caller's side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AchievementError {
    /// Id outside the fixed catalog
    #[error("unknown achievement id: {0}")]
    UnknownId(String),

    /// Clock name that is neither a keyword nor an IANA zone
    #[error("invalid clock: {0} (expected \"event\", \"utc\" or an IANA zone name)")]
    InvalidClock(String),
}
