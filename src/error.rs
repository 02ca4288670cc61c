//! Configuration errors.

use thiserror::Error;

/// Errors raised before any sampling starts.
///
/// Rejected random schedules are never errors; they are discarded by the
/// sampler and only show up in its counters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The team has no members, so neither rounds nor the spacing span exist.
    #[error("team must have at least one member")]
    EmptyTeam,

    /// The rotation covers zero weeks.
    #[error("total_weeks must be positive")]
    NoWeeks,

    /// Two members share a name.
    #[error("duplicate member: {0}")]
    DuplicateMember(String),

    /// A listed member has no preference record.
    #[error("no preferences supplied for member: {0}")]
    MissingPreferences(String),

    /// A search configuration parameter is out of range.
    #[error("invalid search configuration: {0}")]
    InvalidSearch(String),
}
