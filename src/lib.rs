//! On-call rotation scheduling by random search.
//!
//! Assigns one team member to each week of a year so that:
//!
//! - **Hard constraints** hold: nobody works a week they blocked, and a
//!   member's shifts are at least half a team-size apart (circularly, so
//!   the end of the year counts against its start).
//! - **Soft preferences** are violated as little as possible: weeks a
//!   member would rather avoid cost penalty points.
//!
//! The search draws random round-robin schedules, rejects the invalid ones
//! and ranks the rest by penalty. It is not an exact optimizer; how long to
//! sample and what to keep is set through [`search::SearchConfig`].
//!
//! # Architecture
//!
//! - [`roster`]: the domain — team, preferences, generator, validator and
//!   scorer.
//! - [`search`]: the domain-agnostic sampling loop, driven through the
//!   [`search::SamplingProblem`] trait.
//! - [`error`]: configuration errors raised before sampling starts.
//!
//! # Features
//!
//! - `parallel`: multi-worker search on rayon.
//! - `serde`: `Serialize`/`Deserialize` for the input and output types.

pub mod error;
pub mod roster;
pub mod search;

pub use error::ConfigError;
