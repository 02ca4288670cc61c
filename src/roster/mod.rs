//! On-call rotation model.
//!
//! Assigns one team member per week of a year. Hard constraints (blackout
//! weeks and a minimum spacing between a member's shifts) decide whether a
//! schedule is usable at all; soft preferences give usable schedules a
//! penalty.
//!
//! # Key Types
//!
//! - [`Team`]: members, their [`Preferences`] and the week count; the
//!   read-only preference store
//! - [`Schedule`]: one [`MemberId`] per week
//! - [`Violation`]: why a schedule failed the hard constraints
//!
//! # Pipeline
//!
//! [`generate`] → [`is_valid`] → [`penalty`]. [`Team`] implements
//! [`SamplingProblem`](crate::search::SamplingProblem), so the whole
//! pipeline runs under [`SearchRunner`](crate::search::SearchRunner).
//!
//! Date arithmetic (which calendar days make up week `n`) and reading
//! preferences from files are the caller's business; week sets arrive here
//! as plain indices.

mod generator;
mod problem;
mod schedule;
mod scorer;
mod team;
mod validator;

pub use generator::generate;
pub use schedule::Schedule;
pub use scorer::{breakdown, penalty, SoftHit};
pub use team::{Member, MemberId, Preferences, Severity, Team, Week, WeekSet};
pub use validator::{find_violation, is_valid, Violation};
