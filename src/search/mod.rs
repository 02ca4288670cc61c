//! Rejection-sampling random search.
//!
//! A domain-agnostic generate → validate → score loop. Users define their
//! problem by implementing [`SamplingProblem`]: how to draw one random
//! candidate, which candidates satisfy the hard constraints, and what a
//! valid candidate costs.
//!
//! # Key Types
//!
//! - [`PickSource`]: injected randomness ("pick one of N remaining")
//! - [`Sampler`]: iterator over valid samples with optional [`StopCondition`]
//! - [`SearchConfig`]: stopping policy, retention, seeding, workers
//! - [`SearchRunner`]: drives a sampler and retains the best samples
//! - [`SearchResult`]: ranked samples plus run statistics
//!
//! The search is not an exact optimizer. Nothing guarantees that the
//! minimum-penalty candidate is ever drawn, and a problem whose hard
//! constraints admit no candidate keeps rejecting until a bound fires.

mod config;
mod runner;
mod sampler;
mod types;

pub use config::SearchConfig;
pub use runner::{SearchResult, SearchRunner};
pub use sampler::{Sampler, StopCondition, Termination};
pub use types::{PickSource, Sample, SamplingProblem};
