//! Search execution loop.
//!
//! [`SearchRunner`] drives a [`Sampler`] under a [`SearchConfig`] and keeps
//! the lowest-penalty samples it sees. Which samples are "good enough" is
//! entirely the configuration's call: first valid (`max_samples = 1`),
//! best of N attempts, or best within a time budget.

use super::config::SearchConfig;
use super::sampler::{Sampler, StopCondition, Termination};
use super::types::{Sample, SamplingProblem};
use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    /// Retained samples, lowest penalty first. Ties keep discovery order.
    pub ranked: Vec<Sample<S>>,

    /// Total number of generated candidates.
    pub attempts: usize,

    /// Number of candidates that passed the hard constraints.
    pub accepted: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Best penalty after each improvement.
    pub penalty_history: Vec<u64>,
}

impl<S> SearchResult<S> {
    /// The lowest-penalty sample, if any valid candidate was found.
    pub fn best(&self) -> Option<&Sample<S>> {
        self.ranked.first()
    }

    /// Whether the run was cancelled externally.
    pub fn cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }

    /// True when the run ended without a single valid candidate.
    ///
    /// After an attempt cap this usually means the hard constraints are
    /// too strict for the team size and week count.
    pub fn no_feasible_found(&self) -> bool {
        self.accepted == 0
    }
}

/// Bounded, ordered retention of the lowest-penalty samples.
#[derive(Debug)]
struct Leaderboard<S> {
    capacity: usize,
    entries: Vec<Sample<S>>,
    history: Vec<u64>,
}

impl<S> Leaderboard<S> {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            history: Vec::new(),
        }
    }

    /// Inserts the sample if it ranks; returns true on a new best penalty.
    fn offer(&mut self, sample: Sample<S>) -> bool {
        let pos = self
            .entries
            .partition_point(|kept| kept.penalty <= sample.penalty);
        if pos >= self.capacity {
            return false;
        }
        let improved = self
            .entries
            .first()
            .is_none_or(|best| sample.penalty < best.penalty);
        if improved {
            self.history.push(sample.penalty);
        }
        self.entries.insert(pos, sample);
        self.entries.truncate(self.capacity);
        improved
    }
}

/// Executes the random search.
///
/// # Usage
///
/// ```
/// use u_oncall::roster::{Member, Preferences, Team};
/// use u_oncall::search::{SearchConfig, SearchRunner};
///
/// let members = vec![
///     Member::new("ana").with_preferences(Preferences::new().with_blocked([0, 1])),
///     Member::new("bo"),
///     Member::new("cy"),
/// ];
/// let team = Team::new(members, 12).unwrap();
/// let config = SearchConfig::default().with_max_attempts(20_000).with_seed(7);
///
/// let result = SearchRunner::run(&team, &config).unwrap();
/// let best = result.best().unwrap();
/// assert_ne!(best.solution.member_at(0), Some(0));
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search on the calling thread.
    pub fn run<P: SamplingProblem>(
        problem: &P,
        config: &SearchConfig,
    ) -> Result<SearchResult<P::Solution>, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before its next attempt and returns what it has retained so far.
    pub fn run_with_cancel<P: SamplingProblem>(
        problem: &P,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P::Solution>, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, max_attempts = config.max_attempts, "starting search");

        let mut stop = base_stop(config, Instant::now()).with_max_samples(config.max_samples);
        if let Some(flag) = cancel {
            stop = stop.with_cancel(flag);
        }
        let mut sampler = Sampler::new(problem, StdRng::seed_from_u64(seed)).with_stop(stop);
        let mut board = Leaderboard::new(config.keep_best);

        let termination = loop {
            match sampler.next_sample() {
                Ok(sample) => {
                    let penalty = sample.penalty;
                    if board.offer(sample) {
                        tracing::debug!(penalty, attempt = sampler.attempts(), "new best sample");
                    }
                    if config.stop_at_zero && penalty == 0 {
                        break Termination::ZeroPenalty;
                    }
                }
                Err(reason) => break reason,
            }
        };

        Ok(finish(
            board,
            sampler.attempts(),
            sampler.accepted(),
            termination,
        ))
    }

    /// Runs `config.workers` independent samplers on the rayon pool.
    ///
    /// Workers share the read-only problem and funnel their samples into a
    /// channel drained by a collector thread, which owns the retained set.
    /// The attempt cap is split across workers; the sample cap and the
    /// zero-penalty stop are enforced by the collector. Worker `i` is
    /// seeded with `seed + i`, but interleaving makes the result order
    /// nondeterministic.
    #[cfg(feature = "parallel")]
    pub fn run_parallel<P: SamplingProblem>(
        problem: &P,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P::Solution>, ConfigError> {
        use rayon::prelude::*;
        use std::sync::atomic::Ordering;
        use std::sync::mpsc;

        config.validate()?;

        let base_seed = config.seed.unwrap_or_else(rand::random);
        let shares = attempt_shares(config.max_attempts, config.workers);
        tracing::debug!(
            seed = base_seed,
            workers = shares.len(),
            max_attempts = config.max_attempts,
            "starting parallel search"
        );

        let started = Instant::now();
        let halt = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel::<Sample<P::Solution>>();

        let (board, accepted, halted_by, worker_stats) = std::thread::scope(|scope| {
            let collector = {
                let halt = Arc::clone(&halt);
                let keep_best = config.keep_best;
                let max_samples = config.max_samples;
                let stop_at_zero = config.stop_at_zero;
                scope.spawn(move || {
                    let mut board = Leaderboard::new(keep_best);
                    let mut accepted = 0usize;
                    let mut halted_by = None;
                    for sample in rx {
                        if halted_by.is_some() {
                            continue;
                        }
                        accepted += 1;
                        let penalty = sample.penalty;
                        if board.offer(sample) {
                            tracing::debug!(penalty, accepted, "new best sample");
                        }
                        if stop_at_zero && penalty == 0 {
                            halted_by = Some(Termination::ZeroPenalty);
                        } else if max_samples > 0 && accepted >= max_samples {
                            halted_by = Some(Termination::SampleLimit);
                        }
                        if halted_by.is_some() {
                            halt.store(true, Ordering::Relaxed);
                        }
                    }
                    (board, accepted, halted_by)
                })
            };

            let worker_stats: Vec<(usize, Termination)> = shares
                .par_iter()
                .enumerate()
                .map(|(index, &share)| {
                    let mut stop = base_stop(config, started)
                        .with_max_attempts(share)
                        .with_cancel(Arc::clone(&halt));
                    if let Some(flag) = &cancel {
                        stop = stop.with_cancel(Arc::clone(flag));
                    }
                    let rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
                    let mut sampler = Sampler::new(problem, rng).with_stop(stop);
                    let tx = tx.clone();
                    let reason = loop {
                        match sampler.next_sample() {
                            Ok(sample) => {
                                if tx.send(sample).is_err() {
                                    break Termination::Cancelled;
                                }
                            }
                            Err(reason) => break reason,
                        }
                    };
                    (sampler.attempts(), reason)
                })
                .collect();
            drop(tx);

            match collector.join() {
                Ok((board, accepted, halted_by)) => (board, accepted, halted_by, worker_stats),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        });

        let attempts = worker_stats.iter().map(|&(n, _)| n).sum();
        let externally_cancelled = cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed));
        let termination = halted_by.unwrap_or_else(|| {
            let reasons: Vec<Termination> = worker_stats.iter().map(|&(_, r)| r).collect();
            if externally_cancelled || reasons.contains(&Termination::Cancelled) {
                Termination::Cancelled
            } else if reasons.contains(&Termination::TimeBudget) {
                Termination::TimeBudget
            } else {
                Termination::AttemptLimit
            }
        });

        Ok(finish(board, attempts, accepted, termination))
    }
}

/// Stop bounds shared by the sequential and parallel drivers.
fn base_stop(config: &SearchConfig, started: Instant) -> StopCondition {
    let mut stop = StopCondition::never().with_max_attempts(config.max_attempts);
    if let Some(budget) = config.time_budget {
        stop = stop.with_deadline(started + budget);
    }
    stop
}

/// Splits an attempt cap into per-worker caps that sum to it exactly.
///
/// With no cap every worker is unbounded. Workers that would get a zero
/// share are dropped, since a zero cap means "no limit".
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
fn attempt_shares(max_attempts: usize, workers: usize) -> Vec<usize> {
    if max_attempts == 0 {
        return vec![0; workers];
    }
    let base = max_attempts / workers;
    let extra = max_attempts % workers;
    (0..workers)
        .map(|i| base + usize::from(i < extra))
        .filter(|&share| share > 0)
        .collect()
}

fn finish<S>(
    board: Leaderboard<S>,
    attempts: usize,
    accepted: usize,
    termination: Termination,
) -> SearchResult<S> {
    let result = SearchResult {
        ranked: board.entries,
        attempts,
        accepted,
        termination,
        penalty_history: board.history,
    };

    if result.no_feasible_found() {
        tracing::warn!(
            attempts,
            ?termination,
            "search ended without a valid schedule; hard constraints may be infeasible"
        );
    } else {
        tracing::info!(
            attempts,
            accepted,
            best_penalty = result.best().map(|s| s.penalty),
            ?termination,
            "search finished"
        );
    }
    result
}

// ============================================================================
// Tests
// ============================================================================
