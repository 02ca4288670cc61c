//! The generate → validate → score stream.
//!
//! [`Sampler`] is an iterator over valid samples. Left without a
//! [`StopCondition`] it never ends on its own; each call to `next` keeps
//! generating until a candidate passes the hard constraints. Every attempt
//! is self-contained, so stopping between attempts is always safe.

use super::types::{PickSource, Sample, SamplingProblem};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Why a sampling run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The attempt cap was reached.
    AttemptLimit,
    /// The requested number of valid samples was produced.
    SampleLimit,
    /// The wall-clock deadline passed.
    TimeBudget,
    /// A cancellation flag was raised.
    Cancelled,
    /// A penalty-0 sample was found and the run was told to stop there.
    ZeroPenalty,
}

/// Bounds checked between attempts. `0` means "no limit" for counters.
#[derive(Debug, Clone, Default)]
pub struct StopCondition {
    /// Maximum number of generated candidates.
    pub max_attempts: usize,
    /// Maximum number of valid samples yielded.
    pub max_samples: usize,
    /// Instant after which no new attempt starts.
    pub deadline: Option<Instant>,
    /// Stop as soon as any of these flags is set.
    pub cancel: Vec<Arc<AtomicBool>>,
}

impl StopCondition {
    /// No bounds: the sampler runs until dropped.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_max_samples(mut self, n: usize) -> Self {
        self.max_samples = n;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel.push(flag);
        self
    }

    fn check(&self, attempts: usize, accepted: usize) -> Option<Termination> {
        if self.cancel.iter().any(|flag| flag.load(Ordering::Relaxed)) {
            return Some(Termination::Cancelled);
        }
        if self.max_samples > 0 && accepted >= self.max_samples {
            return Some(Termination::SampleLimit);
        }
        if self.max_attempts > 0 && attempts >= self.max_attempts {
            return Some(Termination::AttemptLimit);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(Termination::TimeBudget);
            }
        }
        None
    }
}

/// Stream of valid samples for a problem.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_oncall::roster::{Member, Team};
/// use u_oncall::search::{Sampler, StopCondition};
///
/// let members = ["ana", "bo", "cy", "dee"].map(Member::new).to_vec();
/// let team = Team::new(members, 12).unwrap();
///
/// let mut sampler = Sampler::new(&team, StdRng::seed_from_u64(1))
///     .with_stop(StopCondition::never().with_max_samples(3));
/// let samples: Vec<_> = sampler.by_ref().collect();
/// assert_eq!(samples.len(), 3);
/// assert!(sampler.attempts() >= 3);
/// ```
pub struct Sampler<'a, P: SamplingProblem, R> {
    problem: &'a P,
    picks: R,
    stop: StopCondition,
    attempts: usize,
    accepted: usize,
    termination: Option<Termination>,
}

impl<'a, P: SamplingProblem, R: PickSource> Sampler<'a, P, R> {
    /// Creates an unbounded sampler.
    pub fn new(problem: &'a P, picks: R) -> Self {
        Self {
            problem,
            picks,
            stop: StopCondition::never(),
            attempts: 0,
            accepted: 0,
            termination: None,
        }
    }

    /// Replaces the stop condition.
    pub fn with_stop(mut self, stop: StopCondition) -> Self {
        self.stop = stop;
        self
    }

    /// Candidates generated so far, valid or not.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Valid samples yielded so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Candidates rejected by the hard constraints.
    pub fn rejected(&self) -> usize {
        self.attempts - self.accepted
    }

    /// Why the stream ended, once it has.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Produces the next valid sample, or the reason the stream is over.
    pub fn next_sample(&mut self) -> Result<Sample<P::Solution>, Termination> {
        if let Some(reason) = self.termination {
            return Err(reason);
        }
        loop {
            if let Some(reason) = self.stop.check(self.attempts, self.accepted) {
                self.termination = Some(reason);
                return Err(reason);
            }

            self.attempts += 1;
            let candidate = self.problem.generate(&mut self.picks);
            if !self.problem.is_valid(&candidate) {
                tracing::trace!(attempt = self.attempts, "candidate rejected");
                continue;
            }

            self.accepted += 1;
            let penalty = self.problem.penalty(&candidate);
            return Ok(Sample {
                penalty,
                solution: candidate,
            });
        }
    }
}

impl<P: SamplingProblem, R: PickSource> Iterator for Sampler<'_, P, R> {
    type Item = Sample<P::Solution>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_sample().ok()
    }
}

impl<P: SamplingProblem, R: PickSource> std::iter::FusedIterator for Sampler<'_, P, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Draws one number in 0..10; valid when even, penalty is the value.
    struct EvenDigit;

    impl SamplingProblem for EvenDigit {
        type Solution = usize;

        fn generate<P: PickSource + ?Sized>(&self, picks: &mut P) -> usize {
            picks.pick(10)
        }

        fn is_valid(&self, x: &usize) -> bool {
            x % 2 == 0
        }

        fn penalty(&self, x: &usize) -> u64 {
            *x as u64
        }
    }

    /// Never produces a valid candidate.
    struct Impossible;

    impl SamplingProblem for Impossible {
        type Solution = u8;

        fn generate<P: PickSource + ?Sized>(&self, _picks: &mut P) -> u8 {
            0
        }

        fn is_valid(&self, _: &u8) -> bool {
            false
        }

        fn penalty(&self, _: &u8) -> u64 {
            0
        }
    }

    #[test]
    fn test_only_valid_samples_are_yielded() {
        let sampler = Sampler::new(&EvenDigit, StdRng::seed_from_u64(42));
        for sample in sampler.take(200) {
            assert_eq!(sample.solution % 2, 0);
            assert_eq!(sample.penalty, sample.solution as u64);
        }
    }

    #[test]
    fn test_sample_limit() {
        let mut sampler = Sampler::new(&EvenDigit, StdRng::seed_from_u64(42))
            .with_stop(StopCondition::never().with_max_samples(5));
        assert_eq!(sampler.by_ref().count(), 5);
        assert_eq!(sampler.termination(), Some(Termination::SampleLimit));
        assert_eq!(sampler.accepted(), 5);
        assert_eq!(sampler.attempts(), sampler.accepted() + sampler.rejected());
    }

    #[test]
    fn test_attempt_limit_on_impossible_problem() {
        let mut sampler = Sampler::new(&Impossible, StdRng::seed_from_u64(42))
            .with_stop(StopCondition::never().with_max_attempts(1000));
        assert!(sampler.next().is_none());
        assert_eq!(sampler.attempts(), 1000);
        assert_eq!(sampler.rejected(), 1000);
        assert_eq!(sampler.termination(), Some(Termination::AttemptLimit));
    }

    #[test]
    fn test_cancel_before_start() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut sampler = Sampler::new(&EvenDigit, StdRng::seed_from_u64(42))
            .with_stop(StopCondition::never().with_cancel(flag));
        assert_eq!(sampler.next_sample().err(), Some(Termination::Cancelled));
        assert_eq!(sampler.attempts(), 0);
    }

    #[test]
    fn test_cancel_mid_stream() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut sampler = Sampler::new(&EvenDigit, StdRng::seed_from_u64(42))
            .with_stop(StopCondition::never().with_cancel(flag.clone()));
        assert!(sampler.next().is_some());
        flag.store(true, Ordering::Relaxed);
        assert!(sampler.next().is_none());
        assert_eq!(sampler.termination(), Some(Termination::Cancelled));
    }

    #[test]
    fn test_expired_deadline() {
        let deadline = Instant::now();
        let mut sampler = Sampler::new(&Impossible, StdRng::seed_from_u64(42))
            .with_stop(StopCondition::never().with_deadline(deadline));
        assert!(sampler.next().is_none());
        assert_eq!(sampler.termination(), Some(Termination::TimeBudget));
    }

    #[test]
    fn test_fused_after_termination() {
        let mut sampler = Sampler::new(&EvenDigit, StdRng::seed_from_u64(42))
            .with_stop(StopCondition::never().with_max_samples(1));
        assert!(sampler.next().is_some());
        assert!(sampler.next().is_none());
        assert!(sampler.next().is_none());
        assert_eq!(sampler.accepted(), 1);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<_> = Sampler::new(&EvenDigit, StdRng::seed_from_u64(9))
            .take(20)
            .collect();
        let b: Vec<_> = Sampler::new(&EvenDigit, StdRng::seed_from_u64(9))
            .take(20)
            .collect();
        assert_eq!(a, b);
    }
}
