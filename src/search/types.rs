//! Core traits for rejection sampling.

use rand::Rng;

/// Source of uniform "pick one of the remaining candidates" draws.
///
/// Generators consume randomness only through this interface, so a test
/// can replace the RNG with a scripted sequence of picks and get an exact,
/// reproducible result.
///
/// Every [`Rng`] is a `PickSource` drawing uniformly from `0..remaining`.
pub trait PickSource {
    /// Returns an index in `0..remaining`.
    ///
    /// Callers never ask with `remaining == 0`.
    fn pick(&mut self, remaining: usize) -> usize;
}

impl<R: Rng + ?Sized> PickSource for R {
    fn pick(&mut self, remaining: usize) -> usize {
        self.random_range(0..remaining)
    }
}

/// Defines a generate-and-test sampling problem.
///
/// The user implements candidate generation, the hard-constraint check and
/// the soft-constraint penalty. The search framework handles the loop,
/// stopping conditions, retention of the best candidates and parallelism.
///
/// # Minimization
///
/// Lower penalties are better. A penalty of 0 cannot be improved upon.
///
/// # Examples
///
/// ```
/// use u_oncall::search::{PickSource, SamplingProblem};
///
/// /// Orderings of 0..n where position 0 must not hold 0.
/// struct Derangement { n: usize }
///
/// impl SamplingProblem for Derangement {
///     type Solution = Vec<usize>;
///
///     fn generate<P: PickSource + ?Sized>(&self, picks: &mut P) -> Vec<usize> {
///         let mut pool: Vec<usize> = (0..self.n).collect();
///         let mut out = Vec::with_capacity(self.n);
///         while !pool.is_empty() {
///             out.push(pool.remove(picks.pick(pool.len())));
///         }
///         out
///     }
///
///     fn is_valid(&self, order: &Vec<usize>) -> bool {
///         order[0] != 0
///     }
///
///     fn penalty(&self, order: &Vec<usize>) -> u64 {
///         order.iter().enumerate().filter(|&(i, &v)| i == v).count() as u64
///     }
/// }
/// ```
pub trait SamplingProblem: Send + Sync {
    /// The candidate representation type.
    type Solution: Clone + Send;

    /// Creates one random candidate.
    fn generate<P: PickSource + ?Sized>(&self, picks: &mut P) -> Self::Solution;

    /// Checks the hard constraints.
    fn is_valid(&self, solution: &Self::Solution) -> bool;

    /// Soft-constraint cost of a valid candidate. Lower is better.
    fn penalty(&self, solution: &Self::Solution) -> u64;
}

/// A valid candidate together with its penalty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample<S> {
    /// Soft-constraint cost.
    pub penalty: u64,

    /// The accepted candidate.
    pub solution: S,
}
