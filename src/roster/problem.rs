//! [`SamplingProblem`] implementation for on-call rotations.

use super::generator::generate;
use super::schedule::Schedule;
use super::scorer::penalty;
use super::team::Team;
use super::validator::is_valid;
use crate::search::{PickSource, SamplingProblem};

impl SamplingProblem for Team {
    type Solution = Schedule;

    fn generate<P: PickSource + ?Sized>(&self, picks: &mut P) -> Schedule {
        generate(self, picks)
    }

    fn is_valid(&self, schedule: &Schedule) -> bool {
        is_valid(self, schedule)
    }

    fn penalty(&self, schedule: &Schedule) -> u64 {
        penalty(self, schedule)
    }
}
