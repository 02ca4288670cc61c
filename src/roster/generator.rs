//! Round-robin random schedule generation.
//!
//! A schedule is the concatenation of full random shuffles of the team,
//! cut to the number of weeks. Every complete round is a permutation of
//! the team, so nobody repeats inside a round; repeats across a round
//! boundary are left for the validator to catch.

use super::schedule::Schedule;
use super::team::{MemberId, Team};
use crate::search::PickSource;

/// Generates one random schedule of exactly `team.total_weeks()` weeks.
///
/// Each round draws members one at a time from a shrinking candidate list
/// that starts as the whole team in team order; the drawn candidate is
/// removed and the rest keep their order. The last round is generated in
/// full and then truncated.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_oncall::roster::{generate, Member, Team};
///
/// let team = Team::new(["ana", "bo", "cy"].map(Member::new).to_vec(), 7).unwrap();
/// let schedule = generate(&team, &mut StdRng::seed_from_u64(1));
/// assert_eq!(schedule.len(), 7);
/// ```
pub fn generate<P: PickSource + ?Sized>(team: &Team, picks: &mut P) -> Schedule {
    let n = team.member_count();
    let total = team.total_weeks();
    let rounds = total.div_ceil(n);

    let mut assignments = Vec::with_capacity(rounds * n);
    let mut candidates: Vec<MemberId> = Vec::with_capacity(n);
    while assignments.len() < total {
        candidates.clear();
        candidates.extend(0..n);
        while !candidates.is_empty() {
            let drawn = candidates.remove(picks.pick(candidates.len()));
            assignments.push(drawn);
        }
    }
    assignments.truncate(total);
    Schedule::new(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Member;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed list of picks.
    struct ScriptedPicks {
        script: Vec<usize>,
        next: usize,
    }

    impl ScriptedPicks {
        fn new(script: &[usize]) -> Self {
            Self {
                script: script.to_vec(),
                next: 0,
            }
        }
    }

    impl PickSource for ScriptedPicks {
        fn pick(&mut self, remaining: usize) -> usize {
            let choice = self.script[self.next];
            assert!(choice < remaining, "scripted pick {choice} of {remaining}");
            self.next += 1;
            choice
        }
    }

    fn team(n: usize, weeks: usize) -> Team {
        let members = (0..n).map(|i| Member::new(format!("m{i}"))).collect();
        Team::new(members, weeks).unwrap()
    }

    #[test]
    fn test_scripted_picks_give_exact_schedule() {
        let team = team(3, 5);
        let mut picks = ScriptedPicks::new(&[2, 0, 0, 1, 1, 0]);
        let schedule = generate(&team, &mut picks);

        // round 1: [0,1,2] -> 2, [0,1] -> 0, [1] -> 1
        // round 2: [0,1,2] -> 1, [0,2] -> 2, [0] -> 0, cut to 5 weeks
        assert_eq!(schedule.as_slice(), &[2, 0, 1, 1, 2]);
        assert_eq!(picks.next, 6);
    }

    #[test]
    fn test_all_zero_picks_give_team_order() {
        let team = team(4, 10);
        let mut picks = ScriptedPicks::new(&[0; 12]);
        let schedule = generate(&team, &mut picks);
        assert_eq!(schedule.as_slice(), &[0, 1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_single_member() {
        let team = team(1, 4);
        let schedule = generate(&team, &mut StdRng::seed_from_u64(0));
        assert_eq!(schedule.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_fewer_weeks_than_members() {
        let team = team(6, 2);
        let schedule = generate(&team, &mut StdRng::seed_from_u64(5));
        assert_eq!(schedule.len(), 2);
        assert_ne!(schedule.as_slice()[0], schedule.as_slice()[1]);
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let team = team(5, 52);
        let a = generate(&team, &mut StdRng::seed_from_u64(77));
        let b = generate(&team, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_length_matches_weeks(n in 1usize..12, weeks in 1usize..120, seed in any::<u64>()) {
            let team = team(n, weeks);
            let schedule = generate(&team, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(schedule.len(), weeks);
        }

        #[test]
        fn prop_full_rounds_are_permutations(n in 1usize..12, weeks in 1usize..120, seed in any::<u64>()) {
            let team = team(n, weeks);
            let schedule = generate(&team, &mut StdRng::seed_from_u64(seed));
            for round in schedule.as_slice().chunks_exact(n) {
                let mut sorted = round.to_vec();
                sorted.sort_unstable();
                prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());
            }
            // The truncated tail has no repeats either.
            let tail = schedule.as_slice().chunks_exact(n).remainder();
            let mut seen = std::collections::HashSet::new();
            prop_assert!(tail.iter().all(|m| seen.insert(*m)));
        }
    }
}
