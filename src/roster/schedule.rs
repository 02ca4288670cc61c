//! Week-to-member assignment.

use super::team::{MemberId, Team};

/// One member per week, indexed by week.
///
/// Entries are [`MemberId`]s into the team the schedule was built for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Schedule(Vec<MemberId>);

impl Schedule {
    pub fn new(assignments: Vec<MemberId>) -> Self {
        Self(assignments)
    }

    /// Number of weeks covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The member on duty in `week`.
    pub fn member_at(&self, week: usize) -> Option<MemberId> {
        self.0.get(week).copied()
    }

    pub fn as_slice(&self) -> &[MemberId] {
        &self.0
    }

    /// Weeks assigned to `member`, ascending.
    pub fn weeks_of(&self, member: MemberId) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m == member)
            .map(|(week, _)| week)
            .collect()
    }

    /// Resolves the schedule to member names.
    ///
    /// Unknown ids resolve to `"?"`; the validator rejects such schedules.
    pub fn names<'t>(&self, team: &'t Team) -> Vec<&'t str> {
        self.0
            .iter()
            .map(|&id| team.member(id).map_or("?", |m| m.name.as_str()))
            .collect()
    }

    pub fn into_inner(self) -> Vec<MemberId> {
        self.0
    }
}

impl From<Vec<MemberId>> for Schedule {
    fn from(assignments: Vec<MemberId>) -> Self {
        Self(assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Member;

    #[test]
    fn test_weeks_of() {
        let schedule = Schedule::new(vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(schedule.weeks_of(0), vec![0, 3, 6]);
        assert_eq!(schedule.weeks_of(2), vec![2, 5]);
        assert!(schedule.weeks_of(7).is_empty());
    }

    #[test]
    fn test_names() {
        let team = Team::new(vec![Member::new("ana"), Member::new("bo")], 3).unwrap();
        let schedule = Schedule::new(vec![1, 0, 5]);
        assert_eq!(schedule.names(&team), vec!["bo", "ana", "?"]);
    }

    #[test]
    fn test_member_at_out_of_range() {
        let schedule = Schedule::from(vec![3]);
        assert_eq!(schedule.member_at(0), Some(3));
        assert_eq!(schedule.member_at(1), None);
        assert_eq!(schedule.len(), 1);
    }
}
