//! Hard-constraint checking.
//!
//! Two rules per week, checked in week order with the first failure
//! winning:
//!
//! 1. **Spacing**: the member on duty in week `w` must not appear in the
//!    `span` weeks before it. The look-back is circular, so the first
//!    weeks of the year compare against the end of the year.
//! 2. **Blackout**: the week must not be in the member's blocked set.

use super::schedule::Schedule;
use super::team::{MemberId, Team, Week};
use std::fmt;

/// The first hard-constraint failure found in a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The schedule does not cover exactly `total_weeks` weeks.
    WrongLength { expected: usize, actual: usize },
    /// A week references a member id outside the team.
    UnknownMember { week: usize, member: MemberId },
    /// `member` is on duty in `week` and again in `earlier_week`, which lies
    /// within the circular look-back window.
    Spacing {
        week: usize,
        earlier_week: usize,
        member: MemberId,
    },
    /// `week` is blocked for `member`.
    Blackout { week: usize, member: MemberId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::WrongLength { expected, actual } => {
                write!(f, "schedule covers {actual} weeks, expected {expected}")
            }
            Violation::UnknownMember { week, member } => {
                write!(f, "week {week}: unknown member id {member}")
            }
            Violation::Spacing {
                week,
                earlier_week,
                member,
            } => write!(
                f,
                "week {week}: member {member} already on duty in week {earlier_week}"
            ),
            Violation::Blackout { week, member } => {
                write!(f, "week {week}: blocked for member {member}")
            }
        }
    }
}

/// Returns the first hard-constraint failure, or `None` for a valid schedule.
///
/// The look-back window covers `team.span()` weeks, capped at
/// `total_weeks - 1` so that a week is never compared with itself.
pub fn find_violation(team: &Team, schedule: &Schedule) -> Option<Violation> {
    let total = team.total_weeks();
    if schedule.len() != total {
        return Some(Violation::WrongLength {
            expected: total,
            actual: schedule.len(),
        });
    }

    let weeks = schedule.as_slice();
    let window = team.span().min(total - 1);

    for (week, &member) in weeks.iter().enumerate() {
        let Some(person) = team.member(member) else {
            return Some(Violation::UnknownMember { week, member });
        };

        for back in 1..=window {
            let earlier_week = (week + total - back) % total;
            if weeks[earlier_week] == member {
                return Some(Violation::Spacing {
                    week,
                    earlier_week,
                    member,
                });
            }
        }

        if person.preferences.blocked.contains(week as Week) {
            return Some(Violation::Blackout { week, member });
        }
    }
    None
}

/// Whether the schedule satisfies every hard constraint.
pub fn is_valid(team: &Team, schedule: &Schedule) -> bool {
    find_violation(team, schedule).is_none()
}
