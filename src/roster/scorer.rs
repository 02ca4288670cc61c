//! Soft-preference penalty.
//!
//! Each week costs 2 points if it is in the on-duty member's high-penalty
//! set and 1 point if it is in the low-penalty set; a week in both costs 3.

use super::schedule::Schedule;
use super::team::{MemberId, Severity, Team, Week};

/// One soft-preference violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoftHit {
    pub week: usize,
    pub member: MemberId,
    pub severity: Severity,
}

impl SoftHit {
    /// Penalty points this hit contributes.
    pub fn cost(&self) -> u64 {
        self.severity.soft_cost().unwrap_or(0)
    }
}

/// Total penalty of a schedule.
///
/// Meant for schedules that passed validation; weeks with unknown member
/// ids contribute nothing.
pub fn penalty(team: &Team, schedule: &Schedule) -> u64 {
    schedule
        .as_slice()
        .iter()
        .enumerate()
        .filter_map(|(week, &id)| team.member(id).map(|m| (week as Week, m)))
        .map(|(week, member)| {
            let prefs = &member.preferences;
            let mut cost = 0u64;
            if prefs.high_penalty.contains(week) {
                cost += 2;
            }
            if prefs.low_penalty.contains(week) {
                cost += 1;
            }
            cost
        })
        .sum()
}

/// Every soft violation in week order, SEV2 before SEV3 within a week.
///
/// The costs of the returned hits always add up to [`penalty`].
pub fn breakdown(team: &Team, schedule: &Schedule) -> Vec<SoftHit> {
    let mut hits = Vec::new();
    for (week, &member) in schedule.as_slice().iter().enumerate() {
        let Some(person) = team.member(member) else {
            continue;
        };
        for severity in [Severity::Sev2, Severity::Sev3] {
            if person.preferences.weeks(severity).contains(week as Week) {
                hits.push(SoftHit {
                    week,
                    member,
                    severity,
                });
            }
        }
    }
    hits
}
