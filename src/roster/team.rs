//! Team and per-member week preferences.
//!
//! The [`Team`] is the read-only preference store the generator, validator
//! and scorer share. It is built once from already-parsed input and never
//! mutated afterwards.

use crate::error::ConfigError;
use std::collections::{HashMap, HashSet};

/// Zero-based week index within the rotation year.
///
/// Signed so that input week sets can carry whatever the caller parsed;
/// weeks outside `0..total_weeks` are stored as-is and never match.
pub type Week = i64;

/// Index of a member within its [`Team`].
pub type MemberId = usize;

/// A set of week indices. Only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeekSet(HashSet<Week>);

impl WeekSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `week` is in the set.
    pub fn contains(&self, week: Week) -> bool {
        self.0.contains(&week)
    }

    pub fn insert(&mut self, week: Week) -> bool {
        self.0.insert(week)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Week> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Week> for WeekSet {
    fn from_iter<I: IntoIterator<Item = Week>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Week; N]> for WeekSet {
    fn from(weeks: [Week; N]) -> Self {
        weeks.into_iter().collect()
    }
}

/// Preference severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Hard blackout: the member cannot take the week at all.
    Sev1,
    /// Strong preference to avoid the week.
    Sev2,
    /// Mild preference to avoid the week.
    Sev3,
}

impl Severity {
    /// Penalty points for a soft violation; `None` for the hard level.
    pub fn soft_cost(self) -> Option<u64> {
        match self {
            Severity::Sev1 => None,
            Severity::Sev2 => Some(2),
            Severity::Sev3 => Some(1),
        }
    }
}

/// One member's three week sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Preferences {
    /// Weeks the member cannot take (SEV1).
    pub blocked: WeekSet,
    /// Weeks the member strongly prefers to avoid (SEV2).
    pub high_penalty: WeekSet,
    /// Weeks the member mildly prefers to avoid (SEV3).
    pub low_penalty: WeekSet,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocked(mut self, weeks: impl IntoIterator<Item = Week>) -> Self {
        self.blocked = weeks.into_iter().collect();
        self
    }

    pub fn with_high_penalty(mut self, weeks: impl IntoIterator<Item = Week>) -> Self {
        self.high_penalty = weeks.into_iter().collect();
        self
    }

    pub fn with_low_penalty(mut self, weeks: impl IntoIterator<Item = Week>) -> Self {
        self.low_penalty = weeks.into_iter().collect();
        self
    }

    /// The week set for a severity level.
    pub fn weeks(&self, severity: Severity) -> &WeekSet {
        match severity {
            Severity::Sev1 => &self.blocked,
            Severity::Sev2 => &self.high_penalty,
            Severity::Sev3 => &self.low_penalty,
        }
    }
}

/// A team member.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: Preferences,
}

impl Member {
    /// A member with no constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preferences: Preferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }
}

/// The rotation team plus the number of weeks to cover.
///
/// # Examples
///
/// ```
/// use u_oncall::roster::{Member, Team};
///
/// let members = ["ana", "bo", "cy", "dee", "eli"].map(Member::new).to_vec();
/// let team = Team::new(members, 52).unwrap();
/// assert_eq!(team.member_count(), 5);
/// assert_eq!(team.span(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Team {
    members: Vec<Member>,
    total_weeks: usize,
}

impl Team {
    /// Builds a team, rejecting empty teams, zero weeks and duplicate names.
    pub fn new(members: Vec<Member>, total_weeks: usize) -> Result<Self, ConfigError> {
        if members.is_empty() {
            return Err(ConfigError::EmptyTeam);
        }
        if total_weeks == 0 {
            return Err(ConfigError::NoWeeks);
        }
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.name.as_str()) {
                return Err(ConfigError::DuplicateMember(member.name.clone()));
            }
        }
        Ok(Self {
            members,
            total_weeks,
        })
    }

    /// Builds a team from an ordered name list and a name → preferences map.
    ///
    /// Entries in `preferences` for names not in `names` are ignored.
    pub fn from_preferences<I, S>(
        names: I,
        preferences: &HashMap<String, Preferences>,
        total_weeks: usize,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                match preferences.get(&name) {
                    Some(prefs) => Ok(Member::new(name).with_preferences(prefs.clone())),
                    None => Err(ConfigError::MissingPreferences(name)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(members, total_weeks)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn total_weeks(&self) -> usize {
        self.total_weeks
    }

    /// Minimum separation between two shifts of one member:
    /// `ceil(member_count / 2)`.
    pub fn span(&self) -> usize {
        self.members.len().div_ceil(2)
    }

    /// Looks a member up by name.
    pub fn id_of(&self, name: &str) -> Option<MemberId> {
        self.members.iter().position(|m| m.name == name)
    }
}
