//! Assignment results and warnings.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{PersonId, SectionId, TeamId};

/// Non-fatal condition attached to a result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssignmentWarning {
    /// A team ended below its minimum size after rebalancing.
    Shortfall {
        section: SectionId,
        team: TeamId,
        actual: usize,
        required: usize,
    },

    /// Two excluded people ended on the same team because no conflict-free
    /// placement was available.
    ExclusionViolated {
        section: SectionId,
        team: TeamId,
        first: PersonId,
        second: PersonId,
    },
}

impl AssignmentWarning {
    /// Section the warning refers to.
    pub fn section(&self) -> &str {
        match self {
            Self::Shortfall { section, .. } | Self::ExclusionViolated { section, .. } => section,
        }
    }

    /// Team the warning refers to.
    pub fn team(&self) -> TeamId {
        match self {
            Self::Shortfall { team, .. } | Self::ExclusionViolated { team, .. } => *team,
        }
    }
}

impl fmt::Display for AssignmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shortfall {
                section,
                team,
                actual,
                required,
            } => write!(
                f,
                "section '{section}': team {team} has {actual} people, needs {required}"
            ),
            Self::ExclusionViolated {
                section,
                team,
                first,
                second,
            } => write!(
                f,
                "section '{section}': '{first}' and '{second}' share team {team} despite an exclusion"
            ),
        }
    }
}

/// Teams formed in one section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionAssignment {
    /// Section ID.
    pub section: SectionId,

    /// Members of every configured team, in section input order.
    /// Teams nobody joined map to an empty list.
    pub teams: BTreeMap<TeamId, Vec<PersonId>>,

    /// Iterations of the greedy loop.
    pub rounds: usize,

    /// People placed by the fallback rule after exhausting their ranking.
    pub fallbacks: usize,

    /// People moved by rebalancing and exclusion repair.
    pub moves: usize,
}

impl SectionAssignment {
    /// Members of `team`, or an empty slice for unknown teams.
    pub fn members(&self, team: TeamId) -> &[PersonId] {
        self.teams.get(&team).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Team `person` was assigned to.
    pub fn team_of(&self, person: &str) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|(_, members)| members.iter().any(|p| p == person))
            .map(|(&team, _)| team)
    }

    /// Number of people assigned in this section.
    pub fn person_count(&self) -> usize {
        self.teams.values().map(Vec::len).sum()
    }

    /// Team sizes, including empty teams.
    pub fn sizes(&self) -> BTreeMap<TeamId, usize> {
        self.teams.iter().map(|(&t, m)| (t, m.len())).collect()
    }
}

/// Output of an assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignmentResult {
    /// One entry per section, ordered by section ID.
    pub sections: Vec<SectionAssignment>,

    /// Shortfalls and unavoidable exclusion violations across all sections.
    pub warnings: Vec<AssignmentWarning>,
}

impl AssignmentResult {
    /// Looks up a section's assignment.
    pub fn section(&self, id: &str) -> Option<&SectionAssignment> {
        self.sections.iter().find(|s| s.section == id)
    }

    /// Section and team `person` was assigned to.
    pub fn placement_of(&self, person: &str) -> Option<(&str, TeamId)> {
        self.sections
            .iter()
            .find_map(|s| s.team_of(person).map(|t| (s.section.as_str(), t)))
    }

    /// Total number of people assigned.
    pub fn person_count(&self) -> usize {
        self.sections.iter().map(SectionAssignment::person_count).sum()
    }

    /// Shortfall warnings only.
    pub fn shortfalls(&self) -> impl Iterator<Item = &AssignmentWarning> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, AssignmentWarning::Shortfall { .. }))
    }

    /// Exclusion-violation warnings only.
    pub fn violations(&self) -> impl Iterator<Item = &AssignmentWarning> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, AssignmentWarning::ExclusionViolated { .. }))
    }

    /// Returns `true` if any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SectionAssignment {
        let mut teams = BTreeMap::new();
        teams.insert(1, vec!["Alice".to_string(), "Bob".to_string()]);
        teams.insert(2, vec!["Charlie".to_string()]);
        teams.insert(3, vec![]);
        SectionAssignment {
            section: "s".into(),
            teams,
            rounds: 2,
            fallbacks: 0,
            moves: 0,
        }
    }

    #[test]
    fn test_lookup() {
        let s = sample();
        assert_eq!(s.team_of("Charlie"), Some(2));
        assert_eq!(s.team_of("Zed"), None);
        assert_eq!(s.members(1), ["Alice", "Bob"]);
        assert!(s.members(9).is_empty());
        assert_eq!(s.person_count(), 3);
        assert_eq!(s.sizes()[&3], 0);
    }

    #[test]
    fn test_result_filters() {
        let result = AssignmentResult {
            sections: vec![sample()],
            warnings: vec![
                AssignmentWarning::Shortfall {
                    section: "s".into(),
                    team: 2,
                    actual: 1,
                    required: 2,
                },
                AssignmentWarning::ExclusionViolated {
                    section: "s".into(),
                    team: 1,
                    first: "Alice".into(),
                    second: "Bob".into(),
                },
            ],
        };

        assert_eq!(result.shortfalls().count(), 1);
        assert_eq!(result.violations().count(), 1);
        assert_eq!(result.placement_of("Bob"), Some(("s", 1)));
        assert_eq!(result.person_count(), 3);
        assert!(result.has_warnings());
        assert_eq!(result.warnings[1].team(), 1);
        assert_eq!(result.warnings[0].section(), "s");
    }

    #[test]
    fn test_warning_display() {
        let w = AssignmentWarning::Shortfall {
            section: "s".into(),
            team: 2,
            actual: 1,
            required: 3,
        };
        assert_eq!(w.to_string(), "section 's': team 2 has 1 people, needs 3");
    }
}
