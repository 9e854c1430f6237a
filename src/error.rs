//! Error taxonomy for the assignment engine.
//!
//! Every variant is fatal: the engine returns no partial result. Conditions
//! the engine can degrade around (unreachable minimum sizes, unavoidable
//! exclusion conflicts) are reported as
//! [`AssignmentWarning`](crate::assign::AssignmentWarning)s instead.

use thiserror::Error;

use crate::model::{PersonId, SectionId, TeamId};

/// Structurally invalid input rejected before or at the start of a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    #[error("no teams configured")]
    NoTeams,

    #[error("team {0} is configured more than once")]
    DuplicateTeam(TeamId),

    #[error("section '{0}' is configured more than once")]
    DuplicateSection(SectionId),

    #[error("section '{0}' contains no people")]
    EmptySection(SectionId),

    #[error("person '{person}' appears in both section '{first}' and section '{second}'")]
    DuplicatePerson {
        person: PersonId,
        first: SectionId,
        second: SectionId,
    },

    #[error("invalid person name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("person '{0}' has no ranking")]
    MissingRanking(PersonId),

    #[error("ranking for '{person}' references unknown team {team}")]
    UnknownTeam { person: PersonId, team: TeamId },

    #[error("ranking for '{person}' lists team {team} more than once")]
    DuplicateRank { person: PersonId, team: TeamId },

    #[error("ranking for '{person}' is incomplete: missing teams {missing:?}")]
    IncompleteRanking {
        person: PersonId,
        missing: Vec<TeamId>,
    },

    #[error("rank values for '{person}' are invalid: {reason}")]
    InvalidRanks { person: PersonId, reason: String },

    #[error("exclusion references unknown person '{0}'")]
    UnknownPerson(PersonId),

    #[error("'{0}' cannot be excluded from themselves")]
    SelfExclusion(PersonId),

    #[error(
        "section '{section}' has {people} people but team {team} requires {required} \
         and fewer than two teams are configured"
    )]
    ImpossibleMinSize {
        section: SectionId,
        team: TeamId,
        people: usize,
        required: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
