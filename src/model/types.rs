//! Teams, sections, and the problem bundle.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::exclusion::ExclusionSet;
use super::ranking::Ranking;
use crate::error::AssignError;

/// Team identifier.
pub type TeamId = u32;

/// Person identifier (the person's name).
pub type PersonId = String;

/// Section identifier.
pub type SectionId = String;

/// Section ID used by [`Problem::with_people`].
pub const DEFAULT_SECTION: &str = "default";

/// A team people can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Team {
    /// Unique team ID.
    pub id: TeamId,
    /// Optional display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

impl Team {
    /// Creates an unnamed team.
    pub fn new(id: TeamId) -> Self {
        Self { id, name: None }
    }

    /// Creates a team with a display name.
    pub fn named(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    /// Display name, falling back to the numeric ID.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }
}

/// An independent group of people assigned separately from other sections.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    /// Unique section ID.
    pub id: SectionId,
    /// People in this section, in input order.
    pub people: Vec<PersonId>,
}

impl Section {
    /// Creates a section from an ID and its people.
    pub fn new<I, S>(id: impl Into<SectionId>, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PersonId>,
    {
        Self {
            id: id.into(),
            people: people.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of people.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Returns `true` if the section has no people.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Returns `true` if `person` belongs to this section.
    pub fn contains(&self, person: &str) -> bool {
        self.people.iter().any(|p| p == person)
    }
}

/// A complete assignment problem instance.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Problem, Section, Team};
///
/// let problem = Problem::new(vec![Team::named(1, "Red"), Team::named(2, "Blue")])
///     .with_section(Section::new("morning", ["Alice", "Bob", "Charlie"]))
///     .with_ranking("Alice", vec![1, 2])
///     .with_ranking("Bob", vec![1, 2])
///     .with_ranking("Charlie", vec![2, 1])
///     .with_exclusion("Alice", "Bob");
///
/// assert!(problem.validate().is_ok());
/// assert_eq!(problem.person_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Problem {
    /// Configured teams.
    pub teams: Vec<Team>,
    /// Sections to assign.
    pub sections: Vec<Section>,
    /// One ranking per person.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rankings: BTreeMap<PersonId, Ranking>,
    /// Exclusion pairs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exclusions: ExclusionSet,
}

impl Problem {
    /// Creates a problem with the given teams and no people.
    pub fn new(teams: Vec<Team>) -> Self {
        Self {
            teams,
            ..Self::default()
        }
    }

    /// Creates a problem with unnamed teams `1..=count`.
    pub fn with_team_count(count: u32) -> Self {
        Self::new((1..=count).map(Team::new).collect())
    }

    /// Adds a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Adds a section (builder form).
    pub fn with_section(mut self, section: Section) -> Self {
        self.add_section(section);
        self
    }

    /// Puts `people` into a single section named [`DEFAULT_SECTION`].
    pub fn with_people<I, S>(self, people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PersonId>,
    {
        self.with_section(Section::new(DEFAULT_SECTION, people))
    }

    /// Sets a person's ranking (team IDs, most preferred first),
    /// replacing any previous one.
    pub fn set_ranking(&mut self, person: impl Into<PersonId>, order: Vec<TeamId>) {
        self.rankings.insert(person.into(), Ranking::new(order));
    }

    /// Sets a person's ranking (builder form).
    pub fn with_ranking(mut self, person: impl Into<PersonId>, order: Vec<TeamId>) -> Self {
        self.set_ranking(person, order);
        self
    }

    /// Forbids `a` and `b` from sharing a team.
    pub fn add_exclusion(&mut self, a: impl AsRef<str>, b: impl AsRef<str>) {
        self.exclusions.insert(a, b);
    }

    /// Forbids `a` and `b` from sharing a team (builder form).
    pub fn with_exclusion(mut self, a: impl AsRef<str>, b: impl AsRef<str>) -> Self {
        self.add_exclusion(a, b);
        self
    }

    /// Team IDs in ascending order.
    pub fn team_ids(&self) -> Vec<TeamId> {
        let mut ids: Vec<TeamId> = self.teams.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Looks up a team by ID.
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Looks up a section by ID.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Section a person belongs to.
    pub fn section_of(&self, person: &str) -> Option<&SectionId> {
        self.sections
            .iter()
            .find(|s| s.contains(person))
            .map(|s| &s.id)
    }

    /// Total number of people across all sections.
    pub fn person_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Checks the problem for structural errors.
    ///
    /// See [`validate_problem`](crate::validate::validate_problem).
    pub fn validate(&self) -> Result<(), AssignError> {
        crate::validate::validate_problem(self)
    }
}
