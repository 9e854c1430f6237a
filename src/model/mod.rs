//! Problem data model.
//!
//! A [`Problem`] bundles everything the engine consumes for one run:
//!
//! - **Teams**: integer IDs with optional display names. Every team is
//!   available in every section.
//! - **Sections**: independent partitions of people. No team spans two
//!   sections.
//! - **Rankings**: each person's complete preference order over all teams.
//! - **Exclusions**: symmetric pairs of people who must not share a team.
//!
//! The model holds plain data. Structural checks live in
//! [`validate`](crate::validate) and run at the start of every
//! [`AssignRunner::run`](crate::assign::AssignRunner::run).

mod exclusion;
mod ranking;
mod types;

pub use exclusion::ExclusionSet;
pub use ranking::Ranking;
pub use types::{PersonId, Problem, Section, SectionId, Team, TeamId, DEFAULT_SECTION};
