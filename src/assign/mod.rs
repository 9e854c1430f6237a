//! Preference-driven team assignment engine.
//!
//! Assigns people to teams section by section with a greedy,
//! popularity-driven heuristic:
//!
//! - **Greedy rounds**: each round the team that most unassigned people
//!   currently rank highest takes its candidates, skipping anyone excluded
//!   from a current member.
//! - **Rebalancing**: under-filled teams pull the weakest-preference members
//!   of over-full teams, never across an exclusion.
//! - **Exclusion repair**: pairs forced together by fallback placement are
//!   split where a conflict-free team exists.
//!
//! The engine is pure: inputs are borrowed, every tie is broken by an
//! explicit order, and identical inputs give identical results. It is not
//! an optimal matching solver.

mod config;
mod rebalance;
mod result;
mod runner;
mod section;
mod summary;

pub use config::{AssignConfig, ClosurePolicy};
pub use result::{AssignmentResult, AssignmentWarning, SectionAssignment};
pub use runner::AssignRunner;
pub use summary::AssignmentSummary;

use crate::error::AssignError;
use crate::model::Problem;

/// Shorthand for [`AssignRunner::run`].
pub fn assign(problem: &Problem, config: &AssignConfig) -> Result<AssignmentResult, AssignError> {
    AssignRunner::run(problem, config)
}
