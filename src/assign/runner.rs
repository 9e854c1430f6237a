//! Assignment execution engine.
//!
//! [`AssignRunner`] validates the input, solves every section
//! independently, and merges the per-section results in section ID order.
//! Each section runs greedy popularity rounds, then rebalancing, then
//! exclusion repair (see [`section`](super::section) and
//! [`rebalance`](super::rebalance)).

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::AssignConfig;
use super::rebalance::{collect_warnings, rebalance, repair_exclusions};
use super::result::{AssignmentResult, AssignmentWarning, SectionAssignment};
use super::section::{greedy_pass, SectionContext, SectionState};
use crate::error::AssignError;
use crate::model::{PersonId, Problem, Section, TeamId};
use crate::validate::validate_feasibility;

/// Assignment engine runner.
pub struct AssignRunner;

impl AssignRunner {
    /// Assigns every person in `problem` to a team.
    ///
    /// Fails without a partial result if the configuration or the problem
    /// is structurally invalid. Unreachable minimum sizes and unavoidable
    /// exclusion conflicts are reported as warnings on the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::assign::{AssignConfig, AssignRunner};
    /// use u_assign::model::Problem;
    ///
    /// let problem = Problem::with_team_count(2)
    ///     .with_people(["A", "B", "C"])
    ///     .with_ranking("A", vec![1, 2])
    ///     .with_ranking("B", vec![1, 2])
    ///     .with_ranking("C", vec![2, 1]);
    ///
    /// let result = AssignRunner::run(&problem, &AssignConfig::default().with_min_size(1)).unwrap();
    /// let section = &result.sections[0];
    /// assert_eq!(section.members(1), ["A", "B"]);
    /// assert_eq!(section.members(2), ["C"]);
    /// ```
    pub fn run(problem: &Problem, config: &AssignConfig) -> Result<AssignmentResult, AssignError> {
        config.validate().map_err(AssignError::InvalidConfig)?;
        problem.validate()?;
        if let Some(team) = config
            .team_min_sizes
            .keys()
            .find(|&&t| problem.team(t).is_none())
        {
            return Err(AssignError::InvalidConfig(format!(
                "min size override for unknown team {team}"
            )));
        }
        validate_feasibility(problem, config)?;

        let mut sections: Vec<&Section> = problem.sections.iter().collect();
        sections.sort_by(|a, b| a.id.cmp(&b.id));

        let solved = Self::solve_all(problem, config, &sections);

        let mut result = AssignmentResult::default();
        for (assignment, warnings) in solved {
            result.sections.push(assignment);
            result.warnings.extend(warnings);
        }

        tracing::info!(
            sections = result.sections.len(),
            people = result.person_count(),
            warnings = result.warnings.len(),
            "assignment complete"
        );
        Ok(result)
    }

    #[cfg(feature = "parallel")]
    fn solve_all(
        problem: &Problem,
        config: &AssignConfig,
        sections: &[&Section],
    ) -> Vec<(SectionAssignment, Vec<AssignmentWarning>)> {
        if config.parallel {
            sections
                .par_iter()
                .map(|s| Self::solve_section(problem, config, s))
                .collect()
        } else {
            sections
                .iter()
                .map(|s| Self::solve_section(problem, config, s))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn solve_all(
        problem: &Problem,
        config: &AssignConfig,
        sections: &[&Section],
    ) -> Vec<(SectionAssignment, Vec<AssignmentWarning>)> {
        sections
            .iter()
            .map(|s| Self::solve_section(problem, config, s))
            .collect()
    }

    /// Solves one section of an already-validated problem.
    fn solve_section(
        problem: &Problem,
        config: &AssignConfig,
        section: &Section,
    ) -> (SectionAssignment, Vec<AssignmentWarning>) {
        let ctx = SectionContext::build(problem, section, config);
        let mut state = SectionState::new(&ctx);

        greedy_pass(&ctx, config, &mut state);
        if config.rebalance {
            rebalance(&ctx, config, &mut state);
        }
        if config.repair_exclusions {
            repair_exclusions(&ctx, config, &mut state);
        }
        let warnings = collect_warnings(&ctx, &state);

        for warning in &warnings {
            tracing::warn!(%warning, "assignment warning");
        }
        tracing::info!(
            section = %section.id,
            people = section.len(),
            rounds = state.rounds,
            fallbacks = state.fallbacks,
            moves = state.moves,
            "section assigned"
        );

        let teams: BTreeMap<TeamId, Vec<PersonId>> = ctx
            .team_ids
            .iter()
            .zip(&state.members)
            .map(|(&id, members)| {
                let mut members = members.clone();
                members.sort_unstable();
                (id, members.into_iter().map(|p| ctx.name(p).to_string()).collect())
            })
            .collect();

        let assignment = SectionAssignment {
            section: section.id.clone(),
            teams,
            rounds: state.rounds,
            fallbacks: state.fallbacks,
            moves: state.moves,
        };
        (assignment, warnings)
    }
}
