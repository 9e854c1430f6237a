//! Assignment statistics.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::result::AssignmentResult;
use crate::model::{Problem, SectionId, TeamId};

/// Aggregate view of an [`AssignmentResult`].
///
/// # Examples
///
/// ```
/// use u_assign::assign::{AssignConfig, AssignRunner, AssignmentSummary};
/// use u_assign::model::Problem;
///
/// let problem = Problem::with_team_count(2)
///     .with_people(["A", "B", "C"])
///     .with_ranking("A", vec![1, 2])
///     .with_ranking("B", vec![1, 2])
///     .with_ranking("C", vec![2, 1]);
/// let result = AssignRunner::run(&problem, &AssignConfig::default().with_min_size(1)).unwrap();
///
/// let summary = AssignmentSummary::new(&problem, &result);
/// assert_eq!(summary.total_people, 3);
/// assert_eq!(summary.rank_histogram.get(&1), Some(&3));
/// assert_eq!(summary.average_team_size, 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignmentSummary {
    /// Number of people assigned.
    pub total_people: usize,

    /// Team sizes per section, including empty teams.
    pub team_sizes: BTreeMap<SectionId, BTreeMap<TeamId, usize>>,

    /// Mean size of non-empty teams, rounded to two decimals.
    pub average_team_size: f64,

    /// How many people received the team they ranked `k`, keyed by `k`.
    pub rank_histogram: BTreeMap<usize, usize>,

    /// Mean rank of the received team (1.0 = everyone got their first choice).
    pub mean_rank: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl AssignmentSummary {
    /// Summarizes `result`, looking up received ranks in `problem`.
    pub fn new(problem: &Problem, result: &AssignmentResult) -> Self {
        let mut summary = Self::default();
        let mut non_empty = 0usize;
        let mut rank_total = 0usize;
        let mut ranked = 0usize;

        for section in &result.sections {
            summary.team_sizes.insert(section.section.clone(), section.sizes());

            for (&team, members) in &section.teams {
                if !members.is_empty() {
                    non_empty += 1;
                }
                summary.total_people += members.len();

                for person in members {
                    let Some(rank) = problem.rankings.get(person).and_then(|r| r.rank_of(team)) else {
                        continue;
                    };
                    *summary.rank_histogram.entry(rank).or_insert(0) += 1;
                    rank_total += rank;
                    ranked += 1;
                }
            }
        }

        if non_empty > 0 {
            summary.average_team_size = round2(summary.total_people as f64 / non_empty as f64);
        }
        if ranked > 0 {
            summary.mean_rank = rank_total as f64 / ranked as f64;
        }
        summary
    }

    /// Share of people who received their first choice, in `[0, 1]`.
    pub fn first_choice_rate(&self) -> f64 {
        if self.total_people == 0 {
            return 0.0;
        }
        self.rank_histogram.get(&1).copied().unwrap_or(0) as f64 / self.total_people as f64
    }
}
