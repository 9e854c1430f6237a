//! Assignment configuration.
//!
//! [`AssignConfig`] carries every run-wide knob explicitly, so the engine
//! never reads ambient state.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::TeamId;

/// When a team stops accepting people during the greedy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClosurePolicy {
    /// Teams never close; a selected team takes every admissible candidate.
    /// Sizes are evened out afterwards by rebalancing.
    #[default]
    Never,

    /// A team closes once it has reached its minimum size and the people
    /// still unassigned suffice to bring every other open team up to its
    /// own minimum.
    AtMinSize,

    /// A team closes as soon as it holds this many people.
    AtSize(usize),
}

/// Configuration for the assignment engine.
///
/// # Examples
///
/// ```
/// use u_assign::assign::{AssignConfig, ClosurePolicy};
///
/// let config = AssignConfig::default()
///     .with_min_size(3)
///     .with_team_min_size(7, 4)
///     .with_closure(ClosurePolicy::AtMinSize);
///
/// assert_eq!(config.min_size_for(1), 3);
/// assert_eq!(config.min_size_for(7), 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AssignConfig {
    /// Minimum number of people per team.
    pub min_size: usize,

    /// Per-team overrides of `min_size`.
    pub team_min_sizes: BTreeMap<TeamId, usize>,

    /// Closure rule applied during the greedy pass.
    pub closure: ClosurePolicy,

    /// Whether to pull people into under-filled teams after the greedy pass.
    pub rebalance: bool,

    /// Whether to try moving people out of teams that violate an exclusion.
    pub repair_exclusions: bool,

    /// Whether to solve sections concurrently.
    ///
    /// Only takes effect when the crate is built with the `parallel`
    /// feature; results are identical either way.
    pub parallel: bool,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            min_size: 2,
            team_min_sizes: BTreeMap::new(),
            closure: ClosurePolicy::Never,
            rebalance: true,
            repair_exclusions: true,
            parallel: true,
        }
    }
}

impl AssignConfig {
    /// Sets the minimum team size.
    pub fn with_min_size(mut self, n: usize) -> Self {
        self.min_size = n;
        self
    }

    /// Overrides the minimum size of one team.
    pub fn with_team_min_size(mut self, team: TeamId, n: usize) -> Self {
        self.team_min_sizes.insert(team, n);
        self
    }

    /// Sets the closure policy.
    pub fn with_closure(mut self, closure: ClosurePolicy) -> Self {
        self.closure = closure;
        self
    }

    /// Enables or disables the rebalancing pass.
    pub fn with_rebalance(mut self, rebalance: bool) -> Self {
        self.rebalance = rebalance;
        self
    }

    /// Enables or disables exclusion repair.
    pub fn with_repair_exclusions(mut self, repair: bool) -> Self {
        self.repair_exclusions = repair;
        self
    }

    /// Enables or disables parallel section solving.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Minimum size that applies to `team`.
    pub fn min_size_for(&self, team: TeamId) -> usize {
        self.team_min_sizes.get(&team).copied().unwrap_or(self.min_size)
    }

    /// Validates the configuration.
    ///
    /// Team IDs in `team_min_sizes` are checked against the problem by the
    /// runner, which knows the configured teams.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_size == 0 {
            return Err("min_size must be at least 1".into());
        }
        if let Some((team, _)) = self.team_min_sizes.iter().find(|(_, &n)| n == 0) {
            return Err(format!("min size override for team {team} must be at least 1"));
        }
        if let ClosurePolicy::AtSize(cap) = self.closure {
            let largest = self
                .team_min_sizes
                .values()
                .copied()
                .chain(std::iter::once(self.min_size))
                .max()
                .unwrap_or(self.min_size);
            if cap < largest {
                return Err(format!(
                    "closure size {cap} is below the largest min size {largest}"
                ));
            }
        }
        Ok(())
    }
}
