//! Preference rankings.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::TeamId;
use crate::error::AssignError;

/// A person's preference order over teams, most preferred first.
///
/// A complete ranking lists every configured team exactly once; the
/// position of a team (1-based) is its rank.
///
/// # Examples
///
/// ```
/// use u_assign::model::Ranking;
///
/// let ranking = Ranking::new(vec![3, 1, 2]);
/// assert_eq!(ranking.top(), Some(3));
/// assert_eq!(ranking.rank_of(1), Some(2));
/// assert_eq!(ranking.rank_of(7), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Ranking(Vec<TeamId>);

impl Ranking {
    /// Creates a ranking from team IDs in preference order.
    pub fn new(order: Vec<TeamId>) -> Self {
        Self(order)
    }

    /// Builds a ranking from the rank-per-team form.
    ///
    /// `ranks[i]` is the rank (1 = most preferred) the person gave to
    /// `team_ids[i]`. Ranks must be exactly `1..=team_ids.len()`, each
    /// used once.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::model::Ranking;
    ///
    /// // Team 10 ranked second, team 20 third, team 30 first.
    /// let ranking = Ranking::from_ranks("Linda", &[10, 20, 30], &[2, 3, 1]).unwrap();
    /// assert_eq!(ranking.as_slice(), &[30, 10, 20]);
    /// ```
    pub fn from_ranks(person: &str, team_ids: &[TeamId], ranks: &[u32]) -> Result<Self, AssignError> {
        let invalid = |reason: String| AssignError::InvalidRanks {
            person: person.to_string(),
            reason,
        };

        let n = team_ids.len();
        if ranks.len() != n {
            return Err(invalid(format!("expected {n} ranks, got {}", ranks.len())));
        }

        let mut order: Vec<Option<TeamId>> = vec![None; n];
        for (&team, &rank) in team_ids.iter().zip(ranks) {
            if rank == 0 || rank as usize > n {
                return Err(invalid(format!("rank {rank} outside 1..={n}")));
            }
            let slot = &mut order[rank as usize - 1];
            if slot.is_some() {
                return Err(invalid(format!("rank {rank} used more than once")));
            }
            *slot = Some(team);
        }

        // n slots, n distinct in-range ranks: every slot is filled.
        Ok(Self(order.into_iter().flatten().collect()))
    }

    /// Team IDs in preference order.
    pub fn as_slice(&self) -> &[TeamId] {
        &self.0
    }

    /// Number of ranked teams.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no team is ranked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most preferred team.
    pub fn top(&self) -> Option<TeamId> {
        self.0.first().copied()
    }

    /// 1-based rank of `team`, or `None` if it is not ranked.
    pub fn rank_of(&self, team: TeamId) -> Option<usize> {
        self.0.iter().position(|&t| t == team).map(|i| i + 1)
    }

    /// First team listed more than once, if any.
    pub fn first_duplicate(&self) -> Option<TeamId> {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter().copied().find(|t| !seen.insert(*t))
    }
}

impl From<Vec<TeamId>> for Ranking {
    fn from(order: Vec<TeamId>) -> Self {
        Self::new(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_lookup() {
        let r = Ranking::new(vec![2, 1]);
        assert_eq!(r.top(), Some(2));
        assert_eq!(r.rank_of(2), Some(1));
        assert_eq!(r.rank_of(1), Some(2));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_empty_ranking() {
        let r = Ranking::default();
        assert!(r.is_empty());
        assert_eq!(r.top(), None);
    }

    #[test]
    fn test_first_duplicate() {
        assert_eq!(Ranking::new(vec![1, 2, 3]).first_duplicate(), None);
        assert_eq!(Ranking::new(vec![1, 2, 1, 2]).first_duplicate(), Some(1));
    }

    #[test]
    fn test_from_ranks_reorders() {
        // Column form: John ranked team 1 first, team 2 second, team 3 third.
        let r = Ranking::from_ranks("John", &[1, 2, 3], &[1, 2, 3]).unwrap();
        assert_eq!(r.as_slice(), &[1, 2, 3]);

        let r = Ranking::from_ranks("James", &[1, 2, 3], &[3, 1, 2]).unwrap();
        assert_eq!(r.as_slice(), &[2, 3, 1]);
    }

    #[test]
    fn test_from_ranks_rejects_out_of_range() {
        let err = Ranking::from_ranks("John", &[1, 2, 3], &[1, 2, 4]).unwrap_err();
        assert!(err.to_string().contains("rank 4 outside 1..=3"));

        let err = Ranking::from_ranks("James", &[1, 2, 3], &[0, 1, 2]).unwrap_err();
        assert!(err.to_string().contains("rank 0"));
    }

    #[test]
    fn test_from_ranks_rejects_duplicates() {
        let err = Ranking::from_ranks("John", &[1, 2, 3], &[1, 1, 3]).unwrap_err();
        assert!(matches!(err, AssignError::InvalidRanks { .. }));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_from_ranks_rejects_wrong_length() {
        let err = Ranking::from_ranks("John", &[1, 2, 3], &[1, 2]).unwrap_err();
        assert!(err.to_string().contains("expected 3 ranks, got 2"));
    }
}
