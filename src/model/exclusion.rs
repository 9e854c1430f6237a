//! Symmetric exclusion pairs.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::PersonId;

/// Pairs of people who must never share a team.
///
/// Pairs are stored normalized as `(min, max)`, so `insert("B", "A")` and
/// `contains("A", "B")` refer to the same pair and lookup is O(1).
///
/// # Examples
///
/// ```
/// use u_assign::model::ExclusionSet;
///
/// let mut ex = ExclusionSet::new();
/// ex.insert("Bob", "Alice");
/// assert!(ex.contains("Alice", "Bob"));
/// assert!(ex.contains("Bob", "Alice"));
///
/// ex.add_group(["Charlie", "David", "Eve"]);
/// assert_eq!(ex.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(PersonId, PersonId)>", into = "Vec<(PersonId, PersonId)>")
)]
pub struct ExclusionSet {
    pairs: HashSet<(PersonId, PersonId)>,
}

fn normalize(a: &str, b: &str) -> (PersonId, PersonId) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl ExclusionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Excludes `a` and `b` from sharing a team.
    ///
    /// Returns `false` if the pair was already present.
    pub fn insert(&mut self, a: impl AsRef<str>, b: impl AsRef<str>) -> bool {
        self.pairs.insert(normalize(a.as_ref(), b.as_ref()))
    }

    /// Excludes every pair drawn from `names`.
    pub fn add_group<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                if a != b {
                    self.insert(a, b);
                }
            }
        }
    }

    /// Returns `true` if `a` and `b` may not share a team.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        if a <= b {
            self.pairs.contains(&(a.to_string(), b.to_string()))
        } else {
            self.pairs.contains(&(b.to_string(), a.to_string()))
        }
    }

    /// Number of excluded pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no exclusions.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// All pairs, sorted.
    pub fn sorted_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable();
        pairs
    }
}

impl<A: AsRef<str>, B: AsRef<str>> FromIterator<(A, B)> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = (A, B)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (a, b) in iter {
            set.insert(a, b);
        }
        set
    }
}

impl From<Vec<(PersonId, PersonId)>> for ExclusionSet {
    fn from(pairs: Vec<(PersonId, PersonId)>) -> Self {
        pairs.into_iter().collect()
    }
}

/// Normalized pairs in sorted order.
impl From<ExclusionSet> for Vec<(PersonId, PersonId)> {
    fn from(set: ExclusionSet) -> Self {
        let mut pairs: Vec<_> = set.pairs.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}
