//! Input validation.
//!
//! [`validate_problem`] enforces the structural invariants the engine
//! relies on and fails fast with the first [`AssignError`] found.
//! [`validate_rank_table`] is a softer, report-style check for raw
//! rank-per-team tables before they are turned into [`Ranking`]s: it
//! collects every problem instead of stopping at the first.
//!
//! [`Ranking`]: crate::model::Ranking

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::assign::AssignConfig;
use crate::error::AssignError;
use crate::model::{PersonId, Problem, SectionId, TeamId};

/// Longest accepted person name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Rejects empty, whitespace-only, and overlong names.
pub fn validate_person_name(name: &str) -> Result<(), AssignError> {
    let reason = if name.trim().is_empty() {
        "names cannot be empty or whitespace-only"
    } else if name.chars().count() > MAX_NAME_LEN {
        "names are limited to 100 characters"
    } else {
        return Ok(());
    };
    Err(AssignError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// Checks a problem for structural errors.
///
/// In order: at least one team and unique team IDs; unique, non-empty
/// sections with valid names and no person in two sections; every ranking
/// refers to known teams without repeats; every sectioned person has a
/// complete ranking; every exclusion names two distinct known people.
pub fn validate_problem(problem: &Problem) -> Result<(), AssignError> {
    if problem.teams.is_empty() {
        return Err(AssignError::NoTeams);
    }
    let mut team_ids = HashSet::with_capacity(problem.teams.len());
    for team in &problem.teams {
        if !team_ids.insert(team.id) {
            return Err(AssignError::DuplicateTeam(team.id));
        }
    }

    let mut section_ids = HashSet::with_capacity(problem.sections.len());
    let mut home: HashMap<&str, &SectionId> = HashMap::new();
    for section in &problem.sections {
        if !section_ids.insert(section.id.as_str()) {
            return Err(AssignError::DuplicateSection(section.id.clone()));
        }
        if section.is_empty() {
            return Err(AssignError::EmptySection(section.id.clone()));
        }
        for person in &section.people {
            validate_person_name(person)?;
            if let Some(first) = home.insert(person.as_str(), &section.id) {
                return Err(AssignError::DuplicatePerson {
                    person: person.clone(),
                    first: first.clone(),
                    second: section.id.clone(),
                });
            }
        }
    }

    for (person, ranking) in &problem.rankings {
        if let Some(team) = ranking
            .as_slice()
            .iter()
            .copied()
            .find(|t| !team_ids.contains(t))
        {
            return Err(AssignError::UnknownTeam {
                person: person.clone(),
                team,
            });
        }
        if let Some(team) = ranking.first_duplicate() {
            return Err(AssignError::DuplicateRank {
                person: person.clone(),
                team,
            });
        }
    }

    let all_teams = problem.team_ids();
    for section in &problem.sections {
        for person in &section.people {
            let ranking = problem
                .rankings
                .get(person)
                .ok_or_else(|| AssignError::MissingRanking(person.clone()))?;
            if ranking.len() != all_teams.len() {
                let missing: Vec<TeamId> = all_teams
                    .iter()
                    .copied()
                    .filter(|&t| ranking.rank_of(t).is_none())
                    .collect();
                return Err(AssignError::IncompleteRanking {
                    person: person.clone(),
                    missing,
                });
            }
        }
    }

    for (a, b) in problem.exclusions.sorted_pairs() {
        if a == b {
            return Err(AssignError::SelfExclusion(a.to_string()));
        }
        for person in [a, b] {
            if !home.contains_key(person) {
                return Err(AssignError::UnknownPerson(person.to_string()));
            }
        }
    }

    Ok(())
}

/// Rejects minimum sizes that can never be met.
///
/// With two or more teams an unreachable minimum only produces shortfall
/// warnings. With a single team, a section smaller than that team's
/// minimum is structurally impossible.
pub fn validate_feasibility(problem: &Problem, config: &AssignConfig) -> Result<(), AssignError> {
    if problem.teams.len() >= 2 {
        return Ok(());
    }
    for section in &problem.sections {
        for team in &problem.teams {
            let required = config.min_size_for(team.id);
            if required > section.len() {
                return Err(AssignError::ImpossibleMinSize {
                    section: section.id.clone(),
                    team: team.id,
                    people: section.len(),
                    required,
                });
            }
        }
    }
    Ok(())
}

/// Findings from [`validate_rank_table`], grouped by category.
///
/// Each entry is a human-readable line naming the person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankTableReport {
    /// People missing some rank values.
    pub missing_ranks: Vec<String>,
    /// People who used a rank value more than once.
    pub duplicate_ranks: Vec<String>,
    /// People with rank values outside `1..=team_count`.
    pub invalid_ranks: Vec<String>,
    /// People who did not rank every team.
    pub incomplete_rankings: Vec<String>,
}

impl RankTableReport {
    /// Returns `true` if no category has findings.
    pub fn is_valid(&self) -> bool {
        self.missing_ranks.is_empty()
            && self.duplicate_ranks.is_empty()
            && self.invalid_ranks.is_empty()
            && self.incomplete_rankings.is_empty()
    }

    /// Total number of findings.
    pub fn issue_count(&self) -> usize {
        self.missing_ranks.len()
            + self.duplicate_ranks.len()
            + self.invalid_ranks.len()
            + self.incomplete_rankings.len()
    }
}

/// Checks raw rank-per-team rows against `1..=team_count`.
///
/// `table[person]` holds the rank that person gave to each team.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_assign::validate::validate_rank_table;
///
/// let mut table = BTreeMap::new();
/// table.insert("John".to_string(), vec![1, 2, 3]);
/// table.insert("Linda".to_string(), vec![2, 2, 1]);
///
/// let report = validate_rank_table(3, &table);
/// assert!(!report.is_valid());
/// assert_eq!(report.duplicate_ranks, vec!["Linda: duplicate ranks [2]"]);
/// assert_eq!(report.missing_ranks, vec!["Linda: missing ranks [3]"]);
/// ```
pub fn validate_rank_table(team_count: usize, table: &BTreeMap<PersonId, Vec<u32>>) -> RankTableReport {
    let mut report = RankTableReport::default();
    if team_count == 0 {
        return report;
    }
    let Ok(max) = u32::try_from(team_count) else {
        for person in table.keys() {
            report.invalid_ranks.push(format!(
                "{person}: team count {team_count} exceeds the rank range"
            ));
        }
        return report;
    };

    for (person, ranks) in table {
        if ranks.len() != team_count {
            report.incomplete_rankings.push(format!(
                "{person}: has {} rankings, expected {team_count}",
                ranks.len()
            ));
        }

        let invalid: Vec<u32> = ranks.iter().copied().filter(|&r| r < 1 || r > max).collect();
        if !invalid.is_empty() {
            report.invalid_ranks.push(format!(
                "{person}: invalid ranks {invalid:?} (valid range: 1-{team_count})"
            ));
        }

        let mut seen = BTreeSet::new();
        let duplicates: BTreeSet<u32> = ranks.iter().copied().filter(|r| !seen.insert(*r)).collect();
        if !duplicates.is_empty() {
            let duplicates: Vec<u32> = duplicates.into_iter().collect();
            report
                .duplicate_ranks
                .push(format!("{person}: duplicate ranks {duplicates:?}"));
        }

        let missing: Vec<u32> = (1..=max).filter(|r| !seen.contains(r)).collect();
        if !missing.is_empty() {
            report
                .missing_ranks
                .push(format!("{person}: missing ranks {missing:?}"));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, Team};

    fn base() -> Problem {
        Problem::with_team_count(2)
            .with_section(Section::new("s", ["Alice", "Bob"]))
            .with_ranking("Alice", vec![1, 2])
            .with_ranking("Bob", vec![2, 1])
    }

    #[test]
    fn test_valid_problem() {
        assert_eq!(validate_problem(&base()), Ok(()));
    }

    #[test]
    fn test_no_teams() {
        let p = Problem::default().with_people(["Alice"]);
        assert_eq!(validate_problem(&p), Err(AssignError::NoTeams));
    }

    #[test]
    fn test_duplicate_team() {
        let mut p = base();
        p.teams.push(Team::named(2, "again"));
        assert_eq!(validate_problem(&p), Err(AssignError::DuplicateTeam(2)));
    }

    #[test]
    fn test_empty_section() {
        let p = base().with_section(Section::new("empty", Vec::<String>::new()));
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::EmptySection("empty".into()))
        );
    }

    #[test]
    fn test_duplicate_section() {
        let p = base().with_section(Section::new("s", ["Charlie"]));
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::DuplicateSection("s".into()))
        );
    }

    #[test]
    fn test_person_in_two_sections() {
        let p = base().with_section(Section::new("t", ["Alice"]));
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::DuplicatePerson {
                person: "Alice".into(),
                first: "s".into(),
                second: "t".into(),
            })
        );
    }

    #[test]
    fn test_unknown_team_in_ranking() {
        let p = base().with_ranking("Alice", vec![1, 3]);
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::UnknownTeam {
                person: "Alice".into(),
                team: 3,
            })
        );
    }

    #[test]
    fn test_duplicate_rank() {
        let p = base().with_ranking("Bob", vec![1, 1]);
        assert!(matches!(
            validate_problem(&p),
            Err(AssignError::DuplicateRank { team: 1, .. })
        ));
    }

    #[test]
    fn test_incomplete_ranking() {
        let p = base().with_ranking("Bob", vec![2]);
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::IncompleteRanking {
                person: "Bob".into(),
                missing: vec![1],
            })
        );
    }

    #[test]
    fn test_missing_ranking() {
        let mut p = base();
        p.rankings.remove("Bob");
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::MissingRanking("Bob".into()))
        );
    }

    #[test]
    fn test_exclusion_with_unknown_person() {
        let p = base().with_exclusion("Alice", "Unknown");
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::UnknownPerson("Unknown".into()))
        );
    }

    #[test]
    fn test_self_exclusion() {
        let p = base().with_exclusion("Alice", "Alice");
        assert_eq!(
            validate_problem(&p),
            Err(AssignError::SelfExclusion("Alice".into()))
        );
    }

    #[test]
    fn test_person_names() {
        assert!(validate_person_name("Alice").is_ok());
        assert!(validate_person_name("").is_err());
        assert!(validate_person_name("   ").is_err());
        assert!(validate_person_name(&"x".repeat(101)).is_err());
        assert!(validate_person_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_whitespace_name_rejected_in_problem() {
        let p = Problem::with_team_count(1)
            .with_people(["  "])
            .with_ranking("  ", vec![1]);
        assert!(matches!(
            validate_problem(&p),
            Err(AssignError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_feasibility_single_team() {
        let p = Problem::with_team_count(1)
            .with_people(["Alice", "Bob"])
            .with_ranking("Alice", vec![1])
            .with_ranking("Bob", vec![1]);

        assert!(validate_feasibility(&p, &AssignConfig::default().with_min_size(2)).is_ok());
        assert_eq!(
            validate_feasibility(&p, &AssignConfig::default().with_min_size(3)),
            Err(AssignError::ImpossibleMinSize {
                section: "default".into(),
                team: 1,
                people: 2,
                required: 3,
            })
        );
    }

    #[test]
    fn test_feasibility_many_teams_defers_to_warnings() {
        let p = base();
        assert!(validate_feasibility(&p, &AssignConfig::default().with_min_size(5)).is_ok());
    }

    #[test]
    fn test_rank_table_valid() {
        let mut table = BTreeMap::new();
        table.insert("John".to_string(), vec![1, 2, 3]);
        table.insert("Linda".to_string(), vec![2, 3, 1]);
        table.insert("James".to_string(), vec![3, 1, 2]);
        let report = validate_rank_table(3, &table);
        assert!(report.is_valid());
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn test_rank_table_invalid_range() {
        let mut table = BTreeMap::new();
        table.insert("James".to_string(), vec![0, 1, 2]);
        table.insert("John".to_string(), vec![1, 2, 4]);
        let report = validate_rank_table(3, &table);

        assert_eq!(
            report.invalid_ranks,
            vec![
                "James: invalid ranks [0] (valid range: 1-3)",
                "John: invalid ranks [4] (valid range: 1-3)",
            ]
        );
        assert_eq!(
            report.missing_ranks,
            vec!["James: missing ranks [3]", "John: missing ranks [3]"]
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_rank_table_team_count_overflow() {
        let mut table = BTreeMap::new();
        table.insert("John".to_string(), vec![1, 2]);
        let report = validate_rank_table(u32::MAX as usize + 1, &table);

        assert!(!report.is_valid());
        assert_eq!(report.issue_count(), 1);
        assert!(report.invalid_ranks[0].starts_with("John: team count"));
    }

    #[test]
    fn test_rank_table_incomplete() {
        let mut table = BTreeMap::new();
        table.insert("John".to_string(), vec![1, 2]);
        let report = validate_rank_table(3, &table);
        assert_eq!(
            report.incomplete_rankings,
            vec!["John: has 2 rankings, expected 3"]
        );
        assert_eq!(report.missing_ranks, vec!["John: missing ranks [3]"]);
        assert_eq!(report.issue_count(), 2);
    }
}
