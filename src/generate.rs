//! Seeded random problem instances.
//!
//! Used by the benchmarks and property tests. Rankings are skewed toward
//! low team IDs so that popularity rounds see realistic contention.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::{Problem, Section, TeamId};

/// Shape of a generated instance.
///
/// # Examples
///
/// ```
/// use u_assign::generate::{random_problem, ShapeConfig};
///
/// let shape = ShapeConfig::default().with_sections(2).with_people_per_section(10);
/// let problem = random_problem(&shape, 42);
/// assert_eq!(problem.person_count(), 20);
/// assert!(problem.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ShapeConfig {
    /// Number of sections.
    pub sections: usize,
    /// People per section.
    pub people_per_section: usize,
    /// Number of teams.
    pub teams: u32,
    /// Probability that any two people in a section are excluded.
    pub exclusion_rate: f64,
    /// Probability that a ranking is drawn with the popularity skew
    /// rather than uniformly.
    pub skew: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            sections: 1,
            people_per_section: 20,
            teams: 4,
            exclusion_rate: 0.05,
            skew: 0.5,
        }
    }
}

impl ShapeConfig {
    /// Sets the number of sections.
    pub fn with_sections(mut self, n: usize) -> Self {
        self.sections = n;
        self
    }

    /// Sets the number of people per section.
    pub fn with_people_per_section(mut self, n: usize) -> Self {
        self.people_per_section = n;
        self
    }

    /// Sets the number of teams.
    pub fn with_teams(mut self, n: u32) -> Self {
        self.teams = n;
        self
    }

    /// Sets the pairwise exclusion probability.
    pub fn with_exclusion_rate(mut self, rate: f64) -> Self {
        self.exclusion_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the popularity skew probability.
    pub fn with_skew(mut self, skew: f64) -> Self {
        self.skew = skew.clamp(0.0, 1.0);
        self
    }

    /// Validates the shape.
    pub fn validate(&self) -> Result<(), String> {
        if self.sections == 0 {
            return Err("sections must be at least 1".into());
        }
        if self.people_per_section == 0 {
            return Err("people_per_section must be at least 1".into());
        }
        if self.teams == 0 {
            return Err("teams must be at least 1".into());
        }
        Ok(())
    }
}

/// Generates a valid problem with the given shape.
///
/// The same `seed` always yields the same problem.
///
/// # Panics
/// Panics if the shape is invalid (call [`ShapeConfig::validate`] first
/// to get a descriptive error).
pub fn random_problem(shape: &ShapeConfig, seed: u64) -> Problem {
    shape.validate().expect("invalid ShapeConfig");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut problem = Problem::with_team_count(shape.teams);
    let team_ids: Vec<TeamId> = problem.team_ids();

    for s in 0..shape.sections {
        let people: Vec<String> = (0..shape.people_per_section)
            .map(|i| format!("s{s}-p{i}"))
            .collect();

        for person in &people {
            let mut order = team_ids.clone();
            order.shuffle(&mut rng);
            if rng.random_bool(shape.skew) {
                // Jittered sort by ID: low IDs drift forward, so a few teams end up popular.
                let mut keyed: Vec<(TeamId, TeamId)> = order
                    .iter()
                    .map(|&t| (t + rng.random_range(0..shape.teams), t))
                    .collect();
                keyed.sort_unstable();
                order = keyed.into_iter().map(|(_, t)| t).collect();
            }
            problem.set_ranking(person.clone(), order);
        }

        for (i, a) in people.iter().enumerate() {
            for b in &people[i + 1..] {
                if rng.random_bool(shape.exclusion_rate) {
                    problem.add_exclusion(a, b);
                }
            }
        }

        problem.add_section(Section::new(format!("section-{s:02}"), people));
    }

    problem
}
