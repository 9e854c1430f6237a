//! Preference-driven team assignment.
//!
//! Assigns people to teams from ranked preferences, subject to:
//!
//! - **Exclusions**: symmetric pairs of people who must not share a team.
//! - **Minimum team sizes**: run-wide, with optional per-team overrides.
//! - **Sections**: independent partitions of people; no team spans two.
//!
//! The [`assign`] module holds the engine, a deterministic greedy
//! heuristic: the most popular remaining team takes its candidates each
//! round, then under-filled teams are rebalanced and exclusion conflicts
//! repaired. Conditions it cannot satisfy come back as warnings rather
//! than errors.
//!
//! # Modules
//!
//! - [`model`]: problem data (teams, sections, rankings, exclusions)
//! - [`validate`]: structural checks and rank-table reports
//! - [`assign`]: the engine, its configuration, and result types
//! - [`generate`]: seeded random instances for benchmarks and tests
//!
//! # Features
//!
//! - `parallel`: solve sections concurrently with rayon
//! - `serde`: `Serialize`/`Deserialize` for model, config, and results
//! - `wasm`: JavaScript bindings
//!
//! # Examples
//!
//! ```
//! use u_assign::assign::{assign, AssignConfig};
//! use u_assign::model::Problem;
//!
//! let problem = Problem::with_team_count(2)
//!     .with_people(["Alice", "Bob", "Charlie"])
//!     .with_ranking("Alice", vec![1, 2])
//!     .with_ranking("Bob", vec![1, 2])
//!     .with_ranking("Charlie", vec![2, 1])
//!     .with_exclusion("Alice", "Bob");
//!
//! let result = assign(&problem, &AssignConfig::default().with_min_size(1)).unwrap();
//! let section = &result.sections[0];
//! assert_ne!(section.team_of("Alice"), section.team_of("Bob"));
//! ```

pub mod assign;
pub mod error;
pub mod generate;
pub mod model;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::AssignError;
