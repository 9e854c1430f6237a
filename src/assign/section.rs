//! Per-section working state and the greedy popularity pass.
//!
//! # Algorithm
//!
//! 1. Every person starts unassigned with a copy of their ranking
//! 2. Each round:
//!    a. People whose remaining ranking is empty are placed by the
//!       fallback rule (open team with fewest conflicts, lowest ID)
//!    b. Otherwise, tally everyone's top remaining team and select the
//!       most popular one (ties: lowest team ID)
//!    c. Admit its candidates in section order, skipping anyone excluded
//!       from a current member and stopping once the team closes
//!    d. Drop the selected team from every remaining ranking
//! 3. Terminate when nobody is unassigned
//!
//! People and teams are indexed densely inside a section; team indices
//! follow ascending team ID, so comparing indices compares IDs.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use super::config::{AssignConfig, ClosurePolicy};
use crate::model::{Problem, Section, TeamId};

/// Read-only view of one section, indexed for the solver.
pub(crate) struct SectionContext<'a> {
    pub section: &'a Section,
    /// Team IDs, ascending.
    pub team_ids: Vec<TeamId>,
    /// Minimum size per team index.
    pub min_sizes: Vec<usize>,
    /// `orders[p]`: team indices in person `p`'s preference order.
    pub orders: Vec<Vec<usize>>,
    /// `ranks[p][t]`: 1-based rank person `p` gave team `t`.
    pub ranks: Vec<Vec<usize>>,
    /// Excluded pairs as normalized `(min, max)` person indices.
    conflicts: HashSet<(usize, usize)>,
}

impl<'a> SectionContext<'a> {
    /// Indexes `section`. The problem must already be validated.
    pub fn build(problem: &Problem, section: &'a Section, config: &AssignConfig) -> Self {
        let team_ids = problem.team_ids();
        let min_sizes = team_ids.iter().map(|&t| config.min_size_for(t)).collect();

        let mut orders = Vec::with_capacity(section.len());
        let mut ranks = Vec::with_capacity(section.len());
        for person in &section.people {
            let order: Vec<usize> = problem
                .rankings
                .get(person)
                .map(|r| {
                    r.as_slice()
                        .iter()
                        .filter_map(|id| team_ids.binary_search(id).ok())
                        .collect()
                })
                .unwrap_or_default();
            let mut rank = vec![team_ids.len() + 1; team_ids.len()];
            for (i, &t) in order.iter().enumerate() {
                rank[t] = i + 1;
            }
            orders.push(order);
            ranks.push(rank);
        }

        let index: HashMap<&str, usize> = section
            .people
            .iter()
            .enumerate()
            .map(|(i, p)| (p.as_str(), i))
            .collect();
        let mut conflicts = HashSet::new();
        for (a, b) in problem.exclusions.iter() {
            if let (Some(&pa), Some(&pb)) = (index.get(a), index.get(b)) {
                conflicts.insert((pa.min(pb), pa.max(pb)));
            }
        }

        Self {
            section,
            team_ids,
            min_sizes,
            orders,
            ranks,
            conflicts,
        }
    }

    /// Number of people in the section.
    pub fn people(&self) -> usize {
        self.section.len()
    }

    /// Number of teams.
    pub fn teams(&self) -> usize {
        self.team_ids.len()
    }

    /// Returns `true` if people `a` and `b` may not share a team.
    pub fn excluded(&self, a: usize, b: usize) -> bool {
        self.conflicts.contains(&(a.min(b), a.max(b)))
    }

    /// Name of person `p`.
    pub fn name(&self, p: usize) -> &str {
        &self.section.people[p]
    }
}

/// Mutable assignment state for one section.
pub(crate) struct SectionState {
    /// Person indices per team, in joining order.
    pub members: Vec<Vec<usize>>,
    pub team_of: Vec<Option<usize>>,
    pub closed: Vec<bool>,
    /// Remaining ranking per person (team indices).
    pub remaining: Vec<Vec<usize>>,
    /// Unassigned people, in section order.
    pub unassigned: Vec<usize>,
    pub rounds: usize,
    pub fallbacks: usize,
    pub moves: usize,
}

impl SectionState {
    pub fn new(ctx: &SectionContext<'_>) -> Self {
        Self {
            members: vec![Vec::new(); ctx.teams()],
            team_of: vec![None; ctx.people()],
            closed: vec![false; ctx.teams()],
            remaining: ctx.orders.clone(),
            unassigned: (0..ctx.people()).collect(),
            rounds: 0,
            fallbacks: 0,
            moves: 0,
        }
    }

    /// Number of current members of `team` that `person` is excluded from.
    pub fn conflicts_with(&self, ctx: &SectionContext<'_>, person: usize, team: usize) -> usize {
        self.members[team]
            .iter()
            .filter(|&&m| m != person && ctx.excluded(person, m))
            .count()
    }

    fn assign(&mut self, person: usize, team: usize) {
        self.members[team].push(person);
        self.team_of[person] = Some(team);
        self.unassigned.retain(|&p| p != person);
    }

    /// Moves an assigned person between teams.
    pub fn move_person(&mut self, person: usize, from: usize, to: usize) {
        self.members[from].retain(|&p| p != person);
        self.members[to].push(person);
        self.team_of[person] = Some(to);
        self.moves += 1;
    }

    /// Removes `team` from every unassigned person's remaining ranking.
    fn drop_option(&mut self, team: usize) {
        for &p in &self.unassigned {
            self.remaining[p].retain(|&t| t != team);
        }
    }

    /// Returns `true` if `team` may take another person under `closure`.
    pub fn has_room(&self, closure: ClosurePolicy, team: usize) -> bool {
        match closure {
            ClosurePolicy::AtSize(cap) => self.members[team].len() < cap,
            ClosurePolicy::Never | ClosurePolicy::AtMinSize => true,
        }
    }
}

/// Runs the greedy popularity pass until everyone is assigned.
pub(crate) fn greedy_pass(ctx: &SectionContext<'_>, config: &AssignConfig, state: &mut SectionState) {
    while !state.unassigned.is_empty() {
        state.rounds += 1;

        let exhausted: Vec<usize> = state
            .unassigned
            .iter()
            .copied()
            .filter(|&p| state.remaining[p].is_empty())
            .collect();
        if !exhausted.is_empty() {
            for p in exhausted {
                place_fallback(ctx, config, state, p);
            }
            continue;
        }

        let mut counts = vec![0usize; ctx.teams()];
        for &p in &state.unassigned {
            counts[state.remaining[p][0]] += 1;
        }
        let Some(selected) = (0..ctx.teams())
            .filter(|&t| counts[t] > 0)
            .max_by_key(|&t| (counts[t], Reverse(t)))
        else {
            break;
        };

        tracing::debug!(
            section = %ctx.section.id,
            round = state.rounds,
            team = ctx.team_ids[selected],
            votes = counts[selected],
            "selected most popular team"
        );

        let candidates: Vec<usize> = state
            .unassigned
            .iter()
            .copied()
            .filter(|&p| state.remaining[p][0] == selected)
            .collect();

        for c in candidates {
            if state.closed[selected] {
                break;
            }
            if state.conflicts_with(ctx, c, selected) > 0 {
                tracing::debug!(
                    section = %ctx.section.id,
                    person = ctx.name(c),
                    team = ctx.team_ids[selected],
                    "skipped candidate with an exclusion conflict"
                );
                continue;
            }
            state.assign(c, selected);
            close_if_filled(ctx, config, state, selected);
        }

        state.drop_option(selected);
    }
}

/// Places a person whose remaining ranking is exhausted.
fn place_fallback(ctx: &SectionContext<'_>, config: &AssignConfig, state: &mut SectionState, person: usize) {
    let open: Vec<usize> = (0..ctx.teams()).filter(|&t| !state.closed[t]).collect();
    let pool = if open.is_empty() {
        (0..ctx.teams()).collect()
    } else {
        open
    };
    let Some(team) = pool
        .into_iter()
        .min_by_key(|&t| (state.conflicts_with(ctx, person, t), t))
    else {
        return;
    };

    let conflicts = state.conflicts_with(ctx, person, team);
    if conflicts > 0 {
        tracing::debug!(
            section = %ctx.section.id,
            person = ctx.name(person),
            team = ctx.team_ids[team],
            conflicts,
            "fallback placement with unavoidable conflicts"
        );
    }

    state.assign(person, team);
    state.fallbacks += 1;
    close_if_filled(ctx, config, state, team);
}

/// Applies the closure policy to `team` after it gained a member.
fn close_if_filled(ctx: &SectionContext<'_>, config: &AssignConfig, state: &mut SectionState, team: usize) {
    if state.closed[team] {
        return;
    }
    let size = state.members[team].len();
    let close = match config.closure {
        ClosurePolicy::Never => false,
        ClosurePolicy::AtSize(cap) => size >= cap,
        ClosurePolicy::AtMinSize => {
            size >= ctx.min_sizes[team] && {
                let deficit: usize = (0..ctx.teams())
                    .filter(|&o| o != team && !state.closed[o])
                    .map(|o| ctx.min_sizes[o].saturating_sub(state.members[o].len()))
                    .sum();
                state.unassigned.len() >= deficit
            }
        }
    };

    if close {
        tracing::debug!(
            section = %ctx.section.id,
            team = ctx.team_ids[team],
            size,
            "team closed"
        );
        state.closed[team] = true;
        state.drop_option(team);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Problem;

    fn run(problem: &Problem, config: &AssignConfig) -> (Vec<Vec<usize>>, SectionState) {
        let ctx = SectionContext::build(problem, &problem.sections[0], config);
        let mut state = SectionState::new(&ctx);
        greedy_pass(&ctx, config, &mut state);
        (state.members.clone(), state)
    }

    #[test]
    fn test_most_popular_team_goes_first() {
        // Two people want team 2, one wants team 1.
        let problem = Problem::with_team_count(2)
            .with_people(["A", "B", "C"])
            .with_ranking("A", vec![2, 1])
            .with_ranking("B", vec![1, 2])
            .with_ranking("C", vec![2, 1]);
        let (members, state) = run(&problem, &AssignConfig::default());

        assert_eq!(members, vec![vec![1], vec![0, 2]]);
        assert_eq!(state.rounds, 2);
        assert_eq!(state.fallbacks, 0);
    }

    #[test]
    fn test_tie_goes_to_lowest_team_id() {
        let problem = Problem::with_team_count(2)
            .with_people(["A", "B"])
            .with_ranking("A", vec![2, 1])
            .with_ranking("B", vec![1, 2]);
        let config = AssignConfig::default();
        let ctx = SectionContext::build(&problem, &problem.sections[0], &config);
        let mut state = SectionState::new(&ctx);
        greedy_pass(&ctx, &config, &mut state);

        // Round 1 picks team 1 (tie 1:1, lower ID) and takes B.
        assert_eq!(state.members[0], vec![1]);
        assert_eq!(state.members[1], vec![0]);
    }

    #[test]
    fn test_exclusion_loser_moves_on() {
        let problem = Problem::with_team_count(2)
            .with_people(["A", "B", "C"])
            .with_ranking("A", vec![1, 2])
            .with_ranking("B", vec![1, 2])
            .with_ranking("C", vec![1, 2])
            .with_exclusion("A", "B");
        let (members, _) = run(&problem, &AssignConfig::default());

        assert_eq!(members, vec![vec![0, 2], vec![1]]);
    }

    #[test]
    fn test_skipped_candidate_takes_next_choice() {
        // Everyone wants team 1; C conflicts with A and B, so team 1 is
        // lost to C. Team 2 is then C's only option.
        let problem = Problem::with_team_count(2)
            .with_people(["A", "B", "C"])
            .with_ranking("A", vec![1, 2])
            .with_ranking("B", vec![1, 2])
            .with_ranking("C", vec![1, 2])
            .with_exclusion("A", "C")
            .with_exclusion("B", "C");
        let (members, state) = run(&problem, &AssignConfig::default());
        assert_eq!(members, vec![vec![0, 1], vec![2]]);
        assert_eq!(state.fallbacks, 0);
    }

    #[test]
    fn test_fallback_prefers_fewest_conflicts_over_lower_id() {
        // D is excluded from everyone. Team 1 takes A and B, team 2 takes C,
        // then D has nothing left: 2 conflicts on team 1, 1 on team 2.
        let problem = Problem::with_team_count(2)
            .with_people(["A", "B", "C", "D"])
            .with_ranking("A", vec![1, 2])
            .with_ranking("B", vec![1, 2])
            .with_ranking("C", vec![1, 2])
            .with_ranking("D", vec![1, 2])
            .with_exclusion("A", "C")
            .with_exclusion("A", "D")
            .with_exclusion("B", "D")
            .with_exclusion("C", "D");
        let (members, state) = run(&problem, &AssignConfig::default());

        assert_eq!(members, vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(state.fallbacks, 1);
    }

    #[test]
    fn test_fallback_tie_goes_to_lowest_team_id() {
        // Exclusion triangle: C conflicts once on either team.
        let problem = Problem::with_team_count(2)
            .with_people(["A", "B", "C"])
            .with_ranking("A", vec![1, 2])
            .with_ranking("B", vec![1, 2])
            .with_ranking("C", vec![1, 2])
            .with_exclusion("A", "B")
            .with_exclusion("B", "C")
            .with_exclusion("A", "C");
        let (members, state) = run(&problem, &AssignConfig::default());

        assert_eq!(members, vec![vec![0, 2], vec![1]]);
        assert_eq!(state.fallbacks, 1);
    }

    #[test]
    fn test_fallback_under_infeasible_exclusions() {
        // One team, two excluded people: B can never be placed cleanly.
        let problem = Problem::with_team_count(1)
            .with_people(["A", "B"])
            .with_ranking("A", vec![1])
            .with_ranking("B", vec![1])
            .with_exclusion("A", "B");
        let (members, state) = run(&problem, &AssignConfig::default().with_min_size(1));

        assert_eq!(members, vec![vec![0, 1]]);
        assert_eq!(state.fallbacks, 1);
        assert_eq!(state.rounds, 2);
    }

    #[test]
    fn test_closure_at_size_caps_team() {
        let problem = Problem::with_team_count(2)
            .with_people(["A", "B", "C", "D"])
            .with_ranking("A", vec![1, 2])
            .with_ranking("B", vec![1, 2])
            .with_ranking("C", vec![1, 2])
            .with_ranking("D", vec![1, 2]);
        let config = AssignConfig::default()
            .with_min_size(2)
            .with_closure(ClosurePolicy::AtSize(2));
        let (members, _) = run(&problem, &config);

        assert_eq!(members, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_closure_at_min_size_leaves_room_for_others() {
        // 6 people, 3 teams, min 2: team 1 closes at 2 because 4 remaining
        // people can still fill teams 2 and 3.
        let people = ["A", "B", "C", "D", "E", "F"];
        let mut problem = Problem::with_team_count(3).with_people(people);
        for p in people {
            problem.set_ranking(p, vec![1, 2, 3]);
        }
        let config = AssignConfig::default()
            .with_min_size(2)
            .with_closure(ClosurePolicy::AtMinSize);
        let (members, _) = run(&problem, &config);

        assert_eq!(members, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_context_ranks() {
        let problem = Problem::new(vec![crate::model::Team::new(10), crate::model::Team::new(5)])
            .with_people(["A"])
            .with_ranking("A", vec![10, 5]);
        let config = AssignConfig::default();
        let ctx = SectionContext::build(&problem, &problem.sections[0], &config);

        // Team indices follow ascending ID: 5 -> 0, 10 -> 1.
        assert_eq!(ctx.team_ids, vec![5, 10]);
        assert_eq!(ctx.orders[0], vec![1, 0]);
        assert_eq!(ctx.ranks[0], vec![2, 1]);
    }
}
