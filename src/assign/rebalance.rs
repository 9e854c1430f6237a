//! Post-greedy repair passes: minimum-size rebalancing and exclusion repair.

use std::cmp::Reverse;

use super::config::AssignConfig;
use super::result::AssignmentWarning;
use super::section::{SectionContext, SectionState};

/// Under-filled teams the section can afford to fill, in index order.
///
/// Non-empty teams below their minimum always qualify. Empty teams are
/// taken in ascending ID order while the running sum of minimums (over
/// non-empty teams plus the empty teams taken so far) still fits the
/// section's people.
fn fillable_targets(ctx: &SectionContext<'_>, state: &SectionState) -> Vec<usize> {
    let mut budget: usize = (0..ctx.teams())
        .filter(|&t| !state.members[t].is_empty())
        .map(|t| ctx.min_sizes[t])
        .sum();
    let mut targets = Vec::new();
    for team in 0..ctx.teams() {
        let size = state.members[team].len();
        if size >= ctx.min_sizes[team] {
            continue;
        }
        if size > 0 {
            targets.push(team);
        } else if budget + ctx.min_sizes[team] <= ctx.people() {
            budget += ctx.min_sizes[team];
            targets.push(team);
        }
    }
    targets
}

/// Pulls people from over-full teams into under-filled ones.
///
/// Targets are served smallest first. Donors must stay at or above their
/// own minimum; the largest donor gives first, and within a donor the
/// member who ranked it lowest moves first. Nobody moves onto a team
/// holding someone they are excluded from.
pub(crate) fn rebalance(ctx: &SectionContext<'_>, config: &AssignConfig, state: &mut SectionState) {
    let mut targets = fillable_targets(ctx, state);
    targets.sort_by_key(|&t| (state.members[t].len(), t));

    for target in targets {
        while state.members[target].len() < ctx.min_sizes[target]
            && state.has_room(config.closure, target)
        {
            let Some((donor, person)) = pick_donation(ctx, state, target) else {
                break;
            };
            tracing::debug!(
                section = %ctx.section.id,
                person = ctx.name(person),
                from = ctx.team_ids[donor],
                to = ctx.team_ids[target],
                "rebalanced person into under-filled team"
            );
            state.move_person(person, donor, target);
        }
    }
}

fn pick_donation(ctx: &SectionContext<'_>, state: &SectionState, target: usize) -> Option<(usize, usize)> {
    let mut donors: Vec<usize> = (0..ctx.teams())
        .filter(|&d| d != target && state.members[d].len() > ctx.min_sizes[d])
        .collect();
    donors.sort_by_key(|&d| (Reverse(state.members[d].len()), d));

    donors.into_iter().find_map(|donor| {
        state.members[donor]
            .iter()
            .copied()
            .filter(|&p| state.conflicts_with(ctx, p, target) == 0)
            .min_by_key(|&p| (Reverse(ctx.ranks[p][donor]), ctx.ranks[p][target], p))
            .map(|p| (donor, p))
    })
}

/// Every excluded pair sharing `team`, as `(earlier, later)` in section order.
fn violations_in(ctx: &SectionContext<'_>, state: &SectionState, team: usize) -> Vec<(usize, usize)> {
    let mut members = state.members[team].clone();
    members.sort_unstable();
    let mut pairs = Vec::new();
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            if ctx.excluded(a, b) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

/// Moves one person out of each violating pair where a conflict-free team
/// exists and the source team stays at or above its minimum.
///
/// The member with the weaker preference for the shared team is tried
/// first; destinations are tried in that person's preference order.
pub(crate) fn repair_exclusions(ctx: &SectionContext<'_>, config: &AssignConfig, state: &mut SectionState) {
    for team in 0..ctx.teams() {
        for (a, b) in violations_in(ctx, state, team) {
            if state.team_of[a] != Some(team) || state.team_of[b] != Some(team) {
                continue;
            }
            if state.members[team].len() <= ctx.min_sizes[team] {
                break;
            }

            let mut movers = [a, b];
            movers.sort_by_key(|&p| (Reverse(ctx.ranks[p][team]), p));

            let relocation = movers.into_iter().find_map(|p| {
                ctx.orders[p]
                    .iter()
                    .copied()
                    .find(|&dest| {
                        dest != team
                            && state.has_room(config.closure, dest)
                            && state.conflicts_with(ctx, p, dest) == 0
                    })
                    .map(|dest| (p, dest))
            });

            if let Some((person, dest)) = relocation {
                tracing::debug!(
                    section = %ctx.section.id,
                    person = ctx.name(person),
                    from = ctx.team_ids[team],
                    to = ctx.team_ids[dest],
                    "moved person to resolve an exclusion"
                );
                state.move_person(person, team, dest);
            }
        }
    }
}

/// Warnings for the final state: every team below its minimum and every
/// excluded pair sharing a team.
pub(crate) fn collect_warnings(ctx: &SectionContext<'_>, state: &SectionState) -> Vec<AssignmentWarning> {
    let mut warnings = Vec::new();
    for team in 0..ctx.teams() {
        if state.members[team].len() < ctx.min_sizes[team] {
            warnings.push(AssignmentWarning::Shortfall {
                section: ctx.section.id.clone(),
                team: ctx.team_ids[team],
                actual: state.members[team].len(),
                required: ctx.min_sizes[team],
            });
        }
    }
    for team in 0..ctx.teams() {
        for (a, b) in violations_in(ctx, state, team) {
            warnings.push(AssignmentWarning::ExclusionViolated {
                section: ctx.section.id.clone(),
                team: ctx.team_ids[team],
                first: ctx.name(a).to_string(),
                second: ctx.name(b).to_string(),
            });
        }
    }
    warnings
}
