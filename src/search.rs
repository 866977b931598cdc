//! Strategy-agnostic template that drives expansion: init, pop, goal test,
//! close, expand, relax (`SPEC_FULL.md` §4.5).

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;
use tracing::{debug, trace};

use crate::error::Result;
use crate::layout::Layout;
use crate::node::{Node, NodeId};
use crate::strategy::Strategy;

/// `open`/`closed` need only lookup and insert, but `IndexMap` keeps entry
/// order deterministic under the same Fx hasher the teacher's routing
/// frontier used, so debug dumps of either map are reproducible.
type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// The reconstructed root-to-goal path and its total cost.
#[derive(Debug, Clone)]
pub struct SolvePath {
    layouts: Vec<Layout>,
    total_cost: i64,
}

impl SolvePath {
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }
}

/// Drives a single `solve` call. Each call owns its own arena, open map,
/// closed map, fringe, and sequence counter (`SPEC_FULL.md` §5) — nothing
/// survives between calls, so the same `Skeleton` can be reused.
pub struct Skeleton<S: Strategy> {
    strategy: S,
}

impl<S: Strategy> Skeleton<S> {
    pub fn new(strategy: S) -> Self {
        Skeleton { strategy }
    }

    pub fn solve(&mut self, start: Layout, goal: Layout) -> Result<Option<SolvePath>> {
        self.strategy.validate(&start, &goal)?;

        let mut arena: Vec<Node> = Vec::new();
        let mut open: FxIndexMap<Layout, NodeId> = FxIndexMap::default();
        let mut closed: FxIndexMap<Layout, NodeId> = FxIndexMap::default();
        let mut fringe = self.strategy.make_fringe();
        let mut next_seq: u64 = 0;

        let root = Node { layout: start.clone(), parent: None, g: 0, seq: next_seq };
        next_seq += 1;
        let root_key = self.strategy.key(&root, &goal);
        arena.push(root);
        open.insert(start, 0);
        fringe.insert(root_key, 0, 0);

        debug!(root_key, "search started");

        while let Some(idx) = fringe.pop_min() {
            if open.get(&arena[idx].layout) != Some(&idx) {
                trace!(idx, "skipping obsolete node");
                continue;
            }
            open.swap_remove(&arena[idx].layout);

            if arena[idx].layout.is_goal(&goal) {
                debug!(idx, g = arena[idx].g, "goal reached");
                return Ok(Some(reconstruct_path(&arena, idx)));
            }

            closed.insert(arena[idx].layout.clone(), idx);
            let g = arena[idx].g;
            let children = arena[idx].layout.children();
            trace!(idx, g, children = children.len(), "expanding");

            for child_layout in children {
                if closed.contains_key(&child_layout) {
                    continue;
                }
                let g_prime = g + child_layout.step_cost();
                let better = match open.get(&child_layout) {
                    None => true,
                    Some(&existing) => g_prime < arena[existing].g,
                };
                if !better {
                    continue;
                }
                let seq = next_seq;
                next_seq += 1;
                let child = Node { layout: child_layout.clone(), parent: Some(idx), g: g_prime, seq };
                let new_idx = arena.len();
                arena.push(child);
                open.insert(child_layout, new_idx);
                let key = self.strategy.key(&arena[new_idx], &goal);
                fringe.insert(key, new_idx, seq);
            }
        }

        debug!("fringe exhausted with no solution");
        Ok(None)
    }
}

fn reconstruct_path(arena: &[Node], goal_idx: NodeId) -> SolvePath {
    let total_cost = arena[goal_idx].g;
    let mut layouts = Vec::new();
    let mut cur = Some(goal_idx);
    while let Some(idx) = cur {
        layouts.push(arena[idx].layout.clone());
        cur = arena[idx].parent;
    }
    layouts.reverse();
    SolvePath { layouts, total_cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{AStarStrategy, UcsStrategy};

    fn solve_ucs(start: &str, goal: &str) -> SolvePath {
        let mut skeleton = Skeleton::new(UcsStrategy);
        skeleton
            .solve(Layout::parse(start).unwrap(), Layout::parse(goal).unwrap())
            .unwrap()
            .unwrap()
    }

    fn solve_astar(start: &str, goal: &str) -> SolvePath {
        let mut skeleton = Skeleton::new(AStarStrategy);
        skeleton
            .solve(Layout::parse(start).unwrap(), Layout::parse(goal).unwrap())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn scenario_s1() {
        let path = solve_ucs("9 7 8", "7 8 9");
        let rendered: Vec<String> = path.layouts().iter().map(Layout::format).collect();
        assert_eq!(rendered, vec!["9 7 8", "8 7 9", "7 8 9"]);
        assert_eq!(path.total_cost(), 22);
    }

    #[test]
    fn scenario_s2() {
        let path = solve_ucs("6 8 2 5 10", "8 10 2 5 6");
        let rendered: Vec<String> = path.layouts().iter().map(Layout::format).collect();
        assert_eq!(rendered, vec!["6 8 2 5 10", "10 8 2 5 6", "8 10 2 5 6"]);
        assert_eq!(path.total_cost(), 4);
    }

    #[test]
    fn scenario_s3() {
        // Several four-swap sequences reach this goal at the same total cost;
        // the tie-break in SPEC_FULL.md §5 pins a path through cost-2 moves
        // first, so only the total and path validity are asserted here.
        let path = solve_ucs("14 11 15 13 12", "15 14 13 12 11");
        assert_eq!(path.total_cost(), 35);
        let layouts = path.layouts();
        assert_eq!(layouts.first().unwrap().format(), "14 11 15 13 12");
        assert_eq!(layouts.last().unwrap().format(), "15 14 13 12 11");
        let mut sum = 0;
        for window in layouts.windows(2) {
            let (a, b) = (&window[0], &window[1]);
            let diff = a.values().iter().zip(b.values()).filter(|(x, y)| x != y).count();
            assert_eq!(diff, 2, "each step is a single swap");
            sum += b.step_cost();
        }
        assert_eq!(sum, path.total_cost());
    }

    #[test]
    fn scenario_a1_astar_total_cost() {
        let path = solve_astar("-2 4 0 -1 3 5 1", "-2 -1 0 1 3 4 5");
        assert_eq!(path.total_cost(), 33);
    }

    #[test]
    fn scenario_a2_astar_total_cost() {
        let path = solve_astar("8 7 6 5 4 3 2 1", "1 2 3 4 5 6 7 8");
        assert_eq!(path.total_cost(), 44);
    }

    #[test]
    fn ucs_and_astar_agree_on_optimal_cost() {
        let cases = [("9 7 8", "7 8 9"), ("6 8 2 5 10", "8 10 2 5 6"), ("14 11 15 13 12", "15 14 13 12 11")];
        for (start, goal) in cases {
            assert_eq!(solve_ucs(start, goal).total_cost(), solve_astar(start, goal).total_cost());
        }
    }

    #[test]
    fn path_consistency() {
        let path = solve_ucs("14 11 15 13 12", "15 14 13 12 11");
        let layouts = path.layouts();
        let mut sum = 0;
        for window in layouts.windows(2) {
            let (a, b) = (&window[0], &window[1]);
            let diff: Vec<usize> = a
                .values()
                .iter()
                .zip(b.values())
                .enumerate()
                .filter(|(_, (x, y))| x != y)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(diff.len(), 2, "successors differ by exactly one swap");
            assert_eq!(a.values()[diff[0]], b.values()[diff[1]]);
            assert_eq!(a.values()[diff[1]], b.values()[diff[0]]);
            sum += b.step_cost();
        }
        assert_eq!(sum, path.total_cost());
    }

    #[test]
    fn unreachable_goal_is_no_solution_not_an_error() {
        let mut skeleton = Skeleton::new(UcsStrategy);
        let result = skeleton.solve(Layout::parse("1 2").unwrap(), Layout::parse("1 2 3").unwrap());
        // Different lengths can never match under any sequence of swaps.
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn determinism_across_repeated_solves() {
        let a = solve_ucs("14 11 15 13 12", "15 14 13 12 11");
        let b = solve_ucs("14 11 15 13 12", "15 14 13 12 11");
        assert_eq!(a.layouts().iter().map(Layout::format).collect::<Vec<_>>(), b.layouts().iter().map(Layout::format).collect::<Vec<_>>());
        assert_eq!(a.total_cost(), b.total_cost());
    }
}
