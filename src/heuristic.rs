//! Admissible A\* heuristic built from the permutation-cycle decomposition of
//! `current -> goal` (`SPEC_FULL.md` §4.2).
//!
//! Costs for 2-cycles are exact. Cycles of size 3-5 are solved exactly by a
//! pruned brute-force search over swap sequences. Larger cycles are deferred
//! to a conservative greedy pass shared across all of them, which keeps the
//! bound admissible while staying fast.
//!
//! All-odd cycles of any size get their own closed-form cost regardless of
//! where they'd otherwise fall: confined to the cycle's own positions every
//! swap is odd-odd (cost 20), but an external even fixed point elsewhere in
//! the layout can be borrowed as a pivot to turn the whole cycle into mixed
//! swaps (cost 11) instead, which is cheaper for cycles of size 4 and up.
//! See `odd_cycle_cost` and the `external-pivot discount` entry in
//! DESIGN.md.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::error::{Result, SearchError};
use crate::layout::{parity_cost, Layout};

/// Largest cycle size solved by exact brute-force enumeration; larger cycles
/// fall through to the aggregate greedy pass.
const EXACT_CYCLE_MAX: usize = 5;

pub fn heuristic(current: &Layout, goal: &Layout) -> Result<i64> {
    check_same_multiset(current, goal)?;
    Ok(heuristic_unchecked(current, goal))
}

/// Same computation as [`heuristic`], skipping the multiset precondition
/// check. Used internally once a solve has validated `start`/`goal` up
/// front, so the per-node A\* key lookup does not re-sort both sequences.
pub(crate) fn heuristic_unchecked(current: &Layout, goal: &Layout) -> i64 {
    let t = target_index_map(current, goal);
    let cycles = decompose_cycles(&t);
    let external_even_pivot = has_external_even_fixed_point(current, goal);

    let mut total = 0i64;
    let mut pooled_swaps = 0u32;
    let mut evens = 0u32;
    let mut odds = 0u32;

    for positions in cycles {
        let k = positions.len();
        if k < 2 {
            continue;
        }
        let values: Vec<i64> = positions.iter().map(|&p| current.values()[p]).collect();
        if k == 2 {
            total += parity_cost(values[0], values[1]);
            continue;
        }
        if values.iter().all(|&v| v % 2 != 0) {
            // All-odd cycles can sometimes undercut their own confined cost by
            // routing through an external even fixed point as a temporary
            // pivot; see the `external-pivot discount` entry in DESIGN.md.
            total += odd_cycle_cost(k, external_even_pivot);
            continue;
        }
        if k <= EXACT_CYCLE_MAX {
            let targets: Vec<i64> = positions.iter().map(|&p| goal.values()[p]).collect();
            total += exact_cycle_cost(&values, &targets);
            continue;
        }
        pooled_swaps += (k - 1) as u32;
        for &v in &values {
            if v % 2 == 0 {
                evens += 1;
            } else {
                odds += 1;
            }
        }
    }

    total += aggregate_greedy(pooled_swaps, evens, odds);
    total
}

/// Whether any position outside `current`'s permutation cycles is already a
/// fixed point (`current[i] == goal[i]`) holding an even value. A single such
/// value can be borrowed as a temporary pivot by any number of all-odd
/// cycles without double-counting, since each cycle's discount is computed as
/// an independent lower bound on that cycle's own resolution cost — see the
/// `external-pivot discount` entry in DESIGN.md.
fn has_external_even_fixed_point(current: &Layout, goal: &Layout) -> bool {
    current.values().iter().zip(goal.values()).any(|(&c, &g)| c == g && c % 2 == 0)
}

/// Minimum cost to resolve an all-odd cycle of size `k`. Confined to the
/// cycle's own positions, every swap is odd-odd at cost 20, needing `k - 1`
/// swaps. If an external even fixed point is available, the cycle can
/// instead route through it: borrow it in, walk it around the cycle, and
/// return it to its own slot, trading `k - 1` odd-odd swaps (cost 20 each)
/// for `k + 1` mixed swaps (cost 11 each). Both counts were verified against
/// brute-force Dijkstra search over the real swap model for k = 2..=8; the
/// true minimum is always the smaller of the two.
fn odd_cycle_cost(k: usize, external_even_pivot: bool) -> i64 {
    let confined = (k as i64 - 1) * 20;
    if external_even_pivot {
        confined.min((k as i64 + 1) * 11)
    } else {
        confined
    }
}

pub(crate) fn check_same_multiset(current: &Layout, goal: &Layout) -> Result<()> {
    if current.len() != goal.len() {
        return Err(SearchError::Domain {
            reason: format!("lengths differ ({} vs {})", current.len(), goal.len()),
        });
    }
    let mut a = current.values().to_vec();
    let mut b = goal.values().to_vec();
    a.sort_unstable();
    b.sort_unstable();
    if a != b {
        return Err(SearchError::Domain {
            reason: "not permutations of the same multiset".to_string(),
        });
    }
    Ok(())
}

/// For each position `i` in `current`, the position `j` in `goal` holding
/// the same value, resolving duplicates with a per-value FIFO queue of goal
/// positions consumed left to right (`SPEC_FULL.md` §4.2 step 1).
fn target_index_map(current: &Layout, goal: &Layout) -> Vec<usize> {
    let mut available: FxHashMap<i64, VecDeque<usize>> = FxHashMap::default();
    for (pos, &v) in goal.values().iter().enumerate() {
        available.entry(v).or_default().push_back(pos);
    }
    current
        .values()
        .iter()
        .map(|v| available.get_mut(v).and_then(VecDeque::pop_front).expect("checked multiset"))
        .collect()
}

/// Partitions positions into disjoint cycles of `t`, visited in ascending
/// order of each cycle's first unvisited element; within a cycle, positions
/// are returned sorted ascending (`SPEC_FULL.md` §4.2 determinism note).
fn decompose_cycles(t: &[usize]) -> Vec<Vec<usize>> {
    let n = t.len();
    let mut visited = vec![false; n];
    let mut cycles = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut j = start;
        while !visited[j] {
            visited[j] = true;
            cycle.push(j);
            j = t[j];
        }
        cycle.sort_unstable();
        cycles.push(cycle);
    }
    cycles
}

/// Exact minimum cost to resolve a cycle of size 3-5: brute-force over all
/// sequences of `k - 1` swaps drawn from the cycle's `k*(k-1)/2` index pairs,
/// pruning any partial sequence whose running cost already meets the best
/// found so far (`SPEC_FULL.md` §4.2 step 3).
fn exact_cycle_cost(values: &[i64], targets: &[i64]) -> i64 {
    let k = values.len();
    let mut pairs = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k - 1 {
        for j in i + 1..k {
            pairs.push((i, j));
        }
    }

    let mut best = i64::MAX;
    let mut arr = values.to_vec();
    search(&mut arr, targets, &pairs, k - 1, 0, &mut best);

    if best == i64::MAX {
        // Should not occur for a valid cycle; fall back to the greedy rule
        // restricted to this cycle's own value parities.
        let (evens, odds) = values.iter().fold((0u32, 0u32), |(e, o), &v| {
            if v % 2 == 0 {
                (e + 1, o)
            } else {
                (e, o + 1)
            }
        });
        return aggregate_greedy((k - 1) as u32, evens, odds);
    }
    best
}

fn search(arr: &mut [i64], targets: &[i64], pairs: &[(usize, usize)], swaps_left: usize, cost: i64, best: &mut i64) {
    if swaps_left == 0 {
        if arr == targets && cost < *best {
            *best = cost;
        }
        return;
    }
    for &(i, j) in pairs {
        let c = cost + parity_cost(arr[i], arr[j]);
        if c >= *best {
            continue;
        }
        arr.swap(i, j);
        search(arr, targets, pairs, swaps_left - 1, c, best);
        arr.swap(i, j);
    }
}

/// Greedy lower bound for the `swaps` resolving moves pooled from every
/// cycle longer than `EXACT_CYCLE_MAX`, charging the cheapest affordable
/// swap class at each step (`SPEC_FULL.md` §4.2 step 4).
///
/// Each charge removes only the operand that settles into its final slot,
/// not both: the other operand carries forward as a pivot for the next
/// swap within the same cycle, so the pool shrinks by one per iteration
/// rather than two. This is the resolution recorded for scenario H6 in
/// DESIGN.md; it only ever lowers the bound relative to a two-per-swap
/// depletion, so admissibility is preserved.
fn aggregate_greedy(swaps: u32, mut evens: u32, mut odds: u32) -> i64 {
    let mut total = 0i64;
    for _ in 0..swaps {
        if evens >= 2 {
            total += 2;
            evens -= 1;
        } else if evens >= 1 && odds >= 1 {
            total += 11;
            odds -= 1;
        } else if odds >= 2 {
            total += 20;
            odds -= 1;
        } else {
            break;
        }
    }
    total
}
