//! Two concrete orderings over the same search skeleton (`SPEC_FULL.md`
//! §4.6): uniform-cost (`g` only) and A\* (`g + h`). Ties are broken by
//! insertion sequence, ascending, regardless of strategy.

use crate::error::Result;
use crate::fringe::{BucketFringe, Fringe, KeyedFringe};
use crate::heuristic::{check_same_multiset, heuristic_unchecked};
use crate::layout::Layout;
use crate::node::Node;

/// A fringe ordering: how to key a node, and which [`Fringe`] backs it.
pub trait Strategy {
    fn key(&self, node: &Node, goal: &Layout) -> i64;
    fn make_fringe(&self) -> Box<dyn Fringe>;

    /// Precondition a solve must satisfy before this strategy's `key` can be
    /// called safely. UCS never consults the heuristic, so a mismatched
    /// multiset is merely unreachable (the skeleton reports `NoSolution`);
    /// A\* requires the multiset precondition from `SPEC_FULL.md` §4.2.
    fn validate(&self, _start: &Layout, _goal: &Layout) -> Result<()> {
        Ok(())
    }
}

/// `g` ascending. Optimal under non-negative step costs.
pub struct UcsStrategy;

impl Strategy for UcsStrategy {
    fn key(&self, node: &Node, _goal: &Layout) -> i64 {
        node.g
    }

    fn make_fringe(&self) -> Box<dyn Fringe> {
        Box::new(BucketFringe::new())
    }
}

/// `g + h` ascending. Optimal when `h` is admissible.
pub struct AStarStrategy;

impl Strategy for AStarStrategy {
    fn key(&self, node: &Node, goal: &Layout) -> i64 {
        node.g + heuristic_unchecked(&node.layout, goal)
    }

    fn make_fringe(&self) -> Box<dyn Fringe> {
        Box::new(KeyedFringe::new())
    }

    fn validate(&self, start: &Layout, goal: &Layout) -> Result<()> {
        check_same_multiset(start, goal)
    }
}
