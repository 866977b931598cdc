//! Arena record: layout + parent link + accumulated path cost `g` +
//! monotonic insertion sequence number (`SPEC_FULL.md` §3, §4.3).

use crate::layout::Layout;

/// Index into a solve's node arena (`Vec<Node>`), not a pointer or `Rc`
/// (`SPEC_FULL.md` §9).
pub type NodeId = usize;

/// Pure data, created once on insertion and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Node {
    pub layout: Layout,
    pub parent: Option<NodeId>,
    pub g: i64,
    pub seq: u64,
}
