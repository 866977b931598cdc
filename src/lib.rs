//! A state-space search engine that finds a minimum-cost sequence of
//! element swaps transforming an initial integer sequence into a goal
//! sequence, where each swap's cost depends only on the parity of the two
//! swapped values. See `SPEC_FULL.md` for the full design.

pub mod error;
pub mod fringe;
pub mod heuristic;
pub mod layout;
pub mod node;
pub mod search;
pub mod strategy;

pub use error::{Result, SearchError};
pub use heuristic::heuristic;
pub use layout::Layout;
pub use search::{Skeleton, SolvePath};
pub use strategy::{AStarStrategy, Strategy, UcsStrategy};

use std::io::BufRead;

/// Reads exactly two lines from `input`, parsing each as a [`Layout`]
/// (`SPEC_FULL.md` §4.7). The front-end binaries are the only callers.
pub fn read_two_layouts<R: BufRead>(mut input: R) -> Result<(Layout, Layout)> {
    let mut first = String::new();
    let mut second = String::new();
    input.read_line(&mut first).map_err(|e| SearchError::Parse { token: e.to_string() })?;
    input.read_line(&mut second).map_err(|e| SearchError::Parse { token: e.to_string() })?;
    Ok((Layout::parse(&first)?, Layout::parse(&second)?))
}
