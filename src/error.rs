use thiserror::Error;

/// Errors surfaced across the parse/heuristic boundary of the search core.
///
/// Neither variant is retried internally; callers see them as plain tagged
/// results (see `SPEC_FULL.md` §7).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid integer token {token:?}")]
    Parse { token: String },

    #[error("current and goal are not permutations of the same multiset ({reason})")]
    Domain { reason: String },
}

pub type Result<T> = std::result::Result<T, SearchError>;
