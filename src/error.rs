use thiserror::Error;

/// Failures that indicate a malformed problem or a broken loop invariant.
///
/// An unreachable goal is not one of these; it is reported as
/// [`crate::common::SearchOutcome::NoSolution`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("new search nodes can only be derived via an action")]
    MissingAction,

    #[error("an action was supplied for a node without a parent")]
    ActionWithoutParent,

    #[error("pop from an empty frontier")]
    EmptyFrontier,

    #[error("invalid tile board: {reason}")]
    InvalidBoard { reason: String },
}
