//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent violations of the tree's structural rules.
/// These are independent of file, config and CLI concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown node handle: {0:?}")]
    UnknownNode(Index),

    #[error("no common ancestor: nodes belong to different trees")]
    NoCommonAncestor,

    #[error("cycle detected in lineage at: {0}")]
    CycleDetected(String),

    #[error("vampire listed under more than one creator: {0}")]
    MultipleCreators(String),

    #[error("duplicate vampire name: {0}")]
    DuplicateName(String),

    #[error("unknown creator '{creator}' for vampire: {name}")]
    UnknownCreator { name: String, creator: String },
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
