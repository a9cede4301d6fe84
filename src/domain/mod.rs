//! Domain layer: entities and lineage logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;

pub use arena::{
    LevelOrderIterator, PreOrderIterator, VampireArena, VampireNode, MILLENNIAL_YEAR,
};
pub use builder::RosterBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
