//! Vampire lineage trees.
//!
//! Vampires live in an arena ([`domain::VampireArena`]) linked by a single
//! creator and ordered offspring. Every query (seniority, lineage, closest
//! common ancestor, name lookup, descendant counts, year filters) is a method
//! on the arena taking node handles.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{DomainError, DomainResult, VampireArena, VampireNode};
