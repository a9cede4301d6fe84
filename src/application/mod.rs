//! Application layer: roster loading and use cases
//!
//! This layer reads input files and hands records to the domain layer.

pub mod error;
pub mod error_ext;
pub mod roster;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use roster::{build_arena, load_roster, parse_roster};
