//! Roster files: TOML lists of vampire records turned into an arena.

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Roster, RosterBuilder, VampireArena};

/// Parse roster content without touching the filesystem.
pub fn parse_roster(content: &str, path: &Path) -> ApplicationResult<Roster> {
    toml::from_str(content).map_err(|e| ApplicationError::Roster {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse a roster file.
#[instrument(level = "debug")]
pub fn load_roster(path: &Path) -> ApplicationResult<Roster> {
    if !path.exists() {
        return Err(ApplicationError::RosterNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).with_path_context("read roster", path)?;
    let roster = parse_roster(&content, path)?;
    debug!("loaded {} records", roster.vampires.len());
    Ok(roster)
}

/// Load a roster file and assemble its trees.
#[instrument(level = "debug")]
pub fn build_arena(path: &Path) -> ApplicationResult<VampireArena> {
    let roster = load_roster(path)?;
    let arena = RosterBuilder::new().build(&roster.vampires)?;
    Ok(arena)
}
