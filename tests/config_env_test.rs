//! COVEN_* environment overrides.
//!
//! Kept in its own test binary: the variables are process-wide.

use std::env;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use coven::config::{local_config_path, Settings};

#[test]
fn given_env_vars_when_load_then_override_local_config() {
    // Arrange
    let roster_dir = TempDir::new().unwrap();
    fs::write(local_config_path(roster_dir.path()), "millennial_year = 1900\n").unwrap();
    env::set_var("COVEN_MILLENNIAL_YEAR", "1990");
    env::set_var("COVEN_ROSTER", "/env/roster.toml");

    // Act
    let settings = Settings::load(Some(roster_dir.path()));
    env::remove_var("COVEN_MILLENNIAL_YEAR");
    env::remove_var("COVEN_ROSTER");

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.millennial_year, 1990);
    assert_eq!(settings.roster, Some(PathBuf::from("/env/roster.toml")));
}
