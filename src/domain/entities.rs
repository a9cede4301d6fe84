//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload carried by every node in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VampireData {
    /// Identifier used by name lookup, not unique by construction
    pub name: String,
    /// Year the vampire was converted
    pub converted_year: i32,
}

impl VampireData {
    pub fn new(name: impl Into<String>, converted_year: i32) -> Self {
        Self {
            name: name.into(),
            converted_year,
        }
    }
}

impl fmt::Display for VampireData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.converted_year)
    }
}

/// One flat roster entry: a vampire, who created it, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VampireRecord {
    pub name: String,
    /// Name of the creator, `None` for an original vampire
    #[serde(default)]
    pub creator: Option<String>,
    pub year: i32,
}

impl VampireRecord {
    pub fn new(name: impl Into<String>, creator: Option<&str>, year: i32) -> Self {
        Self {
            name: name.into(),
            creator: creator.map(str::to_string),
            year,
        }
    }
}

/// A complete roster as read from a roster file.
///
/// ```toml
/// [[vampire]]
/// name = "Ansel"
/// year = 1600
///
/// [[vampire]]
/// name = "Rose"
/// creator = "Ansel"
/// year = 1920
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default, rename = "vampire")]
    pub vampires: Vec<VampireRecord>,
}
