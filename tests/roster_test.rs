//! Tests for roster file loading

use std::path::PathBuf;

use tempfile::TempDir;

use coven::application::{build_arena, load_roster, ApplicationError};
use coven::domain::DomainError;

fn create_roster(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write roster file");
    path
}

const SCENARIO: &str = r#"
[[vampire]]
name = "Ansel"
year = 1600

[[vampire]]
name = "Rose"
creator = "Ansel"
year = 1920

[[vampire]]
name = "Andrew"
creator = "Ansel"
year = 1985

[[vampire]]
name = "Sarah"
creator = "Rose"
year = 1995
"#;

#[test]
fn given_roster_file_when_loading_then_reads_records_in_order() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_roster(&temp, "roster.toml", SCENARIO);

    // Act
    let roster = load_roster(&path).unwrap();

    // Assert
    let names: Vec<&str> = roster.vampires.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Ansel", "Rose", "Andrew", "Sarah"]);
    assert_eq!(roster.vampires[3].creator.as_deref(), Some("Rose"));
}

#[test]
fn given_roster_file_when_building_arena_then_answers_queries() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_roster(&temp, "roster.toml", SCENARIO);

    // Act
    let arena = build_arena(&path).unwrap();

    // Assert
    let ansel = arena.find_in_forest("Ansel").unwrap();
    let sarah = arena.find_in_forest("Sarah").unwrap();
    let andrew = arena.find_in_forest("Andrew").unwrap();
    assert_eq!(arena.closest_common_ancestor(sarah, andrew).unwrap(), ansel);
    assert_eq!(arena.millennials(ansel).unwrap().len(), 2);
}

#[test]
fn given_empty_roster_file_when_loading_then_has_no_records() {
    let temp = TempDir::new().unwrap();
    let path = create_roster(&temp, "roster.toml", "");

    let roster = load_roster(&path).unwrap();

    assert!(roster.vampires.is_empty());
}

#[test]
fn given_missing_roster_when_loading_then_reports_not_found() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.toml");

    let result = load_roster(&path);

    assert!(matches!(result, Err(ApplicationError::RosterNotFound(p)) if p == path));
}

#[test]
fn given_record_without_year_when_loading_then_reports_roster_error() {
    let temp = TempDir::new().unwrap();
    let path = create_roster(&temp, "roster.toml", "[[vampire]]\nname = \"Ansel\"\n");

    let result = load_roster(&path);

    assert!(matches!(result, Err(ApplicationError::Roster { .. })));
}

#[test]
fn given_unknown_creator_in_file_when_building_then_wraps_domain_error() {
    let temp = TempDir::new().unwrap();
    let path = create_roster(
        &temp,
        "roster.toml",
        "[[vampire]]\nname = \"Rose\"\ncreator = \"Count\"\nyear = 1920\n",
    );

    let result = build_arena(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::UnknownCreator { .. }))
    ));
}
