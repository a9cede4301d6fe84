//! Command dispatch: resolve settings and roster, then run one query.
//!
//! Each query has a `render_*` function that returns the text to print, so
//! `execute_command` only decides where the output goes.

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::build_arena;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::VampireArena;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    // Commands that need neither settings nor a roster
    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "coven", &mut io::stdout());
            return Ok(());
        }
        Commands::Config {
            command: ConfigCommands::Template,
        } => {
            output::info(&Settings::template());
            return Ok(());
        }
        Commands::Config {
            command: ConfigCommands::Path,
        } => {
            output::info(&render_config_path()?);
            return Ok(());
        }
        _ => {}
    }

    let roster_dir = cli.roster.as_deref().and_then(|path| path.parent());
    let settings = Settings::load(roster_dir)?;
    debug!("settings: {:?}", settings);

    if let Commands::Config { .. } = command {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let arena = build_arena(&roster_path(cli, &settings)?)?;
    match command {
        Commands::Tree => print!("{}", render_tree(&arena)),
        Commands::Depth { name } => output::info(&render_depth(&arena, name)?),
        Commands::Senior { first, second } => {
            output::info(&render_senior(&arena, first, second)?)
        }
        Commands::Lineage { name } => output::info(&render_lineage(&arena, name)?),
        Commands::Ancestor { first, second } => {
            output::info(&render_ancestor(&arena, first, second)?)
        }
        Commands::Find { name } => output::info(&render_find(&arena, name)?),
        Commands::Offspring { name } => output::info(&render_offspring(&arena, name)?),
        Commands::Descendants { name } => output::info(&render_descendants(&arena, name)?),
        Commands::After { year, from } => {
            let year = year.unwrap_or(settings.millennial_year);
            let converted = render_after(&arena, year, from.as_deref())?;
            output::header(&format!("Converted after {year}:"));
            for line in converted {
                output::detail(&line);
            }
        }
        Commands::Config { .. } | Commands::Completion { .. } => {}
    }
    Ok(())
}

fn roster_path(cli: &Cli, settings: &Settings) -> CliResult<PathBuf> {
    cli.roster
        .clone()
        .or_else(|| settings.roster.clone())
        .ok_or_else(|| {
            CliError::Usage("no roster given: pass --roster or set `roster` in coven.toml".into())
        })
}

fn resolve(arena: &VampireArena, name: &str) -> CliResult<Index> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArgs("vampire name must not be empty".into()));
    }
    arena
        .find_in_forest(name)
        .ok_or_else(|| CliError::NotFound(name.to_string()))
}

fn name_of(arena: &VampireArena, idx: Index) -> String {
    arena
        .get(idx)
        .map(|node| node.data.name.clone())
        .unwrap_or_default()
}

fn render_config_path() -> CliResult<String> {
    global_config_path()
        .map(|path| path.display().to_string())
        .ok_or_else(|| {
            CliError::Usage("cannot determine config directory for this platform".into())
        })
}

pub fn render_tree(arena: &VampireArena) -> String {
    arena.to_tree_string().to_string()
}

#[instrument(skip(arena))]
pub fn render_depth(arena: &VampireArena, name: &str) -> CliResult<String> {
    let idx = resolve(arena, name)?;
    Ok(arena.depth_from_root(idx)?.to_string())
}

#[instrument(skip(arena))]
pub fn render_senior(arena: &VampireArena, first: &str, second: &str) -> CliResult<String> {
    let a = resolve(arena, first)?;
    let b = resolve(arena, second)?;
    Ok(arena.is_more_senior_than(a, b)?.to_string())
}

/// Root-first chain of names, e.g. `Ansel -> Rose -> Sarah`.
#[instrument(skip(arena))]
pub fn render_lineage(arena: &VampireArena, name: &str) -> CliResult<String> {
    let idx = resolve(arena, name)?;
    let lineage = arena.lineage(idx)?;
    Ok(lineage.into_iter().map(|i| name_of(arena, i)).join(" -> "))
}

#[instrument(skip(arena))]
pub fn render_ancestor(arena: &VampireArena, first: &str, second: &str) -> CliResult<String> {
    let a = resolve(arena, first)?;
    let b = resolve(arena, second)?;
    let ancestor = arena.closest_common_ancestor(a, b)?;
    Ok(name_of(arena, ancestor))
}

#[instrument(skip(arena))]
pub fn render_find(arena: &VampireArena, name: &str) -> CliResult<String> {
    let idx = resolve(arena, name)?;
    Ok(arena
        .get(idx)
        .map(|node| node.data.to_string())
        .unwrap_or_default())
}

#[instrument(skip(arena))]
pub fn render_offspring(arena: &VampireArena, name: &str) -> CliResult<String> {
    let idx = resolve(arena, name)?;
    Ok(arena.number_of_offspring(idx)?.to_string())
}

#[instrument(skip(arena))]
pub fn render_descendants(arena: &VampireArena, name: &str) -> CliResult<String> {
    let idx = resolve(arena, name)?;
    Ok(arena.total_descendant_count(idx)?.to_string())
}

/// One `name (year)` line per vampire converted strictly after `year`.
///
/// Searches below `from` when given, otherwise every tree in the roster.
#[instrument(skip(arena))]
pub fn render_after(
    arena: &VampireArena,
    year: i32,
    from: Option<&str>,
) -> CliResult<Vec<String>> {
    let roots = match from {
        Some(name) => vec![resolve(arena, name)?],
        None => arena.roots(),
    };

    let mut converted = Vec::new();
    for root in roots {
        for idx in arena.filter_by_year_after(root, year)? {
            if let Some(node) = arena.get(idx) {
                converted.push(node.data.to_string());
            }
        }
    }
    Ok(converted)
}
