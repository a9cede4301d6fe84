//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Vampire lineage trees: seniority, lineage, common ancestors and descendant queries
#[derive(Parser, Debug)]
#[command(name = "coven")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Roster file (default: `roster` from settings)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub roster: Option<PathBuf>,

    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every tree of the roster
    Tree,

    /// Number of creators between a vampire and its original vampire
    Depth {
        /// Vampire name
        name: String,
    },

    /// Is the first vampire more senior than the second?
    Senior {
        /// Vampire expected to be more senior
        first: String,
        /// Vampire to compare against
        second: String,
    },

    /// Lineage from the original vampire down to a vampire
    Lineage {
        /// Vampire name
        name: String,
    },

    /// Closest common ancestor of two vampires
    Ancestor {
        first: String,
        second: String,
    },

    /// Look up a vampire by name
    Find {
        /// Vampire name
        name: String,
    },

    /// Number of vampires directly created by a vampire
    Offspring {
        /// Vampire name
        name: String,
    },

    /// Number of vampires descending from a vampire
    Descendants {
        /// Vampire name
        name: String,
    },

    /// Vampires converted after a year (default: `millennial_year` from settings)
    After {
        /// Threshold year, exclusive
        #[arg(short, long)]
        year: Option<i32>,
        /// Only search below this vampire (default: every tree)
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
    /// Print a commented config template
    Template,
}
