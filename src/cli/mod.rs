//! Command-line front end - a thin presentation layer over the idea store.
//!
//! Each invocation hydrates the store, runs one command, waits for the
//! resulting writes and prints a short report.

/// Command execution and output formatting
pub mod commands;

use crate::core::ranking::{LeaderboardKind, SortOrder};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use commands::{TerminalClipboard, TerminalShareSheet, run_command};

/// Submit, vote on and rank startup ideas.
#[derive(Parser, Debug)]
#[command(name = "idea-board", version, about)]
pub struct Cli {
    /// Path to config.toml
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new idea and get its AI rating
    Submit {
        name: String,
        tagline: String,
        description: String,
    },
    /// Vote for an idea (once per idea)
    Vote { id: String },
    /// List all ideas
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Newest)]
        sort: SortArg,
    },
    /// Show one idea with its description and AI feedback
    Show { id: String },
    /// Top ideas by votes or rating
    Leaderboard {
        #[arg(long, value_enum, default_value_t = BoardArg::Votes)]
        by: BoardArg,
        /// Entries to show; defaults to the configured leaderboard size
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Totals across all ideas
    Stats,
    /// Toggle dark mode
    Theme,
    /// Share an idea's summary
    Share { id: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Newest,
    Rating,
    Votes,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => Self::Newest,
            SortArg::Rating => Self::Rating,
            SortArg::Votes => Self::Votes,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardArg {
    Votes,
    Rating,
}

impl From<BoardArg> for LeaderboardKind {
    fn from(arg: BoardArg) -> Self {
        match arg {
            BoardArg::Votes => Self::Votes,
            BoardArg::Rating => Self::Rating,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from(["idea-board", "submit", "Foo", "Bar", "Baz"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Submit {
                name: "Foo".to_string(),
                tagline: "Bar".to_string(),
                description: "Baz".to_string(),
            }
        );
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_parse_leaderboard_flags() {
        let cli = Cli::try_parse_from([
            "idea-board",
            "leaderboard",
            "--by",
            "rating",
            "--limit",
            "3",
            "--config",
            "other.toml",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Leaderboard {
                by: BoardArg::Rating,
                limit: Some(3),
            }
        );
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn test_list_defaults_to_newest() {
        let cli = Cli::try_parse_from(["idea-board", "list"]).unwrap();
        assert_eq!(cli.command, Command::List { sort: SortArg::Newest });
        assert_eq!(SortOrder::from(SortArg::Votes), SortOrder::Votes);
    }

    #[test]
    fn test_submit_requires_three_fields() {
        assert!(Cli::try_parse_from(["idea-board", "submit", "Foo", "Bar"]).is_err());
    }
}
