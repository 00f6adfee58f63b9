use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ghmark")]
#[command(about = "Bookmark GitHub repositories and browse their issues", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (default: <config dir>/ghmark/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bookmark file, overriding the config
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print saved repositories
    List,

    /// Look up a repository and bookmark it
    Add {
        /// Repository as owner/repo
        name: String,
    },

    /// Start on a repository's issues
    Open {
        /// owner/repo, or a route such as /repository/owner%2Frepo
        target: String,
    },
}
