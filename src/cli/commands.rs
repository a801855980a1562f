//! CLI commands and argument parsing

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the Pinterest private API
#[derive(Parser, Debug)]
#[command(name = "pinbot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "PINBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the home feed of the logged-in user
    Feed {
        /// Maximum pins to print (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Stop at the first pin created before this time (RFC 3339)
        #[arg(long)]
        since: Option<DateTime<Utc>>,
    },

    /// Print a single pin
    Pin {
        /// Pin id
        id: String,
    },

    /// Print pins related to a pin
    Related {
        /// Pin id
        id: String,

        /// Maximum pins to print (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print recent pins from a domain
    Source {
        /// Domain, e.g. flickr.com
        domain: String,

        /// Maximum pins to print (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Search pins or boards
    Search {
        /// Search query
        query: String,

        /// Search boards instead of pins
        #[arg(long)]
        boards: bool,

        /// Maximum results to print (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the profile of the logged-in user
    Profile,

    /// Send a password reset link by e-mail
    ResetLink {
        /// Username or e-mail address
        user: String,
    },
}

impl Commands {
    /// Whether the command needs a logged-in session
    pub fn requires_login(&self) -> bool {
        matches!(self, Commands::Feed { .. } | Commands::Profile)
    }
}
