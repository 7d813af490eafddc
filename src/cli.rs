use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cinescope")]
#[command(author, version, about = "Movie and TV catalog with release quality badges")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API and web UI
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show one page of a catalog list
    Catalog {
        /// popular, now-playing or upcoming
        #[arg(required = true)]
        list: String,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the details view of a title
    Details {
        /// movie or tv
        kind: String,

        /// Provider id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the quality badge of a title
    Quality {
        /// movie or tv
        kind: String,

        /// Provider id
        id: String,

        /// Use the release-date heuristic of catalog grids
        #[arg(long)]
        grid: bool,
    },

    /// Print embed player links for a title
    Players {
        /// movie or tv
        kind: String,

        /// Provider id
        id: String,

        #[arg(long, default_value = "1")]
        season: u32,

        #[arg(long, default_value = "1")]
        episode: u32,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
