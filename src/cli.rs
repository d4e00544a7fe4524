use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// scssync - keeps generated SCSS @import blocks in sync with partial directories
#[derive(Parser, Debug)]
#[command(name = "scssync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: $SCSSYNC_CONFIG, then ./scssync.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// When to color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch every configured directory and keep the target in sync
    Watch {
        /// Remove every generated region when stopped
        #[arg(long)]
        cleanup_on_exit: bool,

        /// With --cleanup-on-exit: remove only the markers, keep the imports
        #[arg(long, requires = "cleanup_on_exit")]
        keep_body: bool,
    },

    /// Synchronize once and exit
    Sync {
        /// Only this watcher
        watcher: Option<String>,

        /// Show a diff of what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the import ids a watcher currently generates
    List {
        /// Watcher name from the configuration
        watcher: String,
    },

    /// Remove generated regions
    Clean {
        /// Only this watcher
        watcher: Option<String>,

        /// Remove only the markers, keep the imports as plain lines
        #[arg(long)]
        keep_body: bool,
    },

    /// Delete floating copies of a watcher's imports, then resync it
    Rehome {
        /// Watcher name from the configuration
        watcher: String,
    },
}
