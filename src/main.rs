//! scssync CLI
//!
//! Usage: scssync [--config <FILE>] <COMMAND>
//!
//! Commands:
//!   watch   Watch every configured directory and keep the target in sync
//!   sync    Synchronize once and exit
//!   list    Show the import ids a watcher currently generates
//!   clean   Remove generated regions
//!   rehome  Delete floating copies of a watcher's imports, then resync it

mod cli;
mod commands;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scssync::application::Cleanup;

use cli::{Cli, Commands};
use ui::context::UiContext;

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "SCSSYNC_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ui = UiContext::new(cli.json, cli.color);
    if let Err(err) = run(cli, ui) {
        ui::error::print_error(&err, ui.json);
        std::process::exit(1);
    }
}

fn run(cli: Cli, ui: UiContext) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Watch {
            cleanup_on_exit,
            keep_body,
        } => {
            let cleanup = match (cleanup_on_exit, keep_body) {
                (false, _) => Cleanup::KeepMarkers,
                (true, true) => Cleanup::KeepBody,
                (true, false) => Cleanup::DeleteBody,
            };
            commands::watch::cmd_watch(config, cleanup, ui)
        }
        Commands::Sync { watcher, dry_run } => {
            commands::sync::cmd_sync(config, watcher.as_deref(), dry_run, ui)
        }
        Commands::List { watcher } => commands::list::cmd_list(config, &watcher, ui),
        Commands::Clean { watcher, keep_body } => {
            commands::clean::cmd_clean(config, watcher.as_deref(), keep_body, ui)
        }
        Commands::Rehome { watcher } => commands::rehome::cmd_rehome(config, &watcher, ui),
    }
}

/// Diagnostics go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "scssync=warn",
        1 => "scssync=info",
        2 => "scssync=debug",
        _ => "scssync=trace",
    }
}
