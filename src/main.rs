mod app;
mod backup;
mod cli;
mod config;
mod error;
mod paths;
mod prompt;
mod remote;
mod save_sync;
mod selection;
mod util;

use crate::app::App;
use crate::paths::PlatformPaths;
use crate::prompt::{DesktopPrompter, Prompter, TerminalPrompter};

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout is reserved for listings.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli::default_log_filter(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting s1sync");

    let paths = match PlatformPaths::detect(cli.config_dir.clone()) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::error!(error = %e, "failed to detect platform paths");
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let prompter: Box<dyn Prompter> = if cli.gui {
        Box::new(DesktopPrompter::new(paths.home.clone()))
    } else {
        Box::new(TerminalPrompter::stdio())
    };

    let mut app = App::new(paths, prompter);
    app.run(cli.command).exit_code()
}
