//! study-organizer - study task tracker CLI
//!
//! Serves the task API and dashboard, or acts as a client of a running
//! server.

use clap::Parser;
use study_organizer::cli::{Cli, Commands};
use study_organizer::output::{emit_error, infer_command_name_from_args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVE_FILTER: &str = "study_organizer=info,tower_http=info";

fn main() {
    let command = infer_command_name_from_args();
    let cli = Cli::parse();

    // Client commands stay silent unless RUST_LOG asks otherwise.
    // Invalid or huge filters are ignored.
    let default_filter = match cli.command {
        Commands::Serve { .. } => SERVE_FILTER,
        _ => "off",
    };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let json = cli.json;
    if let Err(err) = cli.run() {
        let _ = emit_error(&command, &err, json);
        std::process::exit(err.exit_code());
    }
}
