//! fixterm - an interactive terminal client for FIX sessions.
//!
//! Connects to a counterparty, performs the Logon, then drives a command
//! console over the live session: scripted lines first, interactive input
//! after.

mod commands;
mod config;
mod console;
mod error;
mod input;
mod output;
mod session;
mod store;

use std::io::ErrorKind;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::console::Console;
use crate::input::LineSource;
use crate::output::Output;
use crate::session::Session;
use crate::store::MessageStore;

const USAGE: &str = "Usage: fixterm <configuration-file> [<input-file>]";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    }

    // Configuration and script-file problems are operator errors: report
    // them and exit non-zero without entering the loop. Anything else is
    // unexpected and propagates as a fatal error.
    let config = match Config::load(&args[0]) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args[0], error = %e, "Failed to load config");
            eprintln!("error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    let fix_config = match config.fix_config() {
        Ok(fix_config) => fix_config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let script = match args.get(1) {
        None => Vec::new(),
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!(path = %path, "Input file not found");
                eprintln!("error: {}: no such file", path);
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e.into()),
        },
    };

    info!(
        address = %config.fix.address,
        port = config.fix.port,
        sender = %config.fix.sender_comp_id,
        target = %config.fix.target_comp_id,
        "Connecting"
    );

    let store = MessageStore::new();
    let session = Session::connect(
        (config.fix.address.as_str(), config.fix.port),
        fix_config,
        std::sync::Arc::clone(&store),
    )
    .await?;

    let output = Output::stdout();
    let lines = LineSource::new(script, output.clone());
    let mut console = Console::new(session, store, output);
    info!(commands = ?console.registry().names(), "Console ready");
    console.run(lines).await?;

    Ok(ExitCode::SUCCESS)
}
