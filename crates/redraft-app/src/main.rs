//! Redraft application binary - composition root.
//!
//! Ties the Redraft crates together into a single executable:
//! 1. Read configuration from TOML (diagnostics deferred)
//! 2. Initialize tracing, then report how the config load went
//! 3. Dispatch the subcommand: run the relay server, or drive a one-shot
//!    revision session (rewrite / check) against the configured endpoint

use std::sync::Arc;

use clap::Parser;

use redraft_backend::HttpCompletionBackend;
use redraft_core::{RedraftConfig, RewriteStyle};
use redraft_relay::RelayState;
use redraft_session::{LoggingClipboard, RevisionSession};

mod cli;

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing exists (its log level feeds the
    // subscriber), so the load outcome is carried along and reported
    // once the subscriber is up instead of being dropped.
    let config_file = args.resolve_config_path();
    let (mut config, config_error) = load_config(&config_file);

    // Tracing.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Redraft v{}", env!("CARGO_PKG_VERSION"));
    match config_error {
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
    }

    match args.command {
        Command::Serve { port } => {
            let port = cli::resolve_port(port, config.completion.relay_port);
            let state = RelayState::from_env(&config.completion);
            redraft_relay::serve(state, port).await?;
        }
        Command::Rewrite { text, style, count } => {
            let style: RewriteStyle = style.parse()?;
            if let Some(count) = count {
                config.suggestions.count = count;
            }
            let session = build_session(&config);
            session.input().set(&text);
            session.submit_rewrite(style).await?;

            for (i, suggestion) in session.store().snapshot().iter().enumerate() {
                println!("{}. {}", i + 1, suggestion.text);
            }
        }
        Command::Check { text } => {
            let session = build_session(&config);
            session.input().set(&text);
            session.submit_correction_check().await?;

            match session.highlight() {
                Some(highlight) => println!("{}", highlight.markup),
                None => println!("{}", text),
            }
        }
    }

    Ok(())
}

fn build_session(config: &RedraftConfig) -> RevisionSession {
    let backend = Arc::new(HttpCompletionBackend::new(&config.completion.endpoint));
    RevisionSession::new(backend, Arc::new(LoggingClipboard), config)
}

/// Read the config file, falling back to defaults on failure.
///
/// The failure is returned alongside the config rather than logged here:
/// tracing is not initialized yet at this point in startup.
fn load_config(path: &std::path::Path) -> (RedraftConfig, Option<redraft_core::RedraftError>) {
    match RedraftConfig::load(path) {
        Ok(config) => (config, None),
        Err(e) => (RedraftConfig::default(), Some(e)),
    }
}

// =============================================================================
// Tests
// =============================================================================
