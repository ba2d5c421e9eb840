//! CLI argument definitions for the Redraft application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Redraft — AI text revision: rewrites, grammar checks, and a credential
/// relay for the completion provider.
#[derive(Parser, Debug)]
#[command(name = "redraft", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the credential-injecting relay server.
    Serve {
        /// Relay port.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
    },
    /// Rewrite a text and print the suggestions.
    Rewrite {
        /// The text to rewrite.
        text: String,
        /// Rewrite style (improve, professional, casual, formal, friendly,
        /// academic, simple).
        #[arg(short = 's', long = "style", default_value = "improve")]
        style: String,
        /// Number of suggestions to request (1-3).
        #[arg(short = 'n', long = "count")]
        count: Option<usize>,
    },
    /// Check a text for grammar and spelling mistakes and print the diff.
    Check {
        /// The text to check.
        text: String,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > REDRAFT_CONFIG env var > platform default
    /// (~/.redraft/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("REDRAFT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Resolve the relay port.
///
/// Priority: --port flag > REDRAFT_PORT env var > config file value > 8787.
pub fn resolve_port(flag: Option<u16>, config_port: u16) -> u16 {
    if let Some(p) = flag {
        return p;
    }
    if let Ok(val) = std::env::var("REDRAFT_PORT") {
        if let Ok(p) = val.parse::<u16>() {
            return p;
        }
    }
    if config_port != 0 {
        return config_port;
    }
    8787
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".redraft").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".redraft").join("config.toml");
    }
    PathBuf::from("config.toml")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let args = CliArgs::parse_from(["redraft", "serve", "--port", "9000"]);
        match args.command {
            Command::Serve { port } => assert_eq!(port, Some(9000)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rewrite_defaults() {
        let args = CliArgs::parse_from(["redraft", "rewrite", "some text"]);
        match args.command {
            Command::Rewrite { text, style, count } => {
                assert_eq!(text, "some text");
                assert_eq!(style, "improve");
                assert_eq!(count, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rewrite_with_style_and_count() {
        let args =
            CliArgs::parse_from(["redraft", "rewrite", "-s", "formal", "-n", "3", "some text"]);
        match args.command {
            Command::Rewrite { style, count, .. } => {
                assert_eq!(style, "formal");
                assert_eq!(count, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_check() {
        let args = CliArgs::parse_from(["redraft", "check", "I has a apple."]);
        match args.command {
            Command::Check { text } => assert_eq!(text, "I has a apple."),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_port_flag_wins() {
        assert_eq!(resolve_port(Some(9999), 8787), 9999);
    }

    #[test]
    fn test_resolve_port_falls_back_to_config() {
        assert_eq!(resolve_port(None, 8080), 8080);
    }

    #[test]
    fn test_resolve_log_level_flag_wins() {
        let args = CliArgs::parse_from(["redraft", "-l", "debug", "check", "text"]);
        assert_eq!(args.resolve_log_level("info"), "debug");
    }

    #[test]
    fn test_resolve_log_level_config_fallback() {
        let args = CliArgs::parse_from(["redraft", "check", "text"]);
        assert_eq!(args.resolve_log_level("warn"), "warn");
    }
}
