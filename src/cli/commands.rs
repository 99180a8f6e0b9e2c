//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RFC 6750 bearer token authentication toolkit
#[derive(Parser, Debug)]
#[command(name = "http-bearer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server with a bearer-protected `/me` route
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Token configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Validate a token configuration file
    Validate {
        /// Token configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Render a WWW-Authenticate challenge
    Challenge {
        /// Protection realm (defaults to "Users")
        #[arg(long)]
        realm: Option<String>,

        /// Required scope (repeatable)
        #[arg(long)]
        scope: Vec<String>,

        /// Error code (invalid_request, invalid_token, insufficient_scope)
        #[arg(long)]
        error: Option<String>,

        /// Human-readable error description
        #[arg(long)]
        description: Option<String>,

        /// URI of a page describing the error
        #[arg(long)]
        uri: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_challenge_with_repeated_scope() {
        let cli = Cli::parse_from([
            "http-bearer",
            "challenge",
            "--realm",
            "api",
            "--scope",
            "read",
            "--scope",
            "write",
            "--error",
            "insufficient_scope",
        ]);

        match cli.command {
            Commands::Challenge {
                realm, scope, error, ..
            } => {
                assert_eq!(realm.as_deref(), Some("api"));
                assert_eq!(scope, vec!["read", "write"]);
                assert_eq!(error.as_deref(), Some("insufficient_scope"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::parse_from(["http-bearer", "serve", "--config", "tokens.yaml"]);
        assert_eq!(cli.format, OutputFormat::Json);

        match cli.command {
            Commands::Serve { port, config } => {
                assert_eq!(port, 8080);
                assert_eq!(config, PathBuf::from("tokens.yaml"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
