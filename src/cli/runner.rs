//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::cli::server;
use crate::config::{load_config, BearerConfig};
use crate::error::Result;
use crate::strategy::ChallengeBuilder;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port, config } => {
                let config = load_config(config)?;
                server::serve(config, *port).await
            }
            Commands::Validate { config } => {
                let config = load_config(config)?;
                self.output_message(&validation_message(&config));
                Ok(())
            }
            Commands::Challenge {
                realm,
                scope,
                error,
                description,
                uri,
            } => {
                let builder = ChallengeBuilder::new(realm.clone().unwrap_or_default(), scope.clone());
                let challenge = builder.render(error.as_deref(), description.as_deref(), uri.as_deref());
                self.output_message(&json!({
                    "type": "CHALLENGE",
                    "challenge": challenge
                }));
                Ok(())
            }
        }
    }

    /// Output a message to stdout
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Summary printed by `validate`; token values are never echoed
fn validation_message(config: &BearerConfig) -> Value {
    let strategy = config.strategy();
    let subjects: Vec<&str> = config.tokens.iter().map(|t| t.subject.as_str()).collect();

    json!({
        "type": "LOG",
        "log": {
            "level": "INFO",
            "message": format!(
                "Configuration is valid: realm '{}' with {} tokens",
                strategy.realm(),
                config.tokens.len()
            ),
            "realm": strategy.realm(),
            "scope": strategy.scope(),
            "pass_request_to_verify": strategy.passes_request_to_verify(),
            "subjects": subjects
        }
    })
}
