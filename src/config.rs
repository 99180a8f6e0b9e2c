//! Configuration for the bundled server
//!
//! A YAML file carries the strategy options at the top level next to the
//! token table for [`StaticTokens`]:
//!
//! ```yaml
//! realm: example
//! scope: [read, write]
//! tokens:
//!   - token: s3cr3t
//!     subject: alice
//!     scope: [read, write]
//! ```

use crate::error::{Error, Result};
use crate::static_tokens::{StaticTokens, TokenEntry};
use crate::strategy::{BearerStrategy, StrategyOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BearerConfig {
    /// Realm, scope and request passing for the strategy
    #[serde(flatten)]
    pub strategy: StrategyOptions,

    /// Tokens accepted by the static verifier
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

impl BearerConfig {
    /// Static verifier requiring the configured scope
    pub fn verifier(&self) -> StaticTokens {
        StaticTokens::new(self.tokens.iter().cloned()).require_scope(self.strategy.scope_list())
    }

    /// Strategy wired to the static verifier
    pub fn strategy(&self) -> BearerStrategy<StaticTokens> {
        BearerStrategy::with_options(self.strategy.clone(), self.verifier())
    }
}

/// Load a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<BearerConfig> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    load_config_from_str(&content)
}

/// Load a configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<BearerConfig> {
    let config: BearerConfig = serde_yaml::from_str(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &BearerConfig) -> Result<()> {
    if config.strategy.scope_list().iter().any(String::is_empty) {
        return Err(Error::config("Scope values cannot be empty"));
    }

    let mut seen = HashSet::new();
    for (index, entry) in config.tokens.iter().enumerate() {
        if entry.token.is_empty() {
            return Err(Error::config(format!("Token #{} has an empty value", index + 1)));
        }
        if entry.subject.is_empty() {
            return Err(Error::config(format!("Token #{} has no subject", index + 1)));
        }
        if !seen.insert(entry.token.as_str()) {
            return Err(Error::config(format!(
                "Token #{} duplicates an earlier token",
                index + 1
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScopeValue;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r#"
realm: example
scope: [read, write]
tokens:
  - token: alice-token
    subject: alice
    scope: [read, write]
  - token: bob-token
    subject: bob
"#;

    #[test]
    fn test_load_config_from_str() {
        let config = load_config_from_str(SAMPLE).unwrap();

        assert_eq!(config.strategy.realm.as_deref(), Some("example"));
        assert_eq!(config.strategy.scope_list(), vec!["read", "write"]);
        assert!(!config.strategy.pass_request_to_verify);
        assert_eq!(config.tokens.len(), 2);
        assert_eq!(config.tokens[1].subject, "bob");
        assert!(config.tokens[1].scope.is_empty());
    }

    #[test]
    fn test_scope_as_single_string() {
        let config = load_config_from_str("scope: read\n").unwrap();
        assert_eq!(config.strategy.scope, Some(ScopeValue::One("read".to_string())));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = load_config_from_str("{}").unwrap();
        assert_eq!(config.strategy, StrategyOptions::default());
        assert!(config.tokens.is_empty());

        let strategy = config.strategy();
        assert_eq!(strategy.realm(), "Users");
        assert!(strategy.scope().is_empty());
    }

    #[test]
    fn test_strategy_from_config() {
        let config = load_config_from_str(SAMPLE).unwrap();
        let strategy = config.strategy();

        assert_eq!(strategy.realm(), "example");
        assert_eq!(strategy.verifier().len(), 2);
        assert_eq!(strategy.verifier().required_scope(), ["read", "write"]);
    }

    #[test]
    fn test_rejects_empty_token() {
        let err = load_config_from_str("tokens:\n  - token: ''\n    subject: alice\n").unwrap_err();
        assert!(err.to_string().contains("empty value"));
    }

    #[test]
    fn test_rejects_duplicate_token() {
        let yaml = "tokens:\n  - {token: t, subject: a}\n  - {token: t, subject: b}\n";
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_rejects_unknown_token_field() {
        let yaml = "tokens:\n  - {token: t, subject: a, role: admin}\n";
        let err = load_config_from_str(yaml).unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.tokens[0].token, "alice-token");
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
