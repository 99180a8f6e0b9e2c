//! Static token verifier
//!
//! Maps a fixed table of tokens to subjects. Used by the bundled server and
//! handy in tests; real deployments implement [`Verify`] against their own
//! token store.

use crate::strategy::{Verified, Verify};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// One configured token
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenEntry {
    /// The bearer token value to match
    pub token: String,

    /// Subject the token authenticates as
    pub subject: String,

    /// Scope granted to the token
    #[serde(default)]
    pub scope: Vec<String>,
}

impl fmt::Debug for TokenEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenEntry")
            .field("token", &"<redacted>")
            .field("subject", &self.subject)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Principal produced by [`StaticTokens`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: String,
}

/// Info forwarded alongside a [`Subject`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub scope: Vec<String>,
}

#[derive(Clone)]
struct Grant {
    subject: String,
    scope: Vec<String>,
}

/// Verifier backed by an in-memory token table
#[derive(Clone, Default)]
pub struct StaticTokens {
    grants: HashMap<String, Grant>,
    required_scope: Vec<String>,
}

impl StaticTokens {
    /// Build from token entries; a repeated token keeps its last entry
    pub fn new(entries: impl IntoIterator<Item = TokenEntry>) -> Self {
        let grants = entries
            .into_iter()
            .map(|e| {
                (
                    e.token,
                    Grant {
                        subject: e.subject,
                        scope: e.scope,
                    },
                )
            })
            .collect();

        Self {
            grants,
            required_scope: Vec::new(),
        }
    }

    /// Scope every token must carry in full
    ///
    /// Usually the same list the strategy advertises in its challenges.
    pub fn require_scope(mut self, scope: Vec<String>) -> Self {
        self.required_scope = scope;
        self
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn required_scope(&self) -> &[String] {
        &self.required_scope
    }

    fn missing_scope<'a>(&'a self, granted: &[String]) -> Option<&'a str> {
        self.required_scope
            .iter()
            .find(|s| !granted.contains(s))
            .map(String::as_str)
    }
}

impl fmt::Debug for StaticTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokens")
            .field("tokens", &self.grants.len())
            .field("required_scope", &self.required_scope)
            .finish()
    }
}

#[async_trait]
impl Verify for StaticTokens {
    type Principal = Subject;
    type Info = TokenInfo;

    async fn verify(&self, token: String, verified: Verified<Subject, TokenInfo>) {
        let Some(grant) = self.grants.get(&token) else {
            debug!("unknown bearer token");
            verified.invalid_token(Some("The access token is not recognized"), None);
            return;
        };

        if let Some(missing) = self.missing_scope(&grant.scope) {
            debug!(subject = %grant.subject, missing, "token lacks required scope");
            verified.insufficient_scope(
                Some("The access token does not grant the required scope"),
                None,
            );
            return;
        }

        verified.success(
            Subject {
                id: grant.subject.clone(),
            },
            Some(TokenInfo {
                scope: grant.scope.clone(),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::BearerRequest;
    use crate::strategy::{BearerStrategy, Outcome, StrategyOptions};
    use crate::types::ScopeValue;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    fn entry(token: &str, subject: &str, scope: &[&str]) -> TokenEntry {
        TokenEntry {
            token: token.to_string(),
            subject: subject.to_string(),
            scope: scope.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn tokens() -> StaticTokens {
        StaticTokens::new(vec![
            entry("alice-token", "alice", &["read", "write"]),
            entry("bob-token", "bob", &["read"]),
        ])
    }

    #[tokio::test]
    async fn test_known_token_succeeds() {
        let strategy = BearerStrategy::new(tokens());
        let request = BearerRequest::default().with_authorization("Bearer alice-token");

        match strategy.authenticate(&request).await {
            Outcome::Success { principal, info } => {
                assert_eq!(principal.id, "alice");
                assert_eq!(info.unwrap().scope, vec!["read", "write"]);
            }
            other => panic!("expected success, got {:?}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        let strategy = BearerStrategy::new(tokens());
        let request = BearerRequest::default().with_query_param("access_token", "mallory");

        let outcome = strategy.authenticate(&request).await;
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            failure.challenge(),
            Some(
                "Bearer realm=\"Users\", error=\"invalid_token\", \
                 error_description=\"The access token is not recognized\""
            )
        );
    }

    #[tokio::test]
    async fn test_missing_scope_is_insufficient() {
        let options = StrategyOptions {
            realm: Some("api".to_string()),
            scope: Some(ScopeValue::from(["read", "write"])),
            ..Default::default()
        };
        let verifier = tokens().require_scope(options.scope_list());
        let strategy = BearerStrategy::with_options(options, verifier);

        let request = BearerRequest::default().with_authorization("Bearer bob-token");
        let outcome = strategy.authenticate(&request).await;
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            failure.challenge(),
            Some(
                "Bearer realm=\"api\", scope=\"read write\", error=\"insufficient_scope\", \
                 error_description=\"The access token does not grant the required scope\""
            )
        );

        let request = BearerRequest::default().with_authorization("Bearer alice-token");
        assert!(strategy.authenticate(&request).await.is_success());
    }

    #[test]
    fn test_duplicate_token_keeps_last_entry() {
        let verifier = StaticTokens::new(vec![
            entry("shared", "first", &[]),
            entry("shared", "second", &[]),
        ]);
        assert_eq!(verifier.len(), 1);
        assert_eq!(verifier.grants["shared"].subject, "second");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let rendered = format!("{:?} {:?}", tokens(), entry("secret", "s", &[]));
        assert!(!rendered.contains("alice-token"));
        assert!(!rendered.contains("secret"));
    }
}
