//! Strategy configuration and outcome types

use crate::error::BoxError;
use crate::types::ScopeValue;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Construction-time options for a `BearerStrategy`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
    /// Protection space advertised in challenges (defaults to "Users")
    pub realm: Option<String>,

    /// Scope required to access the resource, advertised in challenges
    pub scope: Option<ScopeValue>,

    /// Hand the request to the verifier ahead of the token
    pub pass_request_to_verify: bool,
}

impl StrategyOptions {
    /// Scope normalized into an ordered list
    pub fn scope_list(&self) -> Vec<String> {
        self.scope.clone().map(ScopeValue::into_vec).unwrap_or_default()
    }
}

/// Rejected authentication, ready to become a 4xx response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    challenge: Option<String>,
    status: Option<StatusCode>,
}

impl Failure {
    pub fn new(challenge: Option<String>, status: Option<StatusCode>) -> Self {
        Self { challenge, status }
    }

    /// A failure that carries a challenge and explicit status
    pub fn challenge_with(challenge: String, status: StatusCode) -> Self {
        Self::new(Some(challenge), Some(status))
    }

    /// Rendered `WWW-Authenticate` value, if any
    pub fn challenge(&self) -> Option<&str> {
        self.challenge.as_deref()
    }

    /// Status to respond with; 401 unless the verifier chose another
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::UNAUTHORIZED)
    }
}

/// Result of one `authenticate` call
#[derive(Debug)]
pub enum Outcome<P, I> {
    /// The verifier accepted the token
    Success {
        principal: P,
        info: Option<I>,
    },

    /// The token was missing, ambiguous or rejected
    Fail(Failure),

    /// The verifier could not decide (backing store outage and the like)
    Error(BoxError),
}

impl<P, I> Outcome<P, I> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// The failure, if this outcome is one
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Fail(failure) => Some(failure),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "success",
            Outcome::Fail(_) => "fail",
            Outcome::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_failure_default_status() {
        let failure = Failure::new(None, None);
        assert_eq!(failure.status(), StatusCode::UNAUTHORIZED);
        assert!(failure.challenge().is_none());
    }

    #[test]
    fn test_options_default() {
        let options = StrategyOptions::default();
        assert!(options.realm.is_none());
        assert!(options.scope_list().is_empty());
        assert!(!options.pass_request_to_verify);
    }

    #[test]
    fn test_options_from_yaml() {
        let options: StrategyOptions = serde_yaml::from_str(
            "realm: example\nscope: profile\npass_request_to_verify: true\n",
        )
        .unwrap();
        assert_eq!(options.realm.as_deref(), Some("example"));
        assert_eq!(options.scope_list(), vec!["profile"]);
        assert!(options.pass_request_to_verify);
    }

    #[test]
    fn test_outcome_kind() {
        let outcome: Outcome<(), ()> = Outcome::Fail(Failure::new(None, None));
        assert!(outcome.is_fail());
        assert_eq!(outcome.kind(), "fail");
        assert!(outcome.failure().is_some());
    }
}
