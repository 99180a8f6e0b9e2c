//! Common types used throughout http-bearer
//!
//! Shared definitions for token channels, challenge error codes and the
//! configuration-time scope value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Parsed body or query parameters
pub type ParamMap = HashMap<String, String>;

// ============================================================================
// Constants
// ============================================================================

/// Realm advertised when none is configured
pub const DEFAULT_REALM: &str = "Users";

/// Body and query parameter carrying the access token (RFC 6750 §2.2, §2.3)
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

// ============================================================================
// Token Channel
// ============================================================================

/// Channel a bearer token was transmitted through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// `Authorization: Bearer <token>` header
    Header,
    /// `access_token` field of a parsed request body
    Body,
    /// `access_token` parameter of the query string
    Query,
}

impl Channel {
    /// Channels in the order the locator inspects them
    pub const ALL: [Channel; 3] = [Channel::Header, Channel::Body, Channel::Query];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Header => "header",
            Channel::Body => "body",
            Channel::Query => "query",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Challenge Error Codes
// ============================================================================

/// Error codes defined by RFC 6750 §3.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or malformed request, or more than one token method used
    InvalidRequest,
    /// Token expired, revoked, malformed or otherwise invalid
    InvalidToken,
    /// Token lacks the scope required by the resource
    InsufficientScope,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::InvalidToken => "invalid_token",
            ErrorCode::InsufficientScope => "insufficient_scope",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Scope
// ============================================================================

/// Scope as written in configuration: a single value or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeValue {
    One(String),
    Many(Vec<String>),
}

impl ScopeValue {
    /// Normalize into an ordered list; an empty single value yields no scope
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ScopeValue::One(scope) if scope.is_empty() => Vec::new(),
            ScopeValue::One(scope) => vec![scope],
            ScopeValue::Many(scopes) => scopes,
        }
    }
}

impl From<&str> for ScopeValue {
    fn from(scope: &str) -> Self {
        ScopeValue::One(scope.to_string())
    }
}

impl From<String> for ScopeValue {
    fn from(scope: String) -> Self {
        ScopeValue::One(scope)
    }
}

impl From<Vec<String>> for ScopeValue {
    fn from(scopes: Vec<String>) -> Self {
        ScopeValue::Many(scopes)
    }
}

impl From<Vec<&str>> for ScopeValue {
    fn from(scopes: Vec<&str>) -> Self {
        ScopeValue::Many(scopes.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ScopeValue {
    fn from(scopes: [&str; N]) -> Self {
        ScopeValue::Many(scopes.iter().map(|s| (*s).to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::InvalidRequest.as_str(), "invalid_request");
        assert_eq!(ErrorCode::InvalidToken.to_string(), "invalid_token");
        assert_eq!(
            ErrorCode::InsufficientScope.to_string(),
            "insufficient_scope"
        );
    }

    #[test]
    fn test_scope_value_from_yaml() {
        let one: ScopeValue = serde_yaml::from_str("profile").unwrap();
        assert_eq!(one.into_vec(), vec!["profile"]);

        let many: ScopeValue = serde_yaml::from_str("[profile, email]").unwrap();
        assert_eq!(many.into_vec(), vec!["profile", "email"]);
    }

    #[test]
    fn test_empty_scope_string_is_no_scope() {
        assert!(ScopeValue::from("").into_vec().is_empty());
        assert!(ScopeValue::Many(Vec::new()).into_vec().is_empty());
    }

    #[test]
    fn test_channel_order() {
        assert_eq!(
            Channel::ALL,
            [Channel::Header, Channel::Body, Channel::Query]
        );
        assert_eq!(Channel::Query.to_string(), "query");
    }
}
