//! Token locator and transmission validator
//!
//! RFC 6750 §2 allows three ways to send a bearer token and forbids using
//! more than one in the same request. `locate` records every channel that
//! carries a token; `LocatedTokens::into_single` enforces the exclusivity.

use crate::request::BearerRequest;
use crate::types::{Channel, ACCESS_TOKEN_PARAM};
use axum::http::StatusCode;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Scheme word, a run of whitespace, then the token (case-insensitive scheme)
static BEARER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Bearer\s+(\S+)").unwrap());

/// Channels that carried a token, plus the last token seen
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LocatedTokens {
    channels: Vec<Channel>,
    token: Option<String>,
}

impl fmt::Debug for LocatedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatedTokens")
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl LocatedTokens {
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn count(&self) -> usize {
        self.channels.len()
    }

    /// Accept exactly one channel
    pub fn into_single(self) -> Result<BearerToken, TransmissionError> {
        match (self.channels.as_slice(), self.token) {
            ([channel], Some(token)) => Ok(BearerToken {
                channel: *channel,
                token,
            }),
            ([], _) | (_, None) => Err(TransmissionError::Missing),
            _ => Err(TransmissionError::Multiple),
        }
    }

    fn record(&mut self, channel: Channel, token: &str) {
        self.channels.push(channel);
        self.token = Some(token.to_string());
    }
}

/// A token accepted for verification
///
/// `Debug` never prints the token value.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    channel: Channel,
    token: String,
}

impl BearerToken {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_token(self) -> String {
        self.token
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("channel", &self.channel)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Malformed token transmission, answered with `invalid_request`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransmissionError {
    #[error(
        "Clients MUST provide one of the following methods to transmit the access_token: \
         an Authorization header with the Bearer scheme, \
         a request body with an access_token field, \
         or a query string with an access_token parameter."
    )]
    Missing,

    #[error("Clients MUST NOT use more than one method to transmit the access_token in each request.")]
    Multiple,
}

impl TransmissionError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Scan header, body and query, in that order
pub fn locate(request: &BearerRequest) -> LocatedTokens {
    let mut located = LocatedTokens::default();

    if let Some(token) = request.authorization().and_then(header_token) {
        located.record(Channel::Header, token);
    }

    if let Some(token) = request.body_param(ACCESS_TOKEN_PARAM).filter(|t| !t.is_empty()) {
        located.record(Channel::Body, token);
    }

    if let Some(token) = request.query_param(ACCESS_TOKEN_PARAM).filter(|t| !t.is_empty()) {
        located.record(Channel::Query, token);
    }

    located
}

/// Token from an `Authorization` value using the Bearer scheme
pub fn header_token(authorization: &str) -> Option<&str> {
    BEARER_REGEX
        .captures(authorization)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
