//! Bearer strategy module
//!
//! Implements RFC 6750 request authentication:
//!
//! - **Token locator**: `Authorization: Bearer`, `access_token` body field,
//!   `access_token` query parameter
//! - **Transmission validator**: exactly one channel per request
//! - **Challenge builder**: `WWW-Authenticate` values with realm, scope and
//!   error fields
//! - **Verification protocol**: the [`Verified`] handle a [`Verify`]
//!   implementation reports its outcome through

mod authenticator;
mod challenge;
mod locator;
mod types;
mod verified;
mod verify;

pub use authenticator::{BearerStrategy, BearerStrategyBuilder};
pub use challenge::ChallengeBuilder;
pub use locator::{header_token, locate, BearerToken, LocatedTokens, TransmissionError};
pub use types::{Failure, Outcome, StrategyOptions};
pub use verified::Verified;
pub use verify::{verify_fn, verify_request_fn, Verify, VerifyFn, VerifyRequestFn};
