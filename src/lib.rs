// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # http-bearer
//!
//! RFC 6750 bearer token authentication for HTTP services.
//!
//! ## Features
//!
//! - **Token Location**: `Authorization: Bearer`, `access_token` body field or
//!   `access_token` query parameter, with exactly one allowed per request
//! - **Challenges**: `WWW-Authenticate` values carrying realm, scope and
//!   `invalid_request` / `invalid_token` / `insufficient_scope` errors
//! - **Pluggable Verification**: implement [`Verify`] or wrap a closure with
//!   [`verify_fn`]; report through the single-use [`Verified`] handle
//! - **axum Integration**: [`middleware::protect`] turns outcomes into responses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use http_bearer::{verify_fn, BearerRequest, BearerStrategy, Verified};
//!
//! let strategy = BearerStrategy::builder()
//!     .realm("example")
//!     .scope(["read", "write"])
//!     .verify(verify_fn(|token: String, verified: Verified<User, ()>| async move {
//!         match lookup(&token).await {
//!             Ok(Some(user)) => verified.success(user, None),
//!             Ok(None) => verified.invalid_token(None, None),
//!             Err(e) => verified.error(e),
//!         }
//!     }))
//!     .build()?;
//!
//! let outcome = strategy
//!     .authenticate(&BearerRequest::default().with_authorization("Bearer mF_9.B5f-4.1JqM"))
//!     .await;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 BearerStrategy::authenticate                  │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──┬─────────────┬──────────────┐
//! │   Locator    │   Transmission   │   Verify    │  Challenge   │
//! ├──────────────┼──────────────────┼─────────────┼──────────────┤
//! │ header       │ zero → 400       │ success     │ realm        │
//! │ body         │ many → 400       │ fail        │ scope        │
//! │ query        │ one → verify     │ error       │ error fields │
//! └──────────────┴──────────────────┴─────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Framework-neutral request view
pub mod request;

/// The bearer strategy
pub mod strategy;

/// axum middleware
pub mod middleware;

/// In-memory token verifier
pub mod static_tokens;

/// YAML configuration for the bundled server
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{BoxError, Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, BearerConfig};
pub use middleware::Authenticated;
pub use request::BearerRequest;
pub use static_tokens::{StaticTokens, Subject, TokenEntry, TokenInfo};
pub use strategy::{
    verify_fn, verify_request_fn, BearerStrategy, BearerStrategyBuilder, ChallengeBuilder,
    Failure, Outcome, StrategyOptions, Verified, Verify,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
