//! Bearer strategy implementation
//!
//! Locates the token, enforces single-channel transmission, then hands the
//! token to the verifier and waits for its report.

use super::challenge::ChallengeBuilder;
use super::locator::{locate, TransmissionError};
use super::types::{Failure, Outcome, StrategyOptions};
use super::verified::Verified;
use super::verify::Verify;
use crate::error::{Error, Result};
use crate::request::BearerRequest;
use crate::types::{ErrorCode, ScopeValue};
use std::sync::Arc;
use tracing::{debug, warn};

/// RFC 6750 bearer authentication strategy
pub struct BearerStrategy<V> {
    /// External verifier
    verify: V,
    /// Realm and scope baked into every challenge
    challenge: Arc<ChallengeBuilder>,
    /// Hand the request to the verifier
    pass_request_to_verify: bool,
}

impl<V: Verify> BearerStrategy<V> {
    /// Name the strategy registers under
    pub const NAME: &'static str = "bearer";

    /// Create a strategy with default options (realm "Users", no scope)
    pub fn new(verify: V) -> Self {
        Self::with_options(StrategyOptions::default(), verify)
    }

    /// Create a strategy with the given options
    pub fn with_options(options: StrategyOptions, verify: V) -> Self {
        let scope = options.scope_list();
        let realm = options.realm.unwrap_or_default();

        Self {
            verify,
            challenge: Arc::new(ChallengeBuilder::new(realm, scope)),
            pass_request_to_verify: options.pass_request_to_verify,
        }
    }

    /// Start building a strategy
    pub fn builder() -> BearerStrategyBuilder<V> {
        BearerStrategyBuilder::new()
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn realm(&self) -> &str {
        self.challenge.realm()
    }

    pub fn scope(&self) -> &[String] {
        self.challenge.scope()
    }

    pub fn passes_request_to_verify(&self) -> bool {
        self.pass_request_to_verify
    }

    /// The configured verifier
    pub fn verifier(&self) -> &V {
        &self.verify
    }

    /// Render a challenge for this strategy's realm and scope
    pub fn challenge(
        &self,
        code: Option<&str>,
        description: Option<&str>,
        uri: Option<&str>,
    ) -> String {
        self.challenge.render(code, description, uri)
    }

    /// Authenticate one request
    ///
    /// Malformed transmissions are answered locally with `invalid_request`
    /// and never reach the verifier. Otherwise the verifier's single report
    /// is returned. A verifier that drops every handle without reporting
    /// yields `Outcome::Error` carrying `Error::NoOutcome`.
    pub async fn authenticate(&self, request: &BearerRequest) -> Outcome<V::Principal, V::Info> {
        let located = locate(request);
        let channels = located.count();

        let token = match located.into_single() {
            Ok(token) => token,
            Err(err) => {
                debug!(channels, "rejecting bearer token transmission");
                return Outcome::Fail(self.reject(err));
            }
        };

        debug!(channel = %token.channel(), "bearer token located");

        let (verified, receiver) = Verified::channel(Arc::clone(&self.challenge));
        if self.pass_request_to_verify {
            self.verify
                .verify_with_request(request, token.into_token(), verified)
                .await;
        } else {
            self.verify.verify(token.into_token(), verified).await;
        }

        match receiver.await {
            Ok(outcome) => {
                debug!(outcome = outcome.kind(), "bearer verification finished");
                outcome
            }
            Err(_) => {
                warn!("verify function dropped its handle without reporting an outcome");
                Outcome::Error(Box::new(Error::NoOutcome))
            }
        }
    }

    fn reject(&self, err: TransmissionError) -> Failure {
        let challenge = self.challenge(
            Some(ErrorCode::InvalidRequest.as_str()),
            Some(&err.to_string()),
            None,
        );
        Failure::challenge_with(challenge, err.status())
    }
}

impl<V> std::fmt::Debug for BearerStrategy<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerStrategy")
            .field("challenge", &self.challenge)
            .field("pass_request_to_verify", &self.pass_request_to_verify)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BearerStrategy`]
pub struct BearerStrategyBuilder<V> {
    options: StrategyOptions,
    verify: Option<V>,
}

impl<V> Default for BearerStrategyBuilder<V> {
    fn default() -> Self {
        Self {
            options: StrategyOptions::default(),
            verify: None,
        }
    }
}

impl<V: Verify> BearerStrategyBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options at once
    pub fn options(mut self, options: StrategyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.options.realm = Some(realm.into());
        self
    }

    /// Required scope, as a single value or a list
    pub fn scope(mut self, scope: impl Into<ScopeValue>) -> Self {
        self.options.scope = Some(scope.into());
        self
    }

    pub fn pass_request_to_verify(mut self, enabled: bool) -> Self {
        self.options.pass_request_to_verify = enabled;
        self
    }

    pub fn verify(mut self, verify: V) -> Self {
        self.verify = Some(verify);
        self
    }

    /// Build the strategy; fails without a verifier
    pub fn build(self) -> Result<BearerStrategy<V>> {
        let verify = self.verify.ok_or(Error::MissingVerify)?;
        Ok(BearerStrategy::with_options(self.options, verify))
    }
}
