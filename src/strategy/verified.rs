//! Result handle passed to the verifier
//!
//! A verifier must report exactly one outcome. The handle enforces the
//! first report and drops later ones with a warning. It is cheap to clone
//! and `'static`, so it can be moved into a spawned task and resolved later.

use super::challenge::ChallengeBuilder;
use super::types::{Failure, Outcome};
use crate::error::BoxError;
use crate::types::ErrorCode;
use axum::http::StatusCode;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;

/// Outcome reporter handed to `Verify` implementations
pub struct Verified<P, I> {
    inner: Arc<Inner<P, I>>,
}

struct Inner<P, I> {
    sender: Mutex<Option<oneshot::Sender<Outcome<P, I>>>>,
    challenge: Arc<ChallengeBuilder>,
}

impl<P, I> Clone for Verified<P, I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, I> fmt::Debug for Verified<P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verified")
            .field("resolved", &self.is_resolved())
            .finish_non_exhaustive()
    }
}

impl<P, I> Verified<P, I> {
    /// Create a handle and the receiver its outcome is delivered to
    pub(crate) fn channel(
        challenge: Arc<ChallengeBuilder>,
    ) -> (Self, oneshot::Receiver<Outcome<P, I>>) {
        let (sender, receiver) = oneshot::channel();
        let verified = Self {
            inner: Arc::new(Inner {
                sender: Mutex::new(Some(sender)),
                challenge,
            }),
        };
        (verified, receiver)
    }

    /// Authentication succeeded
    ///
    /// `info` is forwarded to the caller untouched (typically granted scope).
    pub fn success(&self, principal: P, info: Option<I>) {
        self.resolve("success", Outcome::Success { principal, info });
    }

    /// Authentication failed
    ///
    /// Without a status the failure is answered with 401.
    pub fn fail(&self, challenge: Option<String>, status: Option<StatusCode>) {
        self.resolve("fail", Outcome::Fail(Failure::new(challenge, status)));
    }

    /// Fail with an `invalid_token` challenge and 401
    pub fn invalid_token(&self, description: Option<&str>, uri: Option<&str>) {
        let challenge = self.challenge(Some(ErrorCode::InvalidToken.as_str()), description, uri);
        self.resolve(
            "invalid_token",
            Outcome::Fail(Failure::challenge_with(challenge, StatusCode::UNAUTHORIZED)),
        );
    }

    /// Fail with an `insufficient_scope` challenge and 403
    pub fn insufficient_scope(&self, description: Option<&str>, uri: Option<&str>) {
        let challenge =
            self.challenge(Some(ErrorCode::InsufficientScope.as_str()), description, uri);
        self.resolve(
            "insufficient_scope",
            Outcome::Fail(Failure::challenge_with(challenge, StatusCode::FORBIDDEN)),
        );
    }

    /// The verifier hit an internal fault; never answered with a challenge
    pub fn error(&self, cause: impl Into<BoxError>) {
        self.resolve("error", Outcome::Error(cause.into()));
    }

    /// Render a challenge for this strategy's realm and scope without
    /// reporting anything
    pub fn challenge(
        &self,
        code: Option<&str>,
        description: Option<&str>,
        uri: Option<&str>,
    ) -> String {
        self.inner.challenge.render(code, description, uri)
    }

    /// Whether an outcome has already been reported
    pub fn is_resolved(&self) -> bool {
        self.lock().is_none()
    }

    fn resolve(&self, operation: &'static str, outcome: Outcome<P, I>) {
        let sender = self.lock().take();
        match sender {
            Some(sender) => {
                if sender.send(outcome).is_err() {
                    tracing::debug!(operation, "authentication no longer awaited; outcome dropped");
                }
            }
            None => {
                tracing::warn!(
                    operation,
                    "verify function reported more than one outcome; ignoring"
                );
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<oneshot::Sender<Outcome<P, I>>>> {
        self.inner
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
