//! The verifier seam
//!
//! Implement [`Verify`] to map a token to a principal, or wrap a closure
//! with [`verify_fn`] / [`verify_request_fn`].

use super::verified::Verified;
use crate::error::Error;
use crate::request::BearerRequest;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

/// Resolves a bearer token to an identity
///
/// Every call must end with exactly one report on `verified`, either before
/// returning or later from a task holding a clone of the handle.
#[async_trait]
pub trait Verify: Send + Sync {
    /// Application identity produced on success
    type Principal: Send + 'static;

    /// Extra metadata forwarded with a success (granted scope and the like)
    type Info: Send + 'static;

    /// Verify a token
    async fn verify(&self, token: String, verified: Verified<Self::Principal, Self::Info>);

    /// Verify a token with the request in hand
    ///
    /// Called instead of [`Verify::verify`] when the strategy is configured
    /// with `pass_request_to_verify`. Defaults to ignoring the request.
    async fn verify_with_request(
        &self,
        _request: &BearerRequest,
        token: String,
        verified: Verified<Self::Principal, Self::Info>,
    ) {
        self.verify(token, verified).await;
    }
}

/// Closure verifier taking `(token, verified)`
pub struct VerifyFn<F, P, I> {
    f: F,
    _marker: PhantomData<fn() -> (P, I)>,
}

/// Wrap an async closure as a verifier
///
/// ```rust,ignore
/// let verify = verify_fn(|token: String, verified: Verified<User, ()>| async move {
///     match users.find_by_token(&token).await {
///         Ok(Some(user)) => verified.success(user, None),
///         Ok(None) => verified.invalid_token(None, None),
///         Err(e) => verified.error(e),
///     }
/// });
/// ```
pub fn verify_fn<F, Fut, P, I>(f: F) -> VerifyFn<F, P, I>
where
    F: Fn(String, Verified<P, I>) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    VerifyFn {
        f,
        _marker: PhantomData,
    }
}

impl<F, P, I> fmt::Debug for VerifyFn<F, P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut, P, I> Verify for VerifyFn<F, P, I>
where
    F: Fn(String, Verified<P, I>) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
    P: Send + 'static,
    I: Send + 'static,
{
    type Principal = P;
    type Info = I;

    async fn verify(&self, token: String, verified: Verified<P, I>) {
        (self.f)(token, verified).await;
    }
}

/// Closure verifier taking `(request, token, verified)`
///
/// Only meaningful on a strategy built with `pass_request_to_verify`; invoked
/// without the request it reports a configuration error.
pub struct VerifyRequestFn<F, P, I> {
    f: F,
    _marker: PhantomData<fn() -> (P, I)>,
}

/// Wrap an async closure that also wants the request
pub fn verify_request_fn<F, Fut, P, I>(f: F) -> VerifyRequestFn<F, P, I>
where
    F: Fn(BearerRequest, String, Verified<P, I>) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
{
    VerifyRequestFn {
        f,
        _marker: PhantomData,
    }
}

impl<F, P, I> fmt::Debug for VerifyRequestFn<F, P, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyRequestFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut, P, I> Verify for VerifyRequestFn<F, P, I>
where
    F: Fn(BearerRequest, String, Verified<P, I>) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send + 'static,
    P: Send + 'static,
    I: Send + 'static,
{
    type Principal = P;
    type Info = I;

    async fn verify(&self, _token: String, verified: Verified<P, I>) {
        verified.error(Error::config(
            "verify function expects the request; enable pass_request_to_verify",
        ));
    }

    async fn verify_with_request(
        &self,
        request: &BearerRequest,
        token: String,
        verified: Verified<P, I>,
    ) {
        (self.f)(request.clone(), token, verified).await;
    }
}
