//! axum integration
//!
//! Runs a [`BearerStrategy`] in front of a router: failures become 4xx
//! responses carrying `WWW-Authenticate`, processing errors become 500, and
//! successes continue with [`Authenticated`] in the request extensions.
//!
//! ```rust,ignore
//! let strategy = Arc::new(BearerStrategy::new(verifier));
//! let app = middleware::protect(Router::new().route("/me", get(me)), strategy);
//! ```

use crate::error::{Error, Result};
use crate::request::{BearerRequest, BodyKind};
use crate::strategy::{BearerStrategy, Failure, Outcome, Verify};
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::Arc;
use tracing::{error, warn};

/// Largest form or JSON body buffered for token lookup
pub const BODY_LIMIT: usize = 64 * 1024;

/// Identity stored in request extensions after a successful authentication
#[derive(Debug, Clone)]
pub struct Authenticated<P, I> {
    pub principal: P,
    pub info: Option<I>,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();

        if let Some(challenge) = self.challenge() {
            match HeaderValue::from_str(challenge) {
                Ok(value) => {
                    response
                        .headers_mut()
                        .insert(header::WWW_AUTHENTICATE, value);
                }
                Err(_) => warn!("challenge is not a valid header value; omitted"),
            }
        }

        response
    }
}

/// Layer `router` so every route requires a bearer token
pub fn protect<S, V>(router: Router<S>, strategy: Arc<BearerStrategy<V>>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    V: Verify + 'static,
    V::Principal: Clone + Sync,
    V::Info: Clone + Sync,
{
    router.layer(middleware::from_fn_with_state(strategy, bearer_auth::<V>))
}

/// Middleware function for `axum::middleware::from_fn_with_state`
pub async fn bearer_auth<V>(
    State(strategy): State<Arc<BearerStrategy<V>>>,
    request: Request,
    next: Next,
) -> Response
where
    V: Verify + 'static,
    V::Principal: Clone + Sync,
    V::Info: Clone + Sync,
{
    let (bearer_request, mut request) = match buffer_request(request).await {
        Ok(pair) => pair,
        Err(err) => {
            warn!(error = %err, "unreadable request body");
            return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
        }
    };

    match strategy.authenticate(&bearer_request).await {
        Outcome::Success { principal, info } => {
            request
                .extensions_mut()
                .insert(Authenticated { principal, info });
            next.run(request).await
        }
        Outcome::Fail(failure) => failure.into_response(),
        Outcome::Error(cause) => {
            error!(error = %cause, "bearer verification failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Split an axum request into the strategy's view and a request that can
/// still be forwarded
///
/// Form and JSON bodies are buffered (up to [`BODY_LIMIT`]) and put back;
/// other bodies are passed through untouched.
pub async fn buffer_request(request: Request) -> Result<(BearerRequest, Request)> {
    let (parts, body) = request.into_parts();

    if BodyKind::from_headers(&parts.headers).is_none() {
        let bearer = BearerRequest::from_parts(&parts, &[])?;
        return Ok((bearer, Request::from_parts(parts, body)));
    }

    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|e| Error::body(e.to_string()))?;
    let bearer = BearerRequest::from_parts(&parts, &bytes)?;

    Ok((bearer, Request::from_parts(parts, Body::from(bytes))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failure_response_carries_challenge() {
        let failure = Failure::challenge_with(
            "Bearer realm=\"Users\", error=\"invalid_token\"".to_string(),
            StatusCode::UNAUTHORIZED,
        );
        let response = failure.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer realm=\"Users\", error=\"invalid_token\""
        );
    }

    #[test]
    fn test_failure_without_challenge() {
        let response = Failure::new(None, Some(StatusCode::FORBIDDEN)).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn test_buffer_request_restores_form_body() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/resource?x=1")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("access_token=abc&name=value"))
            .unwrap();

        let (bearer, request) = buffer_request(request).await.unwrap();
        assert_eq!(bearer.body_param("access_token"), Some("abc"));
        assert_eq!(bearer.query_param("x"), Some("1"));

        let bytes = to_bytes(request.into_body(), BODY_LIMIT).await.unwrap();
        assert_eq!(&bytes[..], b"access_token=abc&name=value");
    }

    #[tokio::test]
    async fn test_buffer_request_skips_other_bodies() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/upload")
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(Body::from("access_token=abc"))
            .unwrap();

        let (bearer, request) = buffer_request(request).await.unwrap();
        assert!(bearer.body().is_empty());

        let bytes = to_bytes(request.into_body(), BODY_LIMIT).await.unwrap();
        assert_eq!(&bytes[..], b"access_token=abc");
    }

    #[tokio::test]
    async fn test_buffer_request_rejects_oversized_body() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/resource")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(vec![b'a'; BODY_LIMIT + 1]))
            .unwrap();

        let err = buffer_request(request).await.unwrap_err();
        assert!(matches!(err, Error::Body { .. }));
    }
}
