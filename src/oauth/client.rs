//! Token resolver: `access_token` query parameter → identity headers.
//!
//! Flow for a non-public request:
//! 1. read `access_token` from the query string (trimmed; blank means anonymous)
//! 2. `GET {base}/oauth/access_token/{token}` through the transport
//! 3. on success overwrite `X-User-Id` / `X-Client-Id`; on failure return the error and
//!    leave the request untouched
//!
//! The resolver never rejects a request on its own. What to do with a returned error is
//! the caller's policy.
use std::sync::Arc;

use axum::http::{HeaderValue, Request};
use url::Url;

use crate::oauth::access_token::{AccessToken, AccessTokenResponse};
use crate::oauth::error::RestError;
use crate::oauth::headers::{self, HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID};
use crate::oauth::transport::{IdentityTransport, TransportResponse};

const MSG_INVALID_TRANSPORT_RESPONSE: &str =
    "invalid response from transport when trying to get access token";
const MSG_INVALID_ERROR_PAYLOAD: &str = "invalid error payload when trying to get access token";
const MSG_INVALID_TOKEN_PAYLOAD: &str = "error when trying to unmarshal access token response";

/// Outcome of one lookup before it collapses into a `Result`.
#[derive(Debug)]
enum LookupOutcome {
    TransportFailure,
    MalformedError,
    ServiceError(RestError),
    MalformedSuccess,
    Resolved(AccessToken),
}

impl LookupOutcome {
    fn interpret(token: &str, resp: TransportResponse) -> Self {
        if resp.is_success() {
            match serde_json::from_slice::<AccessTokenResponse>(&resp.body) {
                Ok(payload) => Self::Resolved(payload.into_access_token(token)),
                Err(err) => {
                    tracing::warn!(status = resp.status, error = %err, "malformed access token payload");
                    Self::MalformedSuccess
                }
            }
        } else {
            match serde_json::from_slice::<RestError>(&resp.body) {
                Ok(rest_err) => Self::ServiceError(rest_err.or_status(resp.status)),
                Err(err) => {
                    tracing::warn!(status = resp.status, error = %err, "malformed identity service error payload");
                    Self::MalformedError
                }
            }
        }
    }

    fn into_result(self) -> Result<AccessToken, RestError> {
        match self {
            Self::Resolved(token) => Ok(token),
            Self::ServiceError(err) => Err(err),
            Self::TransportFailure => Err(RestError::internal_server_error(
                MSG_INVALID_TRANSPORT_RESPONSE,
            )),
            Self::MalformedError => {
                Err(RestError::internal_server_error(MSG_INVALID_ERROR_PAYLOAD))
            }
            Self::MalformedSuccess => {
                Err(RestError::internal_server_error(MSG_INVALID_TOKEN_PAYLOAD))
            }
        }
    }
}

/// Client for the identity service. Cheap to clone; share one per process.
pub struct OAuthClient<T: IdentityTransport> {
    base_url: Url,
    transport: Arc<T>,
}

impl<T: IdentityTransport> Clone for OAuthClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: IdentityTransport> std::fmt::Debug for OAuthClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("base_url", &self.base_url.as_str())
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl<T: IdentityTransport> OAuthClient<T> {
    pub fn new(base_url: Url, transport: T) -> Self {
        Self {
            base_url,
            transport: Arc::new(transport),
        }
    }

    /// Resolve the request's `access_token` and inject the identity headers.
    ///
    /// - `None` request / no token: `Ok(())`, nothing changes
    /// - lookup failure: `Err`, headers untouched
    /// - success: `X-Client-Id` and `X-User-Id` overwritten
    pub async fn authenticate_request<B>(
        &self,
        request: Option<&mut Request<B>>,
    ) -> Result<(), RestError> {
        let Some(request) = request else {
            return Ok(());
        };

        let Some(token) = headers::access_token_param(request) else {
            return Ok(());
        };

        let at = self.get_access_token(&token).await?;

        let h = request.headers_mut();
        h.insert(HEADER_X_CLIENT_ID, HeaderValue::from(at.client_id));
        h.insert(HEADER_X_CALLER_ID, HeaderValue::from(at.user_id));

        tracing::debug!(
            user_id = at.user_id,
            client_id = at.client_id,
            "access token resolved"
        );

        Ok(())
    }

    /// `GET {base}/oauth/access_token/{token}` and interpret the reply.
    pub async fn get_access_token(&self, token: &str) -> Result<AccessToken, RestError> {
        self.lookup(token).await.into_result()
    }

    async fn lookup(&self, token: &str) -> LookupOutcome {
        let Some(url) = self.access_token_url(token) else {
            tracing::warn!(base_url = %self.base_url, "identity service url cannot carry a path");
            return LookupOutcome::TransportFailure;
        };

        match self.transport.get(url).await {
            Ok(resp) => LookupOutcome::interpret(token, resp),
            Err(err) => {
                tracing::warn!(
                    transport = self.transport.name(),
                    error = ?err,
                    "identity service request failed"
                );
                LookupOutcome::TransportFailure
            }
        }
    }

    // Token goes in as a single, percent-encoded path segment.
    fn access_token_url(&self, token: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["oauth", "access_token", token]);
        Some(url)
    }
}
