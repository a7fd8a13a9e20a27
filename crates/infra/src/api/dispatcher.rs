//! Request dispatch
//!
//! `token -> encode -> exchange -> decode -> classify`, with a single
//! invalidate-and-retry when the platform rejects the access token.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;
use workwx_domain::ApiResult;

use super::auth::AccessTokenProvider;
use super::endpoint::Endpoint;
use super::request::EncodedRequest;
use super::response::decode;
use crate::http::HttpClient;

const MAX_ATTEMPTS: u32 = 2;

/// Send one encoded request and decode its response.
///
/// # Errors
/// Transport failures, or [`workwx_domain::ApiError::Platform`] for a
/// non-zero `errcode`.
pub async fn exchange<T: DeserializeOwned>(
    http: &HttpClient,
    request: &EncodedRequest,
    access_token: Option<&str>,
) -> ApiResult<T> {
    let builder = request.to_request(http, access_token)?;
    let body = http.fetch(builder).await?;
    decode(&body)
}

/// Runs endpoints against the platform on behalf of one application
#[derive(Clone)]
pub struct Dispatcher {
    http: HttpClient,
    base_url: Url,
    auth: Arc<dyn AccessTokenProvider>,
    credential_error_codes: Arc<[i64]>,
}

impl Dispatcher {
    pub fn new(
        http: HttpClient,
        base_url: Url,
        auth: Arc<dyn AccessTokenProvider>,
        credential_error_codes: impl Into<Arc<[i64]>>,
    ) -> Self {
        Self { http, base_url, auth, credential_error_codes: credential_error_codes.into() }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute `endpoint`.
    ///
    /// The request is encoded once. If the platform answers with one of the
    /// configured credential error codes, the rejected token is invalidated
    /// and the call is repeated exactly once with a fresh token. Transport
    /// failures are returned as-is.
    ///
    /// # Errors
    /// The outcome of the last attempt.
    #[instrument(skip(self, endpoint), fields(path = E::PATH))]
    pub async fn dispatch<E: Endpoint>(&self, endpoint: &E) -> ApiResult<E::Response> {
        let request = endpoint.encode(&self.base_url)?;

        if !E::AUTHENTICATED {
            debug!(method = %request.method(), "Dispatching unauthenticated request");
            return exchange(&self.http, &request, None).await;
        }

        let mut attempt = 1;
        loop {
            let token = self.auth.access_token().await?;
            debug!(method = %request.method(), attempt, "Dispatching request");

            match exchange::<E::Response>(&self.http, &request, Some(&token)).await {
                Err(err)
                    if attempt < MAX_ATTEMPTS
                        && err.is_platform_code_in(&self.credential_error_codes) =>
                {
                    warn!(
                        code = ?err.code(),
                        attempt,
                        "Access token rejected, retrying with a fresh token"
                    );
                    self.auth.invalidate(&token);
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}
