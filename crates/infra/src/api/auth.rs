//! Credential acquisition
//!
//! The access token comes from `gettoken` using the corp identity. JS-API
//! tickets are ordinary authenticated calls and go through the dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use url::Url;
use workwx_domain::{ApiResult, ClientIdentity, CredentialGrant};

use super::dispatcher::exchange;
use super::endpoint::Endpoint;
use super::request::{QueryParams, RequestShape};
use crate::credential::CredentialCache;
use crate::http::HttpClient;

/// Source of the access token attached to every authenticated call
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// A token believed to be valid, acquiring one if necessary.
    async fn access_token(&self) -> ApiResult<String>;

    /// Report that the platform rejected `token`.
    ///
    /// Returns `true` if the cached token was dropped.
    fn invalidate(&self, token: &str) -> bool;
}

/// `GET /cgi-bin/gettoken`
pub struct GetToken<'a> {
    pub identity: &'a ClientIdentity,
}

#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

impl From<AccessTokenResponse> for CredentialGrant {
    fn from(response: AccessTokenResponse) -> Self {
        Self::from_expires_in(response.access_token, response.expires_in)
    }
}

impl Endpoint for GetToken<'_> {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/gettoken";
    const AUTHENTICATED: bool = false;

    type Response = AccessTokenResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Query(
            QueryParams::new()
                .with("corpid", self.identity.corp_id())
                .with("corpsecret", self.identity.corp_secret()),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct TicketResponse {
    pub ticket: String,
    pub expires_in: i64,
}

impl From<TicketResponse> for CredentialGrant {
    fn from(response: TicketResponse) -> Self {
        Self::from_expires_in(response.ticket, response.expires_in)
    }
}

/// `GET /cgi-bin/get_jsapi_ticket`
pub struct GetJsapiTicket;

impl Endpoint for GetJsapiTicket {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/get_jsapi_ticket";

    type Response = TicketResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::bare())
    }
}

/// `GET /cgi-bin/ticket/get?type=agent_config`
pub struct GetAgentConfigTicket;

impl Endpoint for GetAgentConfigTicket {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/cgi-bin/ticket/get";

    type Response = TicketResponse;

    fn shape(&self) -> ApiResult<RequestShape> {
        Ok(RequestShape::Query(QueryParams::new().with("type", "agent_config")))
    }
}

/// Fetches access tokens for one identity
#[derive(Clone)]
pub struct TokenSource {
    http: HttpClient,
    base_url: Url,
    identity: ClientIdentity,
}

impl TokenSource {
    pub const fn new(http: HttpClient, base_url: Url, identity: ClientIdentity) -> Self {
        Self { http, base_url, identity }
    }

    /// Call `gettoken` once.
    ///
    /// # Errors
    /// Any transport or platform failure of the call.
    pub async fn fetch(&self) -> ApiResult<CredentialGrant> {
        let endpoint = GetToken { identity: &self.identity };
        let request = endpoint.encode(&self.base_url)?;
        let response: AccessTokenResponse = exchange(&self.http, &request, None).await?;
        Ok(response.into())
    }
}

/// Access tokens served from a [`CredentialCache`]
pub struct CachedAccessToken {
    cache: Arc<CredentialCache>,
    source: TokenSource,
}

impl CachedAccessToken {
    pub const fn new(cache: Arc<CredentialCache>, source: TokenSource) -> Self {
        Self { cache, source }
    }
}

#[async_trait]
impl AccessTokenProvider for CachedAccessToken {
    async fn access_token(&self) -> ApiResult<String> {
        let source = self.source.clone();
        self.cache.access_token().get_or_acquire(move || async move { source.fetch().await }).await
    }

    fn invalidate(&self, token: &str) -> bool {
        self.cache.access_token().invalidate_value(token)
    }
}
