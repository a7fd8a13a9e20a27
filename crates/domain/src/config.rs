//! Configuration structures
//!
//! [`WorkwxConfig`] tunes the transport and the credential cache and is
//! shared by every app built from one client. [`AppCredentials`] identifies a
//! single corp application.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CREDENTIAL_ERROR_CODES, DEFAULT_REFRESH_WAIT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SAFETY_MARGIN_SECS,
};
use crate::errors::{ApiError, ApiResult};
use crate::types::ClientIdentity;

/// Client-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkwxConfig {
    /// API host, without a trailing path (e.g. `https://qyapi.weixin.qq.com`)
    pub base_url: String,
    /// Deadline for one HTTP exchange
    pub request_timeout_secs: u64,
    /// Credentials are refreshed this long before they expire
    pub safety_margin_secs: u64,
    /// Upper bound on waiting for an in-flight credential refresh
    pub refresh_wait_timeout_secs: u64,
    /// `errcode` values that invalidate the access token and retry once
    pub credential_error_codes: Vec<i64>,
    /// Optional `User-Agent` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for WorkwxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            safety_margin_secs: DEFAULT_SAFETY_MARGIN_SECS,
            refresh_wait_timeout_secs: DEFAULT_REFRESH_WAIT_TIMEOUT_SECS,
            credential_error_codes: DEFAULT_CREDENTIAL_ERROR_CODES.to_vec(),
            user_agent: None,
        }
    }
}

impl WorkwxConfig {
    /// Default settings against a different host (test servers, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Deadline for one HTTP exchange
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Staleness margin applied to every credential
    pub const fn safety_margin(&self) -> Duration {
        Duration::from_secs(self.safety_margin_secs)
    }

    /// Bound on waiting for a credential refresh
    pub const fn refresh_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_wait_timeout_secs)
    }

    /// Reject settings that would make every call fail.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] for an empty base URL or a zero timeout.
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ApiError::Config("request_timeout_secs must be positive".to_string()));
        }
        if self.refresh_wait_timeout_secs == 0 {
            return Err(ApiError::Config(
                "refresh_wait_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Credentials of one corp application
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCredentials {
    /// Corp ID (`corpid`)
    pub corp_id: String,
    /// Application secret (`corpsecret`)
    pub corp_secret: String,
    /// Application agent ID (`agentid`)
    pub agent_id: i64,
}

impl AppCredentials {
    /// Identity the credential cache is keyed by
    pub fn identity(&self) -> ClientIdentity {
        ClientIdentity::new(self.corp_id.clone(), self.corp_secret.clone())
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("corp_id", &self.corp_id)
            .field("corp_secret", &"<redacted>")
            .field("agent_id", &self.agent_id)
            .finish()
    }
}

/// Complete configuration as loaded from environment or file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Client settings; every field has a default
    #[serde(default)]
    pub client: WorkwxConfig,
    /// Application credentials
    pub app: AppCredentials,
}
