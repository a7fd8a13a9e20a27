//! Credential types
//!
//! A [`Credential`] is an opaque string (access token or JS-API ticket) with
//! an absolute expiry. It is usable only while
//! `now < expires_at - safety_margin`.

use std::fmt;
use std::time::{Duration, Instant};

use crate::constants::MAX_CREDENTIAL_TTL_SECS;
use crate::impl_wire_name_conversions;

const MAX_TTL: Duration = Duration::from_secs(MAX_CREDENTIAL_TTL_SECS);

/// The independent credential slots kept per client identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    /// `access_token` from `gettoken`
    AccessToken,
    /// Corp JS-API ticket from `get_jsapi_ticket`
    JsapiTicket,
    /// Agent-config JS-API ticket from `ticket/get?type=agent_config`
    JsapiTicketAgentConfig,
}

impl_wire_name_conversions!(CredentialKind {
    AccessToken => "access_token",
    JsapiTicket => "jsapi_ticket",
    JsapiTicketAgentConfig => "jsapi_ticket_agent_config",
});

/// Result of one acquisition call, before it is pinned to a clock
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialGrant {
    /// Credential value
    pub value: String,
    /// Lifetime reported by the platform (`expires_in`)
    pub ttl: Duration,
}

impl CredentialGrant {
    /// Build a grant from the platform's `expires_in` seconds.
    ///
    /// Negative values are treated as already expired; values above
    /// [`MAX_CREDENTIAL_TTL_SECS`] are capped.
    pub fn from_expires_in(value: impl Into<String>, expires_in_secs: i64) -> Self {
        let secs = u64::try_from(expires_in_secs).unwrap_or(0).min(MAX_CREDENTIAL_TTL_SECS);
        let ttl = Duration::from_secs(secs);
        Self { value: value.into(), ttl }
    }
}

impl fmt::Debug for CredentialGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialGrant")
            .field("value", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// A cached credential with its absolute expiry
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    value: String,
    expires_at: Instant,
}

impl Credential {
    /// Create a credential expiring at `expires_at`
    pub fn new(value: impl Into<String>, expires_at: Instant) -> Self {
        Self { value: value.into(), expires_at }
    }

    /// Pin a grant to the instant it was received.
    ///
    /// The lifetime is capped at [`MAX_CREDENTIAL_TTL_SECS`].
    pub fn from_grant(grant: CredentialGrant, received_at: Instant) -> Self {
        let expires_at = received_at
            .checked_add(grant.ttl.min(MAX_TTL))
            .unwrap_or(received_at);
        Self { value: grant.value, expires_at }
    }

    /// The credential string sent to the platform
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Absolute expiry as reported by the platform
    pub const fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// `true` while `now < expires_at - margin`
    pub fn is_usable(&self, now: Instant, margin: Duration) -> bool {
        now.checked_add(margin).is_some_and(|deadline| deadline < self.expires_at)
    }

    /// Time left before the credential turns stale, zero if it already is
    pub fn time_until_stale(&self, now: Instant, margin: Duration) -> Duration {
        self.expires_at.saturating_duration_since(now).saturating_sub(margin)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The identity credentials are cached under
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity {
    corp_id: String,
    corp_secret: String,
}

impl ClientIdentity {
    /// Create an identity from corp ID and application secret
    pub fn new(corp_id: impl Into<String>, corp_secret: impl Into<String>) -> Self {
        Self { corp_id: corp_id.into(), corp_secret: corp_secret.into() }
    }

    /// Corp ID (`corpid`)
    pub fn corp_id(&self) -> &str {
        &self.corp_id
    }

    /// Application secret (`corpsecret`)
    pub fn corp_secret(&self) -> &str {
        &self.corp_secret
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("corp_id", &self.corp_id)
            .field("corp_secret", &"<redacted>")
            .finish()
    }
}
