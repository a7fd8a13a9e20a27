use std::sync::Arc;
use std::time::Duration;

use workwx_common::{Clock, SystemClock};
use workwx_domain::{ClientIdentity, CredentialKind, WorkwxConfig};

use super::slot::CredentialSlot;

/// Timing parameters shared by all slots of a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub safety_margin: Duration,
    pub refresh_wait_timeout: Duration,
}

impl From<&WorkwxConfig> for CacheSettings {
    fn from(config: &WorkwxConfig) -> Self {
        Self {
            safety_margin: config.safety_margin(),
            refresh_wait_timeout: config.refresh_wait_timeout(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(&WorkwxConfig::default())
    }
}

/// The credential slots of one corp identity.
///
/// Slots never share state; invalidating the access token leaves the
/// tickets untouched.
#[derive(Debug)]
pub struct CredentialCache {
    identity: ClientIdentity,
    access_token: CredentialSlot,
    jsapi_ticket: CredentialSlot,
    agent_config_ticket: CredentialSlot,
}

impl CredentialCache {
    pub fn new(identity: ClientIdentity, settings: CacheSettings) -> Self {
        Self::with_clock(identity, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        identity: ClientIdentity,
        settings: CacheSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let slot = |kind| {
            CredentialSlot::new(
                kind,
                Arc::clone(&clock),
                settings.safety_margin,
                settings.refresh_wait_timeout,
            )
        };

        Self {
            identity,
            access_token: slot(CredentialKind::AccessToken),
            jsapi_ticket: slot(CredentialKind::JsapiTicket),
            agent_config_ticket: slot(CredentialKind::JsapiTicketAgentConfig),
        }
    }

    pub const fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    pub const fn slot(&self, kind: CredentialKind) -> &CredentialSlot {
        match kind {
            CredentialKind::AccessToken => &self.access_token,
            CredentialKind::JsapiTicket => &self.jsapi_ticket,
            CredentialKind::JsapiTicketAgentConfig => &self.agent_config_ticket,
        }
    }

    pub const fn access_token(&self) -> &CredentialSlot {
        &self.access_token
    }

    pub const fn jsapi_ticket(&self) -> &CredentialSlot {
        &self.jsapi_ticket
    }

    pub const fn agent_config_ticket(&self) -> &CredentialSlot {
        &self.agent_config_ticket
    }
}

#[cfg(test)]
mod tests {
    use workwx_common::MockClock;
    use workwx_domain::{ApiResult, CredentialGrant};

    use super::*;

    fn grant(value: &str) -> ApiResult<CredentialGrant> {
        Ok(CredentialGrant::from_expires_in(value, 7200))
    }

    fn cache(clock: &MockClock) -> CredentialCache {
        CredentialCache::with_clock(
            ClientIdentity::new("ww-corp", "secret"),
            CacheSettings::default(),
            Arc::new(clock.clone()),
        )
    }

    #[test]
    fn settings_follow_config() {
        let config = WorkwxConfig {
            safety_margin_secs: 10,
            refresh_wait_timeout_secs: 3,
            ..WorkwxConfig::default()
        };

        let settings = CacheSettings::from(&config);

        assert_eq!(settings.safety_margin, Duration::from_secs(10));
        assert_eq!(settings.refresh_wait_timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn slots_are_independent() {
        let clock = MockClock::new();
        let cache = cache(&clock);

        cache.access_token().get_or_acquire(|| async { grant("token") }).await.unwrap();
        cache.jsapi_ticket().get_or_acquire(|| async { grant("ticket") }).await.unwrap();
        cache.access_token().invalidate();

        assert!(cache.access_token().current().is_none());
        assert_eq!(
            cache.slot(CredentialKind::JsapiTicket).current().map(|c| c.value().to_string()),
            Some("ticket".to_string())
        );
        assert_eq!(cache.agent_config_ticket().acquisitions(), 0);
    }

    #[test]
    fn slot_lookup_matches_kind() {
        let clock = MockClock::new();
        let cache = cache(&clock);

        for kind in [
            CredentialKind::AccessToken,
            CredentialKind::JsapiTicket,
            CredentialKind::JsapiTicketAgentConfig,
        ] {
            assert_eq!(cache.slot(kind).kind(), kind);
        }
        assert_eq!(cache.identity().corp_id(), "ww-corp");
    }
}
