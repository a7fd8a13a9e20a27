//! Single-flight credential slot
//!
//! A slot moves through `Empty -> Held -> (stale) -> Refreshing -> Held|Empty`.
//! The first caller that finds the slot empty or stale installs a shared
//! acquisition future; every caller arriving while it runs awaits the same
//! future, so at most one acquisition is in flight per slot.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use workwx_common::Clock;
use workwx_domain::{ApiError, ApiResult, Credential, CredentialGrant, CredentialKind};

type PendingAcquisition = Shared<BoxFuture<'static, ApiResult<Credential>>>;

enum SlotState {
    Empty,
    Held(Credential),
    Refreshing { generation: u64, pending: PendingAcquisition },
}

/// Cache cell for one credential
pub struct CredentialSlot {
    kind: CredentialKind,
    clock: Arc<dyn Clock>,
    safety_margin: Duration,
    refresh_wait_timeout: Duration,
    state: Mutex<SlotState>,
    generation: AtomicU64,
    acquisitions: AtomicU64,
}

impl CredentialSlot {
    pub fn new(
        kind: CredentialKind,
        clock: Arc<dyn Clock>,
        safety_margin: Duration,
        refresh_wait_timeout: Duration,
    ) -> Self {
        Self {
            kind,
            clock,
            safety_margin,
            refresh_wait_timeout,
            state: Mutex::new(SlotState::Empty),
            generation: AtomicU64::new(0),
            acquisitions: AtomicU64::new(0),
        }
    }

    pub const fn kind(&self) -> CredentialKind {
        self.kind
    }

    /// Return a usable credential value, acquiring one if necessary.
    ///
    /// `acquire` is only invoked when this caller is the one that starts a
    /// refresh. Callers that arrive while a refresh is running share its
    /// outcome, including its error.
    ///
    /// The refresh itself carries the wait bound, so every caller joined to
    /// it sees the same outcome at the same time.
    ///
    /// # Errors
    /// The acquisition error, or [`ApiError::Timeout`] if the refresh does not
    /// finish within the configured wait bound.
    pub async fn get_or_acquire<F, Fut>(&self, acquire: F) -> ApiResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<CredentialGrant>> + Send + 'static,
    {
        let (generation, pending) = {
            let mut state = self.state.lock();
            match &*state {
                SlotState::Held(credential)
                    if credential.is_usable(self.clock.now(), self.safety_margin) =>
                {
                    return Ok(credential.value().to_string());
                }
                SlotState::Refreshing { generation, pending } => (*generation, pending.clone()),
                SlotState::Empty | SlotState::Held(_) => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
                    let pending = self.start_acquisition(acquire());
                    *state = SlotState::Refreshing { generation, pending: pending.clone() };
                    (generation, pending)
                }
            }
        };

        let outcome = pending.await;
        self.settle(generation, outcome.as_ref().ok().cloned());
        outcome.map(|credential| credential.value().to_string())
    }

    fn start_acquisition<Fut>(&self, acquisition: Fut) -> PendingAcquisition
    where
        Fut: Future<Output = ApiResult<CredentialGrant>> + Send + 'static,
    {
        self.acquisitions.fetch_add(1, Ordering::Relaxed);

        let kind = self.kind;
        let clock = Arc::clone(&self.clock);
        let wait = self.refresh_wait_timeout;
        debug!(credential = %kind, "Acquiring credential");

        async move {
            let requested_at = clock.now();
            let outcome = tokio::time::timeout(wait, acquisition).await.unwrap_or_else(|_| {
                warn!(credential = %kind, timeout = ?wait, "Credential refresh timed out");
                Err(ApiError::Timeout(wait))
            });
            match outcome {
                Ok(grant) => {
                    info!(credential = %kind, ttl = ?grant.ttl, "Credential acquired");
                    Ok(Credential::from_grant(grant, requested_at))
                }
                Err(err) => {
                    warn!(credential = %kind, error = %err, "Credential acquisition failed");
                    Err(err)
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Replace the refresh of `generation` with its outcome; a newer refresh
    /// or an invalidation that happened meanwhile is left alone.
    fn settle(&self, generation: u64, credential: Option<Credential>) {
        let mut state = self.state.lock();
        let current = matches!(
            &*state,
            SlotState::Refreshing { generation: pending, .. } if *pending == generation
        );
        if current {
            *state = credential.map_or(SlotState::Empty, SlotState::Held);
        }
    }

    /// Drop the held credential so the next request acquires a new one.
    ///
    /// A refresh already in flight is kept; it yields a fresh credential.
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        if matches!(&*state, SlotState::Held(_)) {
            debug!(credential = %self.kind, "Credential invalidated");
            *state = SlotState::Empty;
        }
    }

    /// Drop the held credential only if it is still `value`.
    ///
    /// Returns `true` if the slot was cleared.
    pub fn invalidate_value(&self, value: &str) -> bool {
        let mut state = self.state.lock();
        match &*state {
            SlotState::Held(credential) if credential.value() == value => {
                debug!(credential = %self.kind, "Rejected credential invalidated");
                *state = SlotState::Empty;
                true
            }
            _ => false,
        }
    }

    /// Held credential, if it is still usable
    pub fn current(&self) -> Option<Credential> {
        match &*self.state.lock() {
            SlotState::Held(credential)
                if credential.is_usable(self.clock.now(), self.safety_margin) =>
            {
                Some(credential.clone())
            }
            _ => None,
        }
    }

    /// Time until the held credential goes stale; `None` when nothing is held.
    pub fn time_until_stale(&self) -> Option<Duration> {
        match &*self.state.lock() {
            SlotState::Held(credential) => {
                Some(credential.time_until_stale(self.clock.now(), self.safety_margin))
            }
            _ => None,
        }
    }

    /// `true` while an acquisition is in flight
    pub fn is_refreshing(&self) -> bool {
        matches!(&*self.state.lock(), SlotState::Refreshing { .. })
    }

    /// Number of acquisitions started so far
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for CredentialSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.state.lock() {
            SlotState::Empty => "empty",
            SlotState::Held(_) => "held",
            SlotState::Refreshing { .. } => "refreshing",
        };
        f.debug_struct("CredentialSlot")
            .field("kind", &self.kind)
            .field("state", &state)
            .field("acquisitions", &self.acquisitions())
            .finish_non_exhaustive()
    }
}
