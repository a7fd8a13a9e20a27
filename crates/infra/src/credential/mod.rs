//! Credential caching
//!
//! Each short-lived credential lives in its own [`CredentialSlot`]; the
//! slots of one corp identity are grouped in a [`CredentialCache`].

pub mod cache;
pub mod slot;

pub use cache::{CacheSettings, CredentialCache};
pub use slot::CredentialSlot;
