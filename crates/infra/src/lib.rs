//! # workwx infrastructure
//!
//! Everything that talks to the WeCom server API.
//!
//! This crate contains:
//! - HTTP transport (`reqwest`) with a per-request deadline
//! - Credential caching with single-flight refresh
//! - Request encoding, response decoding and dispatch
//! - Endpoint definitions and the [`WorkwxApp`] facade
//! - Configuration loading from environment or file
//!
//! ## Example
//! ```no_run
//! use workwx_domain::{AppCredentials, MessageRecipients, WorkwxConfig};
//! use workwx_infra::WorkwxClient;
//!
//! # async fn run() -> workwx_domain::ApiResult<()> {
//! let client = WorkwxClient::new(WorkwxConfig::default())?;
//! let app = client.app(AppCredentials {
//!     corp_id: "ww0123456789".into(),
//!     corp_secret: "secret".into(),
//!     agent_id: 1_000_002,
//! });
//!
//! app.send_text_message(&MessageRecipients::users(["zhangsan"]), "hello", false).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod credential;
pub mod errors;
pub mod http;

pub use client::{WorkwxApp, WorkwxClient};
pub use credential::{CacheSettings, CredentialCache, CredentialSlot};
pub use http::{HttpClient, HttpClientBuilder};
