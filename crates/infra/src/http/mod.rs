//! HTTP transport
//!
//! Thin wrapper over `reqwest` that applies the configured deadline and maps
//! transport failures onto [`workwx_domain::ApiError`].

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
