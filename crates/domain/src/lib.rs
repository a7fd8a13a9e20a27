//! # workwx Domain
//!
//! Domain types for the WeCom server API client.
//!
//! This crate contains:
//! - The error model shared by every call ([`ApiError`], [`PlatformError`])
//! - Client and application configuration structures
//! - Credential types (access token, JS-API tickets) and client identity
//! - Public data models for messages, users, departments, chats, media,
//!   tags and external contacts
//!
//! ## Architecture
//! - No dependencies on other workwx crates
//! - No I/O apart from [`Media::from_path`]

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
