//! Infrastructure-side error conversions
//!
//! Third-party error types are mapped onto [`ApiError`] here so the domain
//! crate stays free of transport dependencies.
//!
//! [`ApiError`]: workwx_domain::ApiError

pub mod conversions;

pub use conversions::InfraError;
