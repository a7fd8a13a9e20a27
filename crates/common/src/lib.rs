//! Small utilities shared across workwx crates.
//!
//! # Feature Tiers
//!
//! - default: time abstraction ([`clock`])
//! - `observability`: tracing subscriber setup ([`logging`])

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod clock;
#[cfg(feature = "observability")]
pub mod logging;

pub use clock::{Clock, MockClock, SystemClock};
