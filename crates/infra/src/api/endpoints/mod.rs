//! Endpoint definitions
//!
//! One request struct per platform operation. Each maps its arguments onto a
//! [`RequestShape`](super::request::RequestShape) and names its response type.

pub mod appchat;
pub mod department;
pub mod external_contact;
pub mod media;
pub mod message;
pub mod tag;
pub mod user;
