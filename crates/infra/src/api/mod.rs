//! Platform API plumbing
//!
//! - [`request`]: request shapes and their encoding
//! - [`response`]: `{errcode, errmsg}` envelope decoding
//! - [`dispatcher`]: token, exchange, decode, one-shot credential retry
//! - [`auth`]: access token and JS-API ticket acquisition
//! - [`endpoints`]: one request type per operation

pub mod auth;
pub mod dispatcher;
pub mod endpoint;
pub mod endpoints;
pub mod request;
pub mod response;

pub use auth::{AccessTokenProvider, CachedAccessToken, TokenSource};
pub use dispatcher::Dispatcher;
pub use endpoint::Endpoint;
pub use request::{EncodedBody, EncodedRequest, QueryParams, RequestShape};
pub use response::Acknowledged;
