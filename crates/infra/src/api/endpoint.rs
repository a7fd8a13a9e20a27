use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;
use workwx_domain::ApiResult;

use super::request::{EncodedRequest, RequestShape};

/// One platform operation: where it lives, how its arguments travel, and
/// what a successful response carries.
pub trait Endpoint: Send + Sync {
    const METHOD: Method;
    const PATH: &'static str;
    /// `false` only for the call that obtains the access token itself
    const AUTHENTICATED: bool = true;

    type Response: DeserializeOwned + Send + 'static;

    /// # Errors
    /// [`workwx_domain::ApiError::Encode`] if the arguments cannot be encoded.
    fn shape(&self) -> ApiResult<RequestShape>;

    /// # Errors
    /// See [`EncodedRequest::encode`].
    fn encode(&self, base_url: &Url) -> ApiResult<EncodedRequest> {
        EncodedRequest::encode(base_url, Self::METHOD, Self::PATH, self.shape()?)
    }
}
