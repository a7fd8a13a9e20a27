//! Request encoding
//!
//! Every endpoint describes its call as one [`RequestShape`]. Encoding turns
//! the shape into an [`EncodedRequest`] once; each attempt then only supplies
//! the current access token.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;
use workwx_domain::constants::{LIST_SEPARATOR, MEDIA_FIELD_NAME};
use workwx_domain::{ApiError, ApiResult, Media};

use crate::errors::conversions::to_api_error;
use crate::http::HttpClient;

const ACCESS_TOKEN_PARAM: &str = "access_token";
const JSON_CONTENT_TYPE: &str = "application/json";
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Query parameters in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Push `values` joined with `|`; an empty list yields an empty value.
    pub fn push_joined<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push(key, join_list(values));
    }

    /// Push a flag as `1` or `0`
    pub fn push_flag(&mut self, key: impl Into<String>, flag: bool) {
        self.push(key, if flag { "1" } else { "0" });
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Join list items with the platform's `|` separator
pub fn join_list<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (index, value) in values.into_iter().enumerate() {
        if index > 0 {
            joined.push(LIST_SEPARATOR);
        }
        joined.push_str(value.as_ref());
    }
    joined
}

/// The wire shape of one logical request
#[derive(Debug, Clone)]
pub enum RequestShape {
    /// All arguments in the query string
    Query(QueryParams),
    /// Arguments in a JSON body
    Json(Value),
    /// Multipart upload with a single `media` part
    Media { params: QueryParams, media: Media },
}

impl RequestShape {
    /// Query shape without arguments (besides the access token)
    pub fn bare() -> Self {
        Self::Query(QueryParams::new())
    }

    /// JSON shape from any serializable body.
    ///
    /// # Errors
    /// [`ApiError::Encode`] if `body` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(body: &T) -> ApiResult<Self> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|err| ApiError::Encode(format!("Failed to serialize request body: {err}")))
    }
}

/// Request body after encoding
#[derive(Debug, Clone)]
pub enum EncodedBody {
    Empty,
    Json(Bytes),
    Multipart(Media),
}

/// A request ready to be sent, minus the access token
#[derive(Debug, Clone)]
pub struct EncodedRequest {
    method: Method,
    endpoint: Url,
    params: QueryParams,
    body: EncodedBody,
}

impl EncodedRequest {
    /// Encode `shape` against `base_url` + `path`.
    ///
    /// # Errors
    /// [`ApiError::Config`] for an unusable base URL, [`ApiError::Encode`] if
    /// the JSON body cannot be serialized.
    pub fn encode(
        base_url: &Url,
        method: Method,
        path: &str,
        shape: RequestShape,
    ) -> ApiResult<Self> {
        let endpoint = join_url(base_url, path)?;

        let (params, body) = match shape {
            RequestShape::Query(params) => (params, EncodedBody::Empty),
            RequestShape::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(|err| {
                    ApiError::Encode(format!("Failed to serialize request body: {err}"))
                })?;
                (QueryParams::new(), EncodedBody::Json(Bytes::from(bytes)))
            }
            RequestShape::Media { params, media } => (params, EncodedBody::Multipart(media)),
        };

        Ok(Self { method, endpoint, params, body })
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        self.endpoint.path()
    }

    pub const fn body(&self) -> &EncodedBody {
        &self.body
    }

    /// Full URL with `access_token` as the first query pair when present
    pub fn url(&self, access_token: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        if access_token.is_some() || !self.params.is_empty() {
            let mut query = url.query_pairs_mut();
            if let Some(token) = access_token {
                query.append_pair(ACCESS_TOKEN_PARAM, token);
            }
            for (key, value) in self.params.iter() {
                query.append_pair(key, value);
            }
        }
        url
    }

    /// Build the reqwest request for one attempt.
    ///
    /// # Errors
    /// [`ApiError::Encode`] if the multipart content type is invalid.
    pub fn to_request(
        &self,
        http: &HttpClient,
        access_token: Option<&str>,
    ) -> ApiResult<RequestBuilder> {
        let builder = http.request(self.method.clone(), self.url(access_token));

        match &self.body {
            EncodedBody::Empty => Ok(builder),
            EncodedBody::Json(bytes) => {
                Ok(builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(bytes.clone()))
            }
            EncodedBody::Multipart(media) => Ok(builder.multipart(media_form(media)?)),
        }
    }
}

fn join_url(base_url: &Url, path: &str) -> ApiResult<Url> {
    if base_url.cannot_be_a_base() {
        return Err(ApiError::Config(format!("Base URL cannot be joined: {base_url}")));
    }

    let mut endpoint = base_url.clone();
    let prefix = endpoint.path().trim_end_matches('/').to_string();
    endpoint.set_path(&format!("{prefix}/{}", path.trim_start_matches('/')));
    endpoint.set_query(None);
    Ok(endpoint)
}

/// Parse the configured base URL.
///
/// # Errors
/// [`ApiError::Config`] if `raw` is not an absolute URL.
pub fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim()).map_err(to_api_error)?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Config(format!("Base URL cannot be joined: {raw}")));
    }
    Ok(url)
}

fn media_form(media: &Media) -> ApiResult<Form> {
    let length = u64::try_from(media.len())
        .map_err(|_| ApiError::Encode("Media payload too large".to_string()))?;
    let content_type = media.content_type().unwrap_or(DEFAULT_MEDIA_TYPE);

    let part = Part::stream_with_length(Body::from(media.data().clone()), length)
        .file_name(media.filename().to_string())
        .mime_str(content_type)
        .map_err(|err| ApiError::Encode(format!("Invalid media content type: {err}")))?;

    Ok(Form::new().part(MEDIA_FIELD_NAME, part))
}
