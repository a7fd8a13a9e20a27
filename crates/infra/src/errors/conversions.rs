//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;
use url::ParseError as UrlError;
use workwx_domain::ApiError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ApiError);

impl From<InfraError> for ApiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApiError> for InfraError {
    fn from(value: ApiError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoApiError {
    fn into_api(self) -> ApiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for HttpError {
    fn into_api(self) -> ApiError {
        if self.is_timeout() {
            return ApiError::Network("HTTP request timed out".into());
        }

        if self.is_builder() {
            return ApiError::Encode(format!("failed to build HTTP request: {self}"));
        }

        if self.is_connect() {
            return ApiError::Network("HTTP connection failure".into());
        }

        if self.is_decode() || self.is_body() {
            return ApiError::Network(format!("failed to read HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            return ApiError::Network(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        ApiError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_api())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for JsonError {
    fn into_api(self) -> ApiError {
        // `is_io` is only reported while writing a request body.
        if self.is_io() {
            ApiError::Encode(format!("JSON serialization failed: {self}"))
        } else {
            ApiError::Decode(format!(
                "invalid JSON at line {} column {}: {self}",
                self.line(),
                self.column()
            ))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_api())
    }
}

/* -------------------------------------------------------------------------- */
/* toml / url → ApiError::Config */
/* -------------------------------------------------------------------------- */

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        Self(ApiError::Config(format!("Invalid TOML format: {value}")))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        Self(ApiError::Config(format!("Invalid URL: {value}")))
    }
}

/// Convert any supported infrastructure error into an [`ApiError`].
pub fn to_api_error<E>(err: E) -> ApiError
where
    InfraError: From<E>,
{
    InfraError::from(err).into()
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
