//! Response decoding
//!
//! Every response is a JSON object carrying `errcode` and `errmsg` next to
//! the endpoint's own fields. The envelope is checked first; the payload is
//! only decoded when `errcode == 0`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use workwx_domain::constants::ERRCODE_OK;
use workwx_domain::{ApiError, ApiResult, PlatformError};

/// Payload of endpoints that return nothing beyond the envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Acknowledged {}

/// Decode a raw response body into the endpoint payload.
///
/// # Errors
/// [`ApiError::Platform`] for a non-zero `errcode`; [`ApiError::Decode`] for
/// malformed JSON, a missing or non-integer `errcode`, or a payload that does
/// not match `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::Decode(format!("Response is not valid JSON: {err}")))?;

    check_envelope(&value)?;

    serde_json::from_value(value)
        .map_err(|err| ApiError::Decode(format!("Unexpected response payload: {err}")))
}

/// Classify the `{errcode, errmsg}` envelope.
///
/// # Errors
/// See [`decode`].
pub fn check_envelope(value: &Value) -> ApiResult<()> {
    let object = value
        .as_object()
        .ok_or_else(|| ApiError::Decode("Response is not a JSON object".to_string()))?;

    let code = match object.get("errcode") {
        Some(raw) => raw
            .as_i64()
            .ok_or_else(|| ApiError::Decode(format!("errcode is not an integer: {raw}")))?,
        None => return Err(ApiError::Decode("Response has no errcode".to_string())),
    };

    if code == ERRCODE_OK {
        return Ok(());
    }

    let message = object.get("errmsg").and_then(Value::as_str).unwrap_or_default();
    Err(PlatformError::new(code, message).into())
}
