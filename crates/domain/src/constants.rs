//! Platform constants
//!
//! Values fixed by the WeCom server API rather than by configuration.

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://qyapi.weixin.qq.com";

/// `errcode` of a successful call
pub const ERRCODE_OK: i64 = 0;

/// `errcode` for a malformed or revoked access token
pub const ERRCODE_INVALID_ACCESS_TOKEN: i64 = 40014;

/// `errcode` for an access token past its lifetime
pub const ERRCODE_ACCESS_TOKEN_EXPIRED: i64 = 42001;

/// Codes that invalidate the cached access token and trigger one retry
pub const DEFAULT_CREDENTIAL_ERROR_CODES: &[i64] =
    &[ERRCODE_INVALID_ACCESS_TOKEN, ERRCODE_ACCESS_TOKEN_EXPIRED];

/// Per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// A credential is treated as stale this long before it expires
pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 60;

/// Upper bound on waiting for an in-flight credential refresh
pub const DEFAULT_REFRESH_WAIT_TIMEOUT_SECS: u64 = 30;

/// Separator for multi-valued recipient fields (`touser`, `toparty`, `totag`)
pub const LIST_SEPARATOR: char = '|';

/// Multipart field name the media endpoints read the file from
pub const MEDIA_FIELD_NAME: &str = "media";

/// Upper bound on a credential's lifetime, whatever `expires_in` says
pub const MAX_CREDENTIAL_TTL_SECS: u64 = 24 * 60 * 60;
