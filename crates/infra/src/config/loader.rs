//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, if every required one is set
//! 2. Otherwise a config file, JSON or TOML by extension
//!
//! ## Environment Variables
//! Required:
//! - `WORKWX_CORP_ID`
//! - `WORKWX_CORP_SECRET`
//! - `WORKWX_AGENT_ID`
//!
//! Optional (defaults from [`WorkwxConfig::default`]):
//! - `WORKWX_BASE_URL`
//! - `WORKWX_REQUEST_TIMEOUT_SECS`
//! - `WORKWX_SAFETY_MARGIN_SECS`
//! - `WORKWX_REFRESH_WAIT_TIMEOUT_SECS`
//! - `WORKWX_CREDENTIAL_ERROR_CODES`: comma-separated, e.g. `40014,42001`
//! - `WORKWX_USER_AGENT`
//!
//! ## File Locations
//! `workwx.{json,toml}` then `config.{json,toml}`, looked up in the working
//! directory, its two parents, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use workwx_domain::{ApiError, ApiResult, AppCredentials, Config, WorkwxConfig};

use crate::errors::conversions::to_api_error;

const FILE_STEMS: [&str; 2] = ["workwx", "config"];
const FILE_EXTENSIONS: [&str; 2] = ["json", "toml"];
const SEARCH_PREFIXES: [&str; 3] = ["", "..", "../.."];

/// Load configuration, environment first and file second.
///
/// # Errors
/// Returns [`ApiError::Config`] if neither source yields a valid config.
pub fn load() -> ApiResult<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `WORKWX_*` environment variables.
///
/// # Errors
/// Returns [`ApiError::Config`] if a required variable is missing or any
/// variable fails to parse.
pub fn load_from_env() -> ApiResult<Config> {
    let app = AppCredentials {
        corp_id: env_var("WORKWX_CORP_ID")?,
        corp_secret: env_var("WORKWX_CORP_SECRET")?,
        agent_id: env_parse("WORKWX_AGENT_ID", &env_var("WORKWX_AGENT_ID")?)?,
    };

    let mut client = WorkwxConfig::default();
    if let Some(base_url) = env_opt("WORKWX_BASE_URL") {
        client.base_url = base_url;
    }
    if let Some(raw) = env_opt("WORKWX_REQUEST_TIMEOUT_SECS") {
        client.request_timeout_secs = env_parse("WORKWX_REQUEST_TIMEOUT_SECS", &raw)?;
    }
    if let Some(raw) = env_opt("WORKWX_SAFETY_MARGIN_SECS") {
        client.safety_margin_secs = env_parse("WORKWX_SAFETY_MARGIN_SECS", &raw)?;
    }
    if let Some(raw) = env_opt("WORKWX_REFRESH_WAIT_TIMEOUT_SECS") {
        client.refresh_wait_timeout_secs = env_parse("WORKWX_REFRESH_WAIT_TIMEOUT_SECS", &raw)?;
    }
    if let Some(raw) = env_opt("WORKWX_CREDENTIAL_ERROR_CODES") {
        client.credential_error_codes = parse_code_list(&raw)?;
    }
    client.user_agent = env_opt("WORKWX_USER_AGENT");

    client.validate()?;
    Ok(Config { client, app })
}

/// Load configuration from a file.
///
/// With `None`, the first file found by [`probe_config_paths`] is used.
///
/// # Errors
/// Returns [`ApiError::Config`] if the file is missing, unreadable, in an
/// unsupported format, or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> ApiResult<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ApiError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ApiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ApiError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.client.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> ApiResult<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(to_api_error),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ApiError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ApiError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots.iter().flat_map(|root| candidates_under(root)).find(|path| path.exists())
}

fn candidates_under(root: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for prefix in SEARCH_PREFIXES {
        let dir = if prefix.is_empty() { root.to_path_buf() } else { root.join(prefix) };
        for stem in FILE_STEMS {
            for extension in FILE_EXTENSIONS {
                candidates.push(dir.join(format!("{stem}.{extension}")));
            }
        }
    }
    candidates
}

fn env_var(key: &str) -> ApiResult<String> {
    std::env::var(key)
        .map_err(|_| ApiError::Config(format!("Missing required environment variable: {key}")))
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str, raw: &str) -> ApiResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ApiError::Config(format!("Invalid {key}: {e}")))
}

fn parse_code_list(raw: &str) -> ApiResult<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| env_parse("WORKWX_CREDENTIAL_ERROR_CODES", part))
        .collect()
}
