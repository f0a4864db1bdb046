//! Credential and endpoint resolution.
//!
//! Explicit values win over the environment. A `.env` file in the working
//! directory is loaded once before the environment is read.

use once_cell::sync::Lazy;
use url::Url;

use crate::error::{Error, ErrorContext};
use crate::Result;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ENDPOINT_ENV: &str = "GEMINI_LIVE_ENDPOINT";
pub const API_VERSION_ENV: &str = "GEMINI_API_VERSION";

pub const DEFAULT_ENDPOINT: &str = "wss://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1alpha";

static DOTENV_LOADED: Lazy<bool> = Lazy::new(|| dotenvy::dotenv().is_ok());

/// Read a variable from the process environment (after `.env`), treating
/// blank values as unset.
pub fn env_var(key: &str) -> Option<String> {
    Lazy::force(&DOTENV_LOADED);
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Connection settings for the Live endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct LiveConfig {
    pub api_key: String,
    pub endpoint: Url,
    pub api_version: String,
}

impl LiveConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None, None, env_var)
    }

    /// Resolve explicit values, falling back to `lookup` for anything unset.
    pub fn resolve(
        api_key: Option<String>,
        endpoint: Option<String>,
        api_version: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(API_KEY_ENV))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!(
                        "API key must be provided in {} environment variable",
                        API_KEY_ENV
                    ),
                    ErrorContext::new()
                        .with_field_path(API_KEY_ENV)
                        .with_source("live_config"),
                )
            })?;

        let endpoint = endpoint
            .or_else(|| lookup(ENDPOINT_ENV))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = parse_endpoint(&endpoint)?;

        let api_version = api_version
            .or_else(|| lookup(API_VERSION_ENV))
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            api_key,
            endpoint,
            api_version,
        })
    }

    /// Full `BidiGenerateContent` WebSocket URL, including the key.
    pub fn session_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!(
            "{}/ws/google.ai.generativelanguage.{}.GenerativeService.BidiGenerateContent",
            base, self.api_version
        ));
        url.query_pairs_mut()
            .clear()
            .append_pair("key", &self.api_key);
        url
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for LiveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid Live endpoint: {}", e),
            ErrorContext::new()
                .with_field_path(ENDPOINT_ENV)
                .with_details(raw.to_string()),
        )
    })?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(Error::configuration_with_context(
            format!("Live endpoint must use ws or wss, got {}", other),
            ErrorContext::new()
                .with_field_path(ENDPOINT_ENV)
                .with_details(raw.to_string()),
        )),
    }
}
