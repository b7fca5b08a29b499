//! Process-wide configuration loaded once at startup.
//!
//! Values come from `COEDIT_*` environment variables, CLI flags or a config
//! file via OrthoConfig. [`AppSettings::validate`] turns the raw strings into
//! typed values so the server never starts with a malformed address or URL.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LIVEBLOCKS_API_URL: &str = "https://api.liveblocks.io/";
const DEFAULT_LANGUAGE_TOOL_URL: &str = "https://api.languagetool.org/v2/check";

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COEDIT")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it, stores live in memory.
    pub database_url: Option<String>,
    /// Liveblocks secret key. Without it, collaboration auth answers 503.
    pub liveblocks_secret_key: Option<String>,
    /// Base URL of the Liveblocks REST API.
    pub liveblocks_api_url: Option<String>,
    /// LanguageTool check endpoint.
    pub language_tool_url: Option<String>,
    /// Deadline in seconds applied to each port call made by a handler.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

/// Errors raised while validating [`AppSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid URL for {name} '{value}': {source}")]
    Url {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{name} must not be empty")]
    Blank { name: &'static str },
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Settings after validation.
pub struct ValidatedSettings {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub liveblocks_secret_key: Option<Zeroizing<String>>,
    pub liveblocks_api_url: Url,
    pub language_tool_url: Url,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ValidatedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_configured", &self.database_url.is_some())
            .field(
                "liveblocks_configured",
                &self.liveblocks_secret_key.is_some(),
            )
            .field("liveblocks_api_url", &self.liveblocks_api_url.as_str())
            .field("language_tool_url", &self.language_tool_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn non_blank(value: Option<&String>, name: &'static str) -> Result<Option<String>, SettingsError> {
    match value {
        Some(raw) if raw.trim().is_empty() => Err(SettingsError::Blank { name }),
        Some(raw) => Ok(Some(raw.trim().to_owned())),
        None => Ok(None),
    }
}

fn parse_url(
    value: Option<&String>,
    default: &str,
    name: &'static str,
) -> Result<Url, SettingsError> {
    let raw = non_blank(value, name)?.unwrap_or_else(|| default.to_owned());
    Url::parse(&raw).map_err(|source| SettingsError::Url {
        name,
        value: raw,
        source,
    })
}

impl AppSettings {
    /// Check every value and apply defaults.
    pub fn validate(&self) -> Result<ValidatedSettings, SettingsError> {
        let bind_raw = non_blank(self.bind_addr.as_ref(), "bind_addr")?
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|source| SettingsError::BindAddr {
                value: bind_raw.clone(),
                source,
            })?;

        let request_timeout_secs = self.request_timeout_secs;
        if request_timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        Ok(ValidatedSettings {
            bind_addr,
            database_url: non_blank(self.database_url.as_ref(), "database_url")?,
            liveblocks_secret_key: non_blank(
                self.liveblocks_secret_key.as_ref(),
                "liveblocks_secret_key",
            )?
            .map(Zeroizing::new),
            liveblocks_api_url: parse_url(
                self.liveblocks_api_url.as_ref(),
                DEFAULT_LIVEBLOCKS_API_URL,
                "liveblocks_api_url",
            )?,
            language_tool_url: parse_url(
                self.language_tool_url.as_ref(),
                DEFAULT_LANGUAGE_TOOL_URL,
                "language_tool_url",
            )?,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}
