//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Backend (both required for live mode)
//! - `VITE_SUPABASE_URL` - Hosted backend base URL (fallback: `SUPABASE_URL`)
//! - `VITE_SUPABASE_ANON_KEY` - Anonymous API key (fallback: `SUPABASE_ANON_KEY`)
//!
//! If either is missing the storefront runs against the built-in mock backend.
//!
//! ## Optional
//! - `SOUQ_HOST` - Bind address (default: 127.0.0.1)
//! - `SOUQ_PORT` - Listen port (default: 3000)
//! - `SOUQ_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `SOUQ_DEFAULT_LANGUAGE` - `en`, `ar`, or `fr` (default: en)
//! - `SOUQ_DEFAULT_CURRENCY` - ISO currency code (default: USD)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use souq_core::{CurrencyCode, Language};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Hosted backend credentials; `None` selects the mock backend
    pub backend: Option<BackendConfig>,
    /// Language for new sessions
    pub default_language: Language,
    /// Display currency for new sessions
    pub default_currency: CurrencyCode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

/// Hosted backend connection settings.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    pub url: Url,
    /// Anonymous (public) API key
    pub anon_key: SecretString,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SOUQ_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SOUQ_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("SOUQ_BASE_URL", "http://localhost:3000");

        let default_language = get_env_or_default("SOUQ_DEFAULT_LANGUAGE", "en")
            .parse::<Language>()
            .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_DEFAULT_LANGUAGE".to_string(), e))?;
        let default_currency = get_env_or_default("SOUQ_DEFAULT_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("SOUQ_DEFAULT_CURRENCY".to_string(), e))?;

        Ok(Self {
            host,
            port,
            base_url,
            backend: BackendConfig::from_env()?,
            default_language,
            default_currency,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Configuration for tests and offline runs: mock backend, defaults everywhere.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            backend: None,
            default_language: Language::En,
            default_currency: CurrencyCode::USD,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl BackendConfig {
    /// Read the backend URL and key.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_parts(
            get_optional_env_with_fallback("VITE_SUPABASE_URL", "SUPABASE_URL"),
            get_optional_env_with_fallback("VITE_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"),
        )
    }

    /// `Ok(None)` when either value is missing, which selects the mock backend.
    fn from_parts(url: Option<String>, key: Option<String>) -> Result<Option<Self>, ConfigError> {
        let (Some(url), Some(key)) = (url, key) else {
            return Ok(None);
        };
        Ok(Some(Self::new(&url, key)?))
    }

    /// Build from raw values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not http(s).
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = Url::parse(url)
            .map_err(|e| ConfigError::InvalidEnvVar("VITE_SUPABASE_URL".to_string(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "VITE_SUPABASE_URL".to_string(),
                format!("unsupported scheme: {}", url.scheme()),
            ));
        }
        Ok(Self {
            url,
            anon_key: SecretString::from(anon_key.into()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an optional variable, trying `primary` then `fallback`.
fn get_optional_env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    get_optional_env(primary).or_else(|| get_optional_env(fallback))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::mock();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_backend_config_parses_url() {
        let backend = BackendConfig::new("https://abc.supabase.co", "anon-key").unwrap();
        assert_eq!(backend.url.host_str(), Some("abc.supabase.co"));
        assert_eq!(backend.anon_key.expose_secret(), "anon-key");
    }

    #[test]
    fn test_backend_config_rejects_bad_url() {
        assert!(matches!(
            BackendConfig::new("not a url", "k"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            BackendConfig::new("ftp://files.example.com", "k"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_half_configured_backend_selects_mock() {
        let url = Some("https://abc.supabase.co".to_string());
        let key = Some("anon-key".to_string());

        assert!(BackendConfig::from_parts(url.clone(), None).unwrap().is_none());
        assert!(BackendConfig::from_parts(None, key.clone()).unwrap().is_none());
        assert!(BackendConfig::from_parts(url, key).unwrap().is_some());
        assert!(matches!(
            BackendConfig::from_parts(Some("nope".to_string()), Some("k".to_string())),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "VITE_SUPABASE_URL"
        ));
    }

    #[test]
    fn test_backend_config_debug_redacts_key() {
        let backend = BackendConfig::new("https://abc.supabase.co", "super_secret_anon_key").unwrap();
        let debug_output = format!("{backend:?}");

        assert!(debug_output.contains("abc.supabase.co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_anon_key"));
    }
}
