//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (used for login return targets)
//! - `IDENTITY_BASE_URL` - Base URL of the identity service
//! - `IDENTITY_APP_ID` - Application ID registered with the identity service
//!
//! ## Optional
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for the session store
//!   (falls back to `DATABASE_URL`; sessions are kept in memory when neither is set)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `IDENTITY_API_KEY` - Server-side API key for the identity service
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` session store URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront, without a trailing slash
    pub base_url: String,
    /// Identity service configuration
    pub identity: IdentityConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Identity service configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity service
    pub base_url: Url,
    /// Application ID sent with every identity request
    pub app_id: String,
    /// Optional server-side API key
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("base_url", &self.base_url.as_str())
            .field("app_id", &self.app_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
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
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL");
        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = parse_base_url(
            "STOREFRONT_BASE_URL",
            &get_required_env("STOREFRONT_BASE_URL")?,
        )?;

        let identity = IdentityConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_sample_rate("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = get_sample_rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            identity,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_required_env("IDENTITY_BASE_URL")?;
        let base_url = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("IDENTITY_BASE_URL".to_string(), e.to_string())
        })?;

        let api_key = match get_optional_env("IDENTITY_API_KEY") {
            Some(value) => {
                validate_secret_strength(&value, "IDENTITY_API_KEY")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self {
            base_url,
            app_id: get_required_env("IDENTITY_APP_ID")?,
            api_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a public base URL and strip any trailing slash.
fn parse_base_url(var_name: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be an http(s) URL with a host".to_string(),
        ));
    }

    Ok(value.trim_end_matches('/').to_string())
}

/// Parse a Sentry sample rate in the range `0.0..=1.0`.
fn get_sample_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate = get_env_or_default(key, default)
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated key."
            ),
        ));
    }

    Ok(())
}
