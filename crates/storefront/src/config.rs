//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `TASTY_EATS_DATA_DIR` - Directory holding the persisted cart (default: .tasty-eats)
//! - `CATALOG_PATH` - JSON file with an alternative menu (default: built-in menu)
//! - `CATALOG_LATENCY` - `instant`, `simulated`, or a fixed delay in milliseconds (default: simulated)
//! - `CATALOG_JITTER_MS` - Random extra delay for `simulated` latency (default: 200)
//! - `CHECKOUT_DELAY_MS` - Simulated payment processing time (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::Latency;

/// Default directory for persisted state.
pub const DEFAULT_DATA_DIR: &str = ".tasty-eats";

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
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Optional menu file replacing the built-in menu
    pub catalog_path: Option<PathBuf>,
    /// Simulated latency of catalog queries
    pub catalog_latency: Latency,
    /// Simulated payment processing time at checkout
    pub checkout_delay: Duration,
    /// Error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; Sentry stays disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Performance trace sample rate
    pub traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            catalog_latency: Latency::Simulated {
                jitter: Duration::from_millis(200),
            },
            checkout_delay: Duration::from_millis(1500),
            sentry: SentryConfig {
                sample_rate: 1.0,
                ..SentryConfig::default()
            },
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let env = Env(&lookup);

        let jitter = Duration::from_millis(env.parse_or("CATALOG_JITTER_MS", 200_u64)?);
        let catalog_latency = match env.get("CATALOG_LATENCY") {
            None => Latency::Simulated { jitter },
            Some(value) => parse_latency(&value, jitter).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "CATALOG_LATENCY".to_string(),
                    format!("expected `instant`, `simulated`, or milliseconds, got {value:?}"),
                )
            })?,
        };

        Ok(Self {
            host: env.parse_or("STOREFRONT_HOST", defaults.host)?,
            port: env.parse_or("STOREFRONT_PORT", defaults.port)?,
            data_dir: env.get("TASTY_EATS_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            catalog_path: env.get("CATALOG_PATH").map(PathBuf::from),
            catalog_latency,
            checkout_delay: Duration::from_millis(env.parse_or("CHECKOUT_DELAY_MS", 1500_u64)?),
            sentry: SentryConfig {
                dsn: env.get("SENTRY_DSN"),
                environment: env.get("SENTRY_ENVIRONMENT"),
                sample_rate: parse_rate(&env, "SENTRY_SAMPLE_RATE", 1.0)?,
                traces_sample_rate: parse_rate(&env, "SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with typed accessors. Empty values count as unset.
struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Parse `instant`, `simulated`, or a millisecond count.
fn parse_latency(value: &str, jitter: Duration) -> Option<Latency> {
    match value.trim().to_ascii_lowercase().as_str() {
        "instant" | "none" | "0" => Some(Latency::Instant),
        "simulated" => Some(Latency::Simulated { jitter }),
        other => other
            .parse::<u64>()
            .ok()
            .map(|ms| Latency::Fixed(Duration::from_millis(ms))),
    }
}

/// Parse a sample rate and check it lies in `[0, 1]`.
fn parse_rate<F: Fn(&str) -> Option<String>>(
    env: &Env<'_, F>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = env.parse_or(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
