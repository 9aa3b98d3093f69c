//! Runtime configuration, read from the environment (and a `.env` file if present).

use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Admin client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    /// Root of the REST API (default: `http://localhost:8080`).
    pub api_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Page size of paginated lists (default: `20`).
    pub items_per_page: u32,
    /// Largest file a form accepts, in bytes (default: 5 MiB).
    pub max_upload_bytes: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            items_per_page: 20,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `KYC_API_URL`              | `http://localhost:8080` |
    /// | `KYC_REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `KYC_ITEMS_PER_PAGE`       | `20`                    |
    /// | `KYC_MAX_UPLOAD_BYTES`     | `5242880`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            api_url: lookup("KYC_API_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_url),
            request_timeout_secs: parse_or(
                &lookup,
                "KYC_REQUEST_TIMEOUT_SECS",
                "u64",
                defaults.request_timeout_secs,
            )?,
            items_per_page: positive_or(&lookup, "KYC_ITEMS_PER_PAGE", defaults.items_per_page)?,
            max_upload_bytes: parse_or(
                &lookup,
                "KYC_MAX_UPLOAD_BYTES",
                "u64",
                defaults.max_upload_bytes,
            )?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}

/// Page sizes go out as `size=`, where zero would ask for empty pages.
fn positive_or<F>(lookup: &F, key: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let expected = "positive u32";
    match parse_or(lookup, key, expected, default)? {
        0 => Err(ConfigError::Invalid {
            key,
            expected,
            value: "0".to_string(),
        }),
        n => Ok(n),
    }
}
