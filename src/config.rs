//! API client configuration.
//!
//! The backend base URL is fixed when the client is constructed. Native
//! builds may override it at runtime through `FINANCE_API_BASE_URL`; browser
//! builds only see the value baked in at compile time.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3002";

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "FINANCE_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid api base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Connection settings for [`crate::net::client::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validate and normalize a base URL. Trailing slashes are dropped so
    /// endpoints can always be appended as `/resource`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse or
    /// is not `http`/`https`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| ConfigError::InvalidBaseUrl { url: raw.clone(), reason: e.to_string() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw,
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(Self { base_url: trimmed.to_owned() })
    }

    /// Load from `FINANCE_API_BASE_URL`, falling back to the compile-time
    /// value of the same variable and then [`DEFAULT_API_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the configured value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let configured = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| option_env!("FINANCE_API_BASE_URL").map(str::to_owned));
        match configured {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned() }
    }
}
