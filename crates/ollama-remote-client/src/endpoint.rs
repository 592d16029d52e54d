//! Remote endpoint reference

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::ApiError;

/// Host used when nothing else is configured
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Port assumed for bare `host` values without a scheme
pub const DEFAULT_PORT: u16 = 11434;

/// Normalized base URL of an Ollama server
///
/// Accepts the same loose forms the official clients do: `gpu-box`,
/// `gpu-box:8080`, `http://gpu-box:11434/`, `https://ollama.example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    base: String,
}

impl Endpoint {
    /// Parse and normalize a host string
    ///
    /// # Errors
    /// Returns `InvalidEndpoint` for empty input, unparseable input, a scheme
    /// other than http/https, or a URL without a host.
    pub fn parse(host: &str) -> Result<Self, ApiError> {
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidEndpoint("host cannot be empty".to_string()));
        }

        let has_scheme = trimmed.contains("://");
        let candidate = if has_scheme {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let mut url = Url::parse(&candidate)
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", trimmed, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                trimmed
            )));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(ApiError::InvalidEndpoint(format!("missing host in {}", trimmed)));
        }

        // Bare hosts get the Ollama port; explicit schemes keep their own default.
        if !has_scheme && url.port().is_none() {
            url.set_port(Some(DEFAULT_PORT))
                .map_err(|_| ApiError::InvalidEndpoint(format!("cannot set port on {}", trimmed)))?;
        }

        let base = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { url, base })
    }

    /// Base URL without a trailing slash
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Hostname part, used for display only
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Whether this is the stock `http://localhost:11434` endpoint
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Absolute URL for an API path such as `/api/tags`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::parse(DEFAULT_HOST).expect("default host is a valid URL")
    }
}

impl FromStr for Endpoint {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
