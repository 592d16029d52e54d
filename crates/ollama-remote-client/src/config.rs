//! Client configuration

use std::time::Duration;

use crate::endpoint::Endpoint;

/// Settings used to build an [`OllamaClient`](crate::OllamaClient)
///
/// Timeouts are unset by default so long generations are bounded only by the
/// transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server base URL
    pub endpoint: Endpoint,

    /// Whole-request timeout
    pub timeout: Option<Duration>,

    /// TCP connect timeout
    pub connect_timeout: Option<Duration>,

    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout: None,
            connect_timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at the given endpoint, everything else default
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

fn default_user_agent() -> String {
    format!("ollama-remote/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.endpoint.is_default());
        assert_eq!(config.timeout, None);
        assert_eq!(config.connect_timeout, None);
        assert!(config.user_agent.starts_with("ollama-remote/"));
    }

    #[test]
    fn test_builders() {
        let endpoint = Endpoint::parse("gpu-box").unwrap();
        let config = ClientConfig::new(endpoint.clone())
            .with_timeout(Duration::from_secs(30))
            .with_connect_timeout(Duration::from_secs(2));

        assert_eq!(config.endpoint, endpoint);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(2)));
    }
}
