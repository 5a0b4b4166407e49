//! Bind address and CORS origin policy

/// Origin entry that allows every origin
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins. Empty, or any `*` entry, allows every origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Default bind host on `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Replace the allowed origin list
    pub fn with_cors_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cors_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    /// `host:port`, as handed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_all_interfaces_on_3000() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_origin_policy() {
        let listed = HttpServerConfig::with_port(8080).with_cors_origins(["https://a.example"]);
        assert_eq!(listed.socket_addr(), "0.0.0.0:8080");
        assert!(!listed.allows_any_origin());

        let wildcard = listed.with_cors_origins(["https://a.example", "*"]);
        assert!(wildcard.allows_any_origin());
    }
}
