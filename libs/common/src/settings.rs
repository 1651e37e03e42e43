//! HTTP server settings loaded through the `config` crate

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Address a service binds its HTTP listener to
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load server settings from `<PREFIX>_HOST` and `<PREFIX>_PORT`
    ///
    /// Falls back to `0.0.0.0` and `default_port` when the variables are unset.
    pub fn from_env(prefix: &str, default_port: u16) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", i64::from(default_port))?
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        unsafe {
            std::env::remove_var("TESTSVC_HOST");
            std::env::remove_var("TESTSVC_PORT");
        }

        let config = ServerConfig::from_env("TESTSVC", 3001).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        unsafe {
            std::env::set_var("TESTSVC_HOST", "127.0.0.1");
            std::env::set_var("TESTSVC_PORT", "8080");
        }

        let config = ServerConfig::from_env("TESTSVC", 3001).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");

        unsafe {
            std::env::remove_var("TESTSVC_HOST");
            std::env::remove_var("TESTSVC_PORT");
        }
    }
}
