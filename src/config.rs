//! Runtime configuration for the gateway
//!
//! Settings are sourced from defaults merged with `AGENT_GATEWAY`-prefixed
//! environment variables (`__` as the nesting separator), e.g.
//! `AGENT_GATEWAY__SERVER__PORT=9000`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// Host address the HTTP listener binds to
    pub host: String,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Debug mode: raises the default log level from info to debug
    pub debug: bool,
}

impl ServerSettings {
    /// Returns the `host:port` string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.debug", false)?
            // Merge in environment variables
            .add_source(Environment::with_prefix("AGENT_GATEWAY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
