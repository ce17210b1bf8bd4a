use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::transcript::DEFAULT_LANGUAGE;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    /// Language tried first when a request doesn't name one.
    pub default_language: String,
    /// Upper bound for a single language attempt.
    pub attempt_timeout_secs: u64,
}

impl Config {
    /// Reads `path` (any format `config` understands, optional) and then
    /// `CAPTIONPROXY_*` environment variables on top.
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("bind", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("default_language", DEFAULT_LANGUAGE)?
            .set_default("attempt_timeout_secs", 10_i64)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("CAPTIONPROXY"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }
}
