use std::env;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub api_key: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read settings from the process environment. Call `dotenv().ok()` first
    /// to pick up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| match lookup(key) {
            None => Err(ConfigError::Missing(key)),
            Some(value) if value.is_empty() => Err(ConfigError::Empty(key)),
            Some(value) => Ok(value),
        };

        let jwt_secret = required("JWT_SECRET")?;
        let api_key = required("MINT_API_KEY")?;
        let host = lookup("BIND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("BIND_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            jwt_secret,
            api_key,
            host,
            port,
        })
    }
}
