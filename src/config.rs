use anyhow::{anyhow, Result};
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub bind_addr: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A missing or blank `GOOGLE_API_KEY` fails here, at startup, instead of
    /// surfacing as an authentication error on the first remote call.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let google_api_key = get("GOOGLE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("GOOGLE_API_KEY must be set in the environment or .env file"))?;

        let gemini_model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            google_api_key,
            gemini_model,
            bind_addr,
        })
    }
}
