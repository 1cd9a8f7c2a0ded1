//! Process configuration, read from environment variables.
//!
//! - `BIND_ADDR`: socket address to listen on (default `0.0.0.0:8080`)
//! - `API_TOKEN`: the single accepted `Authorization` value (default `valid-token`)
//! - `SEED_BLOGS`: `true`/`false`, start with the sample blog posts (default `true`)

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

use usermgmt_auth::DEFAULT_TOKEN;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR '{value}' is not a socket address: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("SEED_BLOGS '{0}' must be 'true' or 'false'")]
    SeedBlogs(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub api_token: String,
    pub seed_blogs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_token: DEFAULT_TOKEN.to_string(),
            seed_blogs: true,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_addr.clone(),
                source,
            })?;

        let api_token = lookup("API_TOKEN").unwrap_or_else(|| {
            tracing::warn!("API_TOKEN not set; accepting the built-in development token");
            DEFAULT_TOKEN.to_string()
        });

        let seed_blogs = match lookup("SEED_BLOGS") {
            None => true,
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|_| ConfigError::SeedBlogs(raw.clone()))?,
        };

        Ok(Self {
            bind_addr,
            api_token,
            seed_blogs,
        })
    }
}
