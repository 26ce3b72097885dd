//! Service configuration from environment variables.

use rps_view_core::Address;
use thiserror::Error;

/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Player service configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `PORT`
    pub port: u16,
    /// `VIEWER_ADDRESS`: the account this service plays as
    pub viewer: Address,
    /// `LEDGER_RPC_URL`: gateway to use; the mock ledger when unset
    pub ledger_rpc_url: Option<String>,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let viewer_raw = lookup("VIEWER_ADDRESS").ok_or(ConfigError::Missing("VIEWER_ADDRESS"))?;
        let viewer: Address = viewer_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "VIEWER_ADDRESS",
            value: viewer_raw.clone(),
        })?;
        if viewer.is_zero() {
            return Err(ConfigError::Invalid {
                name: "VIEWER_ADDRESS",
                value: viewer_raw,
            });
        }

        let ledger_rpc_url = lookup("LEDGER_RPC_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            port,
            viewer,
            ledger_rpc_url,
        })
    }
}
