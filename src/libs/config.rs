use {
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, str::FromStr},
    synapse::addresses::{SYNAPSE_API_URL, SYNAPSE_EXPLORER_URL},
    thiserror::Error,
};

use crate::libs::price::DEXSCREENER_API_URL;

pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Environment-sourced settings. Secrets stay optional until a command needs
/// them, so `price` and `status` run without any chain credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dfk_rpc: Option<String>,
    pub klaytn_rpc: Option<String>,
    pub private_key: Option<String>,
    pub dexscreener_url: String,
    pub synapse_api_url: String,
    pub synapse_explorer_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            dfk_rpc: non_empty_var("DFK_RPC_MAINNET"),
            klaytn_rpc: non_empty_var("KLAYTON_RPC_MAINNET"),
            private_key: non_empty_var("DFK_PK"),
            dexscreener_url: non_empty_var("DEXSCREENER_API_URL")
                .unwrap_or_else(|| DEXSCREENER_API_URL.to_string()),
            synapse_api_url: non_empty_var("SYNAPSE_API_URL")
                .unwrap_or_else(|| SYNAPSE_API_URL.to_string()),
            synapse_explorer_url: non_empty_var("SYNAPSE_EXPLORER_URL")
                .unwrap_or_else(|| SYNAPSE_EXPLORER_URL.to_string()),
        }
    }

    pub fn dfk_rpc(&self) -> Result<&str, ConfigError> {
        self.dfk_rpc.as_deref().ok_or(ConfigError::Missing("DFK_RPC_MAINNET"))
    }

    pub fn klaytn_rpc(&self) -> Result<&str, ConfigError> {
        self.klaytn_rpc.as_deref().ok_or(ConfigError::Missing("KLAYTON_RPC_MAINNET"))
    }

    pub fn private_key(&self) -> Result<&str, ConfigError> {
        self.private_key.as_deref().ok_or(ConfigError::Missing("DFK_PK"))
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
