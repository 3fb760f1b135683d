//! Session settings: RPC endpoint, signer key, and the fixed deployment the
//! client is built against. Defaults are the reference deployment; an
//! optional TOML file and `SWAPDESK_*` environment variables override them in
//! that order.

use std::{fs, io, path::Path};

use serde::Deserialize;

/// Address and decimal precision of one pair leg.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub address: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rpc_url: String,
    pub signer_key: String,
    pub token0: TokenSettings,
    pub token1: TokenSettings,
    pub pair_address: String,
    pub sell_address: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".into(),
            // Well-known local dev-node key; never holds real funds.
            signer_key: "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .into(),
            token0: TokenSettings {
                address: "0xA854C1bC1aEcC80094E2ac3C0EE98581460F1caD".into(),
                decimals: 18,
            },
            token1: TokenSettings {
                address: "0xF997350F2Ea6fCB6d5CD7366F4836958CCc74460".into(),
                decimals: 6,
            },
            pair_address: "0xdE18780E8940631148580b8Cf84e579F704430fD".into(),
            sell_address: "0x3ff0fEeCf3aD3b79480018d165dbD401995A0376".into(),
        }
    }
}

pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    if let Some(path) = config_path {
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<Settings>(&raw) {
                Ok(file_cfg) => settings = file_cfg,
                Err(err) => {
                    tracing::warn!(
                        "ignoring unparseable settings file '{}': {err}",
                        path.display()
                    );
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no settings file at '{}', using defaults", path.display());
            }
            Err(err) => {
                tracing::warn!("failed to read settings file '{}': {err}", path.display());
            }
        }
    }

    if let Ok(v) = std::env::var("SWAPDESK_RPC_URL") {
        settings.rpc_url = v;
    }
    if let Ok(v) = std::env::var("SWAPDESK_SIGNER_KEY") {
        settings.signer_key = v;
    }
    if let Ok(v) = std::env::var("SWAPDESK_TOKEN0_ADDRESS") {
        settings.token0.address = v;
    }
    if let Ok(v) = std::env::var("SWAPDESK_TOKEN0_DECIMALS") {
        if let Ok(parsed) = v.parse::<u8>() {
            settings.token0.decimals = parsed;
        }
    }
    if let Ok(v) = std::env::var("SWAPDESK_TOKEN1_ADDRESS") {
        settings.token1.address = v;
    }
    if let Ok(v) = std::env::var("SWAPDESK_TOKEN1_DECIMALS") {
        if let Ok(parsed) = v.parse::<u8>() {
            settings.token1.decimals = parsed;
        }
    }
    if let Ok(v) = std::env::var("SWAPDESK_PAIR_ADDRESS") {
        settings.pair_address = v;
    }
    if let Ok(v) = std::env::var("SWAPDESK_SELL_ADDRESS") {
        settings.sell_address = v;
    }

    settings
}
