//! # Front-end configuration: `registry.toml`
//!
//! Which contract the pages talk to and the timings the UI uses around
//! transactions.
//!
//! ```toml
//! [contract]
//! address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
//!
//! [ui]
//! redirect_delay_ms = 2000        # pause before returning home after a registration
//! receipt_poll_interval_ms = 1000 # how often to poll for a mined receipt
//! ```
//!
//! Every field has a default, so a missing or empty file is equivalent to the
//! default configuration (a local development chain's first deployment).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::Address;

/// Address of the first contract deployed on a fresh local development node.
pub const DEFAULT_CONTRACT_ADDRESS: Address = Address([
    0x5f, 0xbd, 0xb2, 0x31, 0x56, 0x78, 0xaf, 0xec, 0xb3, 0x67, 0xf0, 0x32, 0xd9, 0x3f, 0x64,
    0x2f, 0x64, 0x18, 0x0a, 0xa3,
]);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default = "default_contract_address")]
    pub address: Address,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
    #[serde(default = "default_receipt_poll_interval")]
    pub receipt_poll_interval_ms: u64,
}

fn default_contract_address() -> Address {
    DEFAULT_CONTRACT_ADDRESS
}

fn default_redirect_delay() -> u64 {
    2000
}

fn default_receipt_poll_interval() -> u64 {
    1000
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: default_contract_address(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
            receipt_poll_interval_ms: default_receipt_poll_interval(),
        }
    }
}

impl RegistryConfig {
    pub fn filename() -> &'static str {
        "registry.toml"
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.ui.redirect_delay_ms)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ui.receipt_poll_interval_ms)
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
