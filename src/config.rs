use std::path::Path;

use alloy_primitives::{address, Address};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

// Local-fork fixtures: the deploy tooling logs the gateway address, the token
// addresses are the mainnet contracts the fork exposes, and the key is a
// throwaway local-node account. Never fund that key on a live network.
const DEFAULT_RPC_URL: &str = "http://localhost:8545";
const DEFAULT_PRIVATE_KEY: &str =
    "0xb8c1b5c1d81f9475fdf2e334517d29f733bdfa40682207571b12fc1142cbf329";
const DEFAULT_GATEWAY: Address = address!("eca3edfd09435c2c7d2583124ca9a44f82af1e8b");
const DEFAULT_UNDERLYING: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
const DEFAULT_RECEIPT_TOKEN: Address = address!("5d3a536e4d6dbd6114cc1ead35777bab948e3643");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
    pub timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub private_key: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_key: DEFAULT_PRIVATE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub gateway: Address,
    pub underlying: Address,
    pub receipt_token: Address,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            gateway: DEFAULT_GATEWAY,
            underlying: DEFAULT_UNDERLYING,
            receipt_token: DEFAULT_RECEIPT_TOKEN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Display name for log lines only.
    pub name: String,
    pub underlying_decimals: u32,
    pub receipt_decimals: u32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            name: "DAI".to_string(),
            underlying_decimals: 18,
            receipt_decimals: 8,
        }
    }
}

/// Which quantity the redeem call is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedeemMode {
    /// Redeem the full receipt-token balance.
    ByReceiptAmount,
    /// Redeem enough receipt tokens to release the given underlying amount.
    ByUnderlyingAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Whole underlying tokens to move through the round trip.
    pub supply_amount: u64,
    pub confirmations: u64,
    pub poll_interval_ms: u64,
    pub redeem_mode: RedeemMode,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            supply_amount: 10,
            confirmations: 1,
            poll_interval_ms: 500,
            redeem_mode: RedeemMode::ByReceiptAmount,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub rpc: RpcConfig,
    pub wallet: WalletConfig,
    pub contracts: ContractsConfig,
    pub asset: AssetConfig,
    pub workflow: WorkflowConfig,
}

pub async fn load_config(path: &Path) -> Result<RunnerConfig> {
    let raw = fs::read(path)
        .await
        .with_context(|| format!("read config file: {}", path.display()))?;
    let cfg = serde_json::from_slice(&raw).context("parse config json")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_fork() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.rpc.url, "http://localhost:8545");
        assert_eq!(cfg.asset.underlying_decimals, 18);
        assert_eq!(cfg.asset.receipt_decimals, 8);
        assert_eq!(cfg.workflow.supply_amount, 10);
        assert_eq!(cfg.workflow.confirmations, 1);
        assert_eq!(cfg.workflow.redeem_mode, RedeemMode::ByReceiptAmount);
    }

    #[test]
    fn partial_file_overrides_one_section() {
        let cfg: RunnerConfig = serde_json::from_str(
            r#"{
                "rpc": { "url": "http://10.0.0.5:8545" },
                "workflow": { "redeem_mode": "by_underlying_amount" }
            }"#,
        )
        .expect("parse");
        assert_eq!(cfg.rpc.url, "http://10.0.0.5:8545");
        // untouched sections keep their defaults
        assert_eq!(cfg.rpc.timeout_ms, 30_000);
        assert_eq!(cfg.workflow.redeem_mode, RedeemMode::ByUnderlyingAmount);
        assert_eq!(cfg.contracts.gateway, DEFAULT_GATEWAY);
    }

    #[test]
    fn addresses_parse_from_hex_strings() {
        let cfg: RunnerConfig = serde_json::from_str(
            r#"{
                "contracts": {
                    "gateway": "0x0000000000000000000000000000000000000001",
                    "underlying": "0x0000000000000000000000000000000000000002",
                    "receipt_token": "0x0000000000000000000000000000000000000003"
                }
            }"#,
        )
        .expect("parse");
        assert_eq!(cfg.contracts.gateway, Address::with_last_byte(1));
        assert_eq!(cfg.contracts.underlying, Address::with_last_byte(2));
        assert_eq!(cfg.contracts.receipt_token, Address::with_last_byte(3));
    }
}
