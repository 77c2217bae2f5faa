//! Runs one supply/redeem round trip against a local node. The gateway
//! contract must already be deployed there; deployment is a separate step
//! and this binary refuses to run without it.

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use lendgate::{
    config::{load_config, RunnerConfig},
    ledger::HttpLedger,
    rpc::RpcClient,
    workflow::Runner,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = match env::args().nth(1) {
        Some(path) => load_config(&PathBuf::from(path)).await?,
        None => {
            info!("no config file given, using local-node defaults");
            RunnerConfig::default()
        }
    };

    let signer = cfg
        .wallet
        .private_key
        .parse::<PrivateKeySigner>()
        .context("parse private key")?;
    let rpc = RpcClient::new(&cfg.rpc.url, Duration::from_millis(cfg.rpc.timeout_ms))
        .context("build rpc client")?;
    let ledger = HttpLedger::connect(
        rpc,
        signer,
        cfg.workflow.confirmations,
        Duration::from_millis(cfg.workflow.poll_interval_ms),
    )
    .await
    .context("connect to node")?;

    let runner = Runner::new(cfg, Arc::new(ledger));
    runner.run().await?;
    Ok(())
}
