use std::time::Duration;

use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::TxSignerSync;
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::debug;

use crate::error::LedgerError;
use crate::model::Confirmation;
use crate::rpc::RpcClient;

/// Seam between the workflow and the ledger. State-changing submissions
/// block until the configured confirmation depth.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn code_at(&self, address: Address) -> Result<Bytes, LedgerError>;

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, LedgerError>;

    async fn submit(&self, to: Address, data: Bytes) -> Result<Confirmation, LedgerError>;
}

/// JSON-RPC implementation: builds legacy transactions from on-node
/// nonce/gas queries, signs locally, and polls for the receipt.
pub struct HttpLedger {
    rpc: RpcClient,
    signer: PrivateKeySigner,
    chain_id: u64,
    confirmations: u64,
    poll_interval: Duration,
}

impl HttpLedger {
    pub async fn connect(
        rpc: RpcClient,
        signer: PrivateKeySigner,
        confirmations: u64,
        poll_interval: Duration,
    ) -> Result<Self, LedgerError> {
        let chain_id = rpc.chain_id().await?;
        debug!(target: "ledger", chain_id, caller = %signer.address(), "connected to node");
        Ok(Self {
            rpc,
            signer,
            chain_id,
            confirmations: confirmations.max(1),
            poll_interval,
        })
    }

    /// Poll until the receipt exists and sits at least `confirmations`
    /// blocks below the chain head. No deadline: an unresponsive endpoint
    /// stalls the workflow rather than aborting it.
    async fn wait_for_confirmation(&self, hash: B256) -> Result<Confirmation, LedgerError> {
        loop {
            if let Some(receipt) = self.rpc.transaction_receipt(hash).await? {
                if let Some(included) = receipt.block_number {
                    let head = self.rpc.block_number().await?;
                    let depth = head.saturating_sub(included.to::<u64>()) + 1;
                    if depth >= self.confirmations {
                        return Ok(receipt.into());
                    }
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl Ledger for HttpLedger {
    async fn code_at(&self, address: Address) -> Result<Bytes, LedgerError> {
        self.rpc.get_code(address).await
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, LedgerError> {
        self.rpc.call(to, &data).await
    }

    async fn submit(&self, to: Address, data: Bytes) -> Result<Confirmation, LedgerError> {
        let from = self.signer.address();
        let nonce = self.rpc.transaction_count(from).await?;
        let gas_price = self.rpc.gas_price().await?;
        let estimate = self.rpc.estimate_gas(from, to, &data).await?;
        // headroom over the node's estimate
        let gas_limit = estimate + estimate / 5;

        let mut tx = TxLegacy {
            chain_id: Some(self.chain_id),
            nonce,
            gas_price,
            gas_limit,
            to: TxKind::Call(to),
            value: U256::ZERO,
            input: data,
        };
        let signature = self.signer.sign_transaction_sync(&mut tx)?;
        let raw = TxEnvelope::Legacy(tx.into_signed(signature)).encoded_2718();

        let hash = self.rpc.send_raw_transaction(&raw).await?;
        debug!(target: "ledger", %hash, nonce, gas_limit, "transaction submitted");
        self.wait_for_confirmation(hash).await
    }
}
