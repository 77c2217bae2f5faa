use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{hex::encode_prefixed, Address, Bytes, B256, U128, U64};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::trace;
use url::Url;

use crate::error::LedgerError;
use crate::model::{Confirmation, LogRecord};

/// Thin JSON-RPC 2.0 client over a single node endpoint.
pub struct RpcClient {
    client: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: Url::parse(url)?,
            next_id: AtomicU64::new(1),
        })
    }

    async fn request(&self, method: &'static str, params: Value) -> Result<Value, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        trace!(target: "rpc", method, id, "request");
        let resp = self.client.post(self.url.clone()).json(&body).send().await?;
        let envelope: RpcEnvelope = resp.json().await?;
        if let Some(err) = envelope.error {
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    async fn typed<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<T, LedgerError> {
        let value = self.request(method, params).await?;
        if value.is_null() {
            return Err(LedgerError::Decode(format!("{method}: null result")));
        }
        Ok(serde_json::from_value(value)?)
    }

    async fn quantity(&self, method: &'static str, params: Value) -> Result<u64, LedgerError> {
        let q: U64 = self.typed(method, params).await?;
        Ok(q.to::<u64>())
    }

    pub async fn chain_id(&self) -> Result<u64, LedgerError> {
        self.quantity("eth_chainId", json!([])).await
    }

    pub async fn block_number(&self) -> Result<u64, LedgerError> {
        self.quantity("eth_blockNumber", json!([])).await
    }

    pub async fn gas_price(&self) -> Result<u128, LedgerError> {
        let q: U128 = self.typed("eth_gasPrice", json!([])).await?;
        Ok(q.to::<u128>())
    }

    /// Pending-state nonce for the given account.
    pub async fn transaction_count(&self, address: Address) -> Result<u64, LedgerError> {
        self.quantity("eth_getTransactionCount", json!([address, "pending"]))
            .await
    }

    pub async fn get_code(&self, address: Address) -> Result<Bytes, LedgerError> {
        self.typed("eth_getCode", json!([address, "latest"])).await
    }

    /// Read-only call against the latest block.
    pub async fn call(&self, to: Address, data: &Bytes) -> Result<Bytes, LedgerError> {
        self.typed("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    pub async fn estimate_gas(
        &self,
        from: Address,
        to: Address,
        data: &Bytes,
    ) -> Result<u64, LedgerError> {
        self.quantity(
            "eth_estimateGas",
            json!([{ "from": from, "to": to, "data": data }]),
        )
        .await
    }

    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, LedgerError> {
        self.typed("eth_sendRawTransaction", json!([encode_prefixed(raw)]))
            .await
    }

    /// `None` until the transaction has been included in a block.
    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<RawReceipt>, LedgerError> {
        let value = self.request("eth_getTransactionReceipt", json!([hash])).await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Receipt exactly as the node returns it; converted to [`Confirmation`]
/// once the confirmation depth is reached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<U64>,
    pub status: Option<U64>,
    #[serde(default)]
    pub logs: Vec<RawLog>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl From<RawReceipt> for Confirmation {
    fn from(raw: RawReceipt) -> Self {
        Confirmation {
            tx_hash: raw.transaction_hash,
            block_number: raw.block_number.map(|b| b.to::<u64>()).unwrap_or_default(),
            // pre-status-field chains leave `status` unset; only an explicit
            // zero marks the transaction as reverted
            succeeded: raw.status.map_or(true, |s| s != U64::ZERO),
            logs: raw
                .logs
                .into_iter()
                .map(|log| LogRecord {
                    address: log.address,
                    data: alloy_primitives::LogData::new_unchecked(log.topics, log.data),
                })
                .collect(),
        }
    }
}
