use alloy_primitives::{Address, B256};
use thiserror::Error;

/// Failures at the node-communication layer.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid rpc url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed rpc response: {0}")]
    Decode(String),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Signer(#[from] alloy_signer::Error),
}

/// Failures of the round-trip workflow itself. None of these are retried;
/// each one aborts the run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("no contract code at {0}; deploy the gateway on this node first")]
    NotDeployed(Address),

    #[error("transaction {hash} reverted on chain")]
    TransactionFailed { hash: B256 },

    #[error("lending market reported redeem error code {0}")]
    Protocol(u64),

    #[error("no status event from the gateway in the redeem receipt")]
    StatusEventMissing,

    #[error("abi decode: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
