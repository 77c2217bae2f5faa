use alloy_primitives::{Address, LogData, B256};

/// Outcome of a state-changing call once it has reached the required
/// confirmation depth.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub tx_hash: B256,
    pub block_number: u64,
    pub succeeded: bool,
    pub logs: Vec<LogRecord>,
}

/// One event emitted while the transaction executed.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub address: Address,
    pub data: LogData,
}

impl Confirmation {
    /// Logs emitted by a specific contract, in emission order.
    pub fn logs_from(&self, address: Address) -> impl Iterator<Item = &LogRecord> {
        self.logs.iter().filter(move |log| log.address == address)
    }
}
