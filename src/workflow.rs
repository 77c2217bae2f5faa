use std::sync::Arc;

use alloy_primitives::U256;
use alloy_sol_types::{SolCall, SolEvent};
use tracing::{debug, info};

use crate::abi::{IErc20, IGateway, IReceiptToken};
use crate::config::{RedeemMode, RunnerConfig};
use crate::error::WorkflowError;
use crate::ledger::Ledger;
use crate::model::Confirmation;
use crate::units::{format_units, to_base_units};

/// Drives one full supply/redeem round trip through the gateway contract.
/// Strictly sequential; every step waits out its confirmation before the
/// next one is issued, and any failure aborts the run.
pub struct Runner<L: Ledger> {
    cfg: RunnerConfig,
    ledger: Arc<L>,
}

impl<L: Ledger> Runner<L> {
    pub fn new(cfg: RunnerConfig, ledger: Arc<L>) -> Self {
        Self { cfg, ledger }
    }

    /// Returns the gateway's raw receipt-token balance after the redeem.
    pub async fn run(&self) -> Result<U256, WorkflowError> {
        let contracts = &self.cfg.contracts;
        let asset = &self.cfg.asset;

        // Deployment is a separate step; without code at the gateway address
        // nothing below can work, so fail before issuing any transaction.
        let code = self.ledger.code_at(contracts.gateway).await?;
        if code.is_empty() {
            return Err(WorkflowError::NotDeployed(contracts.gateway));
        }

        let amount = to_base_units(self.cfg.workflow.supply_amount, asset.underlying_decimals);

        info!(
            target: "workflow",
            asset = %asset.name,
            amount = self.cfg.workflow.supply_amount,
            "transferring underlying from the wallet to the gateway"
        );
        let transfer = IErc20::transferCall {
            to: contracts.gateway,
            amount,
        }
        .abi_encode();
        let conf = self
            .ledger
            .submit(contracts.underlying, transfer.into())
            .await?;
        self.ensure_succeeded(&conf)?;
        info!(target: "workflow", asset = %asset.name, "gateway funded, supplying to the lending market");

        let supply = IGateway::supplyErc20Call {
            underlying: contracts.underlying,
            receiptToken: contracts.receipt_token,
            amount,
        }
        .abi_encode();
        let conf = self.ledger.submit(contracts.gateway, supply.into()).await?;
        self.ensure_succeeded(&conf)?;
        debug!(target: "workflow", events = conf.logs.len(), "supply receipt events");
        info!(target: "workflow", asset = %asset.name, "supplied to the lending market via the gateway");

        // Informational reads; the raw values also pick the redeem amount.
        let underlying_balance = self.read_underlying_balance().await?;
        info!(
            target: "workflow",
            asset = %asset.name,
            balance = %format_units(underlying_balance, asset.underlying_decimals),
            "underlying held in the lending market"
        );
        let receipt_balance = self.read_receipt_balance().await?;
        info!(
            target: "workflow",
            balance = %format_units(receipt_balance, asset.receipt_decimals),
            "gateway receipt-token balance"
        );

        let (redeem_amount, by_receipt) = match self.cfg.workflow.redeem_mode {
            RedeemMode::ByReceiptAmount => (receipt_balance, true),
            RedeemMode::ByUnderlyingAmount => (underlying_balance, false),
        };
        info!(
            target: "workflow",
            asset = %asset.name,
            mode = ?self.cfg.workflow.redeem_mode,
            "redeeming the position"
        );
        let redeem = IGateway::redeemErc20Call {
            amount: redeem_amount,
            byReceiptAmount: by_receipt,
            receiptToken: contracts.receipt_token,
        }
        .abi_encode();
        let conf = self.ledger.submit(contracts.gateway, redeem.into()).await?;
        self.ensure_succeeded(&conf)?;

        // The market's own status code travels in the gateway's Status event.
        // Looked up by emitting address and event type, not by position in
        // the log list.
        let status = conf
            .logs_from(contracts.gateway)
            .find_map(|log| IGateway::Status::decode_log_data(&log.data).ok())
            .ok_or(WorkflowError::StatusEventMissing)?;
        let status_code = status.code.saturating_to::<u64>();
        if status_code != 0 {
            return Err(WorkflowError::Protocol(status_code));
        }

        let final_balance = self.read_receipt_balance().await?;
        info!(
            target: "workflow",
            balance = %format_units(final_balance, asset.receipt_decimals),
            "final gateway receipt-token balance"
        );
        Ok(final_balance)
    }

    fn ensure_succeeded(&self, conf: &Confirmation) -> Result<(), WorkflowError> {
        if conf.succeeded {
            Ok(())
        } else {
            Err(WorkflowError::TransactionFailed { hash: conf.tx_hash })
        }
    }

    async fn read_underlying_balance(&self) -> Result<U256, WorkflowError> {
        let data = IReceiptToken::balanceOfUnderlyingCall {
            owner: self.cfg.contracts.gateway,
        }
        .abi_encode();
        let ret = self
            .ledger
            .call(self.cfg.contracts.receipt_token, data.into())
            .await?;
        Ok(IReceiptToken::balanceOfUnderlyingCall::abi_decode_returns(
            &ret,
        )?)
    }

    async fn read_receipt_balance(&self) -> Result<U256, WorkflowError> {
        let data = IReceiptToken::balanceOfCall {
            owner: self.cfg.contracts.gateway,
        }
        .abi_encode();
        let ret = self
            .ledger
            .call(self.cfg.contracts.receipt_token, data.into())
            .await?;
        Ok(IReceiptToken::balanceOfCall::abi_decode_returns(&ret)?)
    }
}
