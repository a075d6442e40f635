use alloy_primitives::Address;
use reth_chain_primitives::{Block, Log, RecoveredTransaction};

use crate::Repository;

/// Everything a [`TransactionExecutorFactory`] needs to build one
/// transaction's executor: the transaction itself, the coinbase it pays
/// fees to, the block it belongs to, and the gas used by every transaction
/// before it in block order.
pub struct ExecutorContext<'a> {
    pub transaction: &'a RecoveredTransaction,
    pub coinbase: Address,
    pub block: &'a Block,
    pub cumulative_gas_used: u64,
}

/// What a completed [`TransactionExecutor`] hands back: enough to build this
/// transaction's receipt. Success/failure and logs are always populated;
/// whether the receipt carries a status bit or a post-state root is decided
/// by the caller against the active `BlockchainConfig`, not here.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReceipt {
    pub success: bool,
    pub logs: Vec<Log>,
}

/// An unrecoverable failure inside one transaction's execution. Distinct
/// from an ordinary invalid-transaction rejection (which the executor
/// reports through a failed [`ExecutionReceipt`]) — this propagates out of
/// `applyBlock` and aborts the whole import.
#[derive(Debug, thiserror::Error)]
#[error("transaction executor failed: {0}")]
pub struct ExecutorError(pub String);

/// Drives a single transaction through the external EVM. The core calls the
/// four lifecycle methods in order and never interleaves two transactions'
/// executors — `txTrack` (the nested repository handle passed in at
/// construction) is mutated in place by `execute`/`go`.
pub trait TransactionExecutor {
    /// Prepares execution: validates intrinsic gas, deducts the upfront gas
    /// allowance from the sender.
    fn init(&mut self) -> Result<(), ExecutorError>;

    /// Runs the transaction's code.
    fn execute(&mut self) -> Result<(), ExecutorError>;

    /// Finalizes gas accounting (refunds, gas paid to the coinbase).
    fn go(&mut self) -> Result<(), ExecutorError>;

    /// Any bookkeeping that must run after gas accounting — e.g. deleting
    /// self-destructed accounts.
    fn finalization(&mut self) -> Result<(), ExecutorError>;

    /// Gas consumed by this transaction alone (not cumulative).
    fn gas_used(&self) -> u64;

    fn receipt(&self) -> ExecutionReceipt;
}

/// Builds a [`TransactionExecutor`] for one transaction, given the nested
/// repository handle it should read and mutate.
pub trait TransactionExecutorFactory: Send + Sync {
    fn create(&self, ctx: ExecutorContext<'_>, track: &mut dyn Repository) -> Box<dyn TransactionExecutor>;
}
