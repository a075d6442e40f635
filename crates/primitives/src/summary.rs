use crate::{block::Block, receipt::Receipt};
use alloy_primitives::{Address, U256};
use std::collections::HashMap;

/// Any value produced while executing a transaction that callers besides
/// the receipt/bloom bookkeeping may want — gas used, return data, created
/// contract address, and so on. The chain core treats this opaquely; it is
/// whatever the [`TransactionExecutor`](../reth_chain_storage_api/trait.TransactionExecutor.html)
/// implementation hands back per transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    pub gas_used: u64,
    pub success: bool,
}

/// The outcome of executing a block: the block itself, the rewards credited
/// per coinbase, the ordered receipts, the ordered per-transaction
/// summaries, and — once the import has committed — the resulting total
/// difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub block: Block,
    pub rewards: HashMap<Address, U256>,
    pub receipts: Vec<Receipt>,
    pub summaries: Vec<TransactionSummary>,
    /// Cumulative difficulty of the chain ending at `block`, set once the
    /// import that produced this summary has committed. `None` beforehand.
    pub total_difficulty: Option<U256>,
}

impl BlockSummary {
    pub fn new(
        block: Block,
        rewards: HashMap<Address, U256>,
        receipts: Vec<Receipt>,
        summaries: Vec<TransactionSummary>,
    ) -> Self {
        Self { block, rewards, receipts, summaries, total_difficulty: None }
    }

    /// An empty summary for a block that was not executed (genesis, or
    /// chain-only mode per spec.md §4.3).
    pub fn empty(block: Block) -> Self {
        Self::new(block, HashMap::new(), Vec::new(), Vec::new())
    }

    /// Whether this summary's total difficulty exceeds `other`.
    ///
    /// Panics if called before [`BlockSummary::total_difficulty`] has been
    /// set by a successful commit — comparing an uncommitted summary is a
    /// programming error, not a recoverable condition.
    pub fn better_than(&self, other: U256) -> bool {
        self.total_difficulty.expect("betterThan called before commit set total_difficulty")
            > other
    }

    pub fn total_gas_used(&self) -> u64 {
        self.receipts.last().map_or(0, |r| r.cumulative_gas_used)
    }
}
