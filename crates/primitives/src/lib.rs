//! Core data types for the block-import and chain-management core.
//!
//! This crate intentionally knows nothing about how blocks are executed,
//! persisted or gossiped — it only defines the consensus-critical shapes
//! (header, block, receipt, reward summary) and the handful of trie helpers
//! needed to recompute their roots byte-for-byte.

mod block;
mod config;
mod constants;
mod header;
mod receipt;
mod summary;
mod transaction;
pub mod trie;

pub use alloy_primitives::{Address, Bloom, Bytes, B256, U256};

pub use block::{Block, BlockBody};
pub use config::{BlockchainConfig, ForkRules};
pub use constants::{
    EMPTY_LIST_HASH, EMPTY_RECEIPTS_HASH, EMPTY_ROOT_HASH, MAGIC_REWARD_OFFSET,
    UNCLE_GENERATION_LIMIT, UNCLE_LIST_LIMIT,
};
pub use header::Header;
pub use receipt::{combine_blooms, Log, Receipt, ReceiptOutcome};
pub use summary::{BlockSummary, TransactionSummary};
pub use transaction::{RecoveredTransaction, Transaction};
