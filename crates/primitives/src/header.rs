use alloy_primitives::{Address, Bloom, Bytes, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

/// Ethereum block header.
///
/// Field names follow the formal notation in the Yellow Paper and the
/// conventional naming used across the Rust Ethereum ecosystem. A header is
/// immutable once constructed; `state_root`, `receipts_root`, `logs_bloom`,
/// `gas_used` and `transactions_root` are only meaningful after the block
/// that contains it has been executed.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, RlpEncodable, RlpDecodable,
)]
pub struct Header {
    /// Keccak 256-bit hash of the parent block's header.
    pub parent_hash: B256,
    /// Keccak 256-bit hash of the RLP-encoded list of this block's ommer headers.
    pub ommers_hash: B256,
    /// Address to which all fees collected from this block are transferred.
    pub beneficiary: Address,
    /// Root hash of the state trie, after all transactions are executed.
    pub state_root: B256,
    /// Root hash of the trie populated with this block's transactions.
    pub transactions_root: B256,
    /// Root hash of the trie populated with this block's transaction receipts.
    pub receipts_root: B256,
    /// Bloom filter composed from the logs of every receipt in this block.
    pub logs_bloom: Bloom,
    /// Difficulty level of this block.
    pub difficulty: U256,
    /// Number of ancestor blocks; genesis has number zero.
    pub number: u64,
    /// Maximum gas expenditure permitted in this block.
    pub gas_limit: u64,
    /// Total gas used by the transactions in this block.
    pub gas_used: u64,
    /// Unix timestamp of this block's inception.
    pub timestamp: u64,
    /// Arbitrary data, 32 bytes or fewer.
    pub extra_data: Bytes,
    /// Proof-of-work mix hash.
    pub mix_hash: B256,
    /// Proof-of-work nonce.
    pub nonce: u64,
}

impl Header {
    /// Hash of this header, used as the block's canonical identifier.
    ///
    /// Real RLP+keccak hashing is delegated to [`crate::trie::keccak_rlp`] so
    /// the same hashing primitive backs both header identity and trie roots.
    pub fn hash(&self) -> B256 {
        crate::trie::keccak_rlp(self)
    }

    /// Whether this header identifies the genesis block.
    pub const fn is_genesis(&self) -> bool {
        self.number == 0
    }
}
