use alloy_primitives::{keccak256, Address, Bloom, Bytes, B256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

/// A single EVM log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// Pre/post-EIP-658 receipt outcome.
///
/// Before Byzantium a receipt carried the post-transaction state root;
/// EIP-658 replaced that with a success/failure status bit. The core must
/// pick the right representation per the active [`crate::BlockchainConfig`]
/// and never conflate the two (spec.md §6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptOutcome {
    PostState(B256),
    Status(bool),
}

/// Outcome of executing a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub outcome: ReceiptOutcome,
    pub cumulative_gas_used: u64,
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Whether the transaction succeeded, if that information is available
    /// from the receipt's representation.
    pub fn is_successful(&self) -> bool {
        match self.outcome {
            ReceiptOutcome::Status(success) => success,
            ReceiptOutcome::PostState(_) => true,
        }
    }

    /// Bloom filter for this receipt's logs, computed with the standard
    /// `m3:2048` algorithm: each log contributes its address and topics,
    /// each hashed and folded into three bit positions of a 2048-bit filter.
    pub fn bloom(&self) -> Bloom {
        let mut buf = [0u8; 256];
        for log in &self.logs {
            accrue_bloom(&mut buf, log.address.as_slice());
            for topic in &log.topics {
                accrue_bloom(&mut buf, topic.as_slice());
            }
        }
        Bloom::from(buf)
    }
}

/// Folds `data`'s keccak hash into `buf` at the three bit positions the
/// `m3:2048` algorithm prescribes.
fn accrue_bloom(buf: &mut [u8; 256], data: &[u8]) {
    let hash = keccak256(data);
    for i in [0usize, 2, 4] {
        let bit = u16::from_be_bytes([hash[i], hash[i + 1]]) & 0x7ff;
        let byte_index = 255 - (bit / 8) as usize;
        let bit_index = bit % 8;
        buf[byte_index] |= 1 << bit_index;
    }
}

/// ORs a set of per-transaction blooms into the header-level bloom filter.
pub fn combine_blooms<'a>(blooms: impl IntoIterator<Item = &'a Bloom>) -> Bloom {
    blooms.into_iter().fold(Bloom::ZERO, |acc, b| acc | *b)
}
