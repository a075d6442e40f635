use crate::{header::Header, transaction::Transaction};
use alloy_primitives::B256;
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

/// The non-header contents of a block: its transactions and ommer headers.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, RlpEncodable, RlpDecodable,
)]
pub struct BlockBody {
    pub transactions: Vec<Transaction>,
    pub ommers: Vec<Header>,
}

/// An Ethereum block: an immutable header paired with its body.
///
/// Once constructed a block is never mutated by the core — validation,
/// execution and fork-choice all take `&Block` and produce new values
/// ([`crate::BlockSummary`], updated total difficulty) rather than editing
/// the block in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable)]
pub struct Block {
    pub header: Header,
    pub body: BlockBody,
}

impl Block {
    /// Convenience accessor mirroring `header.hash()`.
    pub fn hash(&self) -> B256 {
        self.header.hash()
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn parent_hash(&self) -> B256 {
        self.header.parent_hash
    }

    pub const fn is_genesis(&self) -> bool {
        self.header.is_genesis()
    }

    /// Whether `self` is the direct parent of `child`.
    pub fn is_parent_of(&self, child: &Block) -> bool {
        child.header.parent_hash == self.hash() && child.header.number == self.header.number + 1
    }
}
