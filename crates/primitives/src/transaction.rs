use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

/// A signed Ethereum transaction as it appears in a block body.
///
/// Signature recovery is an external, crypto-library concern (out of scope
/// for this crate — see `spec.md` §1); what the chain core needs is the
/// already-recovered sender, carried alongside the transaction as a
/// [`RecoveredTransaction`].
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable,
)]
pub struct Transaction {
    /// Sender's transaction count at signing time.
    pub nonce: u64,
    /// Wei paid per unit of gas.
    pub gas_price: u128,
    /// Maximum gas this transaction may consume.
    pub gas_limit: u64,
    /// Recipient address, or `None` for contract creation.
    pub to: Option<Address>,
    /// Wei transferred to `to`, or endowment for contract creation.
    pub value: U256,
    /// Call data / init code.
    pub input: Bytes,
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

/// A [`Transaction`] together with its hash and recovered sender.
///
/// Constructing one is the caller's (executor-external) responsibility;
/// the chain core only ever consumes already-recovered transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredTransaction {
    pub transaction: Transaction,
    pub hash: B256,
    pub sender: Address,
}

impl RecoveredTransaction {
    /// Wraps a transaction with its hash and a pre-recovered sender.
    pub const fn new(transaction: Transaction, hash: B256, sender: Address) -> Self {
        Self { transaction, hash, sender }
    }

    pub const fn nonce(&self) -> u64 {
        self.transaction.nonce
    }

    pub const fn gas_limit(&self) -> u64 {
        self.transaction.gas_limit
    }
}
