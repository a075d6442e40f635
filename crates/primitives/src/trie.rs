//! Trie-root helpers.
//!
//! The core does not implement or own a Merkle-Patricia-Trie (that's the
//! `Repository`'s job, external per spec.md §1) but it must independently
//! recompute the *ordered* transaction and receipt tries to check a
//! candidate block's header against its body (spec.md §4.2/§4.3/§6): both
//! are keyed by `RLP(i)` for index `i`, which is exactly what
//! `alloy_trie::root::ordered_trie_root` computes.

use crate::{constants::EMPTY_ROOT_HASH, receipt::Receipt, transaction::Transaction};
use alloy_primitives::{keccak256, B256};
use alloy_rlp::Encodable;

/// Hashes the RLP encoding of `item`.
pub fn keccak_rlp<T: Encodable>(item: &T) -> B256 {
    let mut buf = Vec::new();
    item.encode(&mut buf);
    keccak256(buf)
}

/// Recomputes the transaction-trie root for an ordered list of transactions,
/// keyed by `RLP(i)` as spec.md §4.2 requires. An empty list yields the
/// canonical empty-trie hash.
pub fn calculate_transactions_root(transactions: &[Transaction]) -> B256 {
    if transactions.is_empty() {
        return EMPTY_ROOT_HASH;
    }
    let encoded: Vec<Vec<u8>> = transactions
        .iter()
        .map(|tx| {
            let mut buf = Vec::new();
            tx.encode(&mut buf);
            buf
        })
        .collect();
    alloy_trie::root::ordered_trie_root(encoded.iter().map(|v| v.as_slice()))
}

/// Per-receipt RLP encoding used for the receipts trie: a 2-element list of
/// `(outcome-field, cumulative_gas_used, logs_bloom, logs)` collapsed to the
/// pre/post-EIP-658 shape named in spec.md §6. Bloom is recomputed from logs
/// rather than stored, so it can never drift from the logs it summarizes.
fn encode_receipt_for_trie(receipt: &Receipt) -> Vec<u8> {
    use crate::receipt::ReceiptOutcome;
    use alloy_rlp::Header as RlpHeader;

    let bloom = receipt.bloom();
    let mut payload = Vec::new();
    match receipt.outcome {
        ReceiptOutcome::PostState(root) => root.encode(&mut payload),
        ReceiptOutcome::Status(success) => (success as u64).encode(&mut payload),
    }
    receipt.cumulative_gas_used.encode(&mut payload);
    bloom.encode(&mut payload);
    receipt.logs.encode(&mut payload);

    let list_header = RlpHeader { list: true, payload_length: payload.len() };
    let mut out = Vec::new();
    list_header.encode(&mut out);
    out.extend_from_slice(&payload);
    out
}

/// Recomputes the receipts-trie root, keyed by `RLP(i)`. An empty list
/// yields the canonical empty-trie hash (equal to the empty tx-trie hash).
pub fn calculate_receipts_root(receipts: &[Receipt]) -> B256 {
    if receipts.is_empty() {
        return EMPTY_ROOT_HASH;
    }
    let encoded: Vec<Vec<u8>> = receipts.iter().map(encode_receipt_for_trie).collect();
    alloy_trie::root::ordered_trie_root(encoded.iter().map(|v| v.as_slice()))
}

/// `keccak256(rlp(uncle_headers))` — the ommers-hash check named in
/// spec.md §4.2.
pub fn calculate_ommers_hash(ommers: &[crate::header::Header]) -> B256 {
    if ommers.is_empty() {
        return crate::constants::EMPTY_LIST_HASH;
    }
    let mut buf = Vec::new();
    ommers.encode(&mut buf);
    keccak256(buf)
}
