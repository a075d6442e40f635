use std::collections::HashMap;

use alloy_primitives::Address;
use reth_chain_primitives::{trie::calculate_transactions_root, Block, Header, RecoveredTransaction};
use reth_chain_storage_api::{BlockStore, ParentBlockHeaderValidator, Repository};

use crate::uncles::validate_uncles;

/// Validates a candidate block against its parent and against the sender's
/// repository-tracked nonce. Failures are logged and returned as `false`;
/// this type never panics or propagates an error for an invalid block —
/// only a malformed collaborator response does.
pub struct Validator<'a> {
    parent_validator: &'a dyn ParentBlockHeaderValidator,
}

impl<'a> Validator<'a> {
    pub fn new(parent_validator: &'a dyn ParentBlockHeaderValidator) -> Self {
        Self { parent_validator }
    }

    /// Checks in order, short-circuiting on the first failure: genesis
    /// exception, parent-header rule, transaction-trie root, then per-sender
    /// nonce sequencing.
    ///
    /// `recovered` must contain one entry per transaction in
    /// `block.body.transactions`, in order; a length mismatch is treated as
    /// an unrecoverable sender and fails validation.
    pub fn is_valid(
        &self,
        repo: &dyn Repository,
        block: &Block,
        parent: Option<&Header>,
        recovered: &[RecoveredTransaction],
    ) -> bool {
        if block.is_genesis() {
            return true;
        }

        let Some(parent) = parent else {
            tracing::debug!(block = %block.hash(), "rejecting block with unknown parent");
            return false;
        };

        if !self.parent_validator.validate(&block.header, parent) {
            tracing::debug!(block = %block.hash(), "parent header rule rejected block");
            return false;
        }

        if recovered.len() != block.body.transactions.len() {
            tracing::debug!(
                block = %block.hash(),
                "sender recovery failed for at least one transaction"
            );
            return false;
        }

        let expected_root = calculate_transactions_root(&block.body.transactions);
        if expected_root != block.header.transactions_root {
            tracing::debug!(
                block = %block.hash(),
                expected = %expected_root,
                actual = %block.header.transactions_root,
                "transaction-trie root mismatch"
            );
            return false;
        }

        let mut next_nonce: HashMap<Address, u64> = HashMap::new();
        for tx in recovered {
            let expected = *next_nonce
                .entry(tx.sender)
                .or_insert_with(|| repo.get_nonce(tx.sender));
            if tx.nonce() != expected {
                tracing::debug!(
                    block = %block.hash(),
                    sender = %tx.sender,
                    expected,
                    actual = tx.nonce(),
                    "transaction nonce out of sequence"
                );
                return false;
            }
            next_nonce.insert(tx.sender, expected + 1);
        }

        true
    }

    /// Delegates to [`crate::uncles::validate_uncles`].
    pub fn is_valid_uncles(&self, block_store: &dyn BlockStore, block: &Block) -> bool {
        validate_uncles(self.parent_validator, block_store, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, B256, U256};
    use reth_chain_primitives::{trie::calculate_transactions_root, BlockBody, Transaction};

    struct AlwaysValidParent;
    impl ParentBlockHeaderValidator for AlwaysValidParent {
        fn validate(&self, _header: &Header, _parent: &Header) -> bool {
            true
        }
    }

    #[derive(Debug, Default)]
    struct FakeRepository;
    impl Repository for FakeRepository {
        fn get_root(&self) -> B256 {
            B256::ZERO
        }
        fn snapshot_to(&self, _root: B256) -> Box<dyn Repository> {
            Box::new(FakeRepository)
        }
        fn start_tracking(&self) -> Box<dyn Repository> {
            Box::new(FakeRepository)
        }
        fn commit(&mut self) {}
        fn rollback(&mut self) {}
        fn get_nonce(&self, _address: Address) -> u64 {
            0
        }
        fn add_balance(&mut self, _address: Address, _delta: U256) {}
        fn sub_balance(&mut self, _address: Address, _delta: U256) {}
    }

    fn tx(nonce: u64) -> Transaction {
        Transaction {
            nonce,
            gas_price: 1,
            gas_limit: 21_000,
            to: Some(Address::ZERO),
            value: U256::ZERO,
            input: Bytes::new(),
            v: 27,
            r: U256::from(1),
            s: U256::from(1),
        }
    }

    #[test]
    fn genesis_short_circuits_to_valid() {
        let parent_validator = AlwaysValidParent;
        let validator = Validator::new(&parent_validator);
        let block = Block { header: Header::default(), body: BlockBody::default() };
        assert!(validator.is_valid(&FakeRepository, &block, None, &[]));
    }

    #[test]
    fn nonce_gap_rejects_block() {
        let parent_validator = AlwaysValidParent;
        let validator = Validator::new(&parent_validator);
        let transactions = vec![tx(0), tx(2)];
        let mut header = Header {
            number: 1,
            transactions_root: calculate_transactions_root(&transactions),
            ..Default::default()
        };
        header.parent_hash = Header::default().hash();
        let block = Block { header, body: BlockBody { transactions: transactions.clone(), ommers: vec![] } };
        let recovered: Vec<_> = transactions
            .into_iter()
            .map(|t| RecoveredTransaction::new(t, B256::ZERO, Address::ZERO))
            .collect();
        let parent = Header::default();
        assert!(!validator.is_valid(&FakeRepository, &block, Some(&parent), &recovered));
    }

    #[test]
    fn tx_trie_root_mismatch_rejects_block() {
        let parent_validator = AlwaysValidParent;
        let validator = Validator::new(&parent_validator);
        let transactions = vec![tx(0)];
        let header = Header { number: 1, transactions_root: B256::repeat_byte(0xAB), ..Default::default() };
        let block = Block { header, body: BlockBody { transactions: transactions.clone(), ommers: vec![] } };
        let recovered: Vec<_> = transactions
            .into_iter()
            .map(|t| RecoveredTransaction::new(t, B256::ZERO, Address::ZERO))
            .collect();
        let parent = Header::default();
        assert!(!validator.is_valid(&FakeRepository, &block, Some(&parent), &recovered));
    }
}
