use alloy_primitives::B256;

/// Where a transaction landed: the containing block and its index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionLocation {
    pub block_hash: B256,
    pub index: u64,
}

/// Index from transaction hash to the block(s) it was included in. A
/// transaction can appear at more than one location across competing
/// branches before one of them is pruned.
pub trait TransactionStore: Send + Sync {
    fn put(&self, tx_hash: B256, location: TransactionLocation);

    fn get(&self, tx_hash: B256) -> Vec<TransactionLocation>;
}
