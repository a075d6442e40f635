use alloy_primitives::U256;
use reth_chain_primitives::Block;
use reth_chain_storage_api::Repository;

/// The canonical tip as a single by-value unit: a repository handle, the
/// block it roots at, and the chain's total difficulty at that block.
///
/// This replaces a push/pop stack of saved-state records — a speculative
/// fork import builds one of these from a snapshot and either becomes the
/// core's new tip (by being moved into place) or is simply dropped; there is
/// no separate restore step because the previous tip was never mutated.
pub(crate) struct ImportTransaction {
    pub repository: Box<dyn Repository>,
    pub best_block: Block,
    pub total_difficulty: U256,
}

impl ImportTransaction {
    pub fn new(repository: Box<dyn Repository>, best_block: Block, total_difficulty: U256) -> Self {
        Self { repository, best_block, total_difficulty }
    }

    /// Snapshots this transaction's repository onto a new root, producing an
    /// isolated transaction for a speculative fork import rooted at
    /// `fork_block`. The parent transaction (`self`) is untouched.
    pub fn fork_at(&self, fork_block: Block, fork_total_difficulty: U256) -> Self {
        let repository = self.repository.snapshot_to(fork_block.header.state_root);
        Self::new(repository, fork_block, fork_total_difficulty)
    }
}
