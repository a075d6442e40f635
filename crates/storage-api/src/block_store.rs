use alloy_primitives::{B256, U256};
use reth_chain_primitives::Block;

/// The persistent block index: hash/number lookups, total-difficulty
/// bookkeeping, and the rebranch operation that flips the main-chain flag
/// from one branch to another.
pub trait BlockStore: Send + Sync {
    /// Whether a block with this hash has been persisted (on any branch).
    fn is_block_exist(&self, hash: B256) -> bool;

    fn get_block_by_hash(&self, hash: B256) -> Option<Block>;

    /// The block at `number` on the canonical chain, if any.
    fn get_chain_block_by_number(&self, number: u64) -> Option<Block>;

    /// Every stored block at `number`, canonical or not.
    fn get_blocks_by_number(&self, number: u64) -> Vec<Block>;

    fn get_best_block(&self) -> Option<Block>;

    /// Highest block number stored on any branch.
    fn get_max_number(&self) -> u64;

    fn get_total_difficulty_for_hash(&self, hash: B256) -> Option<U256>;

    /// Persists `block` with its total difficulty, flagged as main-chain or
    /// not per `on_main_chain`.
    fn save_block(&self, block: &Block, total_difficulty: U256, on_main_chain: bool);

    /// Flips the main-chain designation from the current canonical branch to
    /// the branch ending at `block`, down to their lowest common ancestor.
    fn re_branch(&self, block: &Block);

    /// Walks `qty` canonical ancestors backward from `hash`, inclusive.
    fn get_list_hashes_end_with(&self, hash: B256, qty: u64) -> Vec<B256>;
}
