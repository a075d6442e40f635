use std::collections::HashSet;

use alloy_primitives::B256;
use reth_chain_primitives::{
    trie::calculate_ommers_hash, Block, UNCLE_GENERATION_LIMIT, UNCLE_LIST_LIMIT,
};
use reth_chain_storage_api::{BlockStore, ParentBlockHeaderValidator};

/// Validates `block`'s uncle list: the ommers-hash against the header, the
/// per-block cap, and for each uncle — header validity, generation-window
/// ancestry, and uniqueness within that window.
pub fn validate_uncles(
    parent_validator: &dyn ParentBlockHeaderValidator,
    block_store: &dyn BlockStore,
    block: &Block,
) -> bool {
    let ommers_hash = calculate_ommers_hash(&block.body.ommers);
    if ommers_hash != block.header.ommers_hash {
        tracing::debug!(block = %block.hash(), "ommers-hash mismatch");
        return false;
    }

    if block.body.ommers.len() > UNCLE_LIST_LIMIT {
        tracing::debug!(block = %block.hash(), "too many uncles");
        return false;
    }

    if block.body.ommers.is_empty() {
        return true;
    }

    let (ancestors, used_uncles) = generation_window(block_store, block);

    for uncle in &block.body.ommers {
        let uncle_hash = uncle.hash();

        if ancestors.contains(&uncle_hash) {
            tracing::debug!(block = %block.hash(), uncle = %uncle_hash, "uncle is an ancestor");
            return false;
        }
        if used_uncles.contains(&uncle_hash) {
            tracing::debug!(block = %block.hash(), uncle = %uncle_hash, "uncle not unique");
            return false;
        }
        if !ancestors.contains(&uncle.parent_hash) {
            tracing::debug!(block = %block.hash(), uncle = %uncle_hash, "uncle parent not a recent ancestor");
            return false;
        }

        let Some(uncle_parent) = block_store.get_block_by_hash(uncle.parent_hash) else {
            tracing::debug!(block = %block.hash(), uncle = %uncle_hash, "uncle parent unknown");
            return false;
        };
        if uncle_parent.header.number + UNCLE_GENERATION_LIMIT < block.header.number {
            tracing::debug!(block = %block.hash(), uncle = %uncle_hash, "uncle outside generation window");
            return false;
        }
        if !parent_validator.validate(uncle, &uncle_parent.header) {
            tracing::debug!(block = %block.hash(), uncle = %uncle_hash, "uncle header invalid");
            return false;
        }
    }

    true
}

/// Ancestors of `block` (exclusive), and every uncle already used by them,
/// walked backward from `block.header.parent_hash` up to
/// `UNCLE_GENERATION_LIMIT + 1` generations.
fn generation_window(block_store: &dyn BlockStore, block: &Block) -> (HashSet<B256>, HashSet<B256>) {
    let mut ancestors = HashSet::new();
    let mut used_uncles = HashSet::new();
    let mut cursor = block.header.parent_hash;

    for _ in 0..=UNCLE_GENERATION_LIMIT {
        let Some(current) = block_store.get_block_by_hash(cursor) else { break };
        let current_hash = current.hash();
        ancestors.insert(current_hash);
        used_uncles.extend(current.body.ommers.iter().map(|u| u.hash()));
        if current.is_genesis() {
            break;
        }
        cursor = current.header.parent_hash;
    }

    (ancestors, used_uncles)
}
