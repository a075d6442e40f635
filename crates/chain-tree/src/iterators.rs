use alloy_primitives::B256;
use reth_chain_primitives::{Block, BlockBody, Header};
use reth_chain_storage_api::BlockStore;

/// Capability the header iterator needs from the core: canonical lookup by
/// number plus a cheap way to detect that the canonical chain moved under
/// it. Modelled as a standalone trait rather than a back-reference to
/// `BlockchainTree` so the iterator can outlive any one lock acquisition on
/// the core.
pub trait ChainView {
    fn get_chain_block_by_number(&self, number: u64) -> Option<Block>;

    /// Highest canonical block number at the moment of the call.
    fn best_block_number(&self) -> u64;

    /// Monotonically increasing counter bumped every time the canonical
    /// chain changes (a successful `IMPORTED_BEST`). Used to detect that the
    /// chain moved between two logically adjacent reads.
    fn chain_version(&self) -> u64;
}

/// Raised when the canonical chain changed between two reads inside a
/// single iteration step. Rust's `Iterator` has no separate `hasNext`/`next`
/// pair to race between, so this folds the source's concurrent-modification
/// contract into a single version check performed on every `next()` call.
#[derive(Debug, thiserror::Error)]
#[error("canonical chain changed during header iteration")]
pub struct ConcurrentModification;

/// Lazily enumerates canonical headers starting at a given position,
/// stepping by `skip + 1` per call in the direction given by `reverse`.
pub struct HeaderIterator<'a> {
    view: &'a dyn ChainView,
    step: u64,
    reverse: bool,
    remaining: u64,
    cursor: Option<u64>,
    version: u64,
}

impl<'a> HeaderIterator<'a> {
    /// `start_hash`, if given, must match the canonical block at
    /// `start_number` or the iterator is immediately empty — this is the
    /// "addressed by hash but not on the canonical chain" case.
    pub fn new(
        view: &'a dyn ChainView,
        start_hash: Option<B256>,
        start_number: u64,
        skip: u64,
        limit: u64,
        reverse: bool,
    ) -> Self {
        let version = view.chain_version();

        let cursor = match start_hash {
            Some(hash) => match view.get_chain_block_by_number(start_number) {
                Some(canonical) if canonical.hash() == hash => Some(start_number),
                _ => None,
            },
            None => Some(start_number),
        };
        let cursor = if limit == 0 { None } else { cursor };

        Self { view, step: skip + 1, reverse, remaining: limit, cursor, version }
    }
}

impl<'a> Iterator for HeaderIterator<'a> {
    type Item = Result<Header, ConcurrentModification>;

    fn next(&mut self) -> Option<Self::Item> {
        let number = self.cursor?;

        if self.view.chain_version() != self.version {
            self.cursor = None;
            return Some(Err(ConcurrentModification));
        }

        let block = self.view.get_chain_block_by_number(number)?;
        self.remaining -= 1;

        self.cursor = if self.remaining == 0 {
            None
        } else if self.reverse {
            number.checked_sub(self.step)
        } else {
            let candidate = number + self.step;
            (candidate <= self.view.best_block_number()).then_some(candidate)
        };

        Some(Ok(block.header))
    }
}

/// Yields encoded block bodies for `hashes` in the order given, stopping at
/// the first hash the block store doesn't recognize.
pub struct BodyIterator<'a> {
    block_store: &'a dyn BlockStore,
    hashes: std::vec::IntoIter<B256>,
    exhausted: bool,
}

impl<'a> BodyIterator<'a> {
    pub fn new(block_store: &'a dyn BlockStore, hashes: Vec<B256>) -> Self {
        Self { block_store, hashes: hashes.into_iter(), exhausted: false }
    }
}

impl<'a> Iterator for BodyIterator<'a> {
    type Item = BlockBody;

    fn next(&mut self) -> Option<BlockBody> {
        if self.exhausted {
            return None;
        }
        let hash = self.hashes.next()?;
        match self.block_store.get_block_by_hash(hash) {
            Some(block) => Some(block.body),
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use reth_chain_primitives::BlockBody as Body;
    use std::collections::HashMap;

    struct FakeView {
        blocks: HashMap<u64, Block>,
        best: u64,
        version: u64,
    }
    impl ChainView for FakeView {
        fn get_chain_block_by_number(&self, number: u64) -> Option<Block> {
            self.blocks.get(&number).cloned()
        }
        fn best_block_number(&self) -> u64 {
            self.best
        }
        fn chain_version(&self) -> u64 {
            self.version
        }
    }

    fn block_at(number: u64) -> Block {
        Block { header: Header { number, ..Default::default() }, body: Body::default() }
    }

    #[test]
    fn limit_zero_yields_nothing() {
        let view = FakeView { blocks: HashMap::from([(0, block_at(0))]), best: 0, version: 0 };
        let mut iter = HeaderIterator::new(&view, None, 0, 0, 0, false);
        assert!(iter.next().is_none());
    }

    #[test]
    fn skip_zero_returns_consecutive_headers() {
        let blocks = (0..=3).map(|n| (n, block_at(n))).collect();
        let view = FakeView { blocks, best: 3, version: 0 };
        let mut iter = HeaderIterator::new(&view, None, 0, 0, 10, false);
        let numbers: Vec<u64> = std::iter::from_fn(|| iter.next()).map(|r| r.unwrap().number).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3]);
    }

    #[test]
    fn hash_mismatch_against_canonical_is_empty() {
        let mut canonical = block_at(5);
        canonical.header.extra_data = vec![1].into();
        let view = FakeView { blocks: HashMap::from([(5, canonical)]), best: 5, version: 0 };
        let mismatched_hash = B256::repeat_byte(0xFF);
        let mut iter = HeaderIterator::new(&view, Some(mismatched_hash), 5, 0, 10, false);
        assert!(iter.next().is_none());
    }

    #[test]
    fn body_iterator_stops_at_first_missing_hash() {
        struct OneBlockStore(B256);
        impl BlockStore for OneBlockStore {
            fn is_block_exist(&self, hash: B256) -> bool {
                hash == self.0
            }
            fn get_block_by_hash(&self, hash: B256) -> Option<Block> {
                (hash == self.0).then(|| block_at(1))
            }
            fn get_chain_block_by_number(&self, _number: u64) -> Option<Block> {
                None
            }
            fn get_blocks_by_number(&self, _number: u64) -> Vec<Block> {
                vec![]
            }
            fn get_best_block(&self) -> Option<Block> {
                None
            }
            fn get_max_number(&self) -> u64 {
                1
            }
            fn get_total_difficulty_for_hash(&self, _hash: B256) -> Option<U256> {
                None
            }
            fn save_block(&self, _block: &Block, _total_difficulty: U256, _on_main_chain: bool) {}
            fn re_branch(&self, _block: &Block) {}
            fn get_list_hashes_end_with(&self, _hash: B256, _qty: u64) -> Vec<B256> {
                vec![]
            }
        }

        let known = B256::repeat_byte(0x01);
        let unknown = B256::repeat_byte(0x02);
        let store = OneBlockStore(known);
        let bodies: Vec<_> = BodyIterator::new(&store, vec![known, unknown, known]).collect();
        assert_eq!(bodies.len(), 1);
    }
}
