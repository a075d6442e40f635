use alloy_primitives::{Address, B256, U256};

/// A snapshot-able view of the world state trie.
///
/// The core never owns a trie implementation; it holds exactly one "live"
/// `Repository` handle at a time and swaps it on fork acceptance. `snapshot_to`
/// and `start_tracking` both yield an isolated handle whose mutations are
/// invisible to the parent until `commit` — the former re-roots at an
/// arbitrary state root (used when pushing a speculative fork import), the
/// latter nests one tracking layer on top of the current root (used per
/// transaction inside a block).
pub trait Repository: std::fmt::Debug + Send + Sync {
    /// Current state root of this handle.
    fn get_root(&self) -> B256;

    /// Returns a new, independent handle rooted at `root`.
    fn snapshot_to(&self, root: B256) -> Box<dyn Repository>;

    /// Returns a nested handle tracking mutations on top of this one.
    fn start_tracking(&self) -> Box<dyn Repository>;

    /// Applies this handle's pending mutations to its parent (or to
    /// persistent storage, for the outermost handle).
    fn commit(&mut self);

    /// Discards this handle's pending mutations.
    fn rollback(&mut self);

    /// Next expected nonce for `address`.
    fn get_nonce(&self, address: Address) -> u64;

    /// Credits `address`'s balance by `delta`.
    fn add_balance(&mut self, address: Address, delta: U256);

    /// Debits `address`'s balance by `delta`. Used alongside `add_balance` to
    /// express hard-fork state transfers as a debit/credit pair.
    fn sub_balance(&mut self, address: Address, delta: U256);
}
