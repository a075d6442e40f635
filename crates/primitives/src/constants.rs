use alloy_primitives::{b256, B256};

/// Root hash of an empty Merkle-Patricia trie, i.e. `keccak256(rlp(empty_string))`.
///
/// Used as the transaction-trie root of a block with no transactions.
pub const EMPTY_ROOT_HASH: B256 =
    b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

/// `keccak256(rlp([]))` — the hash of an RLP-encoded empty list.
///
/// Used both as the empty-uncles hash and, since an empty receipts trie is
/// keyed the same way as an empty tx trie, equals [`EMPTY_ROOT_HASH`].
pub const EMPTY_LIST_HASH: B256 = EMPTY_ROOT_HASH;

/// Alias kept for readability at call sites that check the receipts trie.
pub const EMPTY_RECEIPTS_HASH: B256 = EMPTY_ROOT_HASH;

/// Divisor used when converting the gap between an uncle's number and the
/// including block's number into a reward fraction: `BLOCK_REWARD * (8 +
/// uncle.number - block.number) / 8`.
pub const MAGIC_REWARD_OFFSET: u64 = 8;

/// Maximum number of uncle headers permitted in a single block.
pub const UNCLE_LIST_LIMIT: usize = 2;

/// Number of generations back an uncle's parent may be from the including
/// block before it is rejected as too old.
pub const UNCLE_GENERATION_LIMIT: u64 = 7;
