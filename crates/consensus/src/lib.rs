//! Structural and semantic validation of candidate blocks (component C2):
//! header rule delegation, transaction-trie root recomputation, per-sender
//! nonce sequencing, and uncle validation.

mod uncles;
mod validator;

pub use validator::Validator;
