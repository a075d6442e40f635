//! Block connection, fork-choice, and chain-query core (components C1, C5,
//! C6). Validation (C2), execution (C3) and reward distribution (C4) live
//! in `reth-chain-consensus` and `reth-chain-evm`; this crate wires them
//! together around the canonical tip and its single-writer lock.

mod add;
pub mod error;
mod importer;
pub mod iterators;
mod transaction;

pub use error::ChainError;
pub use importer::{BlockchainTree, DiagnosticsConfig, ImportResult};
