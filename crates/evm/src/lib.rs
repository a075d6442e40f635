//! Transaction-execution driver (C3) and reward distributor (C4).
//!
//! Neither component owns an EVM; both drive the collaborator traits in
//! `reth-chain-storage-api` and only know the bookkeeping — gas totals,
//! receipts, rewards — around whatever the external executor does.

mod driver;
mod rewards;

pub use driver::apply_block;
pub use rewards::distribute_rewards;
