use crate::{Address, U256};
use std::collections::HashMap;

/// Per-fork chain parameters consumed by the validator, executor and reward
/// distributor.
///
/// Loading a `BlockchainConfig` from a genesis file or CLI flag is out of
/// scope (spec.md §1); this trait only captures the in-memory shape the core
/// reads from at block-import time, matching how `reth_primitives::ChainSpec`
/// is consulted in the teacher's executor (`chain_spec.fork(Hardfork::X)`).
pub trait BlockchainConfig: Send + Sync + std::fmt::Debug {
    /// Miner block reward (wei) active at `block_number`.
    fn block_reward(&self, block_number: u64) -> U256;

    /// Whether EIP-658 (status-bit receipts) is active at `block_number`.
    fn eip658_enabled(&self, block_number: u64) -> bool;

    /// Extra-data policy: maximum permitted length in bytes.
    fn max_extra_data_len(&self, block_number: u64) -> usize;

    /// Scheduled hard-fork state transfers (e.g. the DAO bailout) that must
    /// be applied before any transaction in the block named by
    /// `block_number` executes. Returns the set of (debit, credit) address
    /// pairs with amounts to move, or an empty map outside a transition
    /// block.
    fn hard_fork_transfers(&self, block_number: u64) -> HashMap<Address, U256>;

    /// Destination address for funds drained by `hard_fork_transfers`, if
    /// this block number is exactly the transfer's activation block.
    fn hard_fork_beneficiary(&self, block_number: u64) -> Option<Address>;
}

/// A minimal, ordered set of block-number-keyed rules covering the
/// Frontier-through-Byzantium-style transitions this core cares about:
/// the block reward schedule and the EIP-658 activation height. Bundled as
/// the crate's only built-in [`BlockchainConfig`] — real chain specs are an
/// external collaborator's concern.
#[derive(Debug, Clone)]
pub struct ForkRules {
    /// `(activation_block, reward)` pairs, sorted ascending by block number.
    /// The reward active at `n` is that of the last entry with
    /// `activation_block <= n`.
    pub reward_schedule: Vec<(u64, U256)>,
    /// Block number at which EIP-658 activates.
    pub eip658_block: u64,
    /// Optional DAO-style irregular state transfer.
    pub dao_fork: Option<DaoFork>,
}

/// A one-shot balance transfer scheduled at a specific block, modeling the
/// 2016 DAO hard fork: balances are drained from a fixed set of accounts and
/// credited to a single beneficiary.
#[derive(Debug, Clone)]
pub struct DaoFork {
    pub activation_block: u64,
    pub drained_accounts: HashMap<Address, U256>,
    pub beneficiary: Address,
}

impl ForkRules {
    /// Mainnet-shaped defaults: constant 5 ETH block reward, EIP-658 active
    /// from block 0, no DAO transfer. Callers that need historical accuracy
    /// construct their own [`ForkRules`] instead.
    pub fn mainnet_like(block_reward: U256) -> Self {
        Self { reward_schedule: vec![(0, block_reward)], eip658_block: 0, dao_fork: None }
    }
}

impl BlockchainConfig for ForkRules {
    fn block_reward(&self, block_number: u64) -> U256 {
        self.reward_schedule
            .iter()
            .rev()
            .find(|(activation, _)| *activation <= block_number)
            .map(|(_, reward)| *reward)
            .unwrap_or(U256::ZERO)
    }

    fn eip658_enabled(&self, block_number: u64) -> bool {
        block_number >= self.eip658_block
    }

    fn max_extra_data_len(&self, _block_number: u64) -> usize {
        32
    }

    fn hard_fork_transfers(&self, block_number: u64) -> HashMap<Address, U256> {
        match &self.dao_fork {
            Some(fork) if fork.activation_block == block_number => fork.drained_accounts.clone(),
            _ => HashMap::new(),
        }
    }

    fn hard_fork_beneficiary(&self, block_number: u64) -> Option<Address> {
        self.dao_fork
            .as_ref()
            .filter(|fork| fork.activation_block == block_number)
            .map(|fork| fork.beneficiary)
    }
}
