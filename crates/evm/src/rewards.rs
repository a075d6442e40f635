use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use reth_chain_primitives::{Block, BlockchainConfig, MAGIC_REWARD_OFFSET};
use reth_chain_storage_api::Repository;

/// Computes and credits block and uncle rewards, returning the per-coinbase
/// reward mapping reported to callers.
///
/// `total_fees` is the sum of gas fees already credited to the block's
/// coinbase by the transaction executor; it is folded into the *reported*
/// miner entry but is never itself applied to `repo` here — the executor
/// already applied it. The repository mutation for the miner is
/// `minerReward` alone; this split looks asymmetric on purpose and must not
/// be "corrected" to credit the repository with the reported total.
pub fn distribute_rewards(
    config: &dyn BlockchainConfig,
    block: &Block,
    repo: &mut dyn Repository,
    total_fees: U256,
) -> HashMap<Address, U256> {
    let block_reward = config.block_reward(block.header.number);
    let inclusion_reward = block_reward / U256::from(32u8);
    let mut rewards: HashMap<Address, U256> = HashMap::new();

    for uncle in &block.body.ommers {
        let generations = block.header.number.saturating_sub(uncle.number);
        let multiplier = MAGIC_REWARD_OFFSET.saturating_sub(generations);
        let uncle_reward = block_reward * U256::from(multiplier) / U256::from(MAGIC_REWARD_OFFSET);

        *rewards.entry(uncle.beneficiary).or_insert(U256::ZERO) += uncle_reward;
        repo.add_balance(uncle.beneficiary, uncle_reward);
    }

    let miner_reward = block_reward + inclusion_reward * U256::from(block.body.ommers.len() as u64);
    *rewards.entry(block.header.beneficiary).or_insert(U256::ZERO) += miner_reward + total_fees;
    repo.add_balance(block.header.beneficiary, miner_reward);

    rewards
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use reth_chain_primitives::{BlockBody, ForkRules, Header};

    #[derive(Debug, Default)]
    struct RecordingRepository {
        credits: HashMap<Address, U256>,
    }
    impl Repository for RecordingRepository {
        fn get_root(&self) -> B256 {
            B256::ZERO
        }
        fn snapshot_to(&self, _root: B256) -> Box<dyn Repository> {
            Box::new(RecordingRepository::default())
        }
        fn start_tracking(&self) -> Box<dyn Repository> {
            Box::new(RecordingRepository::default())
        }
        fn commit(&mut self) {}
        fn rollback(&mut self) {}
        fn get_nonce(&self, _address: Address) -> u64 {
            0
        }
        fn add_balance(&mut self, address: Address, delta: U256) {
            *self.credits.entry(address).or_insert(U256::ZERO) += delta;
        }
        fn sub_balance(&mut self, address: Address, delta: U256) {
            *self.credits.entry(address).or_insert(U256::ZERO) -= delta;
        }
    }

    #[test]
    fn miner_reward_excludes_fees_in_repository_but_includes_them_in_report() {
        let config = ForkRules::mainnet_like(U256::from(5_000_000_000_000_000_000u128));
        let beneficiary = Address::repeat_byte(0xAA);
        let header = Header { number: 10, beneficiary, ..Default::default() };
        let block = Block { header, body: BlockBody::default() };
        let mut repo = RecordingRepository::default();

        let fees = U256::from(1_000u64);
        let rewards = distribute_rewards(&config, &block, &mut repo, fees);

        let block_reward = config.block_reward(10);
        assert_eq!(rewards[&beneficiary], block_reward + fees);
        assert_eq!(repo.credits[&beneficiary], block_reward);
    }

    #[test]
    fn uncle_one_generation_back_gets_discounted_reward() {
        let config = ForkRules::mainnet_like(U256::from(32u8)); // divisible, easy arithmetic
        let beneficiary = Address::repeat_byte(0x01);
        let uncle_beneficiary = Address::repeat_byte(0x02);
        let uncle = Header { number: 9, beneficiary: uncle_beneficiary, ..Default::default() };
        let header = Header { number: 10, beneficiary, ..Default::default() };
        let block = Block { header, body: BlockBody { transactions: vec![], ommers: vec![uncle] } };
        let mut repo = RecordingRepository::default();

        let rewards = distribute_rewards(&config, &block, &mut repo, U256::ZERO);

        // generations = 1, multiplier = 8 - 1 = 7, reward = 32 * 7 / 8 = 28
        assert_eq!(rewards[&uncle_beneficiary], U256::from(28u8));
    }
}
