use alloy_primitives::U256;
use reth_chain_primitives::{
    Block, BlockSummary, BlockchainConfig, Receipt, ReceiptOutcome, RecoveredTransaction,
    TransactionSummary,
};
use reth_chain_storage_api::{ExecutorContext, ExecutorError, Repository, TransactionExecutorFactory};

/// Applies every transaction in `block`, in order, against `track`, and
/// computes the resulting rewards.
///
/// `recovered` must align index-for-index with `block.body.transactions`
/// (sender recovery is an external concern; the driver never attempts it
/// itself). For the genesis block, or when `chain_only` is set, execution is
/// skipped and an empty summary returned.
///
/// An `ExecutorError` from any transaction aborts the whole block: nothing
/// committed by earlier transactions in this call is rolled back here — that
/// is the importer's job, operating on the outer snapshot `track` was
/// obtained from.
pub fn apply_block(
    track: &mut dyn Repository,
    block: &Block,
    recovered: &[RecoveredTransaction],
    config: &dyn BlockchainConfig,
    executor_factory: &dyn TransactionExecutorFactory,
    chain_only: bool,
) -> Result<BlockSummary, ExecutorError> {
    if block.is_genesis() || chain_only {
        return Ok(BlockSummary::empty(block.clone()));
    }

    apply_hard_fork_transfers(track, block, config);

    let mut total_gas_used = 0u64;
    let mut total_fees = U256::ZERO;
    let mut receipts = Vec::with_capacity(recovered.len());
    let mut summaries = Vec::with_capacity(recovered.len());

    for tx in recovered {
        let mut tx_track = track.start_tracking();

        let ctx = ExecutorContext {
            transaction: tx,
            coinbase: block.header.beneficiary,
            block,
            cumulative_gas_used: total_gas_used,
        };
        let mut executor = executor_factory.create(ctx, tx_track.as_mut());

        executor.init()?;
        executor.execute()?;
        executor.go()?;
        executor.finalization()?;

        let gas_used = executor.gas_used();
        total_gas_used += gas_used;
        total_fees += U256::from(gas_used) * U256::from(tx.transaction.gas_price);
        tx_track.commit();

        let execution = executor.receipt();
        let outcome = if config.eip658_enabled(block.header.number) {
            ReceiptOutcome::Status(execution.success)
        } else {
            ReceiptOutcome::PostState(track.get_root())
        };

        receipts.push(Receipt { outcome, cumulative_gas_used: total_gas_used, logs: execution.logs });
        summaries.push(TransactionSummary { gas_used, success: execution.success });
    }

    let rewards = crate::rewards::distribute_rewards(config, block, track, total_fees);

    Ok(BlockSummary::new(block.clone(), rewards, receipts, summaries))
}

fn apply_hard_fork_transfers(track: &mut dyn Repository, block: &Block, config: &dyn BlockchainConfig) {
    let transfers = config.hard_fork_transfers(block.header.number);
    if transfers.is_empty() {
        return;
    }
    let Some(beneficiary) = config.hard_fork_beneficiary(block.header.number) else {
        tracing::warn!(
            block = block.header.number,
            "hard-fork transfers scheduled with no beneficiary configured; skipping"
        );
        return;
    };
    for (account, amount) in transfers {
        track.sub_balance(account, amount);
        track.add_balance(beneficiary, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, B256};
    use reth_chain_primitives::{BlockBody, ForkRules, Header, Transaction};
    use reth_chain_storage_api::{ExecutionReceipt, TransactionExecutor};

    #[derive(Debug, Default)]
    struct NullRepository;
    impl Repository for NullRepository {
        fn get_root(&self) -> B256 {
            B256::ZERO
        }
        fn snapshot_to(&self, _root: B256) -> Box<dyn Repository> {
            Box::new(NullRepository)
        }
        fn start_tracking(&self) -> Box<dyn Repository> {
            Box::new(NullRepository)
        }
        fn commit(&mut self) {}
        fn rollback(&mut self) {}
        fn get_nonce(&self, _address: Address) -> u64 {
            0
        }
        fn add_balance(&mut self, _address: Address, _delta: U256) {}
        fn sub_balance(&mut self, _address: Address, _delta: U256) {}
    }

    struct SucceedingExecutor {
        gas_used: u64,
    }
    impl TransactionExecutor for SucceedingExecutor {
        fn init(&mut self) -> Result<(), ExecutorError> {
            Ok(())
        }
        fn execute(&mut self) -> Result<(), ExecutorError> {
            Ok(())
        }
        fn go(&mut self) -> Result<(), ExecutorError> {
            Ok(())
        }
        fn finalization(&mut self) -> Result<(), ExecutorError> {
            Ok(())
        }
        fn gas_used(&self) -> u64 {
            self.gas_used
        }
        fn receipt(&self) -> ExecutionReceipt {
            ExecutionReceipt { success: true, logs: vec![] }
        }
    }

    struct SucceedingFactory;
    impl TransactionExecutorFactory for SucceedingFactory {
        fn create(&self, _ctx: ExecutorContext<'_>, _track: &mut dyn Repository) -> Box<dyn TransactionExecutor> {
            Box::new(SucceedingExecutor { gas_used: 21_000 })
        }
    }

    #[test]
    fn genesis_block_skips_execution() {
        let block = Block { header: Header::default(), body: BlockBody::default() };
        let config = ForkRules::mainnet_like(U256::from(5u8));
        let mut repo = NullRepository;
        let summary =
            apply_block(&mut repo, &block, &[], &config, &SucceedingFactory, false).unwrap();
        assert!(summary.receipts.is_empty());
        assert!(summary.rewards.is_empty());
    }

    #[test]
    fn one_transaction_produces_one_receipt_with_cumulative_gas() {
        let header = Header { number: 1, beneficiary: Address::repeat_byte(0x01), ..Default::default() };
        let tx = Transaction {
            nonce: 0,
            gas_price: 1,
            gas_limit: 21_000,
            to: Some(Address::ZERO),
            value: U256::ZERO,
            input: Bytes::new(),
            v: 27,
            r: U256::from(1),
            s: U256::from(1),
        };
        let block = Block { header, body: BlockBody { transactions: vec![tx.clone()], ommers: vec![] } };
        let recovered = vec![RecoveredTransaction::new(tx, B256::ZERO, Address::repeat_byte(0x02))];
        let config = ForkRules::mainnet_like(U256::from(5u8));
        let mut repo = NullRepository;

        let summary =
            apply_block(&mut repo, &block, &recovered, &config, &SucceedingFactory, false).unwrap();

        assert_eq!(summary.receipts.len(), 1);
        assert_eq!(summary.receipts[0].cumulative_gas_used, 21_000);
        assert!(summary.receipts[0].is_successful());
    }
}
