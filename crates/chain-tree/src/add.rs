use alloy_primitives::{Bloom, U256};
use reth_chain_consensus::Validator;
use reth_chain_evm::apply_block;
use reth_chain_primitives::{
    combine_blooms,
    trie::calculate_receipts_root,
    Block, BlockSummary, BlockchainConfig, Header, RecoveredTransaction,
};
use reth_chain_storage_api::{BlockStore, Repository, TransactionExecutorFactory};

use crate::error::ChainError;

/// The real state transition: validates, executes, and performs the three
/// post-execution sanity checks (receipts root, logs bloom, state root)
/// before committing.
///
/// `repository`, `best_block` and `total_difficulty` are the three fields of
/// whichever candidate tip is being extended — the core's own tip for an
/// in-place import, or a freshly snapshotted [`crate::transaction::ImportTransaction`]
/// for a speculative fork. On any failure the nested tracking layer opened
/// here is rolled back and none of the three are touched — this is the
/// "revert to origRoot" behaviour named in the source.
#[allow(clippy::too_many_arguments)]
pub(crate) fn add(
    repository: &mut dyn Repository,
    best_block: &mut Block,
    total_difficulty: &mut U256,
    block: &Block,
    recovered: &[RecoveredTransaction],
    parent: Option<&Header>,
    validator: &Validator<'_>,
    block_store: &dyn BlockStore,
    config: &dyn BlockchainConfig,
    executor_factory: &dyn TransactionExecutorFactory,
) -> Result<BlockSummary, ChainError> {
    if !validator.is_valid(&*repository, block, parent, recovered) {
        return Err(ChainError::Validation);
    }
    if !validator.is_valid_uncles(block_store, block) {
        return Err(ChainError::UncleValidation);
    }

    let mut block_track = repository.start_tracking();

    let summary = match apply_block(block_track.as_mut(), block, recovered, config, executor_factory, false) {
        Ok(summary) => summary,
        Err(err) => {
            block_track.rollback();
            return Err(ChainError::from(err));
        }
    };

    if let Err(err) = check_summary(&summary, block, block_track.as_ref()) {
        block_track.rollback();
        return Err(err);
    }

    block_track.commit();
    *total_difficulty += block.header.difficulty;
    *best_block = block.clone();

    let mut summary = summary;
    summary.total_difficulty = Some(*total_difficulty);
    Ok(summary)
}

fn check_summary(summary: &BlockSummary, block: &Block, repo: &dyn Repository) -> Result<(), ChainError> {
    let expected_receipts_root = calculate_receipts_root(&summary.receipts);
    if expected_receipts_root != block.header.receipts_root {
        return Err(ChainError::ReceiptsRootMismatch {
            expected: block.header.receipts_root,
            actual: expected_receipts_root,
        });
    }

    let blooms: Vec<Bloom> = summary.receipts.iter().map(|r| r.bloom()).collect();
    if combine_blooms(blooms.iter()) != block.header.logs_bloom {
        return Err(ChainError::LogsBloomMismatch);
    }

    let actual_root = repo.get_root();
    if actual_root != block.header.state_root {
        return Err(ChainError::StateRootMismatch { expected: block.header.state_root, actual: actual_root });
    }

    Ok(())
}
