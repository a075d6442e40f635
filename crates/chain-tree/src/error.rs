use alloy_primitives::B256;
use reth_chain_storage_api::ExecutorError;

/// Why a candidate block was rejected. Every variant here is recovered
/// locally by [`crate::add::add`] — the tracked repository is rolled back to
/// the root captured before execution and the error is turned into
/// [`crate::ImportResult::InvalidBlock`] by the caller. None of these ever
/// unwinds out of [`crate::BlockchainTree::try_to_connect`].
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("block failed structural/semantic validation")]
    Validation,

    #[error("uncle validation failed")]
    UncleValidation,

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("receipts root mismatch: expected {expected}, computed {actual}")]
    ReceiptsRootMismatch { expected: B256, actual: B256 },

    #[error("logs bloom mismatch")]
    LogsBloomMismatch,

    #[error("state root mismatch: expected {expected}, got {actual}")]
    StateRootMismatch { expected: B256, actual: B256 },
}
