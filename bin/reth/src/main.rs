//! Reads a file of consecutive RLP-encoded blocks and imports them one at a
//! time into a [`BlockchainTree`] backed by the in-memory reference
//! collaborators in [`memory_backend`], reporting the outcome of each import.
//!
//! This tool only drives the header/fork-choice path end to end — sender
//! recovery and real transaction execution are external, EVM-backed concerns
//! (see `reth-chain-primitives::RecoveredTransaction`'s doc comment), so a
//! block whose body carries transactions is imported with an empty recovered
//! set and will be rejected by validation unless that body is itself empty.

mod memory_backend;

use std::{fs::File, io::Read, path::PathBuf, sync::Arc};

use alloy_primitives::U256;
use alloy_rlp::Decodable;
use clap::Parser;
use reth_chain_primitives::{Block, ForkRules};
use reth_chain_storage_api::BlockStore;
use reth_chain_tree::{BlockchainTree, DiagnosticsConfig, ImportResult};

use memory_backend::{
    MemoryBlockStore, MemoryRepository, MemoryTransactionStore, NoopExecutorFactory,
    PermissiveParentValidator, SynchronousFlushManager, TracingListener,
};

/// Imports a sequence of RLP-encoded blocks against an in-memory chain.
#[derive(Debug, Parser)]
#[command(name = "reth-chain-import", about)]
struct ImportArgs {
    /// Path to a file containing one or more consecutive RLP-encoded blocks,
    /// the first of which is taken to extend the synthetic genesis block.
    path: PathBuf,

    /// Constant miner reward (wei) applied to every block, matching
    /// `ForkRules::mainnet_like`.
    #[arg(long, default_value = "0")]
    block_reward: u128,
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let args = ImportArgs::parse();
    let mut buffer = Vec::new();
    File::open(&args.path)?.read_to_end(&mut buffer)?;

    let mut blocks = Vec::new();
    let mut remaining = buffer.as_slice();
    while !remaining.is_empty() {
        blocks.push(Block::decode(&mut remaining)?);
    }
    eyre::ensure!(!blocks.is_empty(), "input file contained no blocks");

    let genesis = Block { header: Default::default(), body: Default::default() };
    let block_store = Arc::new(MemoryBlockStore::new(&genesis));

    let tree = BlockchainTree::new(
        Box::new(MemoryRepository::genesis()),
        genesis,
        U256::ZERO,
        block_store.clone(),
        Arc::new(MemoryTransactionStore::default()),
        Arc::new(ForkRules::mainnet_like(U256::from(args.block_reward))),
        Arc::new(PermissiveParentValidator),
        Arc::new(NoopExecutorFactory),
        Arc::new(TracingListener),
        Arc::new(SynchronousFlushManager),
        Arc::new(memory_backend::NoopPruneManager),
        DiagnosticsConfig { synchronous_flush: true, ..Default::default() },
    );

    let mut imported = 0;
    let mut rejected = 0;
    for block in blocks {
        let number = block.number();
        let hash = block.hash();
        match tree.try_to_connect(block, Vec::new()) {
            ImportResult::ImportedBest => {
                tracing::info!(number, %hash, "imported as new canonical tip");
                imported += 1;
            }
            ImportResult::ImportedNotBest => {
                tracing::info!(number, %hash, "imported on a side branch");
                imported += 1;
            }
            ImportResult::Exist => {
                tracing::info!(number, %hash, "already imported, skipping");
            }
            ImportResult::InvalidBlock => {
                tracing::warn!(number, %hash, "rejected: failed validation");
                rejected += 1;
            }
            ImportResult::NoParent => {
                tracing::warn!(number, %hash, "rejected: parent not found");
                rejected += 1;
            }
        }
    }

    tracing::info!(
        imported,
        rejected,
        best = block_store.get_best_block().map(|b| b.number()),
        "import finished"
    );
    Ok(())
}
