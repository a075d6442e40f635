//! A reference, in-memory implementation of every trait in
//! `reth-chain-storage-api`, wired up by `main` so the importer has
//! something concrete to run against. None of this is meant to survive a
//! process restart — a real deployment swaps every piece here for a
//! database-backed repository, a persistent block index, and an actual EVM.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use alloy_primitives::{keccak256, Address, B256, U256};
use parking_lot::{Mutex, RwLock};
use reth_chain_primitives::{Block, BlockSummary, Log};
use reth_chain_storage_api::{
    BlockStore, DbFlushManager, EthereumListener, ExecutionReceipt, ExecutorContext, ExecutorError,
    ParentBlockHeaderValidator, PruneManager, Repository, TransactionExecutor, TransactionExecutorFactory,
    TransactionLocation, TransactionStore,
};

/// Account balances and nonces, keyed by address. Deliberately not a trie —
/// this backend exists to make the importer runnable, not to reproduce
/// Ethereum state roots byte-for-byte.
#[derive(Debug, Clone, Default)]
struct AccountState {
    nonces: BTreeMap<Address, u64>,
    balances: BTreeMap<Address, U256>,
}

impl AccountState {
    fn root(&self) -> B256 {
        let mut buf = Vec::new();
        for (address, nonce) in &self.nonces {
            buf.extend_from_slice(address.as_slice());
            buf.extend_from_slice(&nonce.to_be_bytes());
        }
        for (address, balance) in &self.balances {
            buf.extend_from_slice(address.as_slice());
            buf.extend_from_slice(&balance.to_be_bytes::<32>());
        }
        keccak256(buf)
    }
}

/// [`Repository`] over a single shared [`AccountState`] cell. `start_tracking`
/// shares the cell with its parent so nested commits merge upward within one
/// import attempt; `snapshot_to` detaches onto an independent cell so a
/// speculative fork's mutations never reach the canonical state unless the
/// core adopts it.
#[derive(Debug)]
pub struct MemoryRepository {
    state: Arc<Mutex<AccountState>>,
    baseline: AccountState,
}

impl MemoryRepository {
    pub fn genesis() -> Self {
        let state = AccountState::default();
        Self { state: Arc::new(Mutex::new(state.clone())), baseline: state }
    }
}

impl Repository for MemoryRepository {
    fn get_root(&self) -> B256 {
        self.state.lock().root()
    }

    fn snapshot_to(&self, _root: B256) -> Box<dyn Repository> {
        let snapshot = self.state.lock().clone();
        Box::new(Self { state: Arc::new(Mutex::new(snapshot.clone())), baseline: snapshot })
    }

    fn start_tracking(&self) -> Box<dyn Repository> {
        Box::new(Self { state: self.state.clone(), baseline: self.state.lock().clone() })
    }

    fn commit(&mut self) {
        self.baseline = self.state.lock().clone();
    }

    fn rollback(&mut self) {
        *self.state.lock() = self.baseline.clone();
    }

    fn get_nonce(&self, address: Address) -> u64 {
        *self.state.lock().nonces.get(&address).unwrap_or(&0)
    }

    fn add_balance(&mut self, address: Address, delta: U256) {
        *self.state.lock().balances.entry(address).or_insert(U256::ZERO) += delta;
    }

    fn sub_balance(&mut self, address: Address, delta: U256) {
        *self.state.lock().balances.entry(address).or_insert(U256::ZERO) -= delta;
    }
}

#[derive(Default)]
struct BlockEntry {
    block: Block,
    total_difficulty: U256,
    on_main_chain: bool,
}

/// Persistent block index: every block ever imported, keyed by hash, plus a
/// per-number pointer to whichever one is currently canonical.
#[derive(Default)]
pub struct MemoryBlockStore {
    by_hash: RwLock<HashMap<B256, BlockEntry>>,
    main_by_number: RwLock<BTreeMap<u64, B256>>,
}

impl MemoryBlockStore {
    pub fn new(genesis: &Block) -> Self {
        let store = Self::default();
        store.save_block(genesis, U256::ZERO, true);
        store
    }
}

impl BlockStore for MemoryBlockStore {
    fn is_block_exist(&self, hash: B256) -> bool {
        self.by_hash.read().contains_key(&hash)
    }

    fn get_block_by_hash(&self, hash: B256) -> Option<Block> {
        self.by_hash.read().get(&hash).map(|entry| entry.block.clone())
    }

    fn get_chain_block_by_number(&self, number: u64) -> Option<Block> {
        let hash = *self.main_by_number.read().get(&number)?;
        self.get_block_by_hash(hash)
    }

    fn get_blocks_by_number(&self, number: u64) -> Vec<Block> {
        self.by_hash
            .read()
            .values()
            .filter(|entry| entry.block.number() == number)
            .map(|entry| entry.block.clone())
            .collect()
    }

    fn get_best_block(&self) -> Option<Block> {
        let number = *self.main_by_number.read().keys().next_back()?;
        self.get_chain_block_by_number(number)
    }

    fn get_max_number(&self) -> u64 {
        self.by_hash.read().values().map(|entry| entry.block.number()).max().unwrap_or(0)
    }

    fn get_total_difficulty_for_hash(&self, hash: B256) -> Option<U256> {
        self.by_hash.read().get(&hash).map(|entry| entry.total_difficulty)
    }

    fn save_block(&self, block: &Block, total_difficulty: U256, on_main_chain: bool) {
        self.by_hash.write().insert(
            block.hash(),
            BlockEntry { block: block.clone(), total_difficulty, on_main_chain },
        );
        if on_main_chain {
            self.main_by_number.write().insert(block.number(), block.hash());
        }
    }

    fn re_branch(&self, block: &Block) {
        let mut by_number = self.main_by_number.write();
        let mut by_hash = self.by_hash.write();

        let mut cursor = Some(block.clone());
        while let Some(current) = cursor {
            let number = current.number();
            if let Some(old_hash) = by_number.get(&number).copied() {
                if old_hash == current.hash() {
                    break;
                }
                if let Some(entry) = by_hash.get_mut(&old_hash) {
                    entry.on_main_chain = false;
                }
            }
            by_number.insert(number, current.hash());
            if let Some(entry) = by_hash.get_mut(&current.hash()) {
                entry.on_main_chain = true;
            }
            cursor = (!current.is_genesis())
                .then(|| by_hash.get(&current.parent_hash()).map(|e| e.block.clone()))
                .flatten();
        }
    }

    fn get_list_hashes_end_with(&self, hash: B256, qty: u64) -> Vec<B256> {
        let by_hash = self.by_hash.read();
        let mut out = Vec::new();
        let mut cursor = Some(hash);
        while out.len() < qty as usize {
            let Some(h) = cursor else { break };
            let Some(entry) = by_hash.get(&h) else { break };
            out.push(h);
            cursor = (!entry.block.is_genesis()).then_some(entry.block.parent_hash());
        }
        out
    }
}

/// Transaction-hash index, kept purely for completeness — the importer never
/// reads it back.
#[derive(Default)]
pub struct MemoryTransactionStore {
    locations: RwLock<HashMap<B256, Vec<TransactionLocation>>>,
}

impl TransactionStore for MemoryTransactionStore {
    fn put(&self, tx_hash: B256, location: TransactionLocation) {
        self.locations.write().entry(tx_hash).or_default().push(location);
    }

    fn get(&self, tx_hash: B256) -> Vec<TransactionLocation> {
        self.locations.read().get(&tx_hash).cloned().unwrap_or_default()
    }
}

/// Accepts every header unconditionally. Difficulty, gas-limit-delta and
/// proof-of-work rules belong to a real consensus engine, which this
/// reference backend does not implement.
#[derive(Debug, Default)]
pub struct PermissiveParentValidator;

impl ParentBlockHeaderValidator for PermissiveParentValidator {
    fn validate(&self, _header: &reth_chain_primitives::Header, _parent: &reth_chain_primitives::Header) -> bool {
        true
    }
}

struct NoopExecutor;

impl TransactionExecutor for NoopExecutor {
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
        0
    }
    fn receipt(&self) -> ExecutionReceipt {
        ExecutionReceipt { success: true, logs: Vec::<Log>::new() }
    }
}

/// Stands in for a real EVM: every transaction trivially succeeds with zero
/// gas and no logs. Wiring an actual executor is an external, crypto/EVM
/// concern this crate does not take on.
#[derive(Debug, Default)]
pub struct NoopExecutorFactory;

impl TransactionExecutorFactory for NoopExecutorFactory {
    fn create(&self, _ctx: ExecutorContext<'_>, _track: &mut dyn Repository) -> Box<dyn TransactionExecutor> {
        Box::new(NoopExecutor)
    }
}

/// Logs every commit at `info` and otherwise does nothing.
#[derive(Debug, Default)]
pub struct TracingListener;

impl EthereumListener for TracingListener {
    fn on_block(&self, summary: &BlockSummary, is_best: bool) {
        tracing::info!(
            number = summary.block.number(),
            hash = %summary.block.hash(),
            is_best,
            "block committed"
        );
    }

    fn trace(&self, message: &str) {
        tracing::debug!(message, "listener trace");
    }
}

/// Runs every queued task synchronously, on the calling thread — there is no
/// background flusher to defer to in a one-shot CLI import.
#[derive(Debug, Default)]
pub struct SynchronousFlushManager;

impl DbFlushManager for SynchronousFlushManager {
    fn commit(&self, task: Box<dyn FnOnce() + Send>) {
        task();
    }

    fn flush_sync(&self) {}
}

#[derive(Debug, Default)]
pub struct NoopPruneManager;

impl PruneManager for NoopPruneManager {
    fn on_block_stored(&self, _block_number: u64) {}
}
