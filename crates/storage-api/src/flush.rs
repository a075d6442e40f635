/// Queues the final persistence step of an import (`storeBlock` plus the
/// outermost `repository.commit()`) so it can be coalesced with other
/// pending writes by a background flusher. In diagnostic/test mode the
/// caller is expected to invoke `flush_sync` itself rather than rely on
/// background draining.
pub trait DbFlushManager: Send + Sync {
    /// Enqueues `task` to run once the current batch is flushed.
    fn commit(&self, task: Box<dyn FnOnce() + Send>);

    /// Blocks until every previously queued task has run.
    fn flush_sync(&self);
}

/// Notified after a block is stored so old, now-unreachable state can be
/// reclaimed. The core only calls `on_block_stored`; deciding what, if
/// anything, to prune is entirely this trait's concern.
pub trait PruneManager: Send + Sync {
    fn on_block_stored(&self, block_number: u64);
}
