use tokio::sync::{Mutex, MutexGuard};

/// Per-account nonce sequencing.
///
/// A sender holds the [`NonceSlot`] for the whole fetch, sign and broadcast
/// sequence, so two sends from the same account can never sign with the
/// same nonce.
#[derive(Debug, Default)]
pub struct NonceManager {
    next: Mutex<Option<u64>>,
}

impl NonceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive use of the account's nonce.
    pub async fn acquire(&self) -> NonceSlot<'_> {
        NonceSlot {
            next: self.next.lock().await,
        }
    }

    /// Forgets the cached nonce; the next send re-reads it from the node.
    pub async fn reset(&self) {
        self.next.lock().await.take();
    }

    pub async fn cached(&self) -> Option<u64> {
        *self.next.lock().await
    }
}

/// Exclusive access to an account's next nonce. Dropping the slot without
/// calling [`commit`](Self::commit) leaves the cache untouched.
pub struct NonceSlot<'a> {
    next: MutexGuard<'a, Option<u64>>,
}

impl NonceSlot<'_> {
    /// Nonce to sign with, given the node's pending transaction count.
    ///
    /// The cache only ever moves forward: a lagging node cannot hand back a
    /// nonce this process already broadcast.
    pub fn resolve(&self, chain_count: u64) -> u64 {
        match *self.next {
            Some(cached) if cached > chain_count => cached,
            _ => chain_count,
        }
    }

    /// Records that `nonce` was accepted by the node.
    pub fn commit(mut self, nonce: u64) {
        *self.next = Some(nonce.saturating_add(1));
    }

    /// Drops the cache after a failed broadcast, so the next send starts from
    /// the node's view instead of leaving a gap.
    pub fn invalidate(mut self) {
        if let Some(stale) = self.next.take() {
            tracing::warn!(stale_nonce = stale, "Nonce cache invalidated");
        }
    }
}
