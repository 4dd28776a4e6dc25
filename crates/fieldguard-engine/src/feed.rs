//! Change feed of host-page mutations.

use std::collections::VecDeque;

/// A batch of page mutations, as coalesced by the host.
///
/// The host environment batches subtree changes however it likes; one batch
/// may cover many inserted nodes and the engine must not assume one batch
/// per insertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationBatch {
    /// Number of nodes inserted since the previous batch.
    pub added_nodes: usize,
}

/// Abstract subscription to page subtree mutations.
///
/// The production host maps this onto its native mutation-observation
/// primitive; tests and the CLI drive it with [`QueuedFeed`]. The engine's
/// attachment logic depends only on this trait.
pub trait MutationFeed {
    /// Next coalesced batch, or `None` when the feed is currently quiet.
    fn poll_batch(&mut self) -> Option<MutationBatch>;
}

/// In-memory feed backed by a queue of batches.
#[derive(Debug, Default)]
pub struct QueuedFeed {
    batches: VecDeque<MutationBatch>,
}

impl QueuedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: MutationBatch) {
        self.batches.push_back(batch);
    }
}

impl MutationFeed for QueuedFeed {
    fn poll_batch(&mut self) -> Option<MutationBatch> {
        self.batches.pop_front()
    }
}
