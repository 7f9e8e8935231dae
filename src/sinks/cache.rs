use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use super::VideoCache;

// @module: Generation counter standing in for the page's video element cache

/// Bumped on every invalidation; data tagged with an older generation is stale
#[derive(Debug, Clone, Default)]
pub struct VideoGeneration {
    generation: Arc<AtomicU64>,
}

impl VideoGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation
    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether data captured at `generation` predates the last invalidation
    pub fn is_stale(&self, generation: u64) -> bool {
        generation != self.current()
    }
}

impl VideoCache for VideoGeneration {
    fn clear(&self) {
        let next = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Video cache invalidated (generation {})", next);
    }
}
