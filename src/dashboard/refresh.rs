//! Latest-wins guard for the watch loop's re-polls.
//!
//! Each poll takes a generation before it starts; a result is only committed
//! while its generation is still the newest one issued. A slow response that
//! arrives after a fresher poll began is discarded instead of overwriting
//! newer data.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Generation {
    latest: AtomicU64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new poll, invalidating every earlier one.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}
