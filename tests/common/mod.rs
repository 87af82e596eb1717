use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use enumsafe::{EnumerationError, SliceTraversal, Traversal};

/// Counters shared by a probe and all of its forks
#[derive(Debug, Default)]
pub struct ProbeStats {
    pub forks: AtomicUsize,
    pub advances: AtomicUsize,
}

impl ProbeStats {
    pub fn forks(&self) -> usize {
        self.forks.load(Ordering::SeqCst)
    }

    pub fn advances(&self) -> usize {
        self.advances.load(Ordering::SeqCst)
    }
}

/// Slice traversal that records how often it is forked and stepped
#[derive(Debug)]
pub struct ProbeTraversal<T> {
    inner: SliceTraversal<T>,
    stats: Arc<ProbeStats>,
}

impl<T> ProbeTraversal<T> {
    pub fn new(items: Vec<T>) -> (Self, Arc<ProbeStats>) {
        let stats = Arc::new(ProbeStats::default());
        let probe = Self {
            inner: SliceTraversal::new(items),
            stats: Arc::clone(&stats),
        };
        (probe, stats)
    }
}

impl<T> Traversal for ProbeTraversal<T> {
    type Item = T;

    fn fork(&self) -> Self {
        self.stats.forks.fetch_add(1, Ordering::SeqCst);
        Self {
            inner: self.inner.fork(),
            stats: Arc::clone(&self.stats),
        }
    }

    fn advance(&mut self) -> bool {
        self.stats.advances.fetch_add(1, Ordering::SeqCst);
        self.inner.advance()
    }

    fn current(&self) -> Option<&T> {
        self.inner.current()
    }

    fn rewind(&mut self) -> Result<(), EnumerationError> {
        self.inner.rewind()
    }
}
