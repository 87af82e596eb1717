//! Array-backed traversal
//!
//! Elements live in a shared `Arc<[T]>`; forks share the storage and own
//! only their index.

use super::Traversal;
use crate::EnumerationError;
use std::sync::Arc;

/// Cursor over a shared, immutable slice
#[derive(Debug)]
pub struct SliceTraversal<T> {
    /// Shared element storage
    items: Arc<[T]>,

    /// Index of the next element to produce
    next: usize,

    /// Index of the current element, if any
    current: Option<usize>,
}

impl<T> SliceTraversal<T> {
    /// Create cursor over the given elements
    pub fn new(items: Vec<T>) -> Self {
        Self::from_shared(Arc::from(items))
    }

    /// Create cursor over storage already shared elsewhere
    pub fn from_shared(items: Arc<[T]>) -> Self {
        Self {
            items,
            next: 0,
            current: None,
        }
    }

    /// Number of elements in the underlying storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the underlying storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shared storage handle
    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }
}

impl<T> Traversal for SliceTraversal<T> {
    type Item = T;

    fn fork(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            next: 0,
            current: None,
        }
    }

    fn advance(&mut self) -> bool {
        if self.next < self.items.len() {
            self.current = Some(self.next);
            self.next += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn current(&self) -> Option<&T> {
        self.current.map(|idx| &self.items[idx])
    }

    fn rewind(&mut self) -> Result<(), EnumerationError> {
        self.next = 0;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_in_order() {
        let mut cursor = SliceTraversal::new(vec!['a', 'b']);
        assert_eq!(cursor.current(), None);

        assert!(cursor.advance());
        assert_eq!(cursor.current(), Some(&'a'));
        assert!(cursor.advance());
        assert_eq!(cursor.current(), Some(&'b'));

        // Exhaustion clears the current element
        assert!(!cursor.advance());
        assert_eq!(cursor.current(), None);
        assert!(!cursor.advance());
    }

    #[test]
    fn test_fork_shares_storage_not_position() {
        let mut cursor = SliceTraversal::new(vec![10, 20, 30]);
        cursor.advance();
        cursor.advance();

        let mut forked = cursor.fork();
        assert!(Arc::ptr_eq(cursor.items(), forked.items()));
        assert!(forked.advance());
        assert_eq!(forked.current(), Some(&10));
        assert_eq!(cursor.current(), Some(&20));
    }

    #[test]
    fn test_rewind_after_exhaustion() {
        let mut cursor = SliceTraversal::new(vec![1, 2]);
        while cursor.advance() {}

        cursor.rewind().expect("slices rewind");
        assert_eq!(cursor.current(), None);
        assert!(cursor.advance());
        assert_eq!(cursor.current(), Some(&1));
    }

    #[test]
    fn test_empty_slice() {
        let mut cursor = SliceTraversal::<u8>::new(Vec::new());
        assert!(cursor.is_empty());
        assert!(!cursor.advance());
        assert_eq!(cursor.current(), None);
    }
}
