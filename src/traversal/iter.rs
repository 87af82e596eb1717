//! Traversal over any cloneable iterator
//!
//! The iterator as given is kept untouched as the start position; forks
//! and rewinds clone it again.

use super::Traversal;
use crate::EnumerationError;
use std::fmt;

/// Cursor driven by a `Clone` iterator
pub struct IterTraversal<I: Iterator> {
    start: I,
    live: I,
    current: Option<I::Item>,
}

impl<I> IterTraversal<I>
where
    I: Iterator + Clone,
{
    /// Create cursor positioned before the iterator's first element
    pub fn new(iter: I) -> Self {
        Self {
            live: iter.clone(),
            start: iter,
            current: None,
        }
    }
}

impl<I> Traversal for IterTraversal<I>
where
    I: Iterator + Clone,
{
    type Item = I::Item;

    fn fork(&self) -> Self {
        Self::new(self.start.clone())
    }

    fn advance(&mut self) -> bool {
        self.current = self.live.next();
        self.current.is_some()
    }

    fn current(&self) -> Option<&I::Item> {
        self.current.as_ref()
    }

    fn rewind(&mut self) -> Result<(), EnumerationError> {
        self.live = self.start.clone();
        self.current = None;
        Ok(())
    }
}

impl<I: Iterator> fmt::Debug for IterTraversal<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterTraversal")
            .field("has_current", &self.current.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_traversal() {
        let mut cursor = IterTraversal::new(1..=3);
        let mut seen = Vec::new();
        while cursor.advance() {
            seen.push(*cursor.current().unwrap());
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_rewind_replays_start() {
        let mut cursor = IterTraversal::new("ab".chars());
        cursor.advance();
        cursor.advance();
        cursor.rewind().unwrap();

        assert!(cursor.advance());
        assert_eq!(cursor.current(), Some(&'a'));
    }

    #[test]
    fn test_fork_ignores_progress() {
        let mut cursor = IterTraversal::new([5, 6].into_iter());
        cursor.advance();

        let mut forked = cursor.fork();
        forked.advance();
        assert_eq!(forked.current(), Some(&5));

        cursor.advance();
        assert_eq!(cursor.current(), Some(&6));
    }
}
