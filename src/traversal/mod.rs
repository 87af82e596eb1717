//! Traversal capability
//!
//! The controller never walks a data structure itself. A concrete
//! collection supplies a [`Traversal`]: an independent cursor that can be
//! forked, stepped, read and (optionally) rewound.

mod iter;
mod slice;

pub use iter::IterTraversal;
pub use slice::SliceTraversal;

use crate::EnumerationError;

/// Cursor over one data structure
///
/// Position starts before the first element. `current` is only
/// meaningful after `advance` returned `true`.
pub trait Traversal: Sized {
    /// Element type produced by the traversal
    type Item;

    /// New cursor over the same data at the pre-first position
    ///
    /// Must not share mutable position state with `self`.
    fn fork(&self) -> Self;

    /// Step to the next element, returning whether one exists
    fn advance(&mut self) -> bool;

    /// Element produced by the most recent successful `advance`
    fn current(&self) -> Option<&Self::Item>;

    /// Return to the pre-first position
    fn rewind(&mut self) -> Result<(), EnumerationError> {
        Err(EnumerationError::RewindUnsupported)
    }
}
