//! Enumerator handle
//!
//! Either a lease on the controller's root cursor or an exclusively owned
//! clone. A lease carries the root cursor by value until it is released,
//! so both kinds are `Send` whenever the traversal is.

use super::SafeEnumerable;
use crate::traversal::Traversal;
use crate::EnumerationError;
use std::fmt;
use tracing::trace;

enum Handle<'a, T> {
    /// Lease on the root; `cursor` is `None` once handed back
    Root {
        owner: &'a SafeEnumerable<T>,
        cursor: Option<T>,
    },

    /// Independent traversal; `None` once released
    Owned(Option<T>),
}

/// Sequence-producing handle returned by [`SafeEnumerable::request`]
///
/// Released explicitly with [`release`](Self::release) or on drop.
pub struct Enumerator<'a, T: Traversal> {
    handle: Handle<'a, T>,
}

impl<'a, T: Traversal> Enumerator<'a, T> {
    pub(super) fn root(owner: &'a SafeEnumerable<T>, cursor: T) -> Self {
        Self {
            handle: Handle::Root {
                owner,
                cursor: Some(cursor),
            },
        }
    }

    pub(super) fn cloned(traversal: T) -> Self {
        Self {
            handle: Handle::Owned(Some(traversal)),
        }
    }

    /// Whether this handle is the collection's root instance
    pub fn is_root(&self) -> bool {
        matches!(self.handle, Handle::Root { .. })
    }

    /// Whether this handle has been released
    pub fn is_released(&self) -> bool {
        match &self.handle {
            Handle::Root { cursor, .. } => cursor.is_none(),
            Handle::Owned(traversal) => traversal.is_none(),
        }
    }

    /// Step to the next element
    ///
    /// A released enumerator is exhausted.
    pub fn advance(&mut self) -> bool {
        self.cursor_mut().is_some_and(|cursor| cursor.advance())
    }

    /// Element produced by the most recent successful `advance`
    pub fn current(&self) -> Option<&T::Item> {
        self.cursor().and_then(|cursor| cursor.current())
    }

    /// Return to the pre-first position
    pub fn rewind(&mut self) -> Result<(), EnumerationError> {
        match self.cursor_mut() {
            Some(cursor) => cursor.rewind(),
            None => Ok(()),
        }
    }

    /// End the pass
    ///
    /// On a clone this frees the traversal. On the root the first call
    /// rewinds the cursor, hands it back and resets the controller to
    /// `Unused`. Later calls on the same handle are no-ops and do not store
    /// `Unused` again, so a stale handle cannot end a pass started by a
    /// newer request.
    pub fn release(&mut self) {
        match &mut self.handle {
            Handle::Root { owner, cursor } => {
                if let Some(cursor) = cursor.take() {
                    owner.release_root(cursor);
                    trace!("root enumerator released");
                }
            }
            Handle::Owned(traversal) => {
                if traversal.take().is_some() {
                    trace!("cloned enumerator released");
                }
            }
        }
    }

    fn cursor(&self) -> Option<&T> {
        match &self.handle {
            Handle::Root { cursor, .. } => cursor.as_ref(),
            Handle::Owned(traversal) => traversal.as_ref(),
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut T> {
        match &mut self.handle {
            Handle::Root { cursor, .. } => cursor.as_mut(),
            Handle::Owned(traversal) => traversal.as_mut(),
        }
    }
}

impl<T: Traversal> Drop for Enumerator<'_, T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> Iterator for Enumerator<'_, T>
where
    T: Traversal,
    T::Item: Clone,
{
    type Item = T::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current().cloned()
        } else {
            None
        }
    }
}

impl<T: Traversal> fmt::Debug for Enumerator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerator")
            .field("root", &self.is_root())
            .field("released", &self.is_released())
            .finish()
    }
}
