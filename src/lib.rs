//! # Policy-Driven Enumeration Safety
//!
//! This library governs how an enumerator over a collection behaves when it
//! is requested from one or many threads, and whether a request reuses the
//! collection's own (root) enumerator or receives an independent clone.
//!
//! ## Policies
//!
//! 1. **Normal**: every request forks a fresh traversal. No shared state.
//! 2. **Safe**: the root is reused on its origin thread while idle; any
//!    other request silently receives a clone.
//! 3. **Strict**: the root is the only enumerator ever handed out. A request
//!    from a foreign thread or during an active pass fails immediately.
//!
//! ## Usage Example
//!
//! ```
//! use enumsafe::{EnumerationPolicy, SafeEnumerable, SliceTraversal};
//!
//! let numbers = SafeEnumerable::new(SliceTraversal::new(vec![1, 2, 3]), EnumerationPolicy::Safe);
//!
//! let first: Vec<i32> = numbers.request()?.collect();
//! let again: Vec<i32> = numbers.request()?.collect();
//! assert_eq!(first, again);
//! # Ok::<(), enumsafe::EnumerationError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod controller; // Root ownership and the reuse/clone decision
pub mod policy;     // Policies and pure decision functions
pub mod traversal;  // External traversal capability and stock traversals

// Re-exports for convenience
pub use controller::{Enumerator, IterationState, SafeEnumerable};
pub use policy::{decide, Decision, EnumerationPolicy};
pub use traversal::{IterTraversal, SliceTraversal, Traversal};

use std::thread::ThreadId;
use thiserror::Error;

/// Configuration parameters for an enumeration controller
///
/// Fixed at construction; a controller never changes its policy afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumerationConfig {
    /// Sharing and thread-affinity policy
    pub policy: EnumerationPolicy,

    /// Claim the root with a single compare-and-swap instead of a
    /// load followed by a store
    #[cfg_attr(feature = "serde", serde(default))]
    pub atomic_reuse: bool,
}

impl EnumerationConfig {
    /// Create configuration for the given policy
    pub fn new(policy: EnumerationPolicy) -> Self {
        Self {
            policy,
            atomic_reuse: false,
        }
    }

    /// Always clone
    pub fn normal() -> Self {
        Self::new(EnumerationPolicy::Normal)
    }

    /// Optimistic root reuse with transparent clone fallback
    pub fn safe() -> Self {
        Self::new(EnumerationPolicy::Safe)
    }

    /// Root reuse only, misuse is an error
    pub fn strict() -> Self {
        Self::new(EnumerationPolicy::Strict)
    }

    /// Toggle the compare-and-swap claim of the root
    #[must_use]
    pub fn with_atomic_reuse(mut self, atomic_reuse: bool) -> Self {
        self.atomic_reuse = atomic_reuse;
        self
    }
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Errors surfaced by enumeration requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    /// Strict root requested from a thread other than the one that built it
    #[error("Multithread access detected: root enumerator belongs to {origin:?}, requested from {caller:?}")]
    CrossThread {
        /// Thread that constructed the root
        origin: ThreadId,
        /// Thread that issued the request
        caller: ThreadId,
    },

    /// Strict root requested while a pass over it is still active
    #[error("Multiple enumeration detected: the root enumerator is already active")]
    OverlappingEnumeration,

    /// Unrecognized policy value
    #[error("Invalid enumeration policy: {0}")]
    InvalidPolicy(String),

    /// Concrete traversal cannot return to its start
    #[error("Traversal does not support rewind")]
    RewindUnsupported,
}
