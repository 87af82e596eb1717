//! Enumeration safety controller
//!
//! Owns the root traversal of one collection together with the iteration
//! state and the thread that built it, and decides per request whether the
//! root is handed out or an independent fork is made.
//!
//! State machine (root only):
//! - `Unused -> Active` on a successful reuse decision
//! - `Active -> Unused` when the root enumerator is released
//!
//! Clones never take part in it.

mod enumerator;

pub use enumerator::Enumerator;

use crate::policy::{decide, Decision, EnumerationPolicy};
use crate::traversal::Traversal;
use crate::{EnumerationConfig, EnumerationError};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};
use tracing::{debug, trace, warn};

/// Whether the root instance is mid-traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IterationState {
    /// Idle; the next qualifying request may reuse the root
    Unused = 0,

    /// A pass over the root is in progress
    Active = 1,
}

impl IterationState {
    fn from_raw(raw: u8) -> Self {
        if raw == Self::Active as u8 {
            Self::Active
        } else {
            Self::Unused
        }
    }
}

/// Policy-driven owner of a collection's root enumerator
///
/// Shared by reference across threads; every method takes `&self`.
pub struct SafeEnumerable<T> {
    config: EnumerationConfig,

    /// Thread that constructed this instance
    origin: ThreadId,

    /// Raw `IterationState` of the root
    state: AtomicU8,

    /// Never advanced; every fork starts from here
    template: T,

    /// Parked root cursor; `None` while a root enumerator holds it
    root: Mutex<Option<T>>,
}

impl<T: Traversal> SafeEnumerable<T> {
    /// Create controller with the given policy
    pub fn new(traversal: T, policy: EnumerationPolicy) -> Self {
        Self::with_config(traversal, EnumerationConfig::new(policy))
    }

    /// Create controller from full configuration
    ///
    /// The calling thread becomes the origin thread of this instance.
    pub fn with_config(traversal: T, config: EnumerationConfig) -> Self {
        let origin = thread::current().id();
        debug!(policy = %config.policy, ?origin, "enumeration controller created");

        Self {
            config,
            origin,
            state: AtomicU8::new(IterationState::Unused as u8),
            root: Mutex::new(Some(traversal.fork())),
            template: traversal,
        }
    }

    /// Request an enumerator
    ///
    /// Returns the root or a clone according to the policy. Strict
    /// violations are reported here, before any element is produced.
    pub fn request(&self) -> Result<Enumerator<'_, T>, EnumerationError> {
        let policy = self.config.policy;
        let caller = thread::current().id();
        let state = self.state();

        let decision = decide(policy, state, caller, self.origin).map_err(|err| {
            warn!(%policy, ?state, ?caller, origin = ?self.origin, error = %err, "enumeration request rejected");
            err
        })?;

        if decision == Decision::Reuse {
            if let Some(cursor) = self.claim_root() {
                debug!(%policy, "reusing root enumerator");
                return Ok(Enumerator::root(self, cursor));
            }
            // Root could not be claimed: behaves exactly like an active root
            if policy == EnumerationPolicy::Strict {
                warn!(%policy, "root enumerator claimed concurrently");
                return Err(EnumerationError::OverlappingEnumeration);
            }
        }

        debug!(%policy, ?state, on_origin = caller == self.origin, "cloning enumerator");
        Ok(Enumerator::cloned(self.template.fork()))
    }

    /// Mark the root active and take its cursor out of the slot
    fn claim_root(&self) -> Option<T> {
        if self.config.atomic_reuse {
            self.state
                .compare_exchange(
                    IterationState::Unused as u8,
                    IterationState::Active as u8,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .ok()?;
        } else {
            // Best-effort: the caller already observed `Unused`
            self.state
                .store(IterationState::Active as u8, Ordering::Release);
        }

        self.root
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Rewind the root cursor, park it and mark the root unused
    ///
    /// Only a traversal that cannot rewind is replaced by a fresh fork.
    fn release_root(&self, mut cursor: T) {
        if let Err(err) = cursor.rewind() {
            trace!(error = %err, "root cursor reseeded from template");
            cursor = self.template.fork();
        }
        *self.root.lock().unwrap_or_else(PoisonError::into_inner) = Some(cursor);
        self.state
            .store(IterationState::Unused as u8, Ordering::Release);
    }
}

impl<T> SafeEnumerable<T> {
    /// Current state of the root instance
    pub fn state(&self) -> IterationState {
        IterationState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Policy fixed at construction
    pub fn policy(&self) -> EnumerationPolicy {
        self.config.policy
    }

    /// Full configuration
    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Thread that constructed this instance
    pub fn origin_thread(&self) -> ThreadId {
        self.origin
    }
}

impl<T> fmt::Debug for SafeEnumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeEnumerable")
            .field("config", &self.config)
            .field("origin", &self.origin)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
