//! Identity-vs-clone decision
//!
//! Pure function of (policy, state, caller thread, origin thread).
//! The controller evaluates it before any traversal step, so every
//! Strict violation surfaces before an element is produced.

use super::EnumerationPolicy;
use crate::controller::IterationState;
use crate::EnumerationError;
use std::thread::ThreadId;

/// Outcome of a successful enumeration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Hand out the root instance and mark it active
    Reuse,

    /// Fork an independent traversal
    Clone,
}

/// Decide how to serve a request
///
/// | Policy | Reuse when | Otherwise |
/// |---|---|---|
/// | Normal | never | clone |
/// | Safe | caller is origin and root is unused | clone |
/// | Strict | caller is origin and root is unused | error |
///
/// Strict checks the thread before the state, so a foreign thread sees
/// `CrossThread` even while the root is active.
pub fn decide(
    policy: EnumerationPolicy,
    state: IterationState,
    caller: ThreadId,
    origin: ThreadId,
) -> Result<Decision, EnumerationError> {
    let on_origin = caller == origin;

    match policy {
        EnumerationPolicy::Normal => Ok(Decision::Clone),
        EnumerationPolicy::Safe => {
            if on_origin && state == IterationState::Unused {
                Ok(Decision::Reuse)
            } else {
                Ok(Decision::Clone)
            }
        }
        EnumerationPolicy::Strict => {
            if !on_origin {
                return Err(EnumerationError::CrossThread { origin, caller });
            }
            if state != IterationState::Unused {
                return Err(EnumerationError::OverlappingEnumeration);
            }
            Ok(Decision::Reuse)
        }
    }
}
