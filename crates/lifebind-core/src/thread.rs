//! Designated-thread checks.

use std::thread::{self, ThreadId};

use crate::error::{BindError, Result};

/// Remembers which thread is the UI thread and rejects calls from any other.
///
/// The guard is `Copy` and carries nothing but a [`ThreadId`], so it can be
/// created up front (on the UI thread) and handed to anything that needs to
/// police its entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinityGuard {
    designated: ThreadId,
}

impl ThreadAffinityGuard {
    /// Designate the calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self {
            designated: thread::current().id(),
        }
    }

    /// Designate an explicit thread.
    #[must_use]
    pub const fn for_thread(designated: ThreadId) -> Self {
        Self { designated }
    }

    #[inline]
    #[must_use]
    pub const fn designated(&self) -> ThreadId {
        self.designated
    }

    #[inline]
    #[must_use]
    pub fn is_designated(&self) -> bool {
        thread::current().id() == self.designated
    }

    /// Fail with [`BindError::ThreadAffinity`] unless called on the designated thread.
    pub fn assert_on_designated_thread(&self) -> Result<()> {
        let caller = thread::current().id();
        if caller == self.designated {
            Ok(())
        } else {
            Err(BindError::ThreadAffinity {
                designated: self.designated,
                caller,
            })
        }
    }
}

impl Default for ThreadAffinityGuard {
    fn default() -> Self {
        Self::current()
    }
}
