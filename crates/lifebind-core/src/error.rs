//! Error type shared by every lifebind crate.

use std::thread::ThreadId;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BindError>;

/// Failures surfaced by a binding accessor.
///
/// None of these are absorbed internally: every variant propagates to the
/// caller of `get` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// Accessed from a thread other than the designated UI thread.
    #[error("binding accessed off the designated UI thread (designated {designated:?}, caller {caller:?})")]
    ThreadAffinity {
        designated: ThreadId,
        caller: ThreadId,
    },

    /// The owner is missing state required to pick or use a lifecycle.
    #[error("lifecycle state unavailable: {reason}")]
    LifecycleState { reason: String },

    /// The binder could not produce a value.
    #[error("binding production failed: {reason}")]
    BindingProduction { reason: String },
}

impl BindError {
    #[must_use]
    pub fn lifecycle_state(reason: impl Into<String>) -> Self {
        Self::LifecycleState {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn production(reason: impl Into<String>) -> Self {
        Self::BindingProduction {
            reason: reason.into(),
        }
    }

    /// Misuse of the API rather than a condition a caller can recover from.
    #[must_use]
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, Self::ThreadAffinity { .. } | Self::LifecycleState { .. })
    }
}
