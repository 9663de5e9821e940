#![forbid(unsafe_code)]

//! Core: lifecycle registry, UI-thread executor, thread affinity, and errors.
//!
//! Everything in this crate is single-threaded by construction. Handles are
//! `Rc`-based and `!Send`; the [`ThreadAffinityGuard`] exists for the logical
//! "designated UI thread" check that callers perform at their entry points.

pub mod error;
pub mod executor;
pub mod lifecycle;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod thread;
pub mod view;

pub use error::{BindError, Result};
pub use executor::{MainQueue, Task, UiExecutor};
pub use lifecycle::{
    Lifecycle, LifecycleEvent, LifecycleId, LifecycleObserver, LifecycleState,
    LifecycleSubscription, ObserverId, WeakLifecycle,
};
pub use thread::ThreadAffinityGuard;
pub use view::{ViewId, ViewNode};
