#![forbid(unsafe_code)]

//! lifebind public facade.
//!
//! Re-exports the core primitives and the binding runtime, plus a
//! [`prelude`] for the common imports.
//!
//! ```
//! use lifebind::prelude::*;
//!
//! struct Screen {
//!     lifecycle: Lifecycle,
//! }
//!
//! impl LifecycleOwner for Screen {
//!     fn lifecycle(&self) -> Lifecycle {
//!         self.lifecycle.clone()
//!     }
//! }
//!
//! let queue = MainQueue::new();
//! let title = screen_binding(queue.clone(), |_: &Screen| Ok(String::from("inbox")));
//! let screen = Screen { lifecycle: Lifecycle::new() };
//!
//! assert_eq!(title.get(&screen)?, "inbox");
//! screen.lifecycle.destroy();
//! queue.run_pending();
//! assert!(!title.is_bound());
//! # Ok::<(), BindError>(())
//! ```

pub use lifebind_core as core;
pub use lifebind_runtime as runtime;

pub use lifebind_core::{
    BindError, Lifecycle, LifecycleEvent, LifecycleId, LifecycleObserver, LifecycleState,
    LifecycleSubscription, MainQueue, Result, ThreadAffinityGuard, UiExecutor, ViewId, ViewNode,
};
pub use lifebind_runtime::{
    BindingOptions, ChildViewLifecycle, DialogOrViewLifecycle, LazyLifecycleBoundCache,
    LifecycleOwner, LifecycleSource, ModalBinding, ModalOwner, ScreenBinding, SelfLifecycle,
    ViewHost, ViewHostBinding, ViewLookup, modal_binding, modal_binding_by_id, screen_binding,
    screen_binding_by_id, view_host_binding, view_host_view_binding,
};

#[cfg(feature = "tracing-json")]
pub use lifebind_core::logging;

/// Common imports for owners and binding sites.
pub mod prelude {
    pub use crate::{
        BindError, BindingOptions, Lifecycle, LifecycleEvent, LifecycleOwner, LifecycleState,
        MainQueue, ModalOwner, Result, UiExecutor, ViewHost, ViewId, ViewLookup, ViewNode,
        modal_binding, modal_binding_by_id, screen_binding, screen_binding_by_id,
        view_host_binding, view_host_view_binding,
    };
}
