#![forbid(unsafe_code)]

//! Lazy, lifecycle-scoped bindings for UI owners.
//!
//! This crate caches a "bound view" value per owner and discards it when
//! the owner's visual lifetime ends:
//!
//! - [`LazyLifecycleBoundCache`]: binds on first access, caches exactly one
//!   value per lifecycle epoch, and releases it on a later executor turn
//!   once the observed lifecycle is destroyed.
//! - [`LifecycleSource`]: chooses which lifecycle to observe.
//!   [`SelfLifecycle`] for screens, [`ChildViewLifecycle`] for view hosts,
//!   [`DialogOrViewLifecycle`] for modals.
//! - [`binder`]: stock binders that locate a root view per owner kind.
//! - [`factory`]: constructors that pick the strategy from the owner kind.
//!
//! # Architecture
//!
//! Owners expose capabilities through [`LifecycleOwner`], [`ViewHost`], and
//! [`ModalOwner`]. The cache never stores an owner; it is borrowed for one
//! `get`. Lifecycles, the UI executor, and thread affinity come from
//! `lifebind-core`.
//!
//! # Invariants
//!
//! 1. The binder runs at most once per lifecycle epoch.
//! 2. Every `get` checks the executor's designated thread first.
//! 3. Lifecycle choice is re-derived every time the cache is empty.
//! 4. Releases are posted, never applied inside a lifecycle dispatch.
//! 5. Errors propagate to the caller unchanged and nothing is cached on error.

pub mod binder;
pub mod cache;
pub mod factory;
pub mod options;
pub mod owner;
pub mod source;

pub use binder::{ModalBinder, ScreenBinder, ViewHostBinder};
pub use cache::{Binder, LazyLifecycleBoundCache};
pub use factory::{
    ModalBinding, ScreenBinding, ViewHostBinding, modal_binding, modal_binding_by_id,
    screen_binding, screen_binding_by_id, view_host_binding, view_host_view_binding,
};
pub use options::BindingOptions;
pub use owner::{LifecycleOwner, ModalOwner, ViewHost, ViewLookup};
pub use source::{ChildViewLifecycle, DialogOrViewLifecycle, LifecycleSource, SelfLifecycle};
