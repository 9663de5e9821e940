//! Constructors that pick the lifecycle strategy from the owner kind.
//!
//! | Owner kind | Bound to | Constructors |
//! |------------|----------|--------------|
//! | screen ([`LifecycleOwner`]) | the owner | [`screen_binding`], [`screen_binding_by_id`] |
//! | view host ([`ViewHost`]) | the displayed view | [`view_host_binding`], [`view_host_view_binding`] |
//! | modal ([`ModalOwner`]) | the view if any, else the modal | [`modal_binding`], [`modal_binding_by_id`] |
//!
//! The `*_binding` forms take an arbitrary binder; the others wrap one of the
//! stock binders from [`crate::binder`].

use lifebind_core::{Result, UiExecutor, ViewId, ViewNode};

use crate::binder::{ModalBinder, ScreenBinder, ViewHostBinder};
use crate::cache::LazyLifecycleBoundCache;
use crate::owner::{LifecycleOwner, ModalOwner, ViewHost, ViewLookup};
use crate::source::{ChildViewLifecycle, DialogOrViewLifecycle, SelfLifecycle};

/// Binding scoped to a screen's own lifecycle.
pub type ScreenBinding<O, V> = LazyLifecycleBoundCache<O, V, SelfLifecycle>;

/// Binding scoped to a view host's displayed view.
pub type ViewHostBinding<O, V> = LazyLifecycleBoundCache<O, V, ChildViewLifecycle>;

/// Binding scoped to a modal's view, or to the modal before it has one.
pub type ModalBinding<O, V> = LazyLifecycleBoundCache<O, V, DialogOrViewLifecycle>;

/// Screen binding with a custom binder.
pub fn screen_binding<O, V>(
    executor: impl UiExecutor + 'static,
    binder: impl Fn(&O) -> Result<V> + 'static,
) -> ScreenBinding<O, V>
where
    O: LifecycleOwner,
    V: Clone + 'static,
{
    LazyLifecycleBoundCache::new(executor, SelfLifecycle, binder)
}

/// Screen binding over the view the screen resolves for `root_id`.
pub fn screen_binding_by_id<O, V, F>(
    executor: impl UiExecutor + 'static,
    root_id: ViewId,
    bind_view: F,
) -> ScreenBinding<O, V>
where
    O: LifecycleOwner + ViewLookup,
    V: Clone + 'static,
    F: Fn(&<O as ViewLookup>::View) -> Option<V> + 'static,
{
    let binder = ScreenBinder::new(root_id, bind_view);
    screen_binding(executor, move |owner: &O| binder.bind(owner))
}

/// View-host binding with a custom binder.
pub fn view_host_binding<O, V>(
    executor: impl UiExecutor + 'static,
    binder: impl Fn(&O) -> Result<V> + 'static,
) -> ViewHostBinding<O, V>
where
    O: ViewHost,
    V: Clone + 'static,
{
    LazyLifecycleBoundCache::new(executor, ChildViewLifecycle, binder)
}

/// View-host binding over the host's current view.
pub fn view_host_view_binding<O, V, F>(
    executor: impl UiExecutor + 'static,
    bind_view: F,
) -> ViewHostBinding<O, V>
where
    O: ViewHost,
    V: Clone + 'static,
    F: Fn(&O::View) -> Option<V> + 'static,
{
    let binder = ViewHostBinder::new(bind_view);
    view_host_binding(executor, move |owner: &O| binder.bind(owner))
}

/// Modal binding with a custom binder.
pub fn modal_binding<O, V>(
    executor: impl UiExecutor + 'static,
    binder: impl Fn(&O) -> Result<V> + 'static,
) -> ModalBinding<O, V>
where
    O: ModalOwner,
    V: Clone + 'static,
{
    LazyLifecycleBoundCache::new(executor, DialogOrViewLifecycle, binder)
}

/// Modal binding over the modal's window root, or its descendant `root_id`.
///
/// Pass [`ViewId::NONE`] to bind the window root itself.
pub fn modal_binding_by_id<O, V, F>(
    executor: impl UiExecutor + 'static,
    root_id: ViewId,
    bind_view: F,
) -> ModalBinding<O, V>
where
    O: ModalOwner,
    O::View: ViewNode,
    V: Clone + 'static,
    F: Fn(&O::View) -> Option<V> + 'static,
{
    let binder = ModalBinder::new(root_id, bind_view);
    modal_binding(executor, move |owner: &O| binder.bind(owner))
}
