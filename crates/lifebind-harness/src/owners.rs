//! Reference owners.
//!
//! Each fixture owns its lifecycle(s) and exposes small methods that walk
//! them the way a host UI framework would.
//!
//! | Fixture | Kind | Lifecycles |
//! |---------|------|------------|
//! | [`ScreenFixture`] | screen | own |
//! | [`ViewHostFixture`] | view host | own + one per created view |
//! | [`ModalFixture`] | modal | own + one per created view, plus a window |

use std::cell::RefCell;

use lifebind_core::{Lifecycle, LifecycleEvent, LifecycleState, ViewId, ViewNode};
use lifebind_runtime::{LifecycleOwner, ModalOwner, ViewHost, ViewLookup};

use crate::view::FixtureView;

fn bring_up(lifecycle: &Lifecycle) {
    lifecycle.handle_event(LifecycleEvent::Create);
    lifecycle.handle_event(LifecycleEvent::Start);
    lifecycle.handle_event(LifecycleEvent::Resume);
}

/// Top-level screen with content resolved by id.
#[derive(Debug)]
pub struct ScreenFixture {
    lifecycle: Lifecycle,
    content: RefCell<Option<FixtureView>>,
}

impl ScreenFixture {
    /// A created, resumed screen without content.
    #[must_use]
    pub fn new() -> Self {
        let lifecycle = Lifecycle::new();
        bring_up(&lifecycle);
        Self {
            lifecycle,
            content: RefCell::new(None),
        }
    }

    pub fn set_content(&self, root: FixtureView) {
        *self.content.borrow_mut() = Some(root);
    }

    pub fn destroy(&self) {
        self.lifecycle.destroy();
        self.content.borrow_mut().take();
    }
}

impl Default for ScreenFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleOwner for ScreenFixture {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }
}

impl ViewLookup for ScreenFixture {
    type View = FixtureView;

    fn find_view_by_id(&self, id: ViewId) -> Option<FixtureView> {
        self.content
            .borrow()
            .as_ref()
            .and_then(|root| root.find_view_by_id(id))
    }
}

#[derive(Debug)]
struct HostedView {
    root: FixtureView,
    lifecycle: Lifecycle,
}

impl HostedView {
    fn create(root: FixtureView) -> Self {
        let lifecycle = Lifecycle::new();
        bring_up(&lifecycle);
        Self { root, lifecycle }
    }
}

/// Shared view-slot behaviour for view hosts and modals.
#[derive(Debug)]
struct ViewSlot {
    current: RefCell<Option<HostedView>>,
}

impl ViewSlot {
    fn new() -> Self {
        Self {
            current: RefCell::new(None),
        }
    }

    /// Replace any current view (destroying it) with `root`.
    fn create(&self, root: FixtureView) -> Lifecycle {
        self.destroy();
        let hosted = HostedView::create(root);
        let lifecycle = hosted.lifecycle.clone();
        tracing::trace!(
            view = %hosted.root.view_id(),
            lifecycle = lifecycle.id().get(),
            "fixture view created"
        );
        *self.current.borrow_mut() = Some(hosted);
        lifecycle
    }

    /// Destroy the current view. The slot is cleared before dispatch so
    /// observers see the host without a view.
    fn destroy(&self) -> bool {
        let hosted = self.current.borrow_mut().take();
        match hosted {
            Some(hosted) => {
                tracing::trace!(view = %hosted.root.view_id(), "fixture view destroyed");
                hosted.lifecycle.destroy();
                true
            }
            None => false,
        }
    }

    fn view(&self) -> Option<FixtureView> {
        self.current.borrow().as_ref().map(|h| h.root.clone())
    }

    fn lifecycle(&self) -> Option<Lifecycle> {
        self.current.borrow().as_ref().map(|h| h.lifecycle.clone())
    }
}

/// Fragment-like owner whose view may be recreated while it persists.
#[derive(Debug)]
pub struct ViewHostFixture {
    lifecycle: Lifecycle,
    view: ViewSlot,
}

impl ViewHostFixture {
    #[must_use]
    pub fn new() -> Self {
        let lifecycle = Lifecycle::new();
        bring_up(&lifecycle);
        Self {
            lifecycle,
            view: ViewSlot::new(),
        }
    }

    /// Create (or recreate) the displayed view. Returns its lifecycle.
    pub fn create_view(&self, root: FixtureView) -> Lifecycle {
        self.view.create(root)
    }

    /// Tear down the displayed view. Returns `false` if there was none.
    pub fn destroy_view(&self) -> bool {
        self.view.destroy()
    }

    /// Tear down the view, then the host.
    pub fn destroy(&self) {
        self.view.destroy();
        self.lifecycle.destroy();
    }
}

impl Default for ViewHostFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleOwner for ViewHostFixture {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }
}

impl ViewHost for ViewHostFixture {
    type View = FixtureView;

    fn view(&self) -> Option<FixtureView> {
        self.view.view()
    }

    fn view_lifecycle(&self) -> Option<Lifecycle> {
        self.view.lifecycle()
    }
}

/// Modal owner: a window that exists from creation, plus an optional
/// content view.
#[derive(Debug)]
pub struct ModalFixture {
    lifecycle: Lifecycle,
    window: RefCell<Option<FixtureView>>,
    view: ViewSlot,
}

impl ModalFixture {
    /// A modal with neither window nor view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            window: RefCell::new(None),
            view: ViewSlot::new(),
        }
    }

    /// Create the modal's window and bring the modal up.
    pub fn show(&self, window_root: FixtureView) {
        *self.window.borrow_mut() = Some(window_root);
        if !self.lifecycle.state().is_at_least(LifecycleState::Created) {
            bring_up(&self.lifecycle);
        }
    }

    /// Create (or recreate) the content view and attach it to the window root.
    pub fn create_view(&self, root: FixtureView) -> Lifecycle {
        self.detach_view();
        if let Some(window) = self.window.borrow().as_ref() {
            window.add_child(root.clone());
        }
        self.view.create(root)
    }

    pub fn destroy_view(&self) -> bool {
        self.detach_view();
        self.view.destroy()
    }

    /// Tear down the view, then the modal, then drop the window.
    pub fn dismiss(&self) {
        self.destroy_view();
        self.lifecycle.destroy();
        self.window.borrow_mut().take();
    }

    fn detach_view(&self) {
        let (Some(window), Some(view)) = (self.window.borrow().clone(), self.view.view()) else {
            return;
        };
        window.remove_child(&view);
    }
}

impl Default for ModalFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleOwner for ModalFixture {
    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }
}

impl ViewHost for ModalFixture {
    type View = FixtureView;

    fn view(&self) -> Option<FixtureView> {
        self.view.view()
    }

    fn view_lifecycle(&self) -> Option<Lifecycle> {
        self.view.lifecycle()
    }
}

impl ModalOwner for ModalFixture {
    fn window_root(&self) -> Option<FixtureView> {
        self.window.borrow().clone()
    }
}
