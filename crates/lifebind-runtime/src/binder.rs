//! Stock binders for the three owner kinds.
//!
//! Each binder locates the root view for its owner kind and hands it to a
//! caller-supplied `bind_view` function, which turns the view into the bound
//! value or returns `None` when the view cannot be bound.

use lifebind_core::{BindError, Result, ViewId, ViewNode};

use crate::owner::{ModalOwner, ViewHost, ViewLookup};

/// Binds the view a screen resolves for `root_id`.
#[derive(Debug, Clone)]
pub struct ScreenBinder<F> {
    root_id: ViewId,
    bind_view: F,
}

impl<F> ScreenBinder<F> {
    pub fn new(root_id: ViewId, bind_view: F) -> Self {
        Self { root_id, bind_view }
    }

    #[must_use]
    pub fn root_id(&self) -> ViewId {
        self.root_id
    }

    pub fn bind<O, V>(&self, owner: &O) -> Result<V>
    where
        O: ViewLookup + ?Sized,
        F: Fn(&O::View) -> Option<V>,
    {
        let view = owner.find_view_by_id(self.root_id).ok_or_else(|| {
            BindError::production(format!("screen has no view with id {}", self.root_id))
        })?;
        (self.bind_view)(&view)
            .ok_or_else(|| BindError::production(format!("view {} has no binding", self.root_id)))
    }
}

/// Binds a view host's currently displayed view.
#[derive(Debug, Clone)]
pub struct ViewHostBinder<F> {
    bind_view: F,
}

impl<F> ViewHostBinder<F> {
    pub fn new(bind_view: F) -> Self {
        Self { bind_view }
    }

    pub fn bind<O, V>(&self, owner: &O) -> Result<V>
    where
        O: ViewHost + ?Sized,
        F: Fn(&O::View) -> Option<V>,
    {
        let view = owner.view().ok_or_else(|| {
            BindError::lifecycle_state("view host has no view; binding requested outside its view lifetime")
        })?;
        (self.bind_view)(&view)
            .ok_or_else(|| BindError::production("view host's view has no binding"))
    }
}

/// Binds a modal's window root, or the descendant of it with `root_id`.
///
/// [`ViewId::NONE`] selects the window root itself.
#[derive(Debug, Clone)]
pub struct ModalBinder<F> {
    root_id: ViewId,
    bind_view: F,
}

impl<F> ModalBinder<F> {
    pub fn new(root_id: ViewId, bind_view: F) -> Self {
        Self { root_id, bind_view }
    }

    /// Bind the window root itself.
    pub fn window_root(bind_view: F) -> Self {
        Self::new(ViewId::NONE, bind_view)
    }

    #[must_use]
    pub fn root_id(&self) -> ViewId {
        self.root_id
    }

    pub fn bind<O, V>(&self, owner: &O) -> Result<V>
    where
        O: ModalOwner + ?Sized,
        O::View: ViewNode,
        F: Fn(&O::View) -> Option<V>,
    {
        let window_root = owner
            .window_root()
            .ok_or_else(|| BindError::lifecycle_state("modal window hasn't been created yet"))?;
        let view = if self.root_id.is_none() {
            window_root
        } else {
            window_root.find_view_by_id(self.root_id).ok_or_else(|| {
                BindError::production(format!("modal window has no view with id {}", self.root_id))
            })?
        };
        (self.bind_view)(&view)
            .ok_or_else(|| BindError::production(format!("view {} has no binding", view.view_id())))
    }
}
