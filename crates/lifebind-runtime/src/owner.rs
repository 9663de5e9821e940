//! Capabilities a UI owner exposes to binding accessors.
//!
//! The three owner kinds nest: every view host is a lifecycle owner, and
//! every modal is a view host that may additionally own a window.

use lifebind_core::{Lifecycle, ViewId};

/// Anything with a lifecycle of its own (screen kind).
pub trait LifecycleOwner {
    fn lifecycle(&self) -> Lifecycle;
}

/// An owner whose displayed view can be torn down and recreated while the
/// owner itself persists (view-host kind).
pub trait ViewHost: LifecycleOwner {
    type View;

    /// The currently displayed view, if one exists.
    fn view(&self) -> Option<Self::View>;

    /// Lifecycle of the currently displayed view. A recreated view comes with
    /// a fresh lifecycle.
    fn view_lifecycle(&self) -> Option<Lifecycle>;

    fn has_view(&self) -> bool {
        self.view_lifecycle().is_some()
    }
}

/// A view host that renders inside its own window (modal kind).
///
/// A modal's window exists before (and possibly without) a content view.
pub trait ModalOwner: ViewHost {
    /// Root of the modal's window.
    fn window_root(&self) -> Option<Self::View>;

    fn has_window(&self) -> bool {
        self.window_root().is_some()
    }
}

/// Resolves a view from an identifier within the owner's content.
pub trait ViewLookup {
    type View;

    fn find_view_by_id(&self, id: ViewId) -> Option<Self::View>;
}
