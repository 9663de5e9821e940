//! Strategies for choosing which lifecycle frames a binding.
//!
//! Each strategy is a zero-sized value implementing [`LifecycleSource`] for
//! the owner kind it supports:
//!
//! | Owner kind | Strategy | Observed lifecycle |
//! |------------|----------|--------------------|
//! | screen | [`SelfLifecycle`] | the owner's own |
//! | view host | [`ChildViewLifecycle`] | the displayed view's |
//! | modal | [`DialogOrViewLifecycle`] | the view's if one exists, else the owner's |
//!
//! Resolution is a pure function of the owner's state at call time. Nothing
//! about the previous choice is remembered, so a modal that gains a view
//! between two epochs is observed through its view on the second one.

use lifebind_core::{BindError, Lifecycle, Result};

use crate::owner::{LifecycleOwner, ModalOwner, ViewHost};

/// Resolves the lifecycle a binding must observe for a given owner.
pub trait LifecycleSource<O: ?Sized> {
    fn resolve(&self, owner: &O) -> Result<Lifecycle>;

    /// Short strategy name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Observe the owner's own lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelfLifecycle;

impl<O: LifecycleOwner + ?Sized> LifecycleSource<O> for SelfLifecycle {
    fn resolve(&self, owner: &O) -> Result<Lifecycle> {
        Ok(owner.lifecycle())
    }

    fn name(&self) -> &'static str {
        "self"
    }
}

/// Observe the lifecycle of the owner's displayed view.
///
/// Fails with [`BindError::LifecycleState`] when no view exists, which means
/// the binding was requested before the view was created or after it was
/// torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChildViewLifecycle;

impl<O: ViewHost + ?Sized> LifecycleSource<O> for ChildViewLifecycle {
    fn resolve(&self, owner: &O) -> Result<Lifecycle> {
        owner.view_lifecycle().ok_or_else(|| {
            BindError::lifecycle_state(
                "view host has no view lifecycle; binding requested before view creation or after view teardown",
            )
        })
    }

    fn name(&self) -> &'static str {
        "child_view"
    }
}

/// Observe a modal's view lifecycle when it has a view, otherwise the
/// modal's own lifecycle.
///
/// A modal without a view must at least have a window for the binding to be
/// meaningful; with neither, resolution fails with
/// [`BindError::LifecycleState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogOrViewLifecycle;

impl<O: ModalOwner + ?Sized> LifecycleSource<O> for DialogOrViewLifecycle {
    fn resolve(&self, owner: &O) -> Result<Lifecycle> {
        if let Some(view_lifecycle) = owner.view_lifecycle() {
            return Ok(view_lifecycle);
        }
        if owner.has_window() {
            return Ok(owner.lifecycle());
        }
        Err(BindError::lifecycle_state(
            "modal has neither a view nor a window yet",
        ))
    }

    fn name(&self) -> &'static str {
        "dialog_or_view"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Owner {
        own: Lifecycle,
        view: RefCell<Option<Lifecycle>>,
        window: bool,
    }

    impl Owner {
        fn new(window: bool) -> Self {
            Self {
                own: Lifecycle::new(),
                view: RefCell::new(None),
                window,
            }
        }
    }

    impl LifecycleOwner for Owner {
        fn lifecycle(&self) -> Lifecycle {
            self.own.clone()
        }
    }

    impl ViewHost for Owner {
        type View = ();

        fn view(&self) -> Option<()> {
            self.view.borrow().as_ref().map(|_| ())
        }

        fn view_lifecycle(&self) -> Option<Lifecycle> {
            self.view.borrow().clone()
        }
    }

    impl ModalOwner for Owner {
        fn window_root(&self) -> Option<()> {
            self.window.then_some(())
        }
    }

    #[test]
    fn self_lifecycle_returns_owner_lifecycle() {
        let owner = Owner::new(false);
        let lc = SelfLifecycle.resolve(&owner).unwrap();
        assert!(lc.ptr_eq(&owner.own));
    }

    #[test]
    fn child_view_requires_view() {
        let owner = Owner::new(false);
        let err = ChildViewLifecycle.resolve(&owner).unwrap_err();
        assert!(matches!(err, BindError::LifecycleState { .. }));

        let view = Lifecycle::new();
        *owner.view.borrow_mut() = Some(view.clone());
        let lc = ChildViewLifecycle.resolve(&owner).unwrap();
        assert!(lc.ptr_eq(&view));
    }

    #[test]
    fn dialog_without_view_uses_own_lifecycle() {
        let owner = Owner::new(true);
        let lc = DialogOrViewLifecycle.resolve(&owner).unwrap();
        assert!(lc.ptr_eq(&owner.own));
    }

    #[test]
    fn dialog_with_view_uses_view_lifecycle() {
        let owner = Owner::new(true);
        let view = Lifecycle::new();
        *owner.view.borrow_mut() = Some(view.clone());
        let lc = DialogOrViewLifecycle.resolve(&owner).unwrap();
        assert!(lc.ptr_eq(&view));
    }

    #[test]
    fn dialog_reresolves_on_every_call() {
        let owner = Owner::new(true);
        assert!(DialogOrViewLifecycle.resolve(&owner).unwrap().ptr_eq(&owner.own));

        let view = Lifecycle::new();
        *owner.view.borrow_mut() = Some(view.clone());
        assert!(DialogOrViewLifecycle.resolve(&owner).unwrap().ptr_eq(&view));

        *owner.view.borrow_mut() = None;
        assert!(DialogOrViewLifecycle.resolve(&owner).unwrap().ptr_eq(&owner.own));
    }

    #[test]
    fn dialog_without_window_or_view_fails() {
        let owner = Owner::new(false);
        let err = DialogOrViewLifecycle.resolve(&owner).unwrap_err();
        assert_eq!(
            err,
            BindError::lifecycle_state("modal has neither a view nor a window yet")
        );
    }

    #[test]
    fn strategy_names() {
        assert_eq!(LifecycleSource::<Owner>::name(&SelfLifecycle), "self");
        assert_eq!(LifecycleSource::<Owner>::name(&ChildViewLifecycle), "child_view");
        assert_eq!(
            LifecycleSource::<Owner>::name(&DialogOrViewLifecycle),
            "dialog_or_view"
        );
    }
}
