//! Sample bound-view type.

use std::cell::Cell;
use std::rc::Rc;

use lifebind_core::{ViewId, ViewNode};

use crate::view::FixtureView;

/// What a binder produces: the bound root plus a serial number that tells
/// separate productions apart.
#[derive(Debug)]
pub struct SampleBinding {
    pub root: FixtureView,
    pub serial: u64,
}

impl SampleBinding {
    #[must_use]
    pub fn root_id(&self) -> ViewId {
        self.root.view_id()
    }
}

/// Counting bind function.
///
/// Refuses views whose id is in the `unbindable` list, mirroring a view that
/// has no generated binding.
#[derive(Debug, Clone, Default)]
pub struct BindCounter {
    count: Rc<Cell<u64>>,
    unbindable: Rc<Vec<ViewId>>,
}

impl BindCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn refusing(ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            count: Rc::default(),
            unbindable: Rc::new(ids.into_iter().map(ViewId::new).collect()),
        }
    }

    /// Number of successful binds.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    pub fn bind(&self, view: &FixtureView) -> Option<Rc<SampleBinding>> {
        if self.unbindable.contains(&view.view_id()) {
            return None;
        }
        self.count.set(self.count.get() + 1);
        Some(Rc::new(SampleBinding {
            root: view.clone(),
            serial: self.count.get(),
        }))
    }

    /// `bind` as an owned closure, for the factory constructors.
    pub fn bind_fn(&self) -> impl Fn(&FixtureView) -> Option<Rc<SampleBinding>> + 'static {
        let counter = self.clone();
        move |view| counter.bind(view)
    }
}
