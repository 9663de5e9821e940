//! Shared view tree.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lifebind_core::{ViewId, ViewNode};

struct ViewData {
    id: ViewId,
    children: RefCell<Vec<FixtureView>>,
}

/// Reference-counted view node. Clones share the node.
#[derive(Clone)]
pub struct FixtureView {
    data: Rc<ViewData>,
}

impl FixtureView {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            data: Rc::new(ViewData {
                id: ViewId::new(id),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Append a child and return `self` for chaining.
    #[must_use]
    pub fn with_child(self, child: Self) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&self, child: Self) {
        self.data.children.borrow_mut().push(child);
    }

    /// Detach `child` if it is a direct child. Returns whether it was.
    pub fn remove_child(&self, child: &Self) -> bool {
        let mut children = self.data.children.borrow_mut();
        let before = children.len();
        children.retain(|c| !c.ptr_eq(child));
        children.len() != before
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.data.children.borrow().len()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl ViewNode for FixtureView {
    fn view_id(&self) -> ViewId {
        self.data.id
    }

    fn find_view_by_id(&self, id: ViewId) -> Option<Self> {
        if self.data.id == id {
            return Some(self.clone());
        }
        self.data
            .children
            .borrow()
            .iter()
            .find_map(|child| child.find_view_by_id(id))
    }
}

impl fmt::Debug for FixtureView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureView")
            .field("id", &self.data.id)
            .field("children", &self.child_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_descendant() {
        let root = FixtureView::new(1)
            .with_child(FixtureView::new(2).with_child(FixtureView::new(4)))
            .with_child(FixtureView::new(3));
        let found = root.find_view_by_id(ViewId::new(4)).expect("nested view");
        assert_eq!(found.view_id(), ViewId::new(4));
        assert!(root.find_view_by_id(ViewId::new(1)).is_some_and(|v| v.ptr_eq(&root)));
        assert!(root.find_view_by_id(ViewId::new(5)).is_none());
    }
}
