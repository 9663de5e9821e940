//! View identifiers and lookup.

use std::fmt;

/// Numeric identifier of a view inside a view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ViewId(u32);

impl ViewId {
    /// "No id": binders treat it as "use the root view itself".
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for ViewId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of a view tree that can locate its descendants.
pub trait ViewNode: Sized {
    fn view_id(&self) -> ViewId;

    /// This node if it matches, otherwise the first matching descendant.
    fn find_view_by_id(&self, id: ViewId) -> Option<Self>;
}
