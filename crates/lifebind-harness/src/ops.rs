//! Operation sequences and a reference model for property tests.
//!
//! A [`CacheModel`] tracks what a binding cache must report after each
//! [`CacheOp`], independent of how the cache implements it. Tests drive a
//! real cache and a model with the same sequence and compare.

use proptest::prelude::*;

/// One step against a cache bound to a replaceable owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOp {
    /// Read the binding.
    Get,
    /// Make the next binder call fail.
    FailNextBind,
    /// Destroy the observed lifecycle and replace the owner (or its view).
    Destroy,
    /// Run pending executor tasks.
    Drain,
}

/// Weighted strategy for a single op. Reads dominate, as in real use.
pub fn cache_op() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => Just(CacheOp::Get),
        1 => Just(CacheOp::FailNextBind),
        2 => Just(CacheOp::Destroy),
        2 => Just(CacheOp::Drain),
    ]
}

pub fn cache_ops(max_len: usize) -> impl Strategy<Value = Vec<CacheOp>> {
    proptest::collection::vec(cache_op(), 0..max_len)
}

/// What a `Get` should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetOutcome {
    /// The cached value with this serial.
    Hit(u64),
    /// A freshly bound value with this serial.
    Bound(u64),
    /// The binder failed.
    Failed,
}

/// Reference model of a single binding cache.
#[derive(Debug, Clone, Default)]
pub struct CacheModel {
    /// Serial of the cached value, if any.
    cached: Option<u64>,
    release_pending: bool,
    fail_next: bool,
    binds: u64,
}

impl CacheModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `op`. Returns the expected outcome for `Get`, `None` otherwise.
    pub fn apply(&mut self, op: CacheOp) -> Option<GetOutcome> {
        match op {
            CacheOp::Get => Some(self.get()),
            CacheOp::FailNextBind => {
                self.fail_next = true;
                None
            }
            CacheOp::Destroy => {
                if self.cached.is_some() {
                    self.release_pending = true;
                }
                None
            }
            CacheOp::Drain => {
                if self.release_pending {
                    self.cached = None;
                    self.release_pending = false;
                }
                None
            }
        }
    }

    fn get(&mut self) -> GetOutcome {
        if let Some(serial) = self.cached {
            return GetOutcome::Hit(serial);
        }
        if self.fail_next {
            self.fail_next = false;
            return GetOutcome::Failed;
        }
        self.binds += 1;
        self.cached = Some(self.binds);
        GetOutcome::Bound(self.binds)
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.cached.is_some()
    }

    #[must_use]
    pub fn release_pending(&self) -> bool {
        self.release_pending
    }

    /// Successful binds so far.
    #[must_use]
    pub fn binds(&self) -> u64 {
        self.binds
    }
}
