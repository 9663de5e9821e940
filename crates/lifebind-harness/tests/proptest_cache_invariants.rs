#![forbid(unsafe_code)]

//! Property-based invariant tests for `LazyLifecycleBoundCache`.
//!
//! For any interleaving of reads, binder failures, lifecycle destruction,
//! and executor turns:
//!
//! 1. The binder produces exactly one value per lifecycle epoch; every read
//!    in that epoch returns the same instance.
//! 2. After destruction and a drained release, the next read binds a new
//!    instance.
//! 3. A failed bind caches nothing and the next read retries.
//! 4. No lifecycle ever carries more than one cache observer, and destroyed
//!    lifecycles carry none.

use std::cell::Cell;
use std::rc::Rc;

use lifebind_core::{BindError, Lifecycle, MainQueue, ViewId};
use lifebind_harness::ops::{CacheModel, CacheOp, GetOutcome, cache_ops};
use lifebind_harness::{BindCounter, FixtureView, SampleBinding, ScreenFixture, ViewHostFixture};
use lifebind_runtime::{
    LifecycleOwner, ScreenBinding, ViewHost, ViewHostBinding, screen_binding_by_id,
    view_host_view_binding,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Wrap `bind` so it fails once whenever `fail` is set.
fn failing_once(
    fail: &Rc<Cell<bool>>,
    bind: impl Fn(&FixtureView) -> Option<Rc<SampleBinding>> + 'static,
) -> impl Fn(&FixtureView) -> Option<Rc<SampleBinding>> + 'static {
    let fail = Rc::clone(fail);
    move |view| {
        if fail.replace(false) {
            None
        } else {
            bind(view)
        }
    }
}

fn check_get(
    outcome: GetOutcome,
    result: Result<Rc<SampleBinding>, BindError>,
    last: &mut Option<Rc<SampleBinding>>,
) -> Result<(), TestCaseError> {
    match outcome {
        GetOutcome::Hit(serial) => {
            let value = result.map_err(|e| TestCaseError::fail(format!("hit failed: {e}")))?;
            prop_assert_eq!(value.serial, serial);
            let previous = last.as_ref().expect("a hit follows a bind");
            prop_assert!(Rc::ptr_eq(previous, &value), "hit returned a different instance");
        }
        GetOutcome::Bound(serial) => {
            let value = result.map_err(|e| TestCaseError::fail(format!("bind failed: {e}")))?;
            prop_assert_eq!(value.serial, serial);
            if let Some(previous) = last.as_ref() {
                prop_assert!(!Rc::ptr_eq(previous, &value), "rebind reused an instance");
            }
            *last = Some(value);
        }
        GetOutcome::Failed => {
            prop_assert!(
                matches!(result, Err(BindError::BindingProduction { .. })),
                "expected a production error"
            );
        }
    }
    Ok(())
}

// ── Screen-kind owner ───────────────────────────────────────────────────

fn new_screen() -> ScreenFixture {
    let screen = ScreenFixture::new();
    screen.set_content(FixtureView::new(1).with_child(FixtureView::new(2)));
    screen
}

proptest! {
    #[test]
    fn screen_binding_matches_model(ops in cache_ops(64)) {
        let queue = MainQueue::new();
        let counter = BindCounter::new();
        let fail = Rc::new(Cell::new(false));
        let cache: ScreenBinding<ScreenFixture, Rc<SampleBinding>> = screen_binding_by_id(
            queue.clone(),
            ViewId::new(2),
            failing_once(&fail, counter.bind_fn()),
        );

        let mut model = CacheModel::new();
        let mut screen = new_screen();
        let mut retired: Vec<Lifecycle> = Vec::new();
        let mut last = None;

        for op in ops {
            let expected = model.apply(op);
            match op {
                CacheOp::Get => {
                    let outcome = expected.expect("get has an outcome");
                    check_get(outcome, cache.get(&screen), &mut last)?;
                }
                CacheOp::FailNextBind => fail.set(true),
                CacheOp::Destroy => {
                    screen.destroy();
                    retired.push(screen.lifecycle());
                    screen = new_screen();
                }
                CacheOp::Drain => {
                    queue.run_pending();
                }
            }

            prop_assert_eq!(cache.is_bound(), model.is_bound());
            prop_assert_eq!(counter.count(), model.binds());
            prop_assert!(screen.lifecycle().observer_count() <= 1);
            for lifecycle in &retired {
                prop_assert_eq!(lifecycle.observer_count(), 0);
            }
            prop_assert_eq!(
                cache.is_observing(),
                model.is_bound() && !model.release_pending()
            );
        }
    }
}

// ── View-host-kind owner ────────────────────────────────────────────────

proptest! {
    #[test]
    fn view_host_binding_matches_model(ops in cache_ops(64)) {
        let queue = MainQueue::new();
        let counter = BindCounter::new();
        let fail = Rc::new(Cell::new(false));
        let cache: ViewHostBinding<ViewHostFixture, Rc<SampleBinding>> =
            view_host_view_binding(queue.clone(), failing_once(&fail, counter.bind_fn()));

        let mut model = CacheModel::new();
        let host = ViewHostFixture::new();
        let mut view_lifecycle = host.create_view(FixtureView::new(5));
        let mut retired: Vec<Lifecycle> = Vec::new();
        let mut last = None;

        for op in ops {
            let expected = model.apply(op);
            match op {
                CacheOp::Get => {
                    let outcome = expected.expect("get has an outcome");
                    check_get(outcome, cache.get(&host), &mut last)?;
                }
                CacheOp::FailNextBind => fail.set(true),
                CacheOp::Destroy => {
                    retired.push(view_lifecycle);
                    view_lifecycle = host.create_view(FixtureView::new(5));
                }
                CacheOp::Drain => {
                    queue.run_pending();
                }
            }

            prop_assert_eq!(cache.is_bound(), model.is_bound());
            prop_assert_eq!(counter.count(), model.binds());
            prop_assert!(view_lifecycle.observer_count() <= 1);
            prop_assert_eq!(host.lifecycle().observer_count(), 0);
            for lifecycle in &retired {
                prop_assert!(lifecycle.is_destroyed());
                prop_assert_eq!(lifecycle.observer_count(), 0);
            }
        }

        prop_assert!(host.has_view());
    }
}
