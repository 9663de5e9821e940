#![forbid(unsafe_code)]

//! Lazy, lifecycle-scoped binding cache.
//!
//! # Design
//!
//! [`LazyLifecycleBoundCache`] holds at most one bound value. The first
//! [`get`](LazyLifecycleBoundCache::get) resolves which lifecycle frames the
//! value (through a [`LifecycleSource`]), registers a one-shot destroy
//! observer on it, and runs the binder. Later calls return the cached value
//! until that lifecycle is destroyed.
//!
//! The destroy observer never touches the cache directly. It removes itself
//! from the lifecycle and posts the release to the [`UiExecutor`], so the
//! cache is only emptied on a later turn, after the lifecycle has finished
//! walking its observers.
//!
//! # Invariants
//!
//! 1. At most one value is live per (cache, lifecycle epoch); the binder runs
//!    exactly once per epoch unless it fails.
//! 2. A cache bound to a live lifecycle has exactly one registered observer;
//!    an empty cache has none once pending releases have run.
//! 3. A `get` issued from inside the destroy dispatch still sees the old
//!    value; any `get` after the release has run binds afresh.
//! 4. A release only applies to the epoch it was scheduled for.
//! 5. The cache never stores the owner. It is borrowed for the duration of
//!    one `get`.
//!
//! # Failure Modes
//!
//! - Off-thread access: [`BindError::ThreadAffinity`](lifebind_core::BindError::ThreadAffinity); the binder is not run.
//! - Resolution fails: [`BindError::LifecycleState`](lifebind_core::BindError::LifecycleState); nothing is registered.
//! - Resolves to an already-destroyed lifecycle: the value is bound and
//!   cached without registering an observer, since no further destroy event
//!   will arrive (a warning is logged). It lives until the cache is dropped.
//! - Binder fails: its error is returned as-is, the observer registered for
//!   the attempt is removed and the cache stays empty, so the next `get`
//!   retries from scratch.
//! - Cache dropped with a release pending: the release becomes a no-op.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use lifebind_core::{
    Lifecycle, LifecycleId, LifecycleObserver, LifecycleSubscription, ObserverId, Result,
    UiExecutor,
};

use crate::options::BindingOptions;
use crate::source::LifecycleSource;

/// Produces a bound value from an owner.
pub type Binder<O, V> = Box<dyn Fn(&O) -> Result<V>>;

enum CacheSlot<V> {
    Empty,
    Bound(V),
}

struct CacheState<V> {
    slot: CacheSlot<V>,
    /// Lifecycle the bound value belongs to.
    bound_to: Option<LifecycleId>,
    /// Present when `slot` is bound to a live lifecycle.
    subscription: Option<LifecycleSubscription>,
    /// Bumped on every successful bind.
    epoch: u64,
}

/// Lazily binds a value for an owner and drops it when the owner's chosen
/// lifecycle is destroyed.
///
/// `V` is handed out by clone, so it should be a cheap handle (typically an
/// `Rc`). All calls must happen on the executor's designated thread.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use lifebind_core::{Lifecycle, MainQueue};
/// use lifebind_runtime::{LazyLifecycleBoundCache, LifecycleOwner, SelfLifecycle};
///
/// struct Screen(Lifecycle);
/// impl LifecycleOwner for Screen {
///     fn lifecycle(&self) -> Lifecycle {
///         self.0.clone()
///     }
/// }
///
/// let queue = MainQueue::new();
/// let cache = LazyLifecycleBoundCache::new(queue.clone(), SelfLifecycle, |_: &Screen| {
///     Ok(Rc::new("bound"))
/// });
/// let screen = Screen(Lifecycle::new());
///
/// let first = cache.get(&screen)?;
/// assert!(Rc::ptr_eq(&first, &cache.get(&screen)?));
///
/// screen.0.destroy();
/// queue.run_pending();
/// assert!(!cache.is_bound());
/// # Ok::<(), lifebind_core::BindError>(())
/// ```
pub struct LazyLifecycleBoundCache<O: ?Sized, V, S> {
    state: Rc<RefCell<CacheState<V>>>,
    binder: Binder<O, V>,
    source: S,
    executor: Rc<dyn UiExecutor>,
    options: BindingOptions,
}

impl<O, V, S> LazyLifecycleBoundCache<O, V, S>
where
    O: ?Sized,
    V: Clone + 'static,
    S: LifecycleSource<O>,
{
    /// Create an empty cache. Nothing is resolved or bound until the first `get`.
    pub fn new(
        executor: impl UiExecutor + 'static,
        source: S,
        binder: impl Fn(&O) -> Result<V> + 'static,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(CacheState {
                slot: CacheSlot::Empty,
                bound_to: None,
                subscription: None,
                epoch: 0,
            })),
            binder: Box::new(binder),
            source,
            executor: Rc::new(executor),
            options: BindingOptions::default(),
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: BindingOptions) -> Self {
        self.options = options;
        self
    }

    /// Return the cached value, binding it first if the cache is empty.
    pub fn get(&self, owner: &O) -> Result<V> {
        self.executor.guard().assert_on_designated_thread()?;

        if let CacheSlot::Bound(value) = &self.state.borrow().slot {
            if self.options.trace_hits {
                tracing::trace!(label = %self.options.label, "binding hit");
            }
            return Ok(value.clone());
        }
        self.bind(owner)
    }

    fn bind(&self, owner: &O) -> Result<V> {
        let _span = tracing::debug_span!(
            "binding_bind",
            label = %self.options.label,
            source = self.source.name()
        )
        .entered();

        let lifecycle = self.source.resolve(owner)?;
        let epoch = self.state.borrow().epoch + 1;

        // A destroyed lifecycle will never dispatch again; don't register on it.
        let subscription = if lifecycle.is_destroyed() {
            tracing::warn!(
                lifecycle = lifecycle.id().get(),
                "binding against a destroyed lifecycle; it is held until the cache is dropped"
            );
            None
        } else {
            let observer = Rc::new(ReleaseOnDestroy {
                state: Rc::downgrade(&self.state),
                executor: Rc::clone(&self.executor),
                epoch,
                observer: Cell::new(None),
                label: self.options.label.clone(),
            });
            let subscription = lifecycle.subscribe(observer.clone());
            observer.observer.set(Some(subscription.observer_id()));
            Some(subscription)
        };

        // On error `subscription` drops here and unregisters the observer.
        let value = (self.binder)(owner).inspect_err(|err| {
            tracing::debug!(error = %err, "binder failed; cache left empty");
        })?;

        let replaced = {
            let mut state = self.state.borrow_mut();
            state.epoch = epoch;
            state.bound_to = Some(lifecycle.id());
            (
                mem::replace(&mut state.slot, CacheSlot::Bound(value.clone())),
                mem::replace(&mut state.subscription, subscription),
            )
        };
        drop(replaced);

        tracing::debug!(epoch, lifecycle = lifecycle.id().get(), "binding created");
        Ok(value)
    }

    /// Whether a value is currently cached.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self.state.borrow().slot, CacheSlot::Bound(_))
    }

    /// Number of successful binds so far.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.state.borrow().epoch
    }

    /// Lifecycle the current value is tied to.
    #[must_use]
    pub fn bound_lifecycle(&self) -> Option<LifecycleId> {
        self.state.borrow().bound_to
    }

    /// Whether the destroy observer for the current value is still registered.
    ///
    /// `false` while a release is pending.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.state
            .borrow()
            .subscription
            .as_ref()
            .is_some_and(LifecycleSubscription::is_active)
    }

    #[must_use]
    pub fn options(&self) -> &BindingOptions {
        &self.options
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<O: ?Sized, V, S: fmt::Debug> fmt::Debug for LazyLifecycleBoundCache<O, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LazyLifecycleBoundCache")
            .field("label", &self.options.label)
            .field("source", &self.source)
            .field("bound", &matches!(state.slot, CacheSlot::Bound(_)))
            .field("epoch", &state.epoch)
            .finish()
    }
}

/// One-shot destroy observer registered for a single epoch.
struct ReleaseOnDestroy<V> {
    state: Weak<RefCell<CacheState<V>>>,
    executor: Rc<dyn UiExecutor>,
    epoch: u64,
    observer: Cell<Option<ObserverId>>,
    label: Cow<'static, str>,
}

impl<V: 'static> LifecycleObserver for ReleaseOnDestroy<V> {
    fn on_destroy(&self, lifecycle: &Lifecycle) {
        if let Some(id) = self.observer.take() {
            lifecycle.remove_observer(id);
        }

        tracing::debug!(
            label = %self.label,
            epoch = self.epoch,
            lifecycle = lifecycle.id().get(),
            "binding release scheduled"
        );

        let state = self.state.clone();
        let epoch = self.epoch;
        let label = self.label.clone();
        self.executor
            .post(Box::new(move || release(&state, epoch, &label)));
    }
}

fn release<V>(state: &Weak<RefCell<CacheState<V>>>, epoch: u64, label: &str) {
    let Some(state) = state.upgrade() else {
        tracing::trace!(label, epoch, "cache dropped before release");
        return;
    };

    let released = {
        let mut state = state.borrow_mut();
        if state.epoch != epoch || matches!(state.slot, CacheSlot::Empty) {
            tracing::trace!(label, epoch, current = state.epoch, "stale release skipped");
            return;
        }
        state.bound_to = None;
        (
            mem::replace(&mut state.slot, CacheSlot::Empty),
            state.subscription.take(),
        )
    };
    // Value and subscription drop outside the borrow.
    drop(released);

    tracing::debug!(label, epoch, "binding released");
}
