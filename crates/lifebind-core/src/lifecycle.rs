#![forbid(unsafe_code)]

//! Framework-neutral lifecycle registry.
//!
//! A [`Lifecycle`] tracks the coarse state of a UI owner (or of one of its
//! views) and delivers [`LifecycleEvent`]s to registered observers.
//!
//! # Invariants
//!
//! 1. State only changes through [`Lifecycle::handle_event`]; once
//!    [`LifecycleState::Destroyed`] is reached every further event is ignored.
//! 2. Observers are notified in registration order.
//! 3. Delivery iterates a snapshot of the observer list and holds no borrow
//!    while an observer runs. An observer may therefore add or remove
//!    observers (itself included) during delivery; an observer removed before
//!    its turn in the current delivery is skipped.
//! 4. Observers only see events dispatched after they registered.
//! 5. [`Lifecycle::remove_observer`] is idempotent.
//!
//! # Failure Modes
//!
//! - Removing an unknown observer id returns `false`.
//! - Dropping a [`LifecycleSubscription`] after the lifecycle itself has been
//!   dropped is a no-op.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique lifecycle ids.
static LIFECYCLE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one lifecycle instance. A recreated view gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LifecycleId(u64);

impl LifecycleId {
    fn next() -> Self {
        Self(LIFECYCLE_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle for one registered observer, unique within its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Coarse lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifecycleState {
    Initialized,
    Created,
    Started,
    Resumed,
    /// Terminal.
    Destroyed,
}

impl LifecycleState {
    /// Whether the state is at least `other` (and not destroyed, unless `other` is).
    #[must_use]
    pub fn is_at_least(self, other: Self) -> bool {
        if self == Self::Destroyed {
            return other == Self::Destroyed;
        }
        self >= other
    }
}

/// Transition delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

impl LifecycleEvent {
    /// State the lifecycle is in after this event.
    #[must_use]
    pub const fn target_state(self) -> LifecycleState {
        match self {
            Self::Create | Self::Stop => LifecycleState::Created,
            Self::Start | Self::Pause => LifecycleState::Started,
            Self::Resume => LifecycleState::Resumed,
            Self::Destroy => LifecycleState::Destroyed,
        }
    }
}

/// Receives lifecycle transitions. Every hook defaults to a no-op.
pub trait LifecycleObserver {
    fn on_create(&self, _lifecycle: &Lifecycle) {}
    fn on_start(&self, _lifecycle: &Lifecycle) {}
    fn on_resume(&self, _lifecycle: &Lifecycle) {}
    fn on_pause(&self, _lifecycle: &Lifecycle) {}
    fn on_stop(&self, _lifecycle: &Lifecycle) {}
    fn on_destroy(&self, _lifecycle: &Lifecycle) {}
}

struct ObserverEntry {
    id: ObserverId,
    observer: Rc<dyn LifecycleObserver>,
}

struct LifecycleInner {
    id: LifecycleId,
    state: Cell<LifecycleState>,
    observers: RefCell<Vec<ObserverEntry>>,
    next_observer: Cell<u64>,
}

/// Shared, single-threaded lifecycle handle.
///
/// Cloning a `Lifecycle` creates a new handle to the **same** registry.
#[derive(Clone)]
pub struct Lifecycle {
    inner: Rc<LifecycleInner>,
}

impl Lifecycle {
    /// Create a lifecycle in [`LifecycleState::Initialized`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(LifecycleInner {
                id: LifecycleId::next(),
                state: Cell::new(LifecycleState::Initialized),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(1),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> LifecycleId {
        self.inner.id
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.inner.state.get()
    }

    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state() == LifecycleState::Destroyed
    }

    /// Register an observer for future events.
    pub fn add_observer(&self, observer: Rc<dyn LifecycleObserver>) -> ObserverId {
        let raw = self.inner.next_observer.get();
        self.inner.next_observer.set(raw + 1);
        let id = ObserverId(raw);
        self.inner
            .observers
            .borrow_mut()
            .push(ObserverEntry { id, observer });
        id
    }

    /// Register an observer and tie its registration to the returned guard.
    #[must_use = "dropping the subscription removes the observer"]
    pub fn subscribe(&self, observer: Rc<dyn LifecycleObserver>) -> LifecycleSubscription {
        let id = self.add_observer(observer);
        LifecycleSubscription {
            lifecycle: self.downgrade(),
            lifecycle_id: self.id(),
            observer: id,
        }
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.inner.observers.borrow_mut();
        match observers.iter().position(|entry| entry.id == id) {
            Some(index) => {
                observers.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_observer(&self, id: ObserverId) -> bool {
        self.inner
            .observers
            .borrow()
            .iter()
            .any(|entry| entry.id == id)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Move to the event's target state and notify observers.
    pub fn handle_event(&self, event: LifecycleEvent) {
        if self.is_destroyed() {
            #[cfg(feature = "tracing")]
            tracing::debug!(lifecycle = self.id().get(), ?event, "event after destroy ignored");
            return;
        }
        self.inner.state.set(event.target_state());

        let snapshot: Vec<(ObserverId, Rc<dyn LifecycleObserver>)> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|entry| (entry.id, Rc::clone(&entry.observer)))
            .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            lifecycle = self.id().get(),
            ?event,
            observers = snapshot.len(),
            "lifecycle dispatch"
        );

        for (id, observer) in snapshot {
            if !self.has_observer(id) {
                continue;
            }
            match event {
                LifecycleEvent::Create => observer.on_create(self),
                LifecycleEvent::Start => observer.on_start(self),
                LifecycleEvent::Resume => observer.on_resume(self),
                LifecycleEvent::Pause => observer.on_pause(self),
                LifecycleEvent::Stop => observer.on_stop(self),
                LifecycleEvent::Destroy => observer.on_destroy(self),
            }
        }
    }

    /// Shorthand for `handle_event(LifecycleEvent::Destroy)`.
    pub fn destroy(&self) {
        self.handle_event(LifecycleEvent::Destroy);
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakLifecycle {
        WeakLifecycle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same registry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Lifecycle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Lifecycle {}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("id", &self.inner.id)
            .field("state", &self.state())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Non-owning lifecycle handle.
#[derive(Clone)]
pub struct WeakLifecycle {
    inner: Weak<LifecycleInner>,
}

impl WeakLifecycle {
    #[must_use]
    pub fn upgrade(&self) -> Option<Lifecycle> {
        self.inner.upgrade().map(|inner| Lifecycle { inner })
    }
}

impl fmt::Debug for WeakLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakLifecycle")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// RAII registration: dropping it removes the observer.
///
/// Holds the lifecycle weakly, so a subscription never keeps a destroyed
/// owner's registry alive.
#[must_use = "dropping the subscription removes the observer"]
pub struct LifecycleSubscription {
    lifecycle: WeakLifecycle,
    lifecycle_id: LifecycleId,
    observer: ObserverId,
}

impl LifecycleSubscription {
    #[must_use]
    pub fn observer_id(&self) -> ObserverId {
        self.observer
    }

    #[must_use]
    pub fn lifecycle_id(&self) -> LifecycleId {
        self.lifecycle_id
    }

    /// Whether the observer is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle
            .upgrade()
            .is_some_and(|lifecycle| lifecycle.has_observer(self.observer))
    }
}

impl Drop for LifecycleSubscription {
    fn drop(&mut self) {
        if let Some(lifecycle) = self.lifecycle.upgrade() {
            lifecycle.remove_observer(self.observer);
        }
    }
}

impl fmt::Debug for LifecycleSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleSubscription")
            .field("lifecycle", &self.lifecycle_id)
            .field("observer", &self.observer)
            .field("active", &self.is_active())
            .finish()
    }
}
