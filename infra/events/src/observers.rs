use crate::fault::CallbackError;
use crate::subscription::{Detach, Subscription};
use parking_lot::Mutex;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{trace, warn};

/// Shared callback type stored by an [`ObserverList`].
pub type Callback<T> = Arc<dyn Fn(&T) -> Result<(), CallbackError> + Send + Sync>;

/// Outcome counters of a single synchronous delivery.
///
/// Publishers only learn how many callbacks ran; callback results are never forwarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Callbacks that returned `Ok(())`.
    pub delivered: usize,
    /// Callbacks that returned an error or panicked.
    pub faulted: usize,
}

impl Delivery {
    /// Total number of callbacks invoked.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.delivered + self.faulted
    }

    /// `true` if no callback was invoked.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.attempted() == 0
    }
}

struct Entry<T> {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

/// Synchronous observer registry with isolated callbacks.
///
/// The event bus keeps one list per channel; view-state holders use one for their
/// change notifications.
///
/// ## Rules
/// - Callbacks run in registration order on the notifying thread.
/// - No lock is held while callbacks run, so a callback may add or release observers.
/// - A released observer is never called again, even later within an in-flight `notify`.
/// - A callback error or panic is logged and counted; delivery continues with the next one.
pub struct ObserverList<T> {
    name: Arc<str>,
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry<T>>>,
}

impl<T: 'static> ObserverList<T> {
    /// Creates an empty list. `name` identifies the list in logs and subscription handles.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new(Self { name: name.into(), next_id: AtomicU64::new(0), entries: Mutex::new(Vec::new()) })
    }

    /// Registers `callback` and returns the handle that keeps it registered.
    ///
    /// Dropping the returned [`Subscription`] unregisters the callback.
    pub fn add<F>(self: &Arc<Self>, callback: F) -> Subscription
    where
        F: Fn(&T) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        self.entries.lock().push(Entry {
            id,
            active: Arc::clone(&active),
            callback: Arc::new(callback),
        });

        let owner = Arc::downgrade(self);
        Subscription::new(id, Arc::clone(&self.name), active, owner)
    }

    /// Invokes every registered callback with `value`.
    pub fn notify(&self, value: &T) -> Delivery {
        let snapshot: Vec<(u64, Arc<AtomicBool>, Callback<T>)> = self
            .entries
            .lock()
            .iter()
            .map(|e| (e.id, Arc::clone(&e.active), Arc::clone(&e.callback)))
            .collect();

        let mut delivery = Delivery::default();
        for (id, active, callback) in snapshot {
            if !active.load(Ordering::Acquire) {
                trace!(observers = %self.name, subscription = id, "Skipping released observer");
                continue;
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| callback(value)))
                .unwrap_or_else(|panic| Err(CallbackError::from_panic(&*panic)));

            match outcome {
                Ok(()) => delivery.delivered += 1,
                Err(err) => {
                    delivery.faulted += 1;
                    warn!(
                        observers = %self.name,
                        subscription = id,
                        label = err.label(),
                        error = %err,
                        "Observer callback faulted; continuing delivery"
                    );
                },
            }
        }
        delivery
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Releases every registered callback. Outstanding handles become inert.
    ///
    /// Returns the number of callbacks that were released.
    pub fn clear(&self) -> usize {
        let drained: Vec<Entry<T>> = std::mem::take(&mut *self.entries.lock());
        for entry in &drained {
            entry.active.store(false, Ordering::Release);
        }
        drained.len()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: 'static> Detach for ObserverList<T> {
    fn detach(&self, id: u64) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        before != entries.len()
    }
}

impl<T> fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("name", &self.name)
            .field("observers", &self.entries.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&u32) -> Result<(), CallbackError>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        (hits, move |_: &u32| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn notifies_in_registration_order() {
        let list = ObserverList::<u32>::new("order");
        let order = Arc::new(Mutex::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|n| {
                let order = Arc::clone(&order);
                list.add(move |v: &u32| {
                    order.lock().push((n, *v));
                    Ok(())
                })
            })
            .collect();

        let delivery = list.notify(&7);
        assert_eq!(delivery, Delivery { delivered: 3, faulted: 0 });
        assert_eq!(*order.lock(), vec![(0, 7), (1, 7), (2, 7)]);
        drop(subs);
        assert!(list.is_empty());
    }

    #[test]
    fn errors_and_panics_are_isolated() {
        let list = ObserverList::<u32>::new("faults");
        let (hits, ok) = counter();

        let _failing = list.add(|_| Err("refused".into()));
        let _panicking = list.add(|_| panic!("observer exploded"));
        let _ok = list.add(ok);

        let delivery = list.notify(&1);
        assert_eq!(delivery, Delivery { delivered: 1, faulted: 2 });
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // The panicking observer stays registered and keeps being isolated.
        let delivery = list.notify(&2);
        assert_eq!(delivery.faulted, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn released_mid_delivery_is_not_called() {
        let list = ObserverList::<u32>::new("reentrant");
        let (hits, second) = counter();

        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&victim);
        let _first = list.add(move |_| {
            if let Some(sub) = slot.lock().as_ref() {
                sub.unsubscribe();
            }
            Ok(())
        });
        *victim.lock() = Some(list.add(second));

        let delivery = list.notify(&1);
        assert_eq!(delivery.attempted(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn callbacks_may_register_new_observers() {
        let list = ObserverList::<u32>::new("grow");
        let spawned: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

        let weak = Arc::downgrade(&list);
        let store = Arc::clone(&spawned);
        let _root = list.add(move |_| {
            if let Some(list) = weak.upgrade() {
                store.lock().push(list.add(|_| Ok(())));
            }
            Ok(())
        });

        // Observers registered during a delivery join from the next one.
        assert_eq!(list.notify(&1).attempted(), 1);
        assert_eq!(list.notify(&2).attempted(), 2);
    }

    #[test]
    fn clear_makes_handles_inert() {
        let list = ObserverList::<u32>::new("clear");
        let (hits, cb) = counter();
        let sub = list.add(cb);

        assert_eq!(list.clear(), 1);
        assert!(!sub.is_active());
        assert!(list.notify(&1).is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(!sub.unsubscribe(), "already released by clear");
    }
}
