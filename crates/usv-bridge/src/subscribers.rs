use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;
type Slots<T> = Arc<Mutex<BTreeMap<u64, Callback<T>>>>;

/// Callback registry backing the `on_*` subscription surface.
///
/// Delivery happens under the registry lock in registration order, so a
/// single stream never reorders events and [`Subscription::cancel`] cannot
/// return while a delivery to that callback is still in flight.
pub struct SubscriberList<T> {
    slots: Slots<T>,
    next_id: AtomicU64,
}

impl<T: 'static> SubscriberList<T> {
    pub fn new() -> Self {
        SubscriberList {
            slots: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots
            .lock()
            .expect("subscriber registry poisoned")
            .insert(id, Box::new(callback));

        let slots = Arc::downgrade(&self.slots);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    slots
                        .lock()
                        .expect("subscriber registry poisoned")
                        .remove(&id);
                }
            })),
        }
    }

    /// Deliver `value` to every live subscriber.
    ///
    /// Must not be called from inside one of this list's own callbacks; the
    /// registry lock is not reentrant.
    pub fn emit(&self, value: &T) {
        let slots = self.slots.lock().expect("subscriber registry poisoned");
        for callback in slots.values() {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .expect("subscriber registry poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for SubscriberList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by every `on_*` registration.
///
/// Release is explicit: dropping the handle without calling
/// [`Subscription::cancel`] leaves the subscription active.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Unregister the callback. Idempotent; once this returns, the callback
    /// will not fire again.
    pub fn cancel(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.release.is_none()
    }
}
