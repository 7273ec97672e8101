//! Reactive cell — a single value plus an ordered list of observers.
//!
//! `set` hands the new value to every observer synchronously, in the order
//! they subscribed. Single-threaded only: the value sits in a `RefCell` and
//! observers are `Rc` callbacks, matching the one-worker WASM environment.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Writable::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

/// A mutable value that notifies its subscribers on every `set`.
pub struct Writable<T> {
    label: &'static str,
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriberId, Callback<T>)>>,
    /// Deliveries waiting for the running notification round to finish.
    queue: RefCell<VecDeque<(Callback<T>, T)>>,
    notifying: Cell<bool>,
    next_id: Cell<u64>,
}

impl<T: Clone + 'static> Writable<T> {
    pub fn new(value: T) -> Self {
        Self::with_label("writable", value)
    }

    /// Create a cell whose label shows up in log events.
    pub fn with_label(label: &'static str, value: T) -> Self {
        Self {
            label,
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
            queue: RefCell::new(VecDeque::new()),
            notifying: Cell::new(false),
            next_id: Cell::new(0),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Store `value` and notify every subscriber once, in registration order.
    ///
    /// Setting the value it already holds still notifies. A `set` issued by a
    /// subscriber while a notification round is running is queued and
    /// delivered once the current round completes.
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        tracing::debug!(cell = self.label, "set");

        let subscribers: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        if subscribers.is_empty() {
            return;
        }

        {
            let current = self.value.borrow();
            let mut queue = self.queue.borrow_mut();
            for callback in subscribers {
                queue.push_back((callback, current.clone()));
            }
        }

        if !self.notifying.get() {
            self.drain();
        }
    }

    /// Replace the value with `f(current)`.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let current = self.get();
        self.set(f(&current));
    }

    /// Register an observer and call it once with the current value. After
    /// that it is called on every `set`.
    pub fn subscribe<F>(&self, f: F) -> SubscriberId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let callback: Callback<T> = Rc::new(f);
        self.subscribers.borrow_mut().push((id, Rc::clone(&callback)));
        callback(&self.get());
        id
    }

    /// Remove an observer. Returns `false` if `id` is not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Silently restore `value` and drop every subscriber.
    pub(crate) fn clear(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.subscribers.borrow_mut().clear();
        self.queue.borrow_mut().clear();
    }

    fn drain(&self) {
        self.notifying.set(true);
        let _guard = DrainGuard { cell: self };
        loop {
            // The queue borrow must end before the callback runs.
            let next = self.queue.borrow_mut().pop_front();
            let Some((callback, value)) = next else {
                break;
            };
            callback(&value);
        }
    }
}

/// Ends a notification round, also when a subscriber panics mid-round.
/// Deliveries left in the queue by a panic are dropped.
struct DrainGuard<'a, T> {
    cell: &'a Writable<T>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        self.cell.queue.borrow_mut().clear();
        self.cell.notifying.set(false);
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writable")
            .field("label", &self.label)
            .field("value", &*self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}
