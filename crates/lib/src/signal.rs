//! Mute-able multicast notification channels.
//!
//! A [`Signal`] delivers an event synchronously, in subscription order, to every
//! live subscriber. Subscribers are held weakly: a signal never keeps a handler
//! or an [`EventQueue`] alive once every other reference to it is dropped.
//!
//! Handlers only ever see `&E`. Code that wants to react to an event by mutating
//! the tree connects an [`EventQueue`] instead and drains it once the mutation
//! that fired the event has returned.
//!
//! ```
//! use fractree::signal::{Signal, handler};
//! use std::{cell::Cell, rc::Rc};
//!
//! let seen = Rc::new(Cell::new(0));
//! let counter = {
//!     let seen = seen.clone();
//!     handler(move |n: &i32| seen.set(seen.get() + *n))
//! };
//!
//! let mut signal = Signal::new();
//! signal.connect(&counter);
//! signal.emit(&2);
//! signal.mute();
//! signal.emit(&5);
//! assert_eq!(seen.get(), 2);
//!
//! drop(counter);
//! assert_eq!(signal.subscriber_count(), 0);
//! ```

use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

use crate::tree::NodeId;

/// A subscriber callback. The caller owns the `Rc`; signals keep only a weak reference.
pub type Handler<E> = Rc<dyn Fn(&E)>;

/// Wraps a closure as a [`Handler`].
pub fn handler<E, F>(f: F) -> Handler<E>
where
    F: Fn(&E) + 'static,
{
    Rc::new(f)
}

enum Slot<E> {
    Handler(Weak<dyn Fn(&E)>),
    Queue(Weak<RefCell<VecDeque<E>>>),
    /// Forwarding edge to the same channel on another node, managed by the tree.
    Relay(NodeId),
}

impl<E> Slot<E> {
    fn is_live(&self) -> bool {
        match self {
            Slot::Handler(weak) => weak.strong_count() > 0,
            Slot::Queue(weak) => weak.strong_count() > 0,
            Slot::Relay(_) => true,
        }
    }
}

/// A mute-able multicast channel with weak subscribers.
pub struct Signal<E> {
    slots: Vec<Slot<E>>,
    active: bool,
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            active: true,
        }
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("active", &self.active)
            .field("subscribers", &self.subscriber_count())
            .field("relay", &self.relay_target())
            .finish()
    }
}

impl<E> Signal<E> {
    /// Create an active signal with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler. Connecting the same handler twice has no effect.
    pub fn connect(&mut self, handler: &Handler<E>) {
        self.prune();
        let weak = Rc::downgrade(handler);
        let present = self.slots.iter().any(|slot| match slot {
            Slot::Handler(existing) => Weak::ptr_eq(existing, &weak),
            _ => false,
        });
        if !present {
            self.slots.push(Slot::Handler(weak));
        }
    }

    /// Unsubscribe a handler. Returns whether it was connected.
    pub fn disconnect(&mut self, handler: &Handler<E>) -> bool {
        let weak = Rc::downgrade(handler);
        let before = self.slots.len();
        self.slots.retain(|slot| match slot {
            Slot::Handler(existing) => !Weak::ptr_eq(existing, &weak),
            _ => true,
        });
        before != self.slots.len()
    }

    /// Subscribe a queue; each emitted event is cloned onto its back.
    pub fn connect_queue(&mut self, queue: &EventQueue<E>) {
        self.prune();
        let weak = Rc::downgrade(&queue.inner);
        let present = self.slots.iter().any(|slot| match slot {
            Slot::Queue(existing) => Weak::ptr_eq(existing, &weak),
            _ => false,
        });
        if !present {
            self.slots.push(Slot::Queue(weak));
        }
    }

    /// Unsubscribe a queue. Returns whether it was connected.
    pub fn disconnect_queue(&mut self, queue: &EventQueue<E>) -> bool {
        let weak = Rc::downgrade(&queue.inner);
        let before = self.slots.len();
        self.slots.retain(|slot| match slot {
            Slot::Queue(existing) => !Weak::ptr_eq(existing, &weak),
            _ => true,
        });
        before != self.slots.len()
    }

    /// Stop delivering (and relaying) events until [`activate`](Self::activate).
    pub fn mute(&mut self) {
        self.active = false;
    }

    /// Resume delivering events.
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Drop every handler and queue subscriber.
    ///
    /// The relay edge to the parent's channel belongs to the tree and survives.
    pub fn clear(&mut self) {
        self.slots.retain(|slot| matches!(slot, Slot::Relay(_)));
    }

    /// Number of live handler and queue subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !matches!(slot, Slot::Relay(_)) && slot.is_live())
            .count()
    }

    fn prune(&mut self) {
        self.slots.retain(Slot::is_live);
    }

    pub(crate) fn set_relay(&mut self, target: Option<NodeId>) {
        self.slots.retain(|slot| !matches!(slot, Slot::Relay(_)));
        if let Some(target) = target {
            self.slots.push(Slot::Relay(target));
        }
    }

    fn relay_target(&self) -> Option<NodeId> {
        self.slots.iter().find_map(|slot| match slot {
            Slot::Relay(target) => Some(*target),
            _ => None,
        })
    }

    /// The node whose matching channel receives this channel's events next,
    /// or `None` when muted or not relayed.
    pub(crate) fn relay(&self) -> Option<NodeId> {
        if self.active { self.relay_target() } else { None }
    }
}

impl<E: Clone> Signal<E> {
    /// Deliver `event` to every live subscriber in subscription order.
    ///
    /// Returns the number of subscribers reached. A muted signal reaches none.
    pub fn emit(&self, event: &E) -> usize {
        if !self.active {
            return 0;
        }
        let mut delivered = 0;
        for slot in &self.slots {
            match slot {
                Slot::Handler(weak) => {
                    if let Some(callback) = weak.upgrade() {
                        callback(event);
                        delivered += 1;
                    }
                }
                Slot::Queue(weak) => {
                    if let Some(queue) = weak.upgrade() {
                        queue.borrow_mut().push_back(event.clone());
                        delivered += 1;
                    }
                }
                Slot::Relay(_) => {}
            }
        }
        delivered
    }
}

/// An explicit, caller-owned event queue.
///
/// Clones share the same underlying queue.
pub struct EventQueue<E> {
    inner: Rc<RefCell<VecDeque<E>>>,
}

impl<E> Clone for EventQueue<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }
}

impl<E> fmt::Debug for EventQueue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("pending", &self.len())
            .finish()
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Remove and return the oldest pending event.
    pub fn pop(&self) -> Option<E> {
        self.inner.borrow_mut().pop_front()
    }

    /// Remove and return every pending event, oldest first.
    pub fn drain(&self) -> Vec<E> {
        self.inner.borrow_mut().drain(..).collect()
    }
}
