//! Listener registry and synchronous fan-out.
//!
//! [`EventDispatcher`] keeps one ordered listener sequence per
//! [`EventType`](super::EventType). Listeners are registered by payload type:
//! `add_event_listener::<SleepEvent>(..)` can only ever receive
//! [`SleepEvent`](super::sleep::SleepEvent) values.
//!
//! Delivery is immediate: [`EventDispatcher::dispatch_event`] calls every
//! listener before returning. All operations take `&self`, so a listener may
//! register, remove or dispatch on the same dispatcher while it runs. The
//! running pass reads the sequence by index on every step and sees those
//! changes: a listener removed before its turn is skipped, one appended
//! during the pass is reached if its index is still ahead.
//!
//! A panicking listener is not contained. The panic unwinds out of
//! `dispatch_event` and the remaining listeners of that pass do not run. No
//! borrow of the registry is held while a listener runs, so the dispatcher
//! stays usable if the caller catches the panic.
//!
//! # Example
//!
//! ```
//! use simevents::events::dispatcher::{EventDispatcher, Listener};
//! use simevents::events::sleep::SleepEvent;
//!
//! let dispatcher = EventDispatcher::new();
//! let on_sleep = Listener::new(|_d: &EventDispatcher, _e: &SleepEvent| {
//!     println!("fell asleep");
//! });
//! dispatcher.add_event_listener(on_sleep.clone());
//! dispatcher.dispatch_event(&mut SleepEvent::new());
//! dispatcher.remove_event_listener(&on_sleep);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};
use smallvec::SmallVec;

use super::{Event, EventType, ListenerTable, TargetId};

/// Ordered listeners for one event name.
pub type ListenerList<E> = SmallVec<[Listener<E>; 2]>;

/// A callback for payload type `E`.
///
/// The first argument is the dispatcher performing the dispatch. Identity is
/// the shared allocation: clones compare equal, two listeners built from the
/// same closure code do not.
pub struct Listener<E>(Rc<dyn Fn(&EventDispatcher, &E)>);

impl<E> Listener<E> {
    pub fn new(callback: impl Fn(&EventDispatcher, &E) + 'static) -> Self {
        Listener(Rc::new(callback))
    }

    /// Whether both handles refer to the same listener.
    pub fn ptr_eq(&self, other: &Listener<E>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn call(&self, dispatcher: &EventDispatcher, event: &E) {
        (self.0)(dispatcher, event)
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Listener(Rc::clone(&self.0))
    }
}

impl<E> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<E> Eq for Listener<E> {}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Per-object event registry and dispatcher.
pub struct EventDispatcher {
    id: TargetId,
    listeners: RefCell<ListenerTable>,
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDispatcher {
    /// Create a dispatcher with an empty sequence for every event name.
    pub fn new() -> Self {
        Self {
            id: TargetId::next(),
            listeners: RefCell::new(ListenerTable::default()),
        }
    }

    /// Id written into the `target` of every payload this dispatcher sends.
    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Register `listener` for `E`. Registering the same listener twice is a no-op.
    pub fn add_event_listener<E: Event>(&self, listener: Listener<E>) -> &Self {
        let mut table = self.listeners.borrow_mut();
        let list = E::listeners_mut(&mut table);
        if list.iter().any(|l| l.ptr_eq(&listener)) {
            debug!("{}: {:?} already listens to {}", self.id, listener, E::TYPE);
        } else {
            list.push(listener);
        }
        self
    }

    /// Whether `listener` is registered for `E`.
    pub fn has_event_listener<E: Event>(&self, listener: &Listener<E>) -> bool {
        E::listeners(&self.listeners.borrow())
            .iter()
            .any(|l| l.ptr_eq(listener))
    }

    /// Whether anything is registered for `event_type`.
    pub fn has_any_event_listener(&self, event_type: EventType) -> bool {
        self.listeners.borrow().len_of(event_type) > 0
    }

    /// Unregister `listener` for `E`. Unknown listeners are ignored.
    pub fn remove_event_listener<E: Event>(&self, listener: &Listener<E>) -> &Self {
        let mut table = self.listeners.borrow_mut();
        let list = E::listeners_mut(&mut table);
        match list.iter().position(|l| l.ptr_eq(listener)) {
            Some(index) => {
                list.remove(index);
            }
            None => debug!("{}: {:?} not registered for {}", self.id, listener, E::TYPE),
        }
        self
    }

    /// Stamp `event` with this dispatcher's id and deliver it to every
    /// listener registered for `E`, in registration order.
    pub fn dispatch_event<E: Event>(&self, event: &mut E) -> &Self {
        event.set_target(self.id);
        trace!("{}: dispatch {}", self.id, E::TYPE);
        let event: &E = event;
        let mut index = 0;
        while let Some(listener) = self.listener_at::<E>(index) {
            listener.call(self, event);
            index += 1;
        }
        self
    }

    // The borrow ends before the listener is called.
    fn listener_at<E: Event>(&self, index: usize) -> Option<Listener<E>> {
        E::listeners(&self.listeners.borrow()).get(index).cloned()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.listeners.borrow();
        let mut map = f.debug_map();
        for ty in EventType::ALL {
            let count = table.len_of(ty);
            if count > 0 {
                map.entry(&ty.as_str(), &count);
            }
        }
        map.finish()?;
        write!(f, " {}", self.id)
    }
}

/// Event API for types that hold an [`EventDispatcher`].
///
/// Implementors only provide [`EventTarget::events`]; the forwarding methods
/// give the owner the same register/remove/dispatch surface as the
/// dispatcher itself.
pub trait EventTarget {
    /// The dispatcher this object announces its events through.
    fn events(&self) -> &EventDispatcher;

    fn add_event_listener<E: Event>(&self, listener: Listener<E>) -> &Self {
        self.events().add_event_listener(listener);
        self
    }

    fn has_event_listener<E: Event>(&self, listener: &Listener<E>) -> bool {
        self.events().has_event_listener(listener)
    }

    fn has_any_event_listener(&self, event_type: EventType) -> bool {
        self.events().has_any_event_listener(event_type)
    }

    fn remove_event_listener<E: Event>(&self, listener: &Listener<E>) -> &Self {
        self.events().remove_event_listener(listener);
        self
    }

    fn dispatch_event<E: Event>(&self, event: &mut E) -> &Self {
        self.events().dispatch_event(event);
        self
    }
}
