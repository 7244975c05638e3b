//! Event names, payloads and the dispatcher that delivers them.
//!
//! Every object in the simulation that announces occurrences (bodies, shapes,
//! the world) owns an [`EventDispatcher`](dispatcher::EventDispatcher). The set
//! of occurrence names is closed: [`EventType`] lists all of them and each
//! name has exactly one payload struct. The payload type *is* the key used to
//! register and dispatch, so a listener can never receive a payload that does
//! not belong to the name it subscribed to.
//!
//! Submodules:
//! - [`body`] – bodies entering and leaving the world
//! - [`contact`] – collisions and begin/end contact notifications
//! - [`dispatcher`] – listener storage, registration and synchronous delivery
//! - [`sleep`] – body sleep state transitions
//! - [`step`] – notifications around each world step
pub mod body;
pub mod contact;
pub mod dispatcher;
pub mod sleep;
pub mod step;

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use self::body::{AddBodyEvent, RemoveBodyEvent};
use self::contact::{
    BeginContactEvent, BeginShapeContactEvent, CollideEvent, EndContactEvent,
    EndShapeContactEvent,
};
use self::dispatcher::ListenerList;
use self::sleep::{SleepEvent, SleepyEvent, WakeUpEvent};
use self::step::{PostStepEvent, PreStepEvent};

/// The closed set of occurrence names a dispatcher can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    AddBody,
    BeginContact,
    BeginShapeContact,
    Collide,
    EndContact,
    EndShapeContact,
    PostStep,
    PreStep,
    RemoveBody,
    Sleep,
    Sleepy,
    #[serde(rename = "wakeup")]
    WakeUp,
}

impl EventType {
    /// Every event name, in declaration order.
    pub const ALL: [EventType; 12] = [
        EventType::AddBody,
        EventType::BeginContact,
        EventType::BeginShapeContact,
        EventType::Collide,
        EventType::EndContact,
        EventType::EndShapeContact,
        EventType::PostStep,
        EventType::PreStep,
        EventType::RemoveBody,
        EventType::Sleep,
        EventType::Sleepy,
        EventType::WakeUp,
    ];

    /// Wire name of the event, as used in traces and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::AddBody => "addBody",
            EventType::BeginContact => "beginContact",
            EventType::BeginShapeContact => "beginShapeContact",
            EventType::Collide => "collide",
            EventType::EndContact => "endContact",
            EventType::EndShapeContact => "endShapeContact",
            EventType::PostStep => "postStep",
            EventType::PreStep => "preStep",
            EventType::RemoveBody => "removeBody",
            EventType::Sleep => "sleep",
            EventType::Sleepy => "sleepy",
            EventType::WakeUp => "wakeup",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

thread_local! {
    static NEXT_TARGET_ID: Cell<u64> = const { Cell::new(1) };
}

/// Identifies the dispatcher instance that emitted an event.
///
/// Ids are unique within the creating thread and never reused, so a
/// payload's back-reference cannot be confused with another dispatcher even
/// after the original one has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(u64);

impl TargetId {
    pub(crate) fn next() -> Self {
        NEXT_TARGET_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            TargetId(id)
        })
    }

    /// Raw numeric value of the id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A payload bound to exactly one [`EventType`].
///
/// Implemented for every payload struct by the table declaration below.
pub trait Event: fmt::Debug + Sized + 'static {
    /// The name this payload is announced under.
    const TYPE: EventType;

    /// Name of this event. Same as [`Event::TYPE`].
    fn event_type(&self) -> EventType {
        Self::TYPE
    }

    /// Dispatcher that last dispatched this payload, if any.
    fn target(&self) -> Option<TargetId>;

    /// Overwrite the back-reference. Only dispatch calls this.
    fn set_target(&mut self, target: TargetId);

    #[doc(hidden)]
    fn listeners(table: &ListenerTable) -> &ListenerList<Self>;

    #[doc(hidden)]
    fn listeners_mut(table: &mut ListenerTable) -> &mut ListenerList<Self>;
}

/// Declares the listener table and binds each payload to its name and slot.
macro_rules! event_table {
    ($( $variant:ident => $slot:ident : $payload:ty ),* $(,)?) => {
        /// One ordered listener sequence per [`EventType`].
        ///
        /// Every sequence exists from construction on; only its contents change.
        #[derive(Default)]
        pub struct ListenerTable {
            $( $slot: ListenerList<$payload>, )*
        }

        impl ListenerTable {
            /// Number of listeners currently registered for `event_type`.
            pub fn len_of(&self, event_type: EventType) -> usize {
                match event_type {
                    $( EventType::$variant => self.$slot.len(), )*
                }
            }
        }

        $(
            impl Event for $payload {
                const TYPE: EventType = EventType::$variant;

                fn target(&self) -> Option<TargetId> {
                    self.target
                }

                fn set_target(&mut self, target: TargetId) {
                    self.target = Some(target);
                }

                fn listeners(table: &ListenerTable) -> &ListenerList<Self> {
                    &table.$slot
                }

                fn listeners_mut(table: &mut ListenerTable) -> &mut ListenerList<Self> {
                    &mut table.$slot
                }
            }
        )*
    };
}

event_table! {
    AddBody => add_body: AddBodyEvent,
    BeginContact => begin_contact: BeginContactEvent,
    BeginShapeContact => begin_shape_contact: BeginShapeContactEvent,
    Collide => collide: CollideEvent,
    EndContact => end_contact: EndContactEvent,
    EndShapeContact => end_shape_contact: EndShapeContactEvent,
    PostStep => post_step: PostStepEvent,
    PreStep => pre_step: PreStepEvent,
    RemoveBody => remove_body: RemoveBodyEvent,
    Sleep => sleep: SleepEvent,
    Sleepy => sleepy: SleepyEvent,
    WakeUp => wake_up: WakeUpEvent,
}
