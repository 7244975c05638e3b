//! The simulation world and the events it announces.
//!
//! [`World`] owns the bodies taking part in the simulation and the clock.
//! It does not generate contacts: an external narrowphase hands them in via
//! [`World::report_contact`] and [`World::step`] turns them into events.
//!
//! # Step Flow
//!
//! 1. `preStep` on the world
//! 2. drain reported contacts:
//!    - wake sleeping bodies hit by awake, moving ones
//!    - `collide` on each body of the contact, carrying the other body
//!    - record body and shape pairs
//! 3. diff pairs against the previous step:
//!    `beginContact`/`endContact` on the world,
//!    `beginShapeContact`/`endShapeContact` on the world and both shapes
//! 4. advance [`WorldTime`]
//! 5. `postStep` on the world
//! 6. if sleeping is allowed, `sleep_tick` every body (`sleepy`, `sleep`,
//!    `wakeup` on the bodies)
//!
//! Listeners receive `&EventDispatcher`, not the world, so they cannot
//! mutate it while a step is running.

use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashMap;

use crate::components::body::{Body, BodyId};
use crate::components::contactequation::ContactEquation;
use crate::components::shape::{Shape, ShapeId};
use crate::events::body::{AddBodyEvent, RemoveBodyEvent};
use crate::events::contact::{
    BeginContactEvent, BeginShapeContactEvent, CollideEvent, EndContactEvent,
    EndShapeContactEvent,
};
use crate::events::dispatcher::{EventDispatcher, EventTarget};
use crate::events::step::{PostStepEvent, PreStepEvent};
use crate::resources::overlapkeeper::OverlapKeeper;
use crate::resources::worldtime::WorldTime;

type BodyPair = (Rc<Body>, Rc<Body>);
type ShapePair = (Rc<Body>, Rc<Body>, Rc<Shape>, Rc<Shape>);

#[derive(Debug)]
pub struct World {
    events: EventDispatcher,
    bodies: Vec<Rc<Body>>,
    id_to_body: FxHashMap<BodyId, Rc<Body>>,
    time: WorldTime,
    /// Let bodies fall asleep at the end of each step.
    pub allow_sleep: bool,
    pending_contacts: Vec<Rc<ContactEquation>>,
    body_overlaps: OverlapKeeper<BodyId, BodyPair>,
    shape_overlaps: OverlapKeeper<ShapeId, ShapePair>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            events: EventDispatcher::new(),
            bodies: Vec::new(),
            id_to_body: FxHashMap::default(),
            time: WorldTime::default(),
            allow_sleep: false,
            pending_contacts: Vec::new(),
            body_overlaps: OverlapKeeper::new(),
            shape_overlaps: OverlapKeeper::new(),
        }
    }

    pub fn with_allow_sleep(mut self, allow_sleep: bool) -> Self {
        self.allow_sleep = allow_sleep;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time = self.time.with_time_scale(time_scale);
        self
    }

    pub fn time(&self) -> &WorldTime {
        &self.time
    }

    /// Bodies in insertion order.
    pub fn bodies(&self) -> &[Rc<Body>] {
        &self.bodies
    }

    pub fn get_body_by_id(&self, id: BodyId) -> Option<&Rc<Body>> {
        self.id_to_body.get(&id)
    }

    /// Add a body and announce `addBody`. Returns false if it was already in
    /// the world.
    pub fn add_body(&mut self, body: Rc<Body>) -> bool {
        if self.id_to_body.contains_key(&body.id()) {
            debug!("{} is already in the world", body.id());
            return false;
        }
        self.id_to_body.insert(body.id(), Rc::clone(&body));
        self.bodies.push(Rc::clone(&body));
        self.events
            .dispatch_event(&mut AddBodyEvent::new(Some(body)));
        true
    }

    /// Remove a body and announce `removeBody`. Unknown bodies are ignored.
    pub fn remove_body(&mut self, body: &Rc<Body>) -> bool {
        let Some(removed) = self.id_to_body.remove(&body.id()) else {
            debug!("{} is not in the world", body.id());
            return false;
        };
        self.bodies.retain(|b| b.id() != removed.id());
        self.events
            .dispatch_event(&mut RemoveBodyEvent::new(Some(removed)));
        true
    }

    /// Queue a contact for the next [`World::step`].
    pub fn report_contact(&mut self, contact: ContactEquation) {
        self.pending_contacts.push(Rc::new(contact));
    }

    /// Contacts queued for the next step.
    pub fn pending_contacts(&self) -> &[Rc<ContactEquation>] {
        &self.pending_contacts
    }

    /// Run one step of `dt` unscaled seconds.
    pub fn step(&mut self, dt: f32) {
        self.events.dispatch_event(&mut PreStepEvent::new());

        self.body_overlaps.tick();
        self.shape_overlaps.tick();
        let contacts = std::mem::take(&mut self.pending_contacts);
        for contact in &contacts {
            self.process_contact(contact);
        }
        self.emit_contact_events();

        self.time.advance(dt);
        self.events.dispatch_event(&mut PostStepEvent::new());

        if self.allow_sleep {
            let now = self.time.elapsed;
            for body in &self.bodies {
                body.sleep_tick(now);
            }
        }
    }

    fn process_contact(&mut self, contact: &Rc<ContactEquation>) {
        let (a, b) = (&contact.body_a, &contact.body_b);

        wake_if_hit(a, b);
        wake_if_hit(b, a);

        a.dispatch_event(&mut CollideEvent::new(
            Some(Rc::clone(b)),
            Some(Rc::clone(contact)),
        ));
        b.dispatch_event(&mut CollideEvent::new(
            Some(Rc::clone(a)),
            Some(Rc::clone(contact)),
        ));

        let (lo, hi) = if a.id() <= b.id() { (a, b) } else { (b, a) };
        self.body_overlaps
            .set(a.id(), b.id(), (Rc::clone(lo), Rc::clone(hi)));

        if let (Some(sa), Some(sb)) = (&contact.shape_a, &contact.shape_b) {
            let pair = if sa.id() <= sb.id() {
                (Rc::clone(a), Rc::clone(b), Rc::clone(sa), Rc::clone(sb))
            } else {
                (Rc::clone(b), Rc::clone(a), Rc::clone(sb), Rc::clone(sa))
            };
            self.shape_overlaps.set(sa.id(), sb.id(), pair);
        }
    }

    fn emit_contact_events(&self) {
        let (began, ended) = self.body_overlaps.diff();
        for (a, b) in began {
            debug!("begin contact {} - {}", a.id(), b.id());
            self.events
                .dispatch_event(&mut BeginContactEvent::new(Some(a), Some(b)));
        }
        for (a, b) in ended {
            debug!("end contact {} - {}", a.id(), b.id());
            self.events
                .dispatch_event(&mut EndContactEvent::new(Some(a), Some(b)));
        }

        let (began, ended) = self.shape_overlaps.diff();
        for (body_a, body_b, shape_a, shape_b) in began {
            let mut event = BeginShapeContactEvent::new(
                Some(body_a),
                Some(body_b),
                Some(Rc::clone(&shape_a)),
                Some(Rc::clone(&shape_b)),
            );
            self.events.dispatch_event(&mut event);
            shape_a.dispatch_event(&mut event);
            shape_b.dispatch_event(&mut event);
        }
        for (body_a, body_b, shape_a, shape_b) in ended {
            let mut event = EndShapeContactEvent::new(
                Some(body_a),
                Some(body_b),
                Some(Rc::clone(&shape_a)),
                Some(Rc::clone(&shape_b)),
            );
            self.events.dispatch_event(&mut event);
            shape_a.dispatch_event(&mut event);
            shape_b.dispatch_event(&mut event);
        }
    }
}

/// Wake `body` if it sleeps and `other` hit it while awake and moving
/// clearly faster than its own sleep limit.
fn wake_if_hit(body: &Body, other: &Body) {
    if !body.is_sleeping() || !other.is_awake() {
        return;
    }
    let limit = other.sleep_speed_limit;
    if other.velocity().length_squared() >= 2.0 * limit * limit {
        body.wake_up();
    }
}

impl EventTarget for World {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
