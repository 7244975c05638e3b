//! World integration tests for membership, contact and sleep events.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use simevents::components::body::{Body, BodyId, SleepState};
use simevents::components::contactequation::ContactEquation;
use simevents::components::shape::{Shape, ShapeId};
use simevents::events::body::{AddBodyEvent, RemoveBodyEvent};
use simevents::events::contact::{
    BeginContactEvent, BeginShapeContactEvent, CollideEvent, EndContactEvent,
    EndShapeContactEvent,
};
use simevents::events::dispatcher::{EventDispatcher, EventTarget, Listener};
use simevents::events::sleep::{SleepEvent, SleepyEvent, WakeUpEvent};
use simevents::events::step::{PostStepEvent, PreStepEvent};
use simevents::events::{Event, EventType};
use simevents::world::World;

const DT: f32 = 0.1;

type Journal = Rc<RefCell<Vec<(EventType, Vec<BodyId>)>>>;

fn journal<E: Event>(
    target: &impl EventTarget,
    journal: &Journal,
    bodies: fn(&E) -> Vec<BodyId>,
) {
    let journal = Rc::clone(journal);
    target.add_event_listener(Listener::new(move |_: &EventDispatcher, e: &E| {
        journal.borrow_mut().push((E::TYPE, bodies(e)))
    }));
}

fn pair(a: &Option<Rc<Body>>, b: &Option<Rc<Body>>) -> Vec<BodyId> {
    [a, b]
        .into_iter()
        .filter_map(|x| x.as_ref().map(|b| b.id()))
        .collect()
}

fn sphere_body() -> Rc<Body> {
    Rc::new(Body::new().with_shape(Shape::sphere(0.5)))
}

fn contact(a: &Rc<Body>, b: &Rc<Body>) -> ContactEquation {
    ContactEquation::between_first_shapes(Rc::clone(a), Rc::clone(b))
}

fn names(journal: &Journal) -> Vec<EventType> {
    journal.borrow().iter().map(|(e, _)| *e).collect()
}

#[test]
fn add_and_remove_body_are_announced_on_the_world() {
    let mut world = World::new();
    let j = Journal::default();
    journal::<AddBodyEvent>(&world, &j, |e| pair(&e.body, &None));
    journal::<RemoveBodyEvent>(&world, &j, |e| pair(&e.body, &None));

    let body = sphere_body();
    world.add_body(Rc::clone(&body));
    world.remove_body(&body);
    world.remove_body(&body);

    assert_eq!(
        *j.borrow(),
        vec![
            (EventType::AddBody, vec![body.id()]),
            (EventType::RemoveBody, vec![body.id()]),
        ]
    );
}

#[test]
fn contact_lifecycle_over_three_steps() {
    let mut world = World::new();
    let a = sphere_body();
    let b = sphere_body();
    world.add_body(Rc::clone(&a));
    world.add_body(Rc::clone(&b));

    let j = Journal::default();
    journal::<BeginContactEvent>(&world, &j, |e| pair(&e.body_a, &e.body_b));
    journal::<EndContactEvent>(&world, &j, |e| pair(&e.body_a, &e.body_b));

    // Step 1: contact begins.
    world.report_contact(contact(&b, &a));
    world.step(DT);
    assert_eq!(*j.borrow(), vec![(EventType::BeginContact, vec![a.id(), b.id()])]);

    // Step 2: still touching, nothing new.
    world.report_contact(contact(&a, &b));
    world.step(DT);
    assert_eq!(j.borrow().len(), 1);

    // Step 3: no contact reported, so it ends.
    world.step(DT);
    assert_eq!(
        j.borrow().last().cloned(),
        Some((EventType::EndContact, vec![a.id(), b.id()]))
    );
    assert_eq!(j.borrow().len(), 2);
}

#[test]
fn collide_goes_to_both_bodies_with_the_other_body() {
    let mut world = World::new();
    let a = sphere_body();
    let b = sphere_body();
    world.add_body(Rc::clone(&a));
    world.add_body(Rc::clone(&b));

    let on_a = Journal::default();
    let on_b = Journal::default();
    journal::<CollideEvent>(&*a, &on_a, |e| pair(&e.body, &None));
    journal::<CollideEvent>(&*b, &on_b, |e| pair(&e.body, &None));

    let seen_contact = Rc::new(RefCell::new(None));
    let s = Rc::clone(&seen_contact);
    a.add_event_listener(Listener::new(move |d: &EventDispatcher, e: &CollideEvent| {
        assert_eq!(e.target(), Some(d.id()));
        *s.borrow_mut() = e.contact.as_ref().map(|c| c.depth);
    }));

    world.report_contact(contact(&a, &b).with_normal(Vec3::new(0.0, 1.0, 0.0), 0.02));
    world.step(DT);

    assert_eq!(*on_a.borrow(), vec![(EventType::Collide, vec![b.id()])]);
    assert_eq!(*on_b.borrow(), vec![(EventType::Collide, vec![a.id()])]);
    assert_eq!(*seen_contact.borrow(), Some(0.02));
}

type ShapeLog = Rc<RefCell<Vec<(&'static str, Option<ShapeId>, Option<ShapeId>)>>>;

fn shape_watcher(label: &'static str, log: &ShapeLog) -> Listener<BeginShapeContactEvent> {
    let log = Rc::clone(log);
    Listener::new(move |_: &EventDispatcher, e: &BeginShapeContactEvent| {
        log.borrow_mut().push((
            label,
            e.shape_a.as_ref().map(|s| s.id()),
            e.shape_b.as_ref().map(|s| s.id()),
        ));
    })
}

#[test]
fn shape_contacts_reach_world_and_both_shapes() {
    let mut world = World::new();
    let a = sphere_body();
    let b = sphere_body();
    world.add_body(Rc::clone(&a));
    world.add_body(Rc::clone(&b));

    let shape_ids = ShapeLog::default();
    world.add_event_listener(shape_watcher("world", &shape_ids));
    a.shapes()[0].add_event_listener(shape_watcher("shape_a", &shape_ids));
    b.shapes()[0].add_event_listener(shape_watcher("shape_b", &shape_ids));

    let ended = Journal::default();
    journal::<EndShapeContactEvent>(&*a.shapes()[0], &ended, |e| pair(&e.body_a, &e.body_b));

    world.report_contact(contact(&a, &b));
    world.step(DT);
    world.step(DT);

    let expected = (Some(a.shapes()[0].id()), Some(b.shapes()[0].id()));
    let got = shape_ids.borrow();
    assert_eq!(got.len(), 3);
    let labels: Vec<&str> = got.iter().map(|(l, _, _)| *l).collect();
    assert_eq!(labels, vec!["world", "shape_a", "shape_b"]);
    assert!(got.iter().all(|(_, sa, sb)| (*sa, *sb) == expected));
    assert_eq!(*ended.borrow(), vec![(EventType::EndShapeContact, vec![a.id(), b.id()])]);
}

#[test]
fn step_events_bracket_contact_events() {
    let mut world = World::new();
    let a = sphere_body();
    let b = sphere_body();
    world.add_body(Rc::clone(&a));
    world.add_body(Rc::clone(&b));

    let j = Journal::default();
    journal::<PreStepEvent>(&world, &j, |_| Vec::new());
    journal::<BeginContactEvent>(&world, &j, |e| pair(&e.body_a, &e.body_b));
    journal::<PostStepEvent>(&world, &j, |_| Vec::new());
    journal::<CollideEvent>(&*a, &j, |e| pair(&e.body, &None));

    world.report_contact(contact(&a, &b));
    world.step(DT);

    assert_eq!(
        names(&j),
        vec![
            EventType::PreStep,
            EventType::Collide,
            EventType::BeginContact,
            EventType::PostStep,
        ]
    );
}

#[test]
fn resting_body_goes_sleepy_then_sleeps_then_wakes_on_impact() {
    let mut world = World::new().with_allow_sleep(true);
    let resting = Rc::new(
        Body::new()
            .with_shape(Shape::sphere(0.5))
            .with_sleep_limits(0.1, 0.25),
    );
    let mover = Rc::new(
        Body::new()
            .with_shape(Shape::sphere(0.5))
            .with_velocity(Vec3::new(3.0, 0.0, 0.0))
            .with_allow_sleep(false),
    );
    world.add_body(Rc::clone(&resting));
    world.add_body(Rc::clone(&mover));

    let j = Journal::default();
    journal::<SleepyEvent>(&*resting, &j, |_| Vec::new());
    journal::<SleepEvent>(&*resting, &j, |_| Vec::new());
    journal::<WakeUpEvent>(&*resting, &j, |_| Vec::new());

    // t=0.1 sleepy, t=0.4 sleeping (0.3 > 0.25)
    for _ in 0..4 {
        world.step(DT);
    }
    assert_eq!(resting.sleep_state(), SleepState::Sleeping);
    assert_eq!(names(&j), vec![EventType::Sleepy, EventType::Sleep]);

    world.report_contact(contact(&mover, &resting));
    world.step(DT);
    assert_eq!(
        names(&j),
        vec![EventType::Sleepy, EventType::Sleep, EventType::WakeUp, EventType::Sleepy]
    );
    assert_eq!(resting.sleep_state(), SleepState::Sleepy);
    assert!(mover.is_awake());
}

#[test]
fn world_without_sleep_never_ticks_bodies() {
    let mut world = World::new();
    let body = sphere_body();
    world.add_body(Rc::clone(&body));
    for _ in 0..50 {
        world.step(DT);
    }
    assert!(body.is_awake());
}
