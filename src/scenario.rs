//! Seeded demo scenario.
//!
//! Builds a [`World`] of spheres with random velocities, lets them slow down
//! under linear damping (standing in for a solver) and reports random
//! contacts between pairs. Every event announced by the world or a body is
//! appended to a trace, which is what the `simevents` binary prints.
//!
//! The same configuration always yields the same sequence of events; only
//! the body and dispatcher ids differ between runs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec3;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::components::body::{Body, BodyId};
use crate::components::contactequation::ContactEquation;
use crate::components::shape::Shape;
use crate::events::body::{AddBodyEvent, RemoveBodyEvent};
use crate::events::contact::{
    BeginContactEvent, BeginShapeContactEvent, CollideEvent, EndContactEvent,
    EndShapeContactEvent,
};
use crate::events::dispatcher::{EventDispatcher, EventTarget, Listener};
use crate::events::sleep::{SleepEvent, SleepyEvent, WakeUpEvent};
use crate::events::step::{PostStepEvent, PreStepEvent};
use crate::events::{Event, EventType, TargetId};
use crate::resources::simconfig::SimConfig;
use crate::world::World;

const SPHERE_RADIUS: f32 = 0.5;
const MAX_INITIAL_SPEED: f32 = 2.0;

/// One event as seen by the scenario's listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    /// Index of the step during which the event was announced.
    pub step: u64,
    pub event: EventType,
    /// Dispatcher that announced the event.
    pub target: Option<TargetId>,
    /// Bodies carried by the payload, if any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bodies: Vec<BodyId>,
}

#[derive(Clone, Default)]
struct Recorder {
    trace: Rc<RefCell<Vec<TraceRecord>>>,
    step: Rc<Cell<u64>>,
}

impl Recorder {
    fn watch<E: Event>(&self, target: &impl EventTarget, bodies: fn(&E) -> Vec<BodyId>) {
        let recorder = self.clone();
        target.add_event_listener(Listener::new(move |_: &EventDispatcher, event: &E| {
            let record = TraceRecord {
                step: recorder.step.get(),
                event: E::TYPE,
                target: event.target(),
                bodies: bodies(event),
            };
            debug!("step {}: {} {:?}", record.step, record.event, record.bodies);
            recorder.trace.borrow_mut().push(record);
        }));
    }

    fn watch_world(&self, world: &World) {
        self.watch::<AddBodyEvent>(world, |e| ids(&[&e.body]));
        self.watch::<RemoveBodyEvent>(world, |e| ids(&[&e.body]));
        self.watch::<PreStepEvent>(world, |_| Vec::new());
        self.watch::<PostStepEvent>(world, |_| Vec::new());
        self.watch::<BeginContactEvent>(world, |e| ids(&[&e.body_a, &e.body_b]));
        self.watch::<EndContactEvent>(world, |e| ids(&[&e.body_a, &e.body_b]));
        self.watch::<BeginShapeContactEvent>(world, |e| ids(&[&e.body_a, &e.body_b]));
        self.watch::<EndShapeContactEvent>(world, |e| ids(&[&e.body_a, &e.body_b]));
    }

    fn watch_body(&self, body: &Body) {
        self.watch::<CollideEvent>(body, |e| ids(&[&e.body]));
        self.watch::<SleepyEvent>(body, |_| Vec::new());
        self.watch::<SleepEvent>(body, |_| Vec::new());
        self.watch::<WakeUpEvent>(body, |_| Vec::new());
    }
}

fn ids(bodies: &[&Option<Rc<Body>>]) -> Vec<BodyId> {
    bodies
        .iter()
        .copied()
        .filter_map(|b| b.as_ref().map(|b| b.id()))
        .collect()
}

fn random_velocity(rng: &mut fastrand::Rng) -> Vec3 {
    let mut component = || (rng.f32() * 2.0 - 1.0) * MAX_INITIAL_SPEED;
    Vec3::new(component(), component(), component())
}

/// Run the scenario described by `config` and return every recorded event.
pub fn run(config: &SimConfig) -> Vec<TraceRecord> {
    let mut rng = fastrand::Rng::with_seed(config.seed);
    let recorder = Recorder::default();

    let mut world = World::new()
        .with_allow_sleep(config.allow_sleep)
        .with_time_scale(config.time_scale);
    recorder.watch_world(&world);

    for _ in 0..config.bodies {
        let body = Rc::new(
            Body::new()
                .with_shape(Shape::sphere(SPHERE_RADIUS))
                .with_velocity(random_velocity(&mut rng))
                .with_sleep_limits(config.sleep_speed_limit, config.sleep_time_limit),
        );
        recorder.watch_body(&body);
        world.add_body(body);
    }

    let damping = (1.0 - config.damping * config.dt * config.time_scale).max(0.0);
    for step in 0..config.steps {
        recorder.step.set(u64::from(step));

        for body in world.bodies() {
            if !body.is_sleeping() {
                body.set_velocity(body.velocity() * damping);
            }
        }

        let contacts: Vec<ContactEquation> = pairs(world.bodies())
            .filter(|(a, b)| !(a.is_sleeping() && b.is_sleeping()))
            .filter(|_| rng.f32() < config.contact_chance)
            .map(|(a, b)| ContactEquation::between_first_shapes(Rc::clone(a), Rc::clone(b)))
            .collect();
        for contact in contacts {
            world.report_contact(contact);
        }

        world.step(config.dt);
    }

    let trace = recorder.trace.take();
    info!(
        "Scenario finished: {} steps, {} bodies, {} events",
        config.steps,
        config.bodies,
        trace.len()
    );
    trace
}

fn pairs(bodies: &[Rc<Body>]) -> impl Iterator<Item = (&Rc<Body>, &Rc<Body>)> {
    bodies
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| bodies[i + 1..].iter().map(move |b| (a, b)))
}

/// Number of events per name, in [`EventType::ALL`] order, skipping names
/// that never fired.
pub fn summarize(trace: &[TraceRecord]) -> Vec<(EventType, usize)> {
    let mut counts: FxHashMap<EventType, usize> = FxHashMap::default();
    for record in trace {
        *counts.entry(record.event).or_insert(0) += 1;
    }
    EventType::ALL
        .iter()
        .filter_map(|ty| counts.get(ty).map(|n| (*ty, *n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimConfig {
        SimConfig {
            steps: 120,
            bodies: 4,
            contact_chance: 0.2,
            ..SimConfig::new()
        }
    }

    fn shape_of(trace: &[TraceRecord]) -> Vec<(u64, EventType, usize)> {
        trace.iter().map(|r| (r.step, r.event, r.bodies.len())).collect()
    }

    #[test]
    fn test_pairs_visits_each_pair_once() {
        let bodies: Vec<Rc<Body>> = (0..4).map(|_| Rc::new(Body::new())).collect();
        assert_eq!(pairs(&bodies).count(), 6);
        assert!(pairs(&bodies).all(|(a, b)| a.id() < b.id()));
    }

    #[test]
    fn test_run_records_setup_and_steps() {
        let config = small_config();
        let trace = run(&config);
        let counts: FxHashMap<EventType, usize> = summarize(&trace).into_iter().collect();
        assert_eq!(counts[&EventType::AddBody], 4);
        assert_eq!(counts[&EventType::PreStep], 120);
        assert_eq!(counts[&EventType::PostStep], 120);
        assert!(counts.get(&EventType::Collide).copied().unwrap_or(0) > 0);
    }

    #[test]
    fn test_run_is_deterministic_for_a_seed() {
        let config = small_config();
        assert_eq!(shape_of(&run(&config)), shape_of(&run(&config)));
    }

    #[test]
    fn test_collide_is_reported_on_both_bodies() {
        let trace = run(&small_config());
        let collides = trace.iter().filter(|r| r.event == EventType::Collide).count();
        assert_eq!(collides % 2, 0);
    }

    #[test]
    fn test_bodies_eventually_sleep() {
        let config = SimConfig {
            steps: 600,
            bodies: 3,
            contact_chance: 0.0,
            damping: 5.0,
            ..SimConfig::new()
        };
        let trace = run(&config);
        let sleeps = trace.iter().filter(|r| r.event == EventType::Sleep).count();
        assert_eq!(sleeps, 3);
    }

    #[test]
    fn test_summarize_skips_missing_names() {
        let trace = vec![TraceRecord {
            step: 0,
            event: EventType::Sleep,
            target: None,
            bodies: Vec::new(),
        }];
        assert_eq!(summarize(&trace), vec![(EventType::Sleep, 1)]);
    }

    #[test]
    fn test_record_serializes_as_json() {
        let record = TraceRecord {
            step: 3,
            event: EventType::BeginContact,
            target: None,
            bodies: vec![BodyId(1), BodyId(2)],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"step":3,"event":"beginContact","target":null,"bodies":[1,2]}"#
        );
    }
}
