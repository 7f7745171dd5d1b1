use super::*;
use crate::{
    shape::kind::ShapeKind,
    timeline::{
        delta::Delta,
        motion::{MotionInterval, MotionList},
    },
};

fn registry_with(motions: MotionList) -> ShapeRegistry {
    let mut reg = ShapeRegistry::new();
    reg.declare_shape(ShapeKind::Rectangle, "R", 10, 10, 20, 20, 255, 0, 0)
        .unwrap();
    reg.record_mut("R").unwrap().motions = motions;
    reg
}

fn iv(start: u64, end: u64) -> MotionInterval {
    MotionInterval::new(Tick(start), Tick(end)).unwrap()
}

fn at(reg: &ShapeRegistry, tick: u64) -> ShapeState {
    Evaluator::eval_shape(reg, "R", Tick(tick)).unwrap().state
}

#[test]
fn midpoint_of_a_move() {
    let reg = registry_with(
        MotionList::from_intervals([iv(0, 10).with_delta(Delta::Move { x: 50, y: 50 })]).unwrap(),
    );
    assert_eq!(at(&reg, 5).to_string(), "30 30 20 20 255 0 0");
    assert_eq!(at(&reg, 0).to_string(), "10 10 20 20 255 0 0");
    assert_eq!(at(&reg, 10).to_string(), "50 50 20 20 255 0 0");
}

#[test]
fn past_the_last_motion_is_invisible() {
    let reg = registry_with(
        MotionList::from_intervals([iv(0, 10).with_delta(Delta::Move { x: 50, y: 50 })]).unwrap(),
    );
    let s = at(&reg, 20);
    assert_eq!(s.size, crate::foundation::core::Size::INVISIBLE);
    assert_eq!(s.position.x, 50);
}

#[test]
fn gaps_are_invisible_and_resume_from_last_values() {
    let reg = registry_with(
        MotionList::from_intervals([
            iv(0, 10).with_delta(Delta::Size {
                width: 40,
                height: 40,
            }),
            iv(20, 30).with_delta(Delta::Move { x: 0, y: 0 }),
        ])
        .unwrap(),
    );
    assert!(!at(&reg, 15).is_visible());
    // The second motion starts from the size the first one reached.
    assert_eq!(at(&reg, 20).to_string(), "10 10 40 40 255 0 0");
    assert_eq!(at(&reg, 25).to_string(), "5 5 40 40 255 0 0");
}

#[test]
fn before_first_appearance_uses_declared_state() {
    let reg = registry_with(
        MotionList::from_intervals([iv(5, 10).with_delta(Delta::Move { x: 0, y: 0 })]).unwrap(),
    );
    assert_eq!(at(&reg, 2).to_string(), "10 10 20 20 255 0 0");
}

#[test]
fn vanish_window_hides_shape_until_next_motion() {
    let mut reg = registry_with(
        MotionList::from_intervals([iv(10, 20).with_delta(Delta::Move { x: 0, y: 0 })]).unwrap(),
    );
    reg.record_mut("R").unwrap().vanished_from = Some(Tick(4));
    assert!(at(&reg, 3).is_visible());
    assert!(!at(&reg, 4).is_visible());
    assert!(!at(&reg, 9).is_visible());
    assert_eq!(at(&reg, 10).to_string(), "10 10 20 20 255 0 0");
}

#[test]
fn no_motions_means_declared_and_visible() {
    let reg = registry_with(MotionList::new());
    assert_eq!(at(&reg, 100).to_string(), "10 10 20 20 255 0 0");
}

#[test]
fn birth_keyframe_shows_its_value() {
    let reg = registry_with(
        MotionList::from_intervals([iv(3, 3).with_delta(Delta::Color { r: 0, g: 0, b: 9 })]).unwrap(),
    );
    assert_eq!(at(&reg, 3).color, crate::foundation::core::Rgb::new(0, 0, 9));
    assert!(!at(&reg, 4).is_visible());
}

#[test]
fn eval_tick_reports_every_shape_in_order() {
    let mut reg = registry_with(MotionList::new());
    reg.declare_shape(ShapeKind::Ellipse, "E", 0, 0, 2, 2, 0, 0, 0)
        .unwrap();
    let frame = Evaluator::eval_tick(&reg, Tick(7));
    assert_eq!(frame.tick, Tick(7));
    let ids: Vec<_> = frame.shapes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["R", "E"]);
    assert!(Evaluator::eval_shape(&reg, "missing", Tick(0)).is_err());
}
