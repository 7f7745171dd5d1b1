use super::*;
use crate::timeline::delta::PropertyKind;

fn origin() -> ShapeState {
    ShapeState::new(0, 0, 10, 10, 0, 0, 0).unwrap()
}

fn mv(x: i32, y: i32) -> Delta {
    Delta::Move { x, y }
}

fn spans(list: &MotionList) -> Vec<(u64, u64)> {
    list.intervals()
        .iter()
        .map(|m| (m.start().0, m.end().0))
        .collect()
}

fn add(list: &mut MotionList, tick: u64, delta: Delta) -> KeyframeEdit {
    list.add_keyframe(Tick(tick), delta, origin()).unwrap()
}

#[test]
fn first_keyframe_is_a_birth_interval() {
    let mut list = MotionList::new();
    assert_eq!(add(&mut list, 5, mv(1, 1)), KeyframeEdit::Birth);
    assert_eq!(spans(&list), vec![(5, 5)]);
}

#[test]
fn keyframe_after_lone_birth_replaces_it() {
    let mut list = MotionList::new();
    add(&mut list, 5, mv(1, 1));
    assert_eq!(add(&mut list, 12, mv(2, 2)), KeyframeEdit::Appended);
    assert_eq!(spans(&list), vec![(5, 12)]);
    assert_eq!(list.intervals()[0].delta_strings(), vec!["move 2 2"]);
}

#[test]
fn keyframe_before_lone_birth_replaces_it() {
    let mut list = MotionList::new();
    add(&mut list, 5, mv(1, 1));
    assert_eq!(add(&mut list, 2, mv(2, 2)), KeyframeEdit::Prepended);
    assert_eq!(spans(&list), vec![(2, 5)]);
}

#[test]
fn keyframes_outside_range_extend_the_chain() {
    let mut list = MotionList::from_intervals([MotionInterval::new(Tick(10), Tick(20)).unwrap()])
        .unwrap();
    assert_eq!(add(&mut list, 4, mv(0, 0)), KeyframeEdit::Prepended);
    assert_eq!(add(&mut list, 30, mv(9, 9)), KeyframeEdit::Appended);
    assert_eq!(spans(&list), vec![(4, 10), (10, 20), (20, 30)]);
}

#[test]
fn same_tick_augments_instead_of_duplicating() {
    let mut list = MotionList::from_intervals([
        MotionInterval::new(Tick(0), Tick(10)).unwrap().with_delta(mv(50, 50)),
    ])
    .unwrap();
    let color = Delta::from_values(PropertyKind::Color, &[10, 10, 10]).unwrap();
    assert_eq!(add(&mut list, 10, color), KeyframeEdit::Augmented);
    assert_eq!(spans(&list), vec![(0, 10)]);
    assert_eq!(
        list.intervals()[0].delta_strings(),
        vec!["move 50 50", "color 10 10 10"]
    );

    // A second delta of the same kind replaces the first.
    add(&mut list, 10, mv(60, 60));
    assert_eq!(
        list.intervals()[0].delta_strings(),
        vec!["move 60 60", "color 10 10 10"]
    );
}

#[test]
fn keyframe_at_first_start_is_rejected() {
    let mut list = MotionList::from_intervals([
        MotionInterval::new(Tick(0), Tick(10)).unwrap().with_delta(mv(50, 50)),
    ])
    .unwrap();
    let before = list.clone();
    let err = list.add_keyframe(Tick(0), mv(1, 1), origin()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(list, before);
}

#[test]
fn keyframe_in_gap_bridges_and_rechains() {
    let mut list = MotionList::from_intervals([
        MotionInterval::new(Tick(0), Tick(10)).unwrap(),
        MotionInterval::new(Tick(20), Tick(30)).unwrap(),
    ])
    .unwrap();
    assert_eq!(add(&mut list, 15, mv(3, 3)), KeyframeEdit::Bridged);
    assert_eq!(spans(&list), vec![(0, 10), (10, 15), (15, 30)]);
    assert_eq!(list.intervals()[1].delta_strings(), vec!["move 3 3"]);
}

#[test]
fn keyframe_at_gap_end_fills_the_gap() {
    let mut list = MotionList::from_intervals([
        MotionInterval::new(Tick(0), Tick(10)).unwrap(),
        MotionInterval::new(Tick(20), Tick(30)).unwrap(),
    ])
    .unwrap();
    assert_eq!(add(&mut list, 20, mv(3, 3)), KeyframeEdit::Bridged);
    assert_eq!(spans(&list), vec![(0, 10), (10, 20), (20, 30)]);
}

#[test]
fn keyframe_inside_interval_splits_and_preserves_other_channels() {
    let mut list = MotionList::from_intervals([MotionInterval::new(Tick(0), Tick(10))
        .unwrap()
        .with_delta(mv(100, 100))
        .with_delta(Delta::Size {
            width: 30,
            height: 30,
        })])
    .unwrap();
    let color = Delta::Color { r: 200, g: 0, b: 0 };
    assert_eq!(add(&mut list, 5, color), KeyframeEdit::Split);
    assert_eq!(spans(&list), vec![(0, 5), (5, 10)]);
    assert_eq!(
        list.intervals()[0].delta_strings(),
        vec!["move 50 50", "size 20 20", "color 200 0 0"]
    );
    assert_eq!(
        list.intervals()[1].delta_strings(),
        vec!["move 100 100", "size 30 30"]
    );
}

#[test]
fn split_with_same_kind_overrides_interpolated_value() {
    let mut list = MotionList::from_intervals([
        MotionInterval::new(Tick(0), Tick(10)).unwrap().with_delta(mv(100, 100)),
    ])
    .unwrap();
    add(&mut list, 4, mv(-5, 7));
    assert_eq!(list.intervals()[0].delta_strings(), vec!["move -5 7"]);
}

#[test]
fn arity_is_checked_before_any_edit() {
    assert!(Delta::from_values(PropertyKind::Color, &[1, 2]).is_err());
}

fn chain() -> MotionList {
    MotionList::from_intervals([
        MotionInterval::new(Tick(0), Tick(10)).unwrap().with_delta(mv(1, 1)),
        MotionInterval::new(Tick(10), Tick(20)).unwrap().with_delta(mv(2, 2)),
        MotionInterval::new(Tick(20), Tick(30)).unwrap().with_delta(mv(3, 3)),
    ])
    .unwrap()
}

#[test]
fn remove_on_empty_list_is_a_no_op() {
    let mut list = MotionList::new();
    assert_eq!(
        list.remove_keyframe(Tick(3)).unwrap(),
        KeyframeRemoval::NoMotions
    );
}

#[test]
fn remove_first_start_drops_birth() {
    let mut list = chain();
    assert_eq!(list.remove_keyframe(Tick(0)).unwrap(), KeyframeRemoval::Birth);
    assert_eq!(spans(&list), vec![(10, 20), (20, 30)]);
}

#[test]
fn remove_last_end_trims() {
    let mut list = chain();
    assert_eq!(
        list.remove_keyframe(Tick(30)).unwrap(),
        KeyframeRemoval::Trimmed
    );
    assert_eq!(spans(&list), vec![(0, 10), (10, 20)]);
}

#[test]
fn remove_interior_end_stitches_neighbours() {
    let mut list = chain();
    assert_eq!(
        list.remove_keyframe(Tick(20)).unwrap(),
        KeyframeRemoval::Stitched
    );
    assert_eq!(spans(&list), vec![(0, 10), (10, 30)]);
    assert_eq!(list.intervals()[1].delta_strings(), vec!["move 3 3"]);
}

#[test]
fn remove_first_interval_end_pushes_start_forward() {
    let mut list = chain();
    list.remove_keyframe(Tick(10)).unwrap();
    assert_eq!(spans(&list), vec![(0, 20), (20, 30)]);
    assert_eq!(list.intervals()[0].delta_strings(), vec!["move 2 2"]);
}

#[test]
fn remove_at_gapped_start_rechains() {
    let mut list = MotionList::from_intervals([
        MotionInterval::new(Tick(0), Tick(10)).unwrap(),
        MotionInterval::new(Tick(20), Tick(30)).unwrap(),
        MotionInterval::new(Tick(30), Tick(40)).unwrap(),
    ])
    .unwrap();
    assert_eq!(
        list.remove_keyframe(Tick(20)).unwrap(),
        KeyframeRemoval::Rechained
    );
    assert_eq!(spans(&list), vec![(0, 20), (20, 30), (30, 40)]);
}

#[test]
fn remove_unmatched_tick_is_not_found() {
    let mut list = chain();
    let before = list.clone();
    assert!(list.remove_keyframe(Tick(15)).unwrap_err().is_not_found());
    assert_eq!(list, before);
}

#[test]
fn arbitrary_edit_sequences_stay_well_formed() {
    // Small deterministic LCG; the exact sequence only matters for reproducibility.
    let mut seed = 0x2545_f491_4f6c_dd1du64;
    let mut next = |bound: u64| {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (seed >> 33) % bound
    };

    for _round in 0..50 {
        let mut list = MotionList::new();
        for _step in 0..40 {
            let tick = Tick(next(60));
            if next(3) == 0 {
                let _ = list.remove_keyframe(tick);
            } else {
                let delta = match next(3) {
                    0 => mv(next(100) as i32, next(100) as i32),
                    1 => Delta::Size {
                        width: next(50) as i32,
                        height: next(50) as i32,
                    },
                    _ => Delta::Color {
                        r: next(256) as u8,
                        g: next(256) as u8,
                        b: next(256) as u8,
                    },
                };
                let _ = list.add_keyframe(tick, delta, origin());
            }
            assert!(list.is_well_formed(), "ill-formed list: {:?}", spans(&list));
        }
    }
}
