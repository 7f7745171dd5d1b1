use super::*;

fn m(start: u64, end: u64) -> MotionInterval {
    MotionInterval::new(Tick(start), Tick(end)).unwrap()
}

#[test]
fn interval_rejects_reversed_bounds() {
    assert!(MotionInterval::new(Tick(5), Tick(4)).is_err());
    assert!(m(4, 4).is_instant());
    assert_eq!(m(3, 10).duration(), 7);
}

#[test]
fn put_delta_keeps_one_delta_per_kind() {
    let mut iv = m(0, 10);
    iv.put_delta(Delta::Color { r: 1, g: 1, b: 1 });
    iv.put_delta(Delta::Move { x: 5, y: 5 });
    iv.put_delta(Delta::Color { r: 9, g: 9, b: 9 });
    assert_eq!(iv.delta_strings(), vec!["color 9 9 9", "move 5 5"]);
}

#[test]
fn insert_orders_by_start_and_allows_touching() {
    let mut list = MotionList::new();
    list.insert(m(10, 20)).unwrap();
    list.insert(m(0, 10)).unwrap();
    list.insert(m(25, 30)).unwrap();
    let starts: Vec<_> = list.intervals().iter().map(|i| i.start().0).collect();
    assert_eq!(starts, vec![0, 10, 25]);
    assert!(list.is_well_formed());
    assert_eq!(list.end_tick(), Tick(30));
}

#[test]
fn insert_rejects_overlap() {
    let mut list = MotionList::new();
    list.insert(m(0, 10)).unwrap();
    assert!(list.insert(m(5, 15)).is_err());
    assert!(list.insert(m(5, 5)).is_err());
    assert!(list.insert(m(0, 10)).is_err());
    list.insert(m(10, 10)).unwrap();
    assert!(list.insert(m(10, 10)).is_err());
    assert_eq!(list.len(), 2);
}

#[test]
fn append_requires_membership() {
    let mut list = MotionList::from_intervals([m(0, 10)]).unwrap();
    list.append(0, Delta::Move { x: 1, y: 1 }).unwrap();
    assert!(list.append(3, Delta::Move { x: 1, y: 1 }).unwrap_err().is_not_found());
}

#[test]
fn find_containing_handles_gaps_and_shared_endpoints() {
    let list = MotionList::from_intervals([m(0, 10), m(10, 20), m(30, 40)]).unwrap();
    assert_eq!(list.find_containing(Tick(0)), Some(0));
    assert_eq!(list.find_containing(Tick(5)), Some(0));
    assert_eq!(list.find_containing(Tick(10)), Some(1));
    assert_eq!(list.find_containing(Tick(25)), None);
    assert_eq!(list.find_containing(Tick(40)), Some(2));
    assert_eq!(list.find_containing(Tick(41)), None);
    assert_eq!(list.find_ending_at(Tick(20)), Some(1));
}

#[test]
fn source_values_fold_earlier_deltas() {
    let origin = ShapeState::new(0, 0, 10, 10, 0, 0, 0).unwrap();
    let list = MotionList::from_intervals([
        m(0, 10).with_delta(Delta::Move { x: 50, y: 50 }),
        m(10, 20).with_delta(Delta::Color { r: 255, g: 0, b: 0 }),
        m(20, 30).with_delta(Delta::Move { x: 0, y: 0 }),
    ])
    .unwrap();
    assert_eq!(list.source_values(0, origin), origin);
    assert_eq!(list.source_values(2, origin).to_string(), "50 50 10 10 255 0 0");
    assert_eq!(list.final_values(origin).to_string(), "0 0 10 10 255 0 0");
}
