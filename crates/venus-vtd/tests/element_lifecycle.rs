//! Every element a container constructs is destroyed exactly once.

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

use venus_test_utils::{DropTracker, Tracked};
use venus_vtd::{DynArray, FixedArray};

fn tracked_array(t: &DropTracker, n: i64) -> DynArray<Tracked> {
    (0..n).map(|v| t.make(v)).collect()
}

#[test]
fn drop_releases_every_element() {
    let t = DropTracker::new();
    let a = tracked_array(&t, 40);
    assert_eq!(t.live(), 40);
    drop(a);
    assert_eq!(t.live(), 0);
    assert_eq!(t.drops(), 40);
}

#[test]
fn growth_relocates_without_drops() {
    let t = DropTracker::new();
    let mut a = tracked_array(&t, 16);
    a.push_back(t.make(16));
    assert_eq!(a.capacity(), 32);
    assert_eq!(t.drops(), 0);
    assert_eq!(t.live(), 17);
    let values: Vec<i64> = a.iter().map(|x| x.value).collect();
    assert_eq!(values, (0..17).collect::<Vec<_>>());
}

#[test]
fn shrinking_resize_drops_exactly_the_tail() {
    let t = DropTracker::new();
    let mut a = tracked_array(&t, 10);
    a.truncate(4);
    assert_eq!(t.drops(), 6);
    assert_eq!(t.live(), 4);
    a.clear();
    assert_eq!(t.live(), 0);
}

#[test]
fn resize_with_value_clones_fill() {
    let t = DropTracker::new();
    let fill = t.make(-1);
    let mut a = tracked_array(&t, 2);
    a.resize_with_value(5, &fill);
    assert_eq!(t.live(), 6);
    assert!(a[2..].iter().all(|x| x.value == -1));
    drop(a);
    drop(fill);
    assert_eq!(t.live(), 0);
}

#[test]
fn insert_and_erase_balance() {
    let t = DropTracker::new();
    let mut a = tracked_array(&t, 5);
    a.insert(2, t.make(99));
    assert_eq!(t.live(), 6);
    assert_eq!(t.drops(), 0);
    a.erase(2);
    assert_eq!(t.live(), 5);
    assert_eq!(t.drops(), 1);
    let values: Vec<i64> = a.iter().map(|x| x.value).collect();
    assert_eq!(values, vec![0, 1, 2, 3, 4]);
}

#[test]
fn remove_hands_ownership_out() {
    let t = DropTracker::new();
    let mut a = tracked_array(&t, 3);
    let removed = a.remove(0);
    assert_eq!(removed.value, 0);
    assert_eq!(t.drops(), 0);
    drop(removed);
    assert_eq!(t.drops(), 1);
}

#[test]
fn assign_drops_surplus_and_clones_missing() {
    let t = DropTracker::new();
    let src: Vec<Tracked> = (100..103).map(|v| t.make(v)).collect();
    let mut a = tracked_array(&t, 8);
    a.assign(&src);
    assert_eq!(a.len(), 3);
    assert_eq!(t.live(), 6);
    a.assign(&[]);
    assert_eq!(t.live(), 3);
    drop(src);
    assert_eq!(t.live(), 0);
}

#[test]
fn shrink_to_fit_relocates_without_drops() {
    let t = DropTracker::new();
    let mut a = tracked_array(&t, 40);
    a.truncate(3);
    let drops = t.drops();
    a.shrink_to_fit();
    assert_eq!(a.capacity(), 16);
    assert_eq!(t.drops(), drops);
    assert_eq!(a[2].value, 2);
}

#[test]
fn take_moves_ownership() {
    let t = DropTracker::new();
    let mut src = tracked_array(&t, 4);
    let dst = src.take();
    drop(src);
    assert_eq!(t.live(), 4);
    drop(dst);
    assert_eq!(t.live(), 0);
}

#[test]
fn clone_is_independent() {
    let t = DropTracker::new();
    let a = tracked_array(&t, 4);
    let b = a.clone();
    assert_eq!(t.live(), 8);
    drop(a);
    assert_eq!(t.live(), 4);
    assert_eq!(b.len(), 4);
}

#[test]
fn fixed_array_backfill_clones_last() {
    let t = DropTracker::new();
    let seed = [t.make(7), t.make(8)];
    let a: FixedArray<Tracked, 4> = FixedArray::from_seq(&seed).unwrap();
    assert_eq!(t.live(), 6);
    let values: Vec<i64> = a.iter().map(|x| x.value).collect();
    assert_eq!(values, vec![7, 8, 8, 8]);
    drop(a);
    drop(seed);
    assert_eq!(t.live(), 0);
}

struct PanicsOnClone<'a> {
    clones_left: &'a Cell<usize>,
    tracker: &'a DropTracker,
    _token: Tracked,
}

impl Clone for PanicsOnClone<'_> {
    fn clone(&self) -> Self {
        let left = self.clones_left.get();
        if left == 0 {
            panic!("clone budget exhausted");
        }
        self.clones_left.set(left - 1);
        Self {
            clones_left: self.clones_left,
            tracker: self.tracker,
            _token: self.tracker.make(0),
        }
    }
}

#[test]
fn panicking_clone_leaves_consistent_length() {
    let t = DropTracker::new();
    let budget = Cell::new(3);
    let fill = PanicsOnClone {
        clones_left: &budget,
        tracker: &t,
        _token: t.make(0),
    };
    let mut a: DynArray<PanicsOnClone<'_>> = DynArray::new();
    let result = catch_unwind(AssertUnwindSafe(|| a.resize_with_value(10, &fill)));
    assert!(result.is_err());
    assert_eq!(a.len(), 3);
    assert_eq!(t.live(), 4);
    drop(a);
    drop(fill);
    assert_eq!(t.live(), 0);
}
