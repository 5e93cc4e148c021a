use std::cell::RefCell;
use std::rc::Rc;

use bindable::{ChangeKind, Error, ObservableSet, SetChanged};

fn record(set: &ObservableSet<i32>) -> (bindable::Handle, Rc<RefCell<Vec<SetChanged<i32>>>>) {
	let events = Rc::new(RefCell::new(Vec::new()));
	let handle = set.subscribe({
		let events = events.clone();
		move |change| events.borrow_mut().push(change.clone())
	});
	(handle, events)
}

#[test]
fn insert_fires_only_for_new_elements() {
	let set = ObservableSet::new();
	let (_handle, events) = record(&set);

	assert!(set.insert(0));
	assert_eq!(set.len(), 1);
	assert!(!set.insert(0));
	assert_eq!(set.len(), 1);

	assert_eq!(
		*events.borrow(),
		vec![SetChanged {
			kind: ChangeKind::Add,
			element: Some(0)
		}]
	);
}

#[test]
fn remove_fires_only_for_members() {
	let set: ObservableSet<i32> = [1, 2].into_iter().collect();
	let (_handle, events) = record(&set);

	assert!(!set.remove(&5));
	assert!(events.borrow().is_empty());

	assert!(set.remove(&1));
	assert_eq!(
		*events.borrow(),
		vec![SetChanged {
			kind: ChangeKind::Remove,
			element: Some(1)
		}]
	);
	assert!(!set.contains(&1));
}

#[test]
fn clear_fires_once() {
	let set: ObservableSet<i32> = [1, 2, 3].into_iter().collect();
	let (_handle, events) = record(&set);

	set.clear();
	set.clear();

	assert_eq!(
		*events.borrow(),
		vec![SetChanged {
			kind: ChangeKind::Clear,
			element: None
		}]
	);
	assert!(set.is_empty());
}

#[test]
fn bulk_algebra_is_unsupported() {
	let set: ObservableSet<i32> = [1, 2].into_iter().collect();
	let (_handle, events) = record(&set);

	assert_eq!(set.union_with([3]), Err(Error::Unsupported("union_with")));
	assert_eq!(set.intersect_with([1]), Err(Error::Unsupported("intersect_with")));
	assert_eq!(set.except_with([1]), Err(Error::Unsupported("except_with")));
	assert_eq!(
		set.symmetric_except_with([1, 9]),
		Err(Error::Unsupported("symmetric_except_with"))
	);

	assert!(events.borrow().is_empty());
	assert_eq!(set.len(), 2);
}

#[test]
fn queries_have_no_side_effects() {
	let set: ObservableSet<i32> = [1, 2].into_iter().collect();
	let (_handle, events) = record(&set);

	assert!(set.is_subset_of(&[1, 2, 3]));
	assert!(set.is_proper_subset_of(&[1, 2, 3]));
	assert!(!set.is_proper_subset_of(&[2, 1]));
	assert!(set.is_superset_of(&[1]));
	assert!(set.is_proper_superset_of(&[2, 2]));
	assert!(!set.is_superset_of(&[1, 4]));
	assert!(set.overlaps(&[4, 2]));
	assert!(!set.overlaps(&[4, 5]));
	assert!(set.set_equals(&[2, 1, 1]));
	assert!(!set.set_equals(&[1]));

	assert!(events.borrow().is_empty());
}
