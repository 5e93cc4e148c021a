use std::cell::RefCell;
use std::rc::Rc;

use bindable::{ChangeKind, Error, MapChanged, ObservableMap};

fn record(
	map: &ObservableMap<i32, i32>,
) -> (bindable::Handle, Rc<RefCell<Vec<MapChanged<i32>>>>) {
	let events = Rc::new(RefCell::new(Vec::new()));
	let handle = map.subscribe({
		let events = events.clone();
		move |change| events.borrow_mut().push(change.clone())
	});
	(handle, events)
}

fn event(kind: ChangeKind, key: Option<i32>) -> MapChanged<i32> {
	MapChanged { kind, key }
}

#[test]
fn existing_key_is_an_update() {
	let map = ObservableMap::new();
	let (_handle, events) = record(&map);

	map.add(1, 1).unwrap();
	assert_eq!(map.insert(1, -1), Some(1));

	assert_eq!(
		*events.borrow(),
		vec![
			event(ChangeKind::Add, Some(1)),
			event(ChangeKind::Update, Some(1))
		]
	);
	assert_eq!(*map.get(&1).unwrap(), -1);
}

#[test]
fn new_key_through_insert_is_an_add() {
	let map = ObservableMap::new();
	let (_handle, events) = record(&map);

	assert_eq!(map.insert(2, 20), None);
	assert_eq!(*events.borrow(), vec![event(ChangeKind::Add, Some(2))]);
	assert_eq!(map.len(), 1);
}

#[test]
fn duplicate_add_fails_without_event() {
	let map: ObservableMap<i32, i32> = [(1, 1)].into_iter().collect();
	let (_handle, events) = record(&map);

	assert_eq!(map.add(1, 2), Err(Error::DuplicateKey));
	assert!(events.borrow().is_empty());
	assert_eq!(*map.get(&1).unwrap(), 1);
}

#[test]
fn remove_fires_only_for_present_keys() {
	let map: ObservableMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
	let (_handle, events) = record(&map);

	assert_eq!(map.remove(&3), None);
	assert_eq!(map.remove(&2), Some(20));

	assert_eq!(*events.borrow(), vec![event(ChangeKind::Remove, Some(2))]);
	assert!(!map.contains_key(&2));
	assert_eq!(map.keys(), vec![1]);
}

#[test]
fn clear_fires_once() {
	let map: ObservableMap<i32, i32> = [(1, 10)].into_iter().collect();
	let (_handle, events) = record(&map);

	map.clear();
	map.clear();

	assert_eq!(*events.borrow(), vec![event(ChangeKind::Clear, None)]);
	assert!(map.is_empty());
}
