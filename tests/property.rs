use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bindable::{Identity, Property, ValueChanged};
use mockall::predicate::eq;


use mock::Spy;

#[test]
fn equal_write_is_silent() {
	let a = Property::new(10_i64);
	let mock = mock::SharedMock::new();

	let _handle = a.subscribe({
		let mock = mock.clone();
		move |change| mock.get().trigger(change.new)
	});

	mock.get().expect_trigger().times(0).return_const(());
	assert!(!a.set_next(10));
	mock.get().checkpoint();

	mock.get()
		.expect_trigger()
		.with(eq(20))
		.times(1)
		.return_const(());
	assert!(a.set_next(20));
	mock.get().checkpoint();

	assert_eq!(a.current(), 20);
}

#[test]
fn change_carries_old_and_new() {
	let a = Property::new(String::from("a"));
	let seen = Rc::new(RefCell::new(Vec::new()));

	let _handle = a.subscribe({
		let seen = seen.clone();
		move |change: &ValueChanged<String>| seen.borrow_mut().push(change.clone())
	});

	a.set_next("b".to_string());
	a.set_next("b".to_string());
	a.set_next("c".to_string());

	assert_eq!(
		*seen.borrow(),
		vec![
			ValueChanged {
				old: "a".to_string(),
				new: "b".to_string()
			},
			ValueChanged {
				old: "b".to_string(),
				new: "c".to_string()
			},
		]
	);
}

#[test]
fn custom_equality() {
	let a = Property::with_equality(1.0_f64, |a: &f64, b: &f64| (a - b).abs() < 0.5);
	let count = Rc::new(Cell::new(0));

	let _handle = a.subscribe({
		let count = count.clone();
		move |_| count.set(count.get() + 1)
	});

	assert!(!a.set_next(1.2));
	assert_eq!(a.current(), 1.0);
	assert!(a.set_next(2.0));
	assert_eq!(count.get(), 1);
}

#[test]
fn identity_equality() {
	let first = Rc::new(String::from("same"));
	let second = Rc::new(String::from("same"));
	let a = Property::with_equality(Some(first.clone()), Identity);

	assert!(!a.set_next(Some(first)));
	assert!(a.set_next(Some(second)));
	assert!(a.set_next(None));
	assert!(!a.set_next(None));
}

#[test]
fn listeners_fire_in_registration_order() {
	let a = Property::new(0);
	let order = Rc::new(RefCell::new(Vec::new()));

	let handles: Vec<_> = (0..3)
		.map(|n| {
			let order = order.clone();
			a.subscribe(move |_| order.borrow_mut().push(n))
		})
		.collect();

	a.set_next(1);
	assert_eq!(*order.borrow(), vec![0, 1, 2]);

	handles[1].unlisten();
	a.set_next(2);
	assert_eq!(*order.borrow(), vec![0, 1, 2, 0, 2]);
}

#[test]
fn unlisten_is_idempotent() {
	let a = Property::new(0);
	let count = Rc::new(Cell::new(0));

	let first = a.subscribe({
		let count = count.clone();
		move |_| count.set(count.get() + 1)
	});
	let _second = a.subscribe({
		let count = count.clone();
		move |_| count.set(count.get() + 10)
	});

	assert!(first.unlisten());
	assert!(!first.unlisten());
	assert_eq!(a.listener_count(), 1);

	a.set_next(1);
	assert_eq!(count.get(), 10);
}

#[test]
fn replay_does_not_count_as_change() {
	let a = Property::new(5);
	let seen = Rc::new(RefCell::new(Vec::new()));

	let _handle = a.subscribe_and_replay({
		let seen = seen.clone();
		move |value: &i32| seen.borrow_mut().push(*value)
	});

	assert_eq!(*seen.borrow(), vec![5]);
	a.set_next(5);
	a.set_next(6);
	assert_eq!(*seen.borrow(), vec![5, 6]);
}

#[test]
fn reentrant_writes_nest() {
	let a = Property::new(0);
	let log = Rc::new(RefCell::new(Vec::new()));

	let _first = a.subscribe({
		let a = a.clone();
		let log = log.clone();
		move |change| {
			log.borrow_mut().push(("first", change.new));
			if change.new == 1 {
				a.set_next(2);
			}
		}
	});
	let _second = a.subscribe({
		let log = log.clone();
		move |change| log.borrow_mut().push(("second", change.new))
	});

	a.set_next(1);

	assert_eq!(
		*log.borrow(),
		vec![("first", 1), ("first", 2), ("second", 2), ("second", 1)]
	);
	assert_eq!(a.current(), 2);
}

#[test]
fn listener_may_unsubscribe_itself() {
	let a = Property::new(0);
	let count = Rc::new(Cell::new(0));
	let slot = Rc::new(RefCell::new(None::<bindable::Handle>));

	let handle = a.subscribe({
		let count = count.clone();
		let slot = slot.clone();
		move |_| {
			count.set(count.get() + 1);
			if let Some(handle) = slot.borrow().as_ref() {
				handle.unlisten();
			}
		}
	});
	*slot.borrow_mut() = Some(handle);

	a.set_next(1);
	a.set_next(2);

	assert_eq!(count.get(), 1);
	assert_eq!(a.listener_count(), 0);
}

#[test]
fn listener_added_during_fan_out_waits_for_next_change() {
	let a = Property::new(0);
	let late = Rc::new(Cell::new(0));

	let _handle = a.subscribe({
		let a = a.clone();
		let late = late.clone();
		move |change| {
			if change.new == 1 {
				let late = late.clone();
				let _ = a.subscribe(move |_| late.set(late.get() + 1));
			}
		}
	});

	a.set_next(1);
	assert_eq!(late.get(), 0);

	a.set_next(2);
	assert_eq!(late.get(), 1);
}

#[test]
#[should_panic(expected = "listener failed")]
fn listener_panic_propagates() {
	let a = Property::new(0);
	let _handle = a.subscribe(|_| panic!("listener failed"));
	a.set_next(1);
}

#[test]
fn update_toggle_replace() {
	let flag = Property::new(false);
	assert!(flag.toggle());
	assert!(flag.current());

	let n = Property::new(3);
	assert!(n.update(|n| *n += 1));
	assert!(!n.update(|_| {}));
	assert_eq!(n.replace(10), 4);
	assert_eq!(*n.borrow(), 10);
	assert_eq!(format!("{:?}", n), "10");
}

#[test]
fn comparator_may_read_the_property() {
	let slot: Rc<RefCell<Option<Property<i32>>>> = Rc::new(RefCell::new(None));
	let property = Property::with_equality(1, {
		let slot = slot.clone();
		move |a: &i32, b: &i32| {
			let seen = slot.borrow().as_ref().map(|it| it.current());
			assert_eq!(seen, Some(*a));
			a == b
		}
	});
	*slot.borrow_mut() = Some(property.clone());

	assert!(!property.set_next(1));
	assert!(property.set_next(2));
	assert_eq!(property.current(), 2);

	slot.borrow_mut().take();
}
