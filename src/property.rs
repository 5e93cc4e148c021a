use std::cell::{Ref, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use crate::equality::{Equality, Structural};
use crate::event::Event;
use crate::registry::Handle;
use crate::{Listener, Result, Subscribable};

/// Payload of a [`Property`] change.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValueChanged<T> {
	pub old: T,
	pub new: T,
}

/// A single observable value.
///
/// Clones share the same value and listeners.
pub struct Property<T> {
	body: Rc<PropertyBody<T>>,
}

struct PropertyBody<T> {
	value: RefCell<T>,
	equality: Box<dyn Equality<T>>,
	changed: Event<ValueChanged<T>>,
}

impl<T> Clone for Property<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> Default for Property<T>
where
	T: Default + PartialEq + 'static,
{
	fn default() -> Self {
		Property::new(Default::default())
	}
}

pub trait Toggle {
	fn toggle(&mut self);
}

impl Toggle for bool {
	fn toggle(&mut self) {
		*self = !*self
	}
}

impl<T> Property<T>
where
	T: 'static,
{
	pub fn new(value: T) -> Self
	where
		T: PartialEq,
	{
		Property::with_equality(value, Structural)
	}

	/// Creates a property that uses `equality` to decide whether a write is a change.
	pub fn with_equality(value: T, equality: impl Equality<T> + 'static) -> Self {
		Property {
			body: Rc::new(PropertyBody {
				value: RefCell::new(value),
				equality: Box::new(equality),
				changed: Event::new(),
			}),
		}
	}

	#[inline]
	pub fn current(&self) -> T
	where
		T: Clone,
	{
		self.body.value.borrow().clone()
	}

	/// Borrows the current value. Writing while the borrow is held panics.
	#[inline]
	pub fn borrow(&self) -> Ref<'_, T> {
		self.body.value.borrow()
	}

	/// Stores `value` and notifies listeners with the old and new values.
	///
	/// Returns `false` without notifying when `value` equals the current one.
	pub fn set_next(&self, value: T) -> bool
	where
		T: Clone,
	{
		if self.body.equality.equals(&*self.body.value.borrow(), &value) {
			return false;
		}

		let next = value.clone();
		let old = std::mem::replace(&mut *self.body.value.borrow_mut(), next);
		let change = ValueChanged { old, new: value };

		self.body.changed.invoke(&change);
		true
	}

	/// Like [`Property::set_next`] but returns the previous value.
	pub fn replace(&self, value: T) -> T
	where
		T: Clone,
	{
		let old = self.current();
		self.set_next(value);
		old
	}

	#[inline]
	pub fn update(&self, func: impl FnOnce(&mut T)) -> bool
	where
		T: Clone,
	{
		let mut next = self.current();
		func(&mut next);
		self.set_next(next)
	}

	#[inline]
	pub fn toggle(&self) -> bool
	where
		T: Toggle + Clone,
	{
		self.update(T::toggle)
	}

	/// Listens to value changes. The current value is not replayed.
	pub fn subscribe(&self, listener: impl Fn(&ValueChanged<T>) + 'static) -> Handle {
		self.body.changed.subscribe(listener)
	}

	/// Listens to new values, calling `listener` once with the current value first.
	pub fn subscribe_and_replay(&self, listener: impl Fn(&T) + 'static) -> Handle
	where
		T: Clone,
	{
		let listener = Rc::new(listener);
		let handle = self.body.changed.subscribe({
			let listener = listener.clone();
			move |change| listener(&change.new)
		});

		listener(&self.current());
		handle
	}

	pub fn listener_count(&self) -> usize {
		self.body.changed.listener_count()
	}
}

impl<T: 'static> Subscribable<ValueChanged<T>> for Property<T> {
	fn subscribe_listener(&self, listener: Listener<ValueChanged<T>>) -> Result<Handle> {
		self.body.changed.subscribe_listener(listener)
	}
}

impl<T> Debug for Property<T>
where
	T: Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.body.value.borrow().fmt(f)
	}
}
