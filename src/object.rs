use std::rc::Rc;

use crate::equality::{Equality, Structural};
use crate::event::Event;
use crate::registry::Handle;
use crate::{Error, Listener, Result, Subscribable};

/// The property-changed channel of an observable object.
///
/// Embed one in a struct and route setters through [`Notifier::set`]:
///
/// ```
/// use bindable::Notifier;
///
/// struct Person {
///     notifier: Notifier,
///     age: u32,
/// }
///
/// impl Person {
///     fn set_age(&mut self, age: u32) -> bool {
///         self.notifier.set(&mut self.age, age, "age")
///     }
/// }
/// ```
#[derive(Clone, Default)]
pub struct Notifier {
	changed: Event<str>,
}

impl Notifier {
	pub fn new() -> Self {
		Notifier {
			changed: Event::new(),
		}
	}

	pub fn notify_changed(&self, property: &str) {
		self.changed.invoke(property)
	}

	/// Writes `value` into `field` and notifies `property` if it differs.
	#[inline]
	pub fn set<T: PartialEq>(&self, field: &mut T, value: T, property: &str) -> bool {
		self.set_with(field, value, property, &Structural)
	}

	pub fn set_with<T>(
		&self,
		field: &mut T,
		value: T,
		property: &str,
		equality: &impl Equality<T>,
	) -> bool {
		if equality.equals(field, &value) {
			return false;
		}

		*field = value;
		self.notify_changed(property);
		true
	}

	/// Listens to every property change. The listener receives the property name.
	pub fn subscribe(&self, listener: impl Fn(&str) + 'static) -> Handle {
		self.changed.subscribe(listener)
	}

	/// Listens to changes of a single property, matched exactly.
	pub fn subscribe_property(
		&self,
		property: &str,
		listener: impl Fn() + 'static,
	) -> Result<Handle> {
		if property.is_empty() {
			return Err(Error::InvalidArgument("property name is empty"));
		}

		let property: Rc<str> = property.into();
		Ok(self.changed.subscribe(move |changed| {
			if changed == &*property {
				listener()
			}
		}))
	}

	pub fn listener_count(&self) -> usize {
		self.changed.listener_count()
	}
}

impl Subscribable<str> for Notifier {
	fn subscribe_listener(&self, listener: Listener<str>) -> Result<Handle> {
		self.changed.subscribe_listener(listener)
	}
}

/// A domain object that owns a [`Notifier`].
pub trait ObservableObject {
	fn notifier(&self) -> &Notifier;

	fn subscribe(&self, listener: impl Fn(&str) + 'static) -> Handle
	where
		Self: Sized,
	{
		self.notifier().subscribe(listener)
	}

	fn subscribe_property(&self, property: &str, listener: impl Fn() + 'static) -> Result<Handle>
	where
		Self: Sized,
	{
		self.notifier().subscribe_property(property, listener)
	}
}

impl ObservableObject for Notifier {
	fn notifier(&self) -> &Notifier {
		self
	}
}
