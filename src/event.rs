use std::rc::{Rc, Weak};

use crate::registry::{Handle, Registry};
use crate::{Error, Listener, Result, Subscribable};

/// A plain fan-out channel.
///
/// Clones share the same listeners.
pub struct Event<A: ?Sized> {
	registry: Rc<Registry<A>>,
}

impl<A: ?Sized> Clone for Event<A> {
	fn clone(&self) -> Self {
		Event {
			registry: self.registry.clone(),
		}
	}
}

impl<A: ?Sized + 'static> Default for Event<A> {
	fn default() -> Self {
		Event::new()
	}
}

impl<A: ?Sized + 'static> Event<A> {
	pub fn new() -> Self {
		Event {
			registry: Rc::new(Registry::new()),
		}
	}

	#[inline]
	pub fn subscribe(&self, listener: impl Fn(&A) + 'static) -> Handle {
		self.registry.subscribe(Rc::new(listener))
	}

	/// Delivers `args` to every listener, in registration order.
	#[inline]
	pub fn invoke(&self, args: &A) {
		self.registry.invoke_all(args)
	}

	pub fn listener_count(&self) -> usize {
		self.registry.count()
	}

	pub fn remove_all_listeners(&self) {
		self.registry.clear()
	}

	/// A subscribe-only view that does not keep the event alive.
	pub fn listenable(&self) -> Listenable<A> {
		Listenable {
			registry: Rc::downgrade(&self.registry),
		}
	}
}

impl<A: ?Sized + 'static> Subscribable<A> for Event<A> {
	fn subscribe_listener(&self, listener: Listener<A>) -> Result<Handle> {
		Ok(self.registry.subscribe(listener))
	}
}

pub struct Listenable<A: ?Sized> {
	registry: Weak<Registry<A>>,
}

impl<A: ?Sized> Clone for Listenable<A> {
	fn clone(&self) -> Self {
		Listenable {
			registry: self.registry.clone(),
		}
	}
}

impl<A: ?Sized> Default for Listenable<A> {
	fn default() -> Self {
		Listenable {
			registry: Weak::new(),
		}
	}
}

impl<A: ?Sized + 'static> Listenable<A> {
	pub fn is_valid(&self) -> bool {
		self.registry.strong_count() > 0
	}

	pub fn subscribe(&self, listener: impl Fn(&A) + 'static) -> Result<Handle> {
		self.subscribe_listener(Rc::new(listener))
	}
}

impl<A: ?Sized + 'static> Subscribable<A> for Listenable<A> {
	fn subscribe_listener(&self, listener: Listener<A>) -> Result<Handle> {
		let registry = self
			.registry
			.upgrade()
			.ok_or(Error::InvalidArgument("listenable"))?;
		Ok(registry.subscribe(listener))
	}
}
