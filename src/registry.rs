use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::Listener;

/// Identifies one registration within its observable.
///
/// Ids grow in registration order and are never reused by the same
/// observable, so two handles with equal ids from one source are the same
/// registration. Useful as a map key when tracking handles.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ListenerId(u64);

/// Listeners of a single observable, kept in registration order.
pub(crate) struct Registry<A: ?Sized> {
	inner: RefCell<RegistryInner<A>>,
}

struct RegistryInner<A: ?Sized> {
	next: u64,
	listeners: SmallVec<[(ListenerId, Listener<A>); 4]>,
}

pub(crate) trait Detach {
	fn detach(&self, id: ListenerId) -> bool;
}

impl<A: ?Sized> Default for Registry<A> {
	fn default() -> Self {
		Registry::new()
	}
}

impl<A: ?Sized> Registry<A> {
	pub fn new() -> Self {
		Registry {
			inner: RefCell::new(RegistryInner {
				next: 0,
				listeners: SmallVec::new(),
			}),
		}
	}

	pub fn add(&self, listener: Listener<A>) -> ListenerId {
		let mut inner = self.inner.borrow_mut();
		let id = ListenerId(inner.next);
		inner.next += 1;
		inner.listeners.push((id, listener));
		tracing::trace!(id = id.0, count = inner.listeners.len(), "listener added");
		id
	}

	/// Removes the listener registered under `id`.
	///
	/// Dropping a listener may unsubscribe others from this registry, so the
	/// removed entry outlives the borrow.
	pub fn remove(&self, id: ListenerId) -> bool {
		let removed = {
			let mut inner = self.inner.borrow_mut();
			let position = inner.listeners.iter().position(|(it, _)| *it == id);
			position.map(|index| {
				let entry = inner.listeners.remove(index);
				tracing::trace!(id = id.0, count = inner.listeners.len(), "listener removed");
				entry
			})
		};
		removed.is_some()
	}

	pub fn clear(&self) {
		let removed = std::mem::take(&mut self.inner.borrow_mut().listeners);
		drop(removed);
	}

	pub fn count(&self) -> usize {
		self.inner.borrow().listeners.len()
	}

	/// Invokes every listener registered at the moment of the call.
	///
	/// The borrow is released before the first listener runs, so listeners
	/// are free to subscribe, unsubscribe or trigger nested notifications.
	pub fn invoke_all(&self, args: &A) {
		let snapshot: SmallVec<[Listener<A>; 4]> = self
			.inner
			.borrow()
			.listeners
			.iter()
			.map(|(_, listener)| listener.clone())
			.collect();

		for listener in snapshot {
			listener(args);
		}
	}
}

impl<A: ?Sized + 'static> Registry<A> {
	pub fn subscribe(self: &Rc<Self>, listener: Listener<A>) -> Handle {
		let id = self.add(listener);
		Handle {
			id,
			registry: Rc::downgrade(self) as Weak<dyn Detach>,
		}
	}
}

impl<A: ?Sized> Detach for Registry<A> {
	fn detach(&self, id: ListenerId) -> bool {
		self.remove(id)
	}
}

/// A token for one listener registration.
///
/// Handles only point back at their observable, they never keep it alive.
/// Dropping a handle does not unsubscribe.
#[derive(Clone)]
pub struct Handle {
	id: ListenerId,
	registry: Weak<dyn Detach>,
}

impl Handle {
	/// A handle that is not attached to anything.
	pub fn detached() -> Self {
		Handle {
			id: ListenerId(u64::MAX),
			registry: Weak::<Registry<()>>::new() as Weak<dyn Detach>,
		}
	}

	/// Id of the registration. [`Handle::detached`] reports an id no
	/// observable hands out.
	pub fn id(&self) -> ListenerId {
		self.id
	}

	/// Whether the observable this handle points at is still alive.
	pub fn is_attached(&self) -> bool {
		self.registry.strong_count() > 0
	}

	/// Removes the listener. Returns `false` if it was already removed or
	/// the observable is gone.
	pub fn unlisten(&self) -> bool {
		match self.registry.upgrade() {
			Some(registry) => registry.detach(self.id),
			None => false,
		}
	}
}

impl Default for Handle {
	fn default() -> Self {
		Handle::detached()
	}
}

impl Debug for Handle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Handle")
			.field("id", &self.id)
			.field("attached", &self.is_attached())
			.finish()
	}
}
