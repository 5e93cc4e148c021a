use std::any::Any;
use std::cell::RefCell;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use smallvec::SmallVec;

use crate::collections::{
	ListChanged, MapChanged, ObservableList, ObservableMap, ObservableSet, SetChanged,
};
use crate::event::Event;
use crate::object::ObservableObject;
use crate::property::{Property, ValueChanged};
use crate::registry::Handle;
use crate::{Result, Subscribable};

/// A cleanup action that panicked during [`Binder::dispose`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CleanupFailure {
	/// Position of the action in registration order.
	pub index: usize,
	pub message: String,
}

pub type DiagnosticSink = Rc<dyn Fn(&CleanupFailure)>;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum State {
	Active,
	Disposed,
}

/// Collects subscriptions and cleanup actions and tears them all down at once.
///
/// A binder only owns the bindings, never the observables on the other end.
/// Dropping a binder disposes it.
pub struct Binder {
	inner: RefCell<BinderInner>,
	sink: Option<DiagnosticSink>,
}

struct BinderInner {
	state: State,
	handles: SmallVec<[Handle; 8]>,
	cleanups: Vec<Box<dyn FnOnce()>>,
}

impl Default for Binder {
	fn default() -> Self {
		Binder::new()
	}
}

impl Binder {
	pub fn new() -> Self {
		Binder::with_sink(None)
	}

	/// Routes cleanup failures to `sink` instead of the `tracing` error log.
	pub fn with_diagnostics(sink: impl Fn(&CleanupFailure) + 'static) -> Self {
		Binder::with_sink(Some(Rc::new(sink)))
	}

	fn with_sink(sink: Option<DiagnosticSink>) -> Self {
		Binder {
			inner: RefCell::new(BinderInner {
				state: State::Active,
				handles: SmallVec::new(),
				cleanups: Vec::new(),
			}),
			sink,
		}
	}

	pub fn state(&self) -> State {
		self.inner.borrow().state
	}

	pub fn is_disposed(&self) -> bool {
		self.state() == State::Disposed
	}

	/// Keeps `handle` until disposal. Detached handles and disposed binders ignore the call.
	pub fn record(&self, handle: Handle) {
		if !handle.is_attached() {
			return;
		}

		let mut inner = self.inner.borrow_mut();
		if inner.state == State::Disposed {
			tracing::trace!(?handle, "record on a disposed binder ignored");
			return;
		}
		inner.handles.push(handle);
	}

	pub fn register_cleanup(&self, action: impl FnOnce() + 'static) {
		let mut inner = self.inner.borrow_mut();
		if inner.state == State::Disposed {
			return;
		}
		inner.cleanups.push(Box::new(action));
	}

	/// Unsubscribes every recorded handle, then runs every cleanup action.
	///
	/// A panicking cleanup action is reported and the rest still run.
	/// Calling this again does nothing.
	pub fn dispose(&self) {
		let (handles, cleanups) = {
			let mut inner = self.inner.borrow_mut();
			if inner.state == State::Disposed {
				return;
			}
			inner.state = State::Disposed;
			(
				std::mem::take(&mut inner.handles),
				std::mem::take(&mut inner.cleanups),
			)
		};

		tracing::debug!(
			handles = handles.len(),
			cleanups = cleanups.len(),
			"disposing binder"
		);

		for handle in &handles {
			handle.unlisten();
		}

		for (index, action) in cleanups.into_iter().enumerate() {
			if let Err(payload) = catch_unwind(AssertUnwindSafe(action)) {
				self.report(CleanupFailure {
					index,
					message: panic_message(&*payload),
				});
			}
		}
	}

	fn report(&self, failure: CleanupFailure) {
		match &self.sink {
			Some(sink) => {
				if catch_unwind(AssertUnwindSafe(|| sink(&failure))).is_err() {
					tracing::error!(index = failure.index, "diagnostic sink panicked");
				}
			}
			None => tracing::error!(
				index = failure.index,
				message = %failure.message,
				"cleanup action panicked"
			),
		}
	}

	fn subscribe_with(&self, subscribe: impl FnOnce() -> Handle) {
		let _ = self.try_subscribe_with(|| Ok(subscribe()));
	}

	/// Subscribes only while active. A subscription made by a listener that
	/// disposed this binder during the call is removed again.
	fn try_subscribe_with(&self, subscribe: impl FnOnce() -> Result<Handle>) -> Result<()> {
		if self.is_disposed() {
			tracing::trace!("bind on a disposed binder ignored");
			return Ok(());
		}

		let handle = subscribe()?;
		if self.is_disposed() {
			handle.unlisten();
		} else {
			self.record(handle);
		}
		Ok(())
	}

	/// Subscribes `listener` to any [`Subscribable`] source and records the handle.
	pub fn bind<A, S>(&self, source: &S, listener: impl Fn(&A) + 'static) -> Result<()>
	where
		A: ?Sized + 'static,
		S: Subscribable<A> + ?Sized,
	{
		self.try_subscribe_with(|| source.subscribe_listener(Rc::new(listener)))
	}

	pub fn bind_event<A>(&self, event: &Event<A>, listener: impl Fn(&A) + 'static)
	where
		A: ?Sized + 'static,
	{
		self.subscribe_with(|| event.subscribe(listener));
	}

	/// Listens to old and new values of `property`.
	pub fn bind_value_change<T>(
		&self,
		property: &Property<T>,
		listener: impl Fn(&ValueChanged<T>) + 'static,
	) where
		T: 'static,
	{
		self.subscribe_with(|| property.subscribe(listener));
	}

	/// Calls `listener` with the current value now and with every new value later.
	pub fn bind_value<T>(&self, property: &Property<T>, listener: impl Fn(&T) + 'static)
	where
		T: Clone + 'static,
	{
		self.subscribe_with(|| property.subscribe_and_replay(listener));
	}

	pub fn bind_object_change(
		&self,
		object: &impl ObservableObject,
		listener: impl Fn(&str) + 'static,
	) {
		self.subscribe_with(|| object.notifier().subscribe(listener));
	}

	pub fn bind_property_change(
		&self,
		object: &impl ObservableObject,
		property: &str,
		listener: impl Fn() + 'static,
	) -> Result<()> {
		self.try_subscribe_with(|| object.notifier().subscribe_property(property, listener))
	}

	pub fn bind_list_change<T>(
		&self,
		list: &ObservableList<T>,
		listener: impl Fn(&ListChanged) + 'static,
	) where
		T: 'static,
	{
		self.subscribe_with(|| list.subscribe(listener));
	}

	pub fn bind_set_change<T, S>(
		&self,
		set: &ObservableSet<T, S>,
		listener: impl Fn(&SetChanged<T>) + 'static,
	) where
		T: Eq + Hash + 'static,
		S: BuildHasher,
	{
		self.subscribe_with(|| set.subscribe(listener));
	}

	pub fn bind_map_change<K, V, S>(
		&self,
		map: &ObservableMap<K, V, S>,
		listener: impl Fn(&MapChanged<K>) + 'static,
	) where
		K: Eq + Hash + 'static,
		S: BuildHasher,
	{
		self.subscribe_with(|| map.subscribe(listener));
	}

	/// Binds to an event system this crate does not know about.
	///
	/// `attach` runs immediately, `detach` runs on disposal.
	pub fn bind_external(&self, attach: impl FnOnce(), detach: impl FnOnce() + 'static) {
		if self.is_disposed() {
			return;
		}
		attach();
		self.register_cleanup(detach);
	}
}

impl Drop for Binder {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl Debug for Binder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("Binder")
			.field("state", &inner.state)
			.field("handles", &inner.handles.len())
			.field("cleanups", &inner.cleanups.len())
			.finish()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"<non-string panic payload>".to_string()
	}
}
