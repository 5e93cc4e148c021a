use std::borrow::Borrow;
use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use fxhash::{FxBuildHasher, FxHashSet};

use super::ChangeKind;
use crate::event::Event;
use crate::registry::Handle;
use crate::{Error, Listener, Result, Subscribable};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SetChanged<T> {
	pub kind: ChangeKind,
	/// Added or removed element. `None` for [`ChangeKind::Clear`].
	pub element: Option<T>,
}

/// A uniqueness set restricted to single-element mutations.
///
/// Bulk algebra (`union_with` and friends) is rejected with
/// [`Error::Unsupported`] so that every event maps to exactly one element.
pub struct ObservableSet<T, S = FxBuildHasher> {
	body: Rc<SetBody<T, S>>,
}

struct SetBody<T, S> {
	items: RefCell<HashSet<T, S>>,
	changed: Event<SetChanged<T>>,
}

impl<T, S> Clone for ObservableSet<T, S> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T> ObservableSet<T, FxBuildHasher>
where
	T: Eq + Hash + 'static,
{
	pub fn new() -> Self {
		ObservableSet::with_hasher(FxBuildHasher::default())
	}
}

impl<T> Default for ObservableSet<T, FxBuildHasher>
where
	T: Eq + Hash + 'static,
{
	fn default() -> Self {
		ObservableSet::new()
	}
}

impl<T> FromIterator<T> for ObservableSet<T, FxBuildHasher>
where
	T: Eq + Hash + 'static,
{
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let set = ObservableSet::new();
		set.body.items.borrow_mut().extend(iter);
		set
	}
}

impl<T, S> ObservableSet<T, S>
where
	T: Eq + Hash + 'static,
	S: BuildHasher,
{
	pub fn with_hasher(hasher: S) -> Self {
		ObservableSet {
			body: Rc::new(SetBody {
				items: RefCell::new(HashSet::with_hasher(hasher)),
				changed: Event::new(),
			}),
		}
	}

	pub fn len(&self) -> usize {
		self.body.items.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.body.items.borrow().is_empty()
	}

	pub fn contains<Q>(&self, item: &Q) -> bool
	where
		T: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.body.items.borrow().contains(item)
	}

	pub fn borrow(&self) -> Ref<'_, HashSet<T, S>> {
		self.body.items.borrow()
	}

	/// Adds `item`. Returns `false` and stays silent if it was already present.
	pub fn insert(&self, item: T) -> bool
	where
		T: Clone,
	{
		{
			let mut items = self.body.items.borrow_mut();
			if items.contains(&item) {
				return false;
			}
			items.insert(item.clone());
		}
		self.notify(ChangeKind::Add, Some(item));
		true
	}

	/// Removes `item`. Returns `false` and stays silent if it was absent.
	pub fn remove<Q>(&self, item: &Q) -> bool
	where
		T: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		let removed = self.body.items.borrow_mut().take(item);
		match removed {
			Some(element) => {
				self.notify(ChangeKind::Remove, Some(element));
				true
			}
			None => false,
		}
	}

	pub fn clear(&self) {
		{
			let mut items = self.body.items.borrow_mut();
			if items.is_empty() {
				return;
			}
			items.clear();
		}
		self.notify(ChangeKind::Clear, None);
	}

	pub fn union_with(&self, _other: impl IntoIterator<Item = T>) -> Result<()> {
		Err(Error::Unsupported("union_with"))
	}

	pub fn intersect_with(&self, _other: impl IntoIterator<Item = T>) -> Result<()> {
		Err(Error::Unsupported("intersect_with"))
	}

	pub fn except_with(&self, _other: impl IntoIterator<Item = T>) -> Result<()> {
		Err(Error::Unsupported("except_with"))
	}

	pub fn symmetric_except_with(&self, _other: impl IntoIterator<Item = T>) -> Result<()> {
		Err(Error::Unsupported("symmetric_except_with"))
	}

	pub fn is_subset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool {
		let other = collect(other);
		self.body.items.borrow().iter().all(|it| other.contains(it))
	}

	pub fn is_superset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool {
		let items = self.body.items.borrow();
		other.into_iter().all(|it| items.contains(it))
	}

	pub fn is_proper_subset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool {
		let other = collect(other);
		let items = self.body.items.borrow();
		items.len() < other.len() && items.iter().all(|it| other.contains(it))
	}

	pub fn is_proper_superset_of<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool {
		let other = collect(other);
		let items = self.body.items.borrow();
		items.len() > other.len() && other.iter().all(|it| items.contains(*it))
	}

	pub fn overlaps<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool {
		let items = self.body.items.borrow();
		other.into_iter().any(|it| items.contains(it))
	}

	pub fn set_equals<'a>(&self, other: impl IntoIterator<Item = &'a T>) -> bool {
		let other = collect(other);
		let items = self.body.items.borrow();
		items.len() == other.len() && other.iter().all(|it| items.contains(*it))
	}

	pub fn subscribe(&self, listener: impl Fn(&SetChanged<T>) + 'static) -> Handle {
		self.body.changed.subscribe(listener)
	}

	pub fn listener_count(&self) -> usize {
		self.body.changed.listener_count()
	}

	fn notify(&self, kind: ChangeKind, element: Option<T>) {
		self.body.changed.invoke(&SetChanged { kind, element })
	}
}

fn collect<'a, T>(other: impl IntoIterator<Item = &'a T>) -> FxHashSet<&'a T>
where
	T: Eq + Hash + 'a,
{
	other.into_iter().collect()
}

impl<T, S> Subscribable<SetChanged<T>> for ObservableSet<T, S>
where
	T: 'static,
{
	fn subscribe_listener(&self, listener: Listener<SetChanged<T>>) -> Result<Handle> {
		self.body.changed.subscribe_listener(listener)
	}
}

impl<T: Debug, S> Debug for ObservableSet<T, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.body.items.borrow().iter()).finish()
	}
}
