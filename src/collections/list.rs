use std::cell::{Ref, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use super::ChangeKind;
use crate::event::Event;
use crate::registry::Handle;
use crate::{Error, Listener, Result, Subscribable};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ListChanged {
	pub kind: ChangeKind,
	/// Affected position. `None` for [`ChangeKind::Clear`].
	pub index: Option<usize>,
}

/// An ordered sequence that reports every committed mutation.
pub struct ObservableList<T> {
	body: Rc<ListBody<T>>,
}

struct ListBody<T> {
	items: RefCell<Vec<T>>,
	changed: Event<ListChanged>,
}

impl<T> Clone for ObservableList<T> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<T: 'static> Default for ObservableList<T> {
	fn default() -> Self {
		ObservableList::new()
	}
}

impl<T: 'static> FromIterator<T> for ObservableList<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		ObservableList::from_vec(iter.into_iter().collect())
	}
}

impl<T: 'static> ObservableList<T> {
	pub fn new() -> Self {
		ObservableList::from_vec(Vec::new())
	}

	pub fn from_vec(items: Vec<T>) -> Self {
		ObservableList {
			body: Rc::new(ListBody {
				items: RefCell::new(items),
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

	pub fn get(&self, index: usize) -> Option<Ref<'_, T>> {
		Ref::filter_map(self.body.items.borrow(), |items| items.get(index)).ok()
	}

	pub fn borrow(&self) -> Ref<'_, [T]> {
		Ref::map(self.body.items.borrow(), |items| items.as_slice())
	}

	pub fn to_vec(&self) -> Vec<T>
	where
		T: Clone,
	{
		self.body.items.borrow().clone()
	}

	pub fn index_of(&self, item: &T) -> Option<usize>
	where
		T: PartialEq,
	{
		self.body.items.borrow().iter().position(|it| it == item)
	}

	pub fn contains(&self, item: &T) -> bool
	where
		T: PartialEq,
	{
		self.index_of(item).is_some()
	}

	/// Appends `item`. The event carries the new last index.
	pub fn push(&self, item: T) {
		let index = {
			let mut items = self.body.items.borrow_mut();
			items.push(item);
			items.len() - 1
		};
		self.notify(ChangeKind::Add, Some(index));
	}

	pub fn insert(&self, index: usize, item: T) -> Result<()> {
		{
			let mut items = self.body.items.borrow_mut();
			if index > items.len() {
				return Err(Error::IndexOutOfRange {
					index,
					len: items.len(),
				});
			}
			items.insert(index, item);
		}
		self.notify(ChangeKind::Add, Some(index));
		Ok(())
	}

	pub fn remove_at(&self, index: usize) -> Result<T> {
		let removed = {
			let mut items = self.body.items.borrow_mut();
			if index >= items.len() {
				return Err(Error::IndexOutOfRange {
					index,
					len: items.len(),
				});
			}
			items.remove(index)
		};
		self.notify(ChangeKind::Remove, Some(index));
		Ok(removed)
	}

	/// Removes the first element equal to `item`.
	pub fn remove(&self, item: &T) -> bool
	where
		T: PartialEq,
	{
		match self.index_of(item) {
			Some(index) => self.remove_at(index).is_ok(),
			None => false,
		}
	}

	/// Overwrites the element at `index` and returns the previous one.
	pub fn set(&self, index: usize, value: T) -> Result<T> {
		let old = {
			let mut items = self.body.items.borrow_mut();
			let len = items.len();
			let slot = items
				.get_mut(index)
				.ok_or(Error::IndexOutOfRange { index, len })?;
			std::mem::replace(slot, value)
		};
		self.notify(ChangeKind::Update, Some(index));
		Ok(old)
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

	pub fn subscribe(&self, listener: impl Fn(&ListChanged) + 'static) -> Handle {
		self.body.changed.subscribe(listener)
	}

	pub fn listener_count(&self) -> usize {
		self.body.changed.listener_count()
	}

	fn notify(&self, kind: ChangeKind, index: Option<usize>) {
		self.body.changed.invoke(&ListChanged { kind, index })
	}
}

impl<T: 'static> Subscribable<ListChanged> for ObservableList<T> {
	fn subscribe_listener(&self, listener: Listener<ListChanged>) -> Result<Handle> {
		self.body.changed.subscribe_listener(listener)
	}
}

impl<T: Debug> Debug for ObservableList<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.body.items.borrow().iter()).finish()
	}
}
