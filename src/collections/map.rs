use std::borrow::Borrow;
use std::cell::{Ref, RefCell};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use fxhash::FxBuildHasher;

use super::ChangeKind;
use crate::event::Event;
use crate::registry::Handle;
use crate::{Error, Listener, Result, Subscribable};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MapChanged<K> {
	pub kind: ChangeKind,
	/// Affected key. `None` for [`ChangeKind::Clear`].
	pub key: Option<K>,
}

/// A key-unique mapping that reports every committed mutation.
pub struct ObservableMap<K, V, S = FxBuildHasher> {
	body: Rc<MapBody<K, V, S>>,
}

struct MapBody<K, V, S> {
	entries: RefCell<HashMap<K, V, S>>,
	changed: Event<MapChanged<K>>,
}

impl<K, V, S> Clone for ObservableMap<K, V, S> {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl<K, V> ObservableMap<K, V, FxBuildHasher>
where
	K: Eq + Hash + 'static,
{
	pub fn new() -> Self {
		ObservableMap::with_hasher(FxBuildHasher::default())
	}
}

impl<K, V> Default for ObservableMap<K, V, FxBuildHasher>
where
	K: Eq + Hash + 'static,
{
	fn default() -> Self {
		ObservableMap::new()
	}
}

impl<K, V> FromIterator<(K, V)> for ObservableMap<K, V, FxBuildHasher>
where
	K: Eq + Hash + 'static,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let map = ObservableMap::new();
		map.body.entries.borrow_mut().extend(iter);
		map
	}
}

impl<K, V, S> ObservableMap<K, V, S>
where
	K: Eq + Hash + 'static,
	S: BuildHasher,
{
	pub fn with_hasher(hasher: S) -> Self {
		ObservableMap {
			body: Rc::new(MapBody {
				entries: RefCell::new(HashMap::with_hasher(hasher)),
				changed: Event::new(),
			}),
		}
	}

	pub fn len(&self) -> usize {
		self.body.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.body.entries.borrow().is_empty()
	}

	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		self.body.entries.borrow().contains_key(key)
	}

	pub fn get<Q>(&self, key: &Q) -> Option<Ref<'_, V>>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		Ref::filter_map(self.body.entries.borrow(), |entries| entries.get(key)).ok()
	}

	pub fn keys(&self) -> Vec<K>
	where
		K: Clone,
	{
		self.body.entries.borrow().keys().cloned().collect()
	}

	pub fn borrow(&self) -> Ref<'_, HashMap<K, V, S>> {
		self.body.entries.borrow()
	}

	/// Adds a new entry. Fails without notifying if `key` is already present.
	pub fn add(&self, key: K, value: V) -> Result<()>
	where
		K: Clone,
	{
		{
			let mut entries = self.body.entries.borrow_mut();
			match entries.entry(key.clone()) {
				Entry::Occupied(_) => return Err(Error::DuplicateKey),
				Entry::Vacant(slot) => {
					slot.insert(value);
				}
			}
		}
		self.notify(ChangeKind::Add, Some(key));
		Ok(())
	}

	/// Assigns `value` to `key`: an update if the key existed, an add otherwise.
	pub fn insert(&self, key: K, value: V) -> Option<V>
	where
		K: Clone,
	{
		let (kind, old) = {
			let mut entries = self.body.entries.borrow_mut();
			match entries.entry(key.clone()) {
				Entry::Occupied(mut slot) => (ChangeKind::Update, Some(slot.insert(value))),
				Entry::Vacant(slot) => {
					slot.insert(value);
					(ChangeKind::Add, None)
				}
			}
		};
		self.notify(kind, Some(key));
		old
	}

	pub fn remove<Q>(&self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Eq + Hash + ?Sized,
	{
		let (key, value) = self.body.entries.borrow_mut().remove_entry(key)?;
		self.notify(ChangeKind::Remove, Some(key));
		Some(value)
	}

	pub fn clear(&self) {
		{
			let mut entries = self.body.entries.borrow_mut();
			if entries.is_empty() {
				return;
			}
			entries.clear();
		}
		self.notify(ChangeKind::Clear, None);
	}

	pub fn subscribe(&self, listener: impl Fn(&MapChanged<K>) + 'static) -> Handle {
		self.body.changed.subscribe(listener)
	}

	pub fn listener_count(&self) -> usize {
		self.body.changed.listener_count()
	}

	fn notify(&self, kind: ChangeKind, key: Option<K>) {
		self.body.changed.invoke(&MapChanged { kind, key })
	}
}

impl<K, V, S> Subscribable<MapChanged<K>> for ObservableMap<K, V, S>
where
	K: 'static,
{
	fn subscribe_listener(&self, listener: Listener<MapChanged<K>>) -> Result<Handle> {
		self.body.changed.subscribe_listener(listener)
	}
}

impl<K: Debug, V: Debug, S> Debug for ObservableMap<K, V, S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.body.entries.borrow().iter()).finish()
	}
}
