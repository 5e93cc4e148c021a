mod list;
mod map;
mod set;

pub use list::{ListChanged, ObservableList};
pub use map::{MapChanged, ObservableMap};
pub use set::{ObservableSet, SetChanged};

/// What a collection mutation did.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChangeKind {
	Add,
	Remove,
	Update,
	Clear,
}
