pub mod macros;

mod binder;
mod collections;
mod equality;
mod error;
mod event;
mod object;
mod property;
mod registry;

use std::rc::Rc;

pub use binder::{Binder, CleanupFailure, DiagnosticSink, State};
pub use collections::{
	ChangeKind, ListChanged, MapChanged, ObservableList, ObservableMap, ObservableSet, SetChanged,
};
pub use equality::{Equality, Identity, Structural};
pub use error::{Error, Result};
pub use event::{Event, Listenable};
pub use object::{Notifier, ObservableObject};
pub use property::{Property, Toggle, ValueChanged};
pub use registry::{Handle, ListenerId};

/// A shared listener callback.
pub type Listener<A> = Rc<dyn Fn(&A)>;

/// Anything that can hand out a [`Handle`] for a listener.
pub trait Subscribable<A: ?Sized> {
	/// Registers `listener`. Fails when the source is no longer alive.
	fn subscribe_listener(&self, listener: Listener<A>) -> Result<Handle>;
}
