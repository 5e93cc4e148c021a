use std::rc::Rc;
use std::sync::Arc;

/// Decides whether a write actually changes a value.
pub trait Equality<T: ?Sized> {
	fn equals(&self, current: &T, next: &T) -> bool;
}

/// `PartialEq` equality. `None == None`, `None != Some(_)`.
#[derive(Clone, Copy, Default, Debug)]
pub struct Structural;

impl<T: PartialEq + ?Sized> Equality<T> for Structural {
	#[inline]
	fn equals(&self, current: &T, next: &T) -> bool {
		current == next
	}
}

/// Pointer identity for shared references.
#[derive(Clone, Copy, Default, Debug)]
pub struct Identity;

impl<T: ?Sized> Equality<Rc<T>> for Identity {
	fn equals(&self, current: &Rc<T>, next: &Rc<T>) -> bool {
		Rc::ptr_eq(current, next)
	}
}

impl<T: ?Sized> Equality<Arc<T>> for Identity {
	fn equals(&self, current: &Arc<T>, next: &Arc<T>) -> bool {
		Arc::ptr_eq(current, next)
	}
}

impl<T> Equality<Option<T>> for Identity
where
	Identity: Equality<T>,
{
	fn equals(&self, current: &Option<T>, next: &Option<T>) -> bool {
		match (current, next) {
			(None, None) => true,
			(Some(current), Some(next)) => self.equals(current, next),
			_ => false,
		}
	}
}

impl<T: ?Sized, F> Equality<T> for F
where
	F: Fn(&T, &T) -> bool,
{
	#[inline]
	fn equals(&self, current: &T, next: &T) -> bool {
		self(current, next)
	}
}
