pub use enclose::*;

/// Records a listener on a [`Binder`](crate::Binder), cloning the listed captures first.
///
/// Evaluates to the `Result` of [`Binder::bind`](crate::Binder::bind).
#[macro_export]
macro_rules! bind {
    ($binder:expr, $source:expr, ( $($d_tt:tt)* ) $arg:ident : $ty:ty => $($b:tt)*) => {
        $binder.bind(&$source, $crate::macros::enclose!(($( $d_tt )*) move |$arg: &$ty| { $($b)* }))
    };
    ($binder:expr, $source:expr, $arg:ident : $ty:ty => $($b:tt)*) => {
        $binder.bind(&$source, move |$arg: &$ty| { $($b)* })
    };
    ($binder:expr, $source:expr, ( $($d_tt:tt)* ) $arg:ident => $($b:tt)*) => {
        $binder.bind(&$source, $crate::macros::enclose!(($( $d_tt )*) move |$arg: &_| { $($b)* }))
    };
    ($binder:expr, $source:expr, $arg:ident => $($b:tt)*) => {
        $binder.bind(&$source, move |$arg: &_| { $($b)* })
    };
}

/// Expands to a setter that writes a field through a [`Notifier`](crate::Notifier).
///
/// The property name defaults to the field name.
#[macro_export]
macro_rules! notify_setter {
    ($vis:vis fn $setter:ident($field:ident: $ty:ty) in $notifier:ident as $name:expr) => {
        $vis fn $setter(&mut self, value: $ty) -> bool {
            self.$notifier.set(&mut self.$field, value, $name)
        }
    };
    ($vis:vis fn $setter:ident($field:ident: $ty:ty) in $notifier:ident) => {
        $crate::notify_setter!($vis fn $setter($field: $ty) in $notifier as stringify!($field));
    };
}
