use crate::Reflect;
use crate::info::Kind;
use crate::ops::{Aggregate, Array, List, Map, Nullable};

// -----------------------------------------------------------------------------
// ValueRef

/// An immutable view of a reflected value, cast to its structural kind.
///
/// Obtained via [`Reflect::view`]. Scalars carry no dedicated interface and
/// are handed back as plain [`Reflect`] references.
///
/// # Example
///
/// ```
/// use replica_reflect::Reflect;
/// use replica_reflect::ops::ValueRef;
///
/// let value = vec![1_i32, 2, 3];
/// match value.view() {
///     ValueRef::List(list) => assert_eq!(list.len(), 3),
///     _ => unreachable!(),
/// }
/// ```
///
/// [`Reflect::view`]: crate::Reflect::view
pub enum ValueRef<'a> {
    Scalar(&'a dyn Reflect),
    Array(&'a dyn Array),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Plain(&'a dyn Aggregate),
    Nullable(&'a dyn Nullable),
}

impl ValueRef<'_> {
    /// The kind of the viewed value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Scalar(_) => Kind::Scalar,
            Self::Array(_) => Kind::Array,
            Self::List(_) => Kind::List,
            Self::Map(_) => Kind::Map,
            Self::Plain(_) => Kind::Plain,
            Self::Nullable(_) => Kind::Nullable,
        }
    }
}

// -----------------------------------------------------------------------------
// ValueMut

/// A mutable view of a reflected value, cast to its structural kind.
///
/// Obtained via [`Reflect::view_mut`].
///
/// [`Reflect::view_mut`]: crate::Reflect::view_mut
pub enum ValueMut<'a> {
    Scalar(&'a mut dyn Reflect),
    Array(&'a mut dyn Array),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Plain(&'a mut dyn Aggregate),
    Nullable(&'a mut dyn Nullable),
}

impl ValueMut<'_> {
    /// The kind of the viewed value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Scalar(_) => Kind::Scalar,
            Self::Array(_) => Kind::Array,
            Self::List(_) => Kind::List,
            Self::Map(_) => Kind::Map,
            Self::Plain(_) => Kind::Plain,
            Self::Nullable(_) => Kind::Nullable,
        }
    }
}
