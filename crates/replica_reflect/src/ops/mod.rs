//! Object-safe access interfaces for each structural [`Kind`].
//!
//! The copy engine and the wire codec never look at concrete types; they
//! traverse values through the trait for the value's kind:
//!
//! - [`Aggregate`]: field access by name or position for plain aggregates.
//! - [`List`]: length, iteration and push for growable sequences.
//! - [`Array`]: length, iteration and rebuild-from-items for fixed arrays.
//! - [`Map`]: entry iteration and insertion for keyed collections.
//! - [`Nullable`]: presence handling for optional values.
//!
//! A value is cast to the right interface through [`Reflect::view`] /
//! [`Reflect::view_mut`], which return the [`ValueRef`] / [`ValueMut`]
//! variants defined here.
//!
//! [`Kind`]: crate::info::Kind
//! [`Reflect::view`]: crate::Reflect::view
//! [`Reflect::view_mut`]: crate::Reflect::view_mut

// -----------------------------------------------------------------------------
// Modules

mod aggregate_ops;
mod array_ops;
mod list_ops;
mod map_ops;
mod nullable_ops;
mod view;

// -----------------------------------------------------------------------------
// Exports

pub use aggregate_ops::{Aggregate, FieldIter};
pub use array_ops::Array;
pub use list_ops::List;
pub use map_ops::Map;
pub use nullable_ops::Nullable;
pub use view::{ValueMut, ValueRef};
