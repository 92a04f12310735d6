//! Static type metadata: paths, kinds and per-type field tables.
//!
//! Every reflected type exposes a [`TypeInfo`] describing its structural
//! [`Kind`] and, for plain aggregates, the ordered list of its fields.
//! The info for a given type is computed once, on first access, inside a
//! process-wide cell and is never invalidated afterwards.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod type_info;
mod type_path;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use type_info::{
    AggregateInfo, ArrayInfo, FieldInfo, Kind, ListInfo, MapInfo, NullableInfo, ScalarInfo, Ty,
    TypeInfo, TypeRef,
};
pub use type_path::{TypePath, Typed};
