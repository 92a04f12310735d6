use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to a type's stable path and short name.
///
/// [`type_path`] is the unique identifier of the type and doubles as the
/// type tag written to the wire; it must not collide with any other
/// reflected type's path. [`type_name`] is the short, human-oriented name
/// and may be duplicated across modules.
///
/// Primitive types use their bare name as both path and name (`"i32"`),
/// mirroring the special handling decoders give them. Derived types use
/// `module_path::TypeName`, with generic arguments rendered into the path
/// through a [`GenericTypePathCell`](crate::info::GenericTypePathCell).
///
/// Neither name carries a leading `::`.
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
pub trait TypePath: 'static {
    /// The stable, fully-qualified path of this type.
    fn type_path() -> &'static str;

    /// The short name of this type, without module path.
    fn type_name() -> &'static str;
}

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// The returned reference always points at the same interned value: the
/// implementation computes the info on first access inside a
/// [`NonGenericTypeInfoCell`] or [`GenericTypeInfoCell`] and serves the
/// cached entry afterwards. Concurrent first accesses may race on the
/// computation, but only one result survives.
///
/// # Example
///
/// ```
/// use replica_reflect::info::{Kind, Typed};
///
/// let info = <Vec<i32> as Typed>::type_info();
/// assert_eq!(info.kind(), Kind::List);
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::info::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::info::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// Returns the interned [`TypeInfo`] of this type.
    fn type_info() -> &'static TypeInfo;
}
