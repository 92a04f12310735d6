use std::any::TypeId;
use std::fmt;

use crate::info::{TypePath, Typed};

// -----------------------------------------------------------------------------
// Kind

/// The closed structural classification of a reflected type.
///
/// A type's kind is derived once from its shape and never changes:
///
/// - [`Scalar`]: an indivisible value (`i32`, `String`, `Duration`, ...).
/// - [`Array`]: a fixed-length sequence (`[T; N]`).
/// - [`List`]: a growable sequence (`Vec<T>`, `VecDeque<T>`, sets).
/// - [`Map`]: a keyed collection (`HashMap<K, V>`, `BTreeMap<K, V>`).
/// - [`Plain`]: a user-defined aggregate walked field by field.
/// - [`Nullable`]: a value that may be absent (`Option<T>`).
///
/// The kind is obtained via [`Reflect::kind`] or [`TypeInfo::kind`].
///
/// [`Scalar`]: Kind::Scalar
/// [`Array`]: Kind::Array
/// [`List`]: Kind::List
/// [`Map`]: Kind::Map
/// [`Plain`]: Kind::Plain
/// [`Nullable`]: Kind::Nullable
/// [`Reflect::kind`]: crate::Reflect::kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Scalar,
    Array,
    List,
    Map,
    Plain,
    Nullable,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Array => f.pad("Array"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Plain => f.pad("Plain"),
            Self::Nullable => f.pad("Nullable"),
        }
    }
}

// -----------------------------------------------------------------------------
// Ty

/// The identity of a reflected type: its [`TypeId`] plus stable names.
#[derive(Debug, Clone, Copy)]
pub struct Ty {
    id: TypeId,
    path: &'static str,
    name: &'static str,
}

impl Ty {
    /// Captures the identity of `T`.
    pub fn of<T: TypePath>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
        }
    }

    /// The [`TypeId`] of the type.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The stable, fully-qualified path of the type.
    #[inline]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// The short name of the type.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

// -----------------------------------------------------------------------------
// TypeRef

/// A lazy reference to another type's metadata.
///
/// Field and element slots hold a `TypeRef` rather than a direct
/// `&'static TypeInfo` so that self-referential types (a struct containing a
/// list of itself) do not re-enter their own info cell while it is being
/// initialized. The target info is resolved on demand through a function
/// pointer.
#[derive(Clone, Copy)]
pub struct TypeRef {
    ty: Ty,
    info: fn() -> &'static TypeInfo,
}

impl TypeRef {
    /// Captures a lazy reference to `T`'s metadata.
    pub fn of<T: Typed>() -> Self {
        Self {
            ty: Ty::of::<T>(),
            info: T::type_info,
        }
    }

    /// The identity of the referenced type.
    #[inline]
    pub fn ty(&self) -> Ty {
        self.ty
    }

    /// The [`TypeId`] of the referenced type.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.ty.id()
    }

    /// The stable path of the referenced type.
    #[inline]
    pub fn path(&self) -> &'static str {
        self.ty.path()
    }

    /// Resolves the referenced type's [`TypeInfo`].
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    /// Resolves the referenced type's [`Kind`].
    #[inline]
    pub fn kind(&self) -> Kind {
        self.info().kind()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef").field("path", &self.ty.path()).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static metadata for one reflected type, dispatched by [`Kind`].
///
/// A `TypeInfo` is computed once per concrete type, on first access, and
/// interned for the lifetime of the process (see [`Typed`]).
#[derive(Debug)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Array(ArrayInfo),
    List(ListInfo),
    Map(MapInfo),
    Plain(AggregateInfo),
    Nullable(NullableInfo),
}

impl TypeInfo {
    /// The structural kind described by this info.
    #[inline]
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

    /// The identity of the described type.
    #[inline]
    pub fn ty(&self) -> Ty {
        match self {
            Self::Scalar(info) => info.ty,
            Self::Array(info) => info.ty,
            Self::List(info) => info.ty,
            Self::Map(info) => info.ty,
            Self::Plain(info) => info.ty,
            Self::Nullable(info) => info.ty,
        }
    }

    /// The [`TypeId`] of the described type.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.ty().id()
    }

    /// The stable path of the described type.
    #[inline]
    pub fn path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the aggregate detail, if this describes a plain aggregate.
    #[inline]
    pub fn as_plain(&self) -> Option<&AggregateInfo> {
        match self {
            Self::Plain(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the list detail, if this describes a list.
    #[inline]
    pub fn as_list(&self) -> Option<&ListInfo> {
        match self {
            Self::List(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the array detail, if this describes a fixed array.
    #[inline]
    pub fn as_array(&self) -> Option<&ArrayInfo> {
        match self {
            Self::Array(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the map detail, if this describes a map.
    #[inline]
    pub fn as_map(&self) -> Option<&MapInfo> {
        match self {
            Self::Map(info) => Some(info),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Per-kind detail

/// Metadata for an indivisible scalar type.
#[derive(Debug)]
pub struct ScalarInfo {
    ty: Ty,
}

impl ScalarInfo {
    /// Describes the scalar type `T`.
    pub fn new<T: TypePath>() -> Self {
        Self { ty: Ty::of::<T>() }
    }

    /// The identity of the scalar type.
    #[inline]
    pub fn ty(&self) -> Ty {
        self.ty
    }
}

/// Metadata for a fixed-length array type.
#[derive(Debug)]
pub struct ArrayInfo {
    ty: Ty,
    item: TypeRef,
    len: usize,
}

impl ArrayInfo {
    /// Describes the array type `A` with items of type `I` and length `len`.
    pub fn new<A: TypePath, I: Typed>(len: usize) -> Self {
        Self {
            ty: Ty::of::<A>(),
            item: TypeRef::of::<I>(),
            len,
        }
    }

    /// The identity of the array type.
    #[inline]
    pub fn ty(&self) -> Ty {
        self.ty
    }

    /// The item type.
    #[inline]
    pub fn item(&self) -> TypeRef {
        self.item
    }

    /// The fixed length of the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }
}

/// Metadata for a growable list-shaped type.
#[derive(Debug)]
pub struct ListInfo {
    ty: Ty,
    item: TypeRef,
}

impl ListInfo {
    /// Describes the list type `L` with items of type `I`.
    pub fn new<L: TypePath, I: Typed>() -> Self {
        Self {
            ty: Ty::of::<L>(),
            item: TypeRef::of::<I>(),
        }
    }

    /// The identity of the list type.
    #[inline]
    pub fn ty(&self) -> Ty {
        self.ty
    }

    /// The item type.
    #[inline]
    pub fn item(&self) -> TypeRef {
        self.item
    }
}

/// Metadata for a map-shaped type.
#[derive(Debug)]
pub struct MapInfo {
    ty: Ty,
    key: TypeRef,
    value: TypeRef,
}

impl MapInfo {
    /// Describes the map type `M` with keys `K` and values `V`.
    pub fn new<M: TypePath, K: Typed, V: Typed>() -> Self {
        Self {
            ty: Ty::of::<M>(),
            key: TypeRef::of::<K>(),
            value: TypeRef::of::<V>(),
        }
    }

    /// The identity of the map type.
    #[inline]
    pub fn ty(&self) -> Ty {
        self.ty
    }

    /// The key type.
    #[inline]
    pub fn key(&self) -> TypeRef {
        self.key
    }

    /// The value type.
    #[inline]
    pub fn value(&self) -> TypeRef {
        self.value
    }
}

/// Metadata for a nullable wrapper type.
#[derive(Debug)]
pub struct NullableInfo {
    ty: Ty,
    inner: TypeRef,
}

impl NullableInfo {
    /// Describes the nullable type `N` wrapping values of type `I`.
    pub fn new<N: TypePath, I: Typed>() -> Self {
        Self {
            ty: Ty::of::<N>(),
            inner: TypeRef::of::<I>(),
        }
    }

    /// The identity of the nullable type.
    #[inline]
    pub fn ty(&self) -> Ty {
        self.ty
    }

    /// The wrapped type.
    #[inline]
    pub fn inner(&self) -> TypeRef {
        self.inner
    }
}

// -----------------------------------------------------------------------------
// AggregateInfo

/// One introspected field of a plain aggregate: its name, declared type and
/// position in the field order.
#[derive(Debug)]
pub struct FieldInfo {
    name: &'static str,
    ty: TypeRef,
}

impl FieldInfo {
    /// Describes a field `name` of declared type `T`.
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeRef::of::<T>(),
        }
    }

    /// The field name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type of the field.
    #[inline]
    pub fn ty(&self) -> TypeRef {
        self.ty
    }
}

/// Metadata for a plain aggregate: the ordered table of its instance fields.
///
/// The table is the introspection result the copy engine and the wire codec
/// walk; it contains every non-skipped field in declaration order and is
/// interned together with the owning [`TypeInfo`].
#[derive(Debug)]
pub struct AggregateInfo {
    ty: Ty,
    fields: Box<[FieldInfo]>,
}

impl AggregateInfo {
    /// Describes the aggregate type `T` with the given ordered fields.
    pub fn new<T: TypePath>(fields: Vec<FieldInfo>) -> Self {
        Self {
            ty: Ty::of::<T>(),
            fields: fields.into_boxed_slice(),
        }
    }

    /// The identity of the aggregate type.
    #[inline]
    pub fn ty(&self) -> Ty {
        self.ty
    }

    /// The ordered field table.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// The number of introspected fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Looks up a field by position.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }
}
