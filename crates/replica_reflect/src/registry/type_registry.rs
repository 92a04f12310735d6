use std::any::TypeId;
use std::borrow::Cow;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::Reflect;
use crate::error::ConstructionError;
use crate::info::Kind;
use crate::registry::{GetTypeRecord, TypeRecord};

// -----------------------------------------------------------------------------
// Classification

/// The copy/serialization policy computed for a value's type.
///
/// - [`Immutable`]: never traversed; duplicated through the direct clone
///   hook, which for handle-shaped types preserves pointer identity.
/// - [`Ignored`]: explicitly excluded from traversal by registration;
///   handled like `Immutable`.
/// - [`Shape`]: traversed structurally according to the type's [`Kind`].
///
/// Classification of a given type is stable: it only changes through an
/// explicit registration call made before first use.
///
/// [`Immutable`]: Classification::Immutable
/// [`Ignored`]: Classification::Ignored
/// [`Shape`]: Classification::Shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Immutable,
    Ignored,
    Shape(Kind),
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// The central store for [`TypeRecord`] entries, the immutable/ignored
/// policy sets and the path index used to resolve wire tags back to types.
/// It is the explicit, process-wide context of every copy and decode:
/// callers pass a registry in rather than reaching for ambient state, which
/// keeps tests isolated.
///
/// # Example
///
/// ```
/// use replica_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
///
/// // `new` seeds the scalar set; the record resolves by wire tag.
/// let record = registry.record_by_path("i32").unwrap();
/// let fresh = record.construct().unwrap();
/// assert_eq!(fresh.take::<i32>().unwrap(), 0);
/// ```
pub struct TypeRegistry {
    records: FxHashMap<TypeId, TypeRecord>,
    path_to_id: FxHashMap<&'static str, TypeId>,
    immutable: FxHashSet<TypeId>,
    ignored: FxHashSet<TypeId>,
    coordinator: Option<TypeId>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry with no registrations at all.
    pub fn empty() -> Self {
        Self {
            records: FxHashMap::default(),
            path_to_id: FxHashMap::default(),
            immutable: FxHashSet::default(),
            ignored: FxHashSet::default(),
            coordinator: None,
        }
    }

    /// Creates a registry seeded with the default immutable and ignored
    /// sets.
    ///
    /// The immutable set covers the scalar types (`bool`, `char`, the
    /// integer and float widths, `String`, `Cow<'static, str>`) plus the
    /// common opaque value types: `Duration`, `PathBuf`, the IP address
    /// family and `SocketAddr`. The ignored set covers the reflective
    /// metadata handle (`TypeId`) and the no-value placeholder
    /// ([`Absent`](crate::Absent)).
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register_immutable::<bool>();
        registry.register_immutable::<char>();
        registry.register_immutable::<u8>();
        registry.register_immutable::<u16>();
        registry.register_immutable::<u32>();
        registry.register_immutable::<u64>();
        registry.register_immutable::<usize>();
        registry.register_immutable::<i8>();
        registry.register_immutable::<i16>();
        registry.register_immutable::<i32>();
        registry.register_immutable::<i64>();
        registry.register_immutable::<isize>();
        registry.register_immutable::<f32>();
        registry.register_immutable::<f64>();
        registry.register_immutable::<String>();
        registry.register_immutable::<Cow<'static, str>>();

        registry.register_immutable::<Duration>();
        registry.register_immutable::<PathBuf>();
        registry.register_immutable::<IpAddr>();
        registry.register_immutable::<Ipv4Addr>();
        registry.register_immutable::<Ipv6Addr>();
        registry.register_immutable::<SocketAddr>();

        registry.register_ignored::<TypeId>();
        registry.register_ignored::<crate::Absent>();

        registry
    }

    /// Registers `T` if it has not been registered already.
    ///
    /// Recursively registers `T`'s type dependencies (its fields and
    /// elements) the first time around; repeated calls are cheap no-ops.
    pub fn register<T: GetTypeRecord>(&mut self) {
        if self.insert_record_if_absent(TypeId::of::<T>(), T::get_type_record) {
            tracing::trace!(type_path = T::type_path(), "registered type");
            T::register_dependencies(self);
        }
    }

    /// Registers `T` and adds it to the immutable set.
    ///
    /// Values of immutable types are never traversed; the copy engine hands
    /// back their direct clone.
    pub fn register_immutable<T: GetTypeRecord>(&mut self) {
        self.register::<T>();
        self.immutable.insert(TypeId::of::<T>());
    }

    /// Registers `T` and adds it to the ignored set.
    ///
    /// Ignored types are excluded from copy and serialization entirely:
    /// the engine hands back their direct clone even when their shape is a
    /// plain aggregate.
    pub fn register_ignored<T: GetTypeRecord>(&mut self) {
        self.register::<T>();
        self.ignored.insert(TypeId::of::<T>());
    }

    // Returns `true` when the record was actually inserted.
    fn insert_record_if_absent(
        &mut self,
        type_id: TypeId,
        get_record: impl FnOnce() -> TypeRecord,
    ) -> bool {
        if self.records.contains_key(&type_id) {
            return false;
        }
        let record = get_record();
        self.path_to_id.insert(record.type_path(), type_id);
        self.records.insert(type_id, record);
        true
    }

    /// Whether a record exists for `type_id`.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.records.contains_key(&type_id)
    }

    /// The record registered for `type_id`.
    #[inline]
    pub fn record(&self, type_id: TypeId) -> Option<&TypeRecord> {
        self.records.get(&type_id)
    }

    /// Resolves a type path (a wire tag) back to its record.
    #[inline]
    pub fn record_by_path(&self, path: &str) -> Option<&TypeRecord> {
        let id = self.path_to_id.get(path)?;
        self.records.get(id)
    }

    /// Whether `type_id` belongs to the ignored set.
    #[inline]
    pub fn is_ignored(&self, type_id: TypeId) -> bool {
        self.ignored.contains(&type_id)
    }

    /// Whether `type_id` belongs to the immutable set.
    #[inline]
    pub fn is_immutable(&self, type_id: TypeId) -> bool {
        self.immutable.contains(&type_id)
    }

    /// Marks the coordinator type whose instances must never be copied.
    #[inline]
    pub fn set_coordinator(&mut self, type_id: TypeId) {
        self.coordinator = Some(type_id);
    }

    /// Whether `type_id` is the barred coordinator type.
    #[inline]
    pub fn is_coordinator(&self, type_id: TypeId) -> bool {
        self.coordinator == Some(type_id)
    }

    /// Computes the copy/serialization policy for a value.
    ///
    /// The ignored set wins over everything; the immutable set and the
    /// scalar kind short-circuit next; any other type is traversed by its
    /// structural shape.
    pub fn classify(&self, value: &dyn Reflect) -> Classification {
        self.classify_parts(value.ty_id(), value.kind())
    }

    /// Computes the policy from a type's id and kind, without a value.
    pub fn classify_parts(&self, type_id: TypeId, kind: Kind) -> Classification {
        if self.is_ignored(type_id) {
            Classification::Ignored
        } else if self.is_immutable(type_id) || kind == Kind::Scalar {
            Classification::Immutable
        } else {
            Classification::Shape(kind)
        }
    }

    /// Creates a fresh instance of the type registered under `type_id`.
    ///
    /// This is the general construction path for plain aggregates; the
    /// `type_path` is only used to describe failures.
    pub fn create_instance(
        &self,
        type_id: TypeId,
        type_path: &'static str,
    ) -> Result<Box<dyn Reflect>, ConstructionError> {
        match self.record(type_id) {
            Some(record) => record.construct(),
            None => Err(ConstructionError::NotRegistered {
                type_path: type_path.into(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Classification, TypeRegistry};
    use crate::Absent;
    use crate::info::Kind;
    use std::any::TypeId;

    #[test]
    fn new_seeds_scalars() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<i32>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.record_by_path("f64").is_some());
    }

    #[test]
    fn empty_is_bare() {
        let registry = TypeRegistry::empty();
        assert!(!registry.contains(TypeId::of::<i32>()));
        assert!(registry.record_by_path("i32").is_none());
    }

    #[test]
    fn registration_is_idempotent() {
        let mut registry = TypeRegistry::new();
        registry.register::<Vec<i32>>();
        registry.register::<Vec<i32>>();
        assert!(registry.contains(TypeId::of::<Vec<i32>>()));
    }

    #[test]
    fn dependencies_are_registered() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<String>>();
        assert!(registry.contains(TypeId::of::<String>()));
    }

    #[test]
    fn default_policy_sets() {
        let registry = TypeRegistry::new();
        let absent = Absent;
        assert_eq!(registry.classify(&absent), Classification::Ignored);

        let metadata_handle = TypeId::of::<i32>();
        assert_eq!(registry.classify(&metadata_handle), Classification::Ignored);

        assert_eq!(registry.classify(&5_i32), Classification::Immutable);

        let list = vec![1_i32];
        assert_eq!(
            registry.classify(&list),
            Classification::Shape(Kind::List)
        );
    }

    #[test]
    fn scalars_construct_to_defaults() {
        let registry = TypeRegistry::new();
        let record = registry.record_by_path("bool").unwrap();
        assert!(!record.construct().unwrap().take::<bool>().unwrap());
    }
}
