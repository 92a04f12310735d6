use std::any::TypeId;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use replica_parcel::Bytes;
use replica_parcel::error::{DecodeError, EncodeError};
use replica_reflect::copy::deep_copy;
use replica_reflect::error::{ConstructionError, CopyError};
use replica_reflect::info::{Kind, NonGenericTypeInfoCell, ScalarInfo, TypeInfo, TypePath, Typed};
use replica_reflect::ops::{ValueMut, ValueRef};
use replica_reflect::registry::{GetTypeRecord, TypeRegistry};
use replica_reflect::{FromValue, Reflect};

// -----------------------------------------------------------------------------
// Replicator

/// The coordinator owning the process-wide reflection context.
///
/// A `Replicator` wraps a [`TypeRegistry`] behind a lock and exposes the
/// four public operations: [`copy`], [`serialize`], [`deserialize`] and
/// the registration calls. Reads of the registry (copying, decoding) run
/// concurrently; registration takes the write side.
///
/// Use [`Replicator::global`] for the shared process instance, or
/// [`Replicator::new`] for an isolated one — tests rely on isolation to
/// exercise registration policy without cross-talk.
///
/// Copying a `Replicator` itself is a programming error and fails with
/// [`CopyError::SelfCopy`], at any depth of the traversal.
///
/// # Example
///
/// ```
/// use replica_core::Replicator;
/// use replica_reflect::derive::Reflect;
///
/// #[derive(Reflect, Debug, Default, PartialEq)]
/// #[reflect(default)]
/// struct Config {
///     retries: i32,
///     label: String,
/// }
///
/// let kit = Replicator::new();
///
/// let original = Config { retries: 3, label: "primary".into() };
/// let copy = kit.copy(&original).unwrap();
/// assert_eq!(copy.take::<Config>().unwrap(), original);
///
/// let bytes = kit.serialize(&original).unwrap();
/// let restored = kit.deserialize(&bytes).unwrap();
/// assert_eq!(restored.take::<Config>().unwrap(), original);
/// ```
///
/// [`copy`]: Replicator::copy
/// [`serialize`]: Replicator::serialize
/// [`deserialize`]: Replicator::deserialize
pub struct Replicator {
    registry: RwLock<TypeRegistry>,
}

impl Replicator {
    /// Creates an isolated coordinator with the default registry.
    ///
    /// Seeds the default immutable/ignored sets, applies every collected
    /// auto-registration (with the `auto_register` feature), and bars its
    /// own type from being copied.
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();
        registry.set_coordinator(TypeId::of::<Replicator>());
        registry.register::<Replicator>();

        #[cfg(feature = "auto_register")]
        {
            let applied = replica_reflect::registry::apply_auto_registrations(&mut registry);
            tracing::debug!(types = applied, "applied auto registrations");
        }

        tracing::debug!("replicator initialized");
        Self {
            registry: RwLock::new(registry),
        }
    }

    /// The shared process-wide coordinator.
    ///
    /// The first caller initializes it; concurrent first calls observe
    /// exactly one initialization.
    pub fn global() -> &'static Replicator {
        static INSTANCE: OnceLock<Replicator> = OnceLock::new();
        INSTANCE.get_or_init(Replicator::new)
    }

    fn registry(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deep-copies `value`.
    ///
    /// The result shares no mutable substructure with `value`; immutable
    /// and ignored types come back as direct clones (pointer-shared for
    /// handle types).
    pub fn copy(&self, value: &dyn Reflect) -> Result<Box<dyn Reflect>, CopyError> {
        deep_copy(value, &self.registry())
    }

    /// Serializes `value` into self-describing bytes.
    pub fn serialize(&self, value: &dyn Reflect) -> Result<Bytes, EncodeError> {
        replica_parcel::encode(value)
    }

    /// Reconstructs a value from bytes produced by [`serialize`].
    ///
    /// Fails with [`DecodeError::TypeResolution`] when any embedded tag
    /// resolves to no registered type.
    ///
    /// [`serialize`]: Replicator::serialize
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Box<dyn Reflect>, DecodeError> {
        replica_parcel::decode(bytes, &self.registry())
    }

    /// Registers `T` (and its type dependencies) for decoding and
    /// construction.
    pub fn register<T: GetTypeRecord>(&self) {
        self.registry_mut().register::<T>();
    }

    /// Extends the ignored set with `T`: its values are excluded from
    /// copy and serialization and come back as direct clones.
    pub fn register_ignored<T: GetTypeRecord>(&self) {
        self.registry_mut().register_ignored::<T>();
    }

    /// Extends the immutable set with `T`: its values are never traversed.
    pub fn register_immutable<T: GetTypeRecord>(&self) {
        self.registry_mut().register_immutable::<T>();
    }

    /// Runs `f` with read access to the registry.
    pub fn with_registry<R>(&self, f: impl FnOnce(&TypeRegistry) -> R) -> R {
        f(&self.registry())
    }
}

impl Default for Replicator {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Reflect for Replicator
//
// The coordinator is reflected opaquely so the self-copy guard can fire on
// it wherever it shows up in a graph. It supports no clone and no wire
// form.

impl TypePath for Replicator {
    #[inline]
    fn type_path() -> &'static str {
        "replica_core::Replicator"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Replicator"
    }
}

impl Typed for Replicator {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
    }
}

impl Reflect for Replicator {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    #[inline]
    fn view(&self) -> ValueRef<'_> {
        ValueRef::Scalar(self)
    }

    #[inline]
    fn view_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Scalar(self)
    }

    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        Err(ConstructionError::CloneUnsupported {
            type_path: Self::type_path().into(),
        })
    }

    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("Replicator")
    }
}

impl FromValue for Replicator {
    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        value.take::<Self>()
    }
}

impl GetTypeRecord for Replicator {
    fn get_type_record() -> replica_reflect::registry::TypeRecord {
        replica_reflect::registry::TypeRecord::of::<Self>()
    }
}
