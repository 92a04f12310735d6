use crate::Reflect;
use crate::error::ConstructionError;
use crate::info::{TypeInfo, Typed};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// TypeRecord

/// The registry entry for one reflected type.
///
/// A record couples the type's interned [`TypeInfo`] with its construction
/// plan: an optional hook producing a fresh, default-initialized instance,
/// and for fixed arrays an assembly hook that rebuilds the array from
/// decoded items. Hooks are plain function pointers chosen once at
/// registration; invoking them runs no caller-visible side effects beyond
/// field defaulting.
pub struct TypeRecord {
    info: &'static TypeInfo,
    construct: Option<fn() -> Box<dyn Reflect>>,
    assemble: Option<fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructionError>>,
}

impl TypeRecord {
    /// Creates a record for `T` with no construction plan.
    pub fn of<T: Typed>() -> Self {
        Self {
            info: T::type_info(),
            construct: None,
            assemble: None,
        }
    }

    /// Attaches a construction hook built from `T`'s [`Default`].
    pub fn with_default<T: Reflect + Typed + Default>(mut self) -> Self {
        self.construct = Some(construct_default::<T>);
        self
    }

    /// Attaches an assembly hook for rebuilding from decoded items.
    pub fn with_assemble(
        mut self,
        assemble: fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructionError>,
    ) -> Self {
        self.assemble = Some(assemble);
        self
    }

    /// The interned info of the recorded type.
    #[inline]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// The [`TypeId`](std::any::TypeId) of the recorded type.
    #[inline]
    pub fn type_id(&self) -> std::any::TypeId {
        self.info.id()
    }

    /// The stable path of the recorded type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.info.path()
    }

    /// Whether the record carries a construction hook.
    #[inline]
    pub fn has_constructor(&self) -> bool {
        self.construct.is_some()
    }

    /// Creates a fresh, default-initialized instance of the recorded type.
    ///
    /// Fails with [`ConstructionError::NoConstructor`] when the type never
    /// opted into construction.
    pub fn construct(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        match self.construct {
            Some(construct) => Ok(construct()),
            None => Err(ConstructionError::NoConstructor {
                type_path: self.type_path().into(),
            }),
        }
    }

    /// Rebuilds an instance from per-slot items (fixed arrays).
    pub fn assemble(
        &self,
        items: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ConstructionError> {
        match self.assemble {
            Some(assemble) => assemble(items),
            None => Err(ConstructionError::NoConstructor {
                type_path: self.type_path().into(),
            }),
        }
    }
}

fn construct_default<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

// -----------------------------------------------------------------------------
// GetTypeRecord

/// Produces the [`TypeRecord`] for a type and registers what it depends on.
///
/// Implemented by `#[derive(Reflect)]` and by the std impls. Registering a
/// type through [`TypeRegistry::register`] pulls in its field and element
/// types recursively via [`register_dependencies`], so registering the root
/// of an object graph is enough to resolve every type reachable from it.
///
/// [`TypeRegistry::register`]: crate::registry::TypeRegistry::register
/// [`register_dependencies`]: GetTypeRecord::register_dependencies
pub trait GetTypeRecord: Reflect + Typed {
    /// Builds the registry record for this type.
    fn get_type_record() -> TypeRecord;

    /// Registers the types this type's traversal reaches.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
