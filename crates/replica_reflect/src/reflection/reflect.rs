use std::any::{Any, TypeId};
use std::fmt;

use crate::error::ConstructionError;
use crate::info::{Kind, TypeInfo};
use crate::ops::{ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime value traversal.
///
/// `Reflect` is the introspection capability the deep-copy engine and the
/// wire codec are written against: it exposes a value's identity (type path
/// and [`TypeInfo`]), its structural [`Kind`], and the kind-specific access
/// interface through [`view`] / [`view_mut`].
///
/// User aggregates obtain an implementation through
/// [`#[derive(Reflect)]`](crate::derive::Reflect); scalars and the std
/// containers are implemented in [`crate::impls`].
///
/// # Type Identification
///
/// `Reflect` supports [`Any`], but note that [`Any::type_id`] called on a
/// `Box<dyn Reflect>` reports the box, not the payload. Use
/// [`Reflect::ty_id`] instead:
///
/// ```
/// use std::any::{Any, TypeId};
/// use replica_reflect::Reflect;
///
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!(x.type_id() != TypeId::of::<i32>()); // the box
/// assert!(x.ty_id() == TypeId::of::<i32>());   // the payload
/// ```
///
/// # Downcasting
///
/// Concrete values are recovered with `downcast_ref`, `downcast_mut`,
/// `downcast` and `take`:
///
/// ```
/// use replica_reflect::Reflect;
///
/// let x: Box<dyn Reflect> = Box::new(10_i32);
/// assert_eq!(x.take::<i32>().unwrap(), 10);
/// ```
///
/// [`view`]: Reflect::view
/// [`view_mut`]: Reflect::view_mut
/// [`Any`]: std::any::Any
pub trait Reflect: Any + Send + Sync {
    /// The stable, fully-qualified path of the underlying type.
    ///
    /// This is the tag the wire codec writes for values of this type.
    fn reflect_type_path(&self) -> &'static str;

    /// The interned [`TypeInfo`] of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// The [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// The structural [`Kind`] of the underlying type.
    fn kind(&self) -> Kind;

    /// Casts this value to its kind-specific immutable interface.
    fn view(&self) -> ValueRef<'_>;

    /// Casts this value to its kind-specific mutable interface.
    fn view_mut(&mut self) -> ValueMut<'_>;

    /// Clones this value directly, without engine traversal.
    ///
    /// This is the shortcut taken for immutable and ignored types and for
    /// bulk duplication of containers with immutable items. Handle-shaped
    /// types (`Arc<T>`) clone the handle, preserving pointer identity with
    /// the original — the reflected rendition of "returned by reference".
    ///
    /// Derived aggregates only support this when marked
    /// `#[reflect(clone)]`; otherwise it fails with
    /// [`ConstructionError::CloneUnsupported`].
    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError>;

    /// Formats the value for diagnostics.
    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reflect_type_path())
    }

    /// Casts this type to a fully-reflected value.
    #[inline]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-reflected value.
    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Moves this value into a boxed, fully-reflected value.
    #[inline]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use replica_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = Box::new(10_i32);
    /// assert!(x.is::<i32>());
    /// ```
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            // the type id was checked just above
            match any.downcast::<T>() {
                Ok(value) => Ok(value),
                Err(_) => unreachable!("type id already checked"),
            }
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing it.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Example
    ///
    /// ```
    /// use replica_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = Box::new(String::from("hi"));
    /// assert_eq!(x.take::<String>().unwrap(), "hi");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|boxed| *boxed)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug_fmt(f)
    }
}
