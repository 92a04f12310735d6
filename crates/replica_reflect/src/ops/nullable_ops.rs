use crate::Reflect;
use crate::error::FieldAccessError;

// -----------------------------------------------------------------------------
// Nullable

/// Access for values that may be absent (`Option<T>`).
///
/// The engine and the codec treat nullability as a property of the value
/// slot, not of the payload: a present nullable is traversed through its
/// inner value, an absent one short-circuits.
pub trait Nullable: Reflect {
    /// The wrapped value, if present.
    fn inner(&self) -> Option<&dyn Reflect>;

    /// The mutable wrapped value, if present.
    fn inner_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Whether no value is present.
    #[inline]
    fn is_absent(&self) -> bool {
        self.inner().is_none()
    }

    /// Stores `value`, converting it into the wrapped type.
    ///
    /// Fails with [`FieldAccessError::TypeMismatch`] when the value cannot
    /// be converted; the slot is left unchanged in that case.
    fn set_inner(&mut self, value: Box<dyn Reflect>) -> Result<(), FieldAccessError>;

    /// Clears the slot.
    fn clear(&mut self);

    /// Creates an absent slot of the same concrete type.
    fn new_vacant(&self) -> Box<dyn Nullable>;
}
