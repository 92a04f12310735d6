use crate::Reflect;
use crate::error::ConstructionError;

// -----------------------------------------------------------------------------
// Array

/// Access for fixed-length arrays (`[T; N]`).
///
/// Arrays cannot be built empty and filled later, so duplication goes
/// through [`from_items`]: collect one boxed value per slot, then rebuild a
/// same-type array in a single step.
///
/// [`from_items`]: Array::from_items
pub trait Array: Reflect {
    /// The fixed length of the array.
    fn len(&self) -> usize;

    /// Whether the array has length zero.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item at `index`.
    fn item_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Iterates the items in order.
    fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Builds a new array of the same concrete type from exactly
    /// [`len`](Array::len) items.
    ///
    /// Fails with [`ConstructionError::LengthMismatch`] on a wrong item
    /// count and [`ConstructionError::ItemMismatch`] when an item cannot be
    /// converted into the component type.
    fn from_items(&self, items: Vec<Box<dyn Reflect>>)
    -> Result<Box<dyn Reflect>, ConstructionError>;
}
