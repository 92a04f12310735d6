use crate::Reflect;
use crate::error::FieldAccessError;

// -----------------------------------------------------------------------------
// List

/// Access for growable, list-shaped containers.
///
/// Covers `Vec<T>` and `VecDeque<T>` as well as the set types, which are
/// list-shaped for traversal purposes: their items are visited in iteration
/// order and re-inserted one by one.
///
/// # Example
///
/// ```
/// use replica_reflect::Reflect;
/// use replica_reflect::ops::ValueRef;
///
/// let values = vec![String::from("a"), String::from("b")];
/// let ValueRef::List(list) = values.view() else { unreachable!() };
///
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.item_at(0).unwrap().downcast_ref::<String>().unwrap(), "a");
/// ```
pub trait List: Reflect {
    /// The number of items.
    fn len(&self) -> usize;

    /// Whether the list holds no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item at `index`, in iteration order.
    fn item_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Iterates the items in order.
    fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Appends `value`, converting it into the item type.
    ///
    /// Fails with [`FieldAccessError::TypeMismatch`] when the value cannot
    /// be converted; the list is left unchanged in that case.
    fn push_boxed(&mut self, value: Box<dyn Reflect>) -> Result<(), FieldAccessError>;

    /// Creates an empty container of the same concrete type.
    ///
    /// This is the no-argument builder the instance factory uses for
    /// well-known container shapes instead of general construction.
    fn new_vacant(&self) -> Box<dyn List>;
}
