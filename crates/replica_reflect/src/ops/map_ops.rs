use crate::Reflect;
use crate::error::FieldAccessError;

// -----------------------------------------------------------------------------
// Map

/// Access for map-shaped containers (`HashMap<K, V>`, `BTreeMap<K, V>`).
///
/// Entries are visited in the container's own iteration order; hash maps
/// therefore yield an unspecified but round-trip-safe order.
pub trait Map: Reflect {
    /// The number of entries.
    fn len(&self) -> usize;

    /// Whether the map holds no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates `(key, value)` entries.
    fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Looks up the value stored under `key`, which must be of the map's
    /// key type.
    fn get_entry(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Inserts an entry, converting key and value into the map's types.
    ///
    /// Fails with [`FieldAccessError::TypeMismatch`] when either side
    /// cannot be converted; the map is left unchanged in that case.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), FieldAccessError>;

    /// Creates an empty container of the same concrete type.
    fn new_vacant(&self) -> Box<dyn Map>;
}
