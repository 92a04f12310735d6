//! Containers for static storage of type information.
//!
//! Non-generic types store their [`TypeInfo`] in a [`NonGenericTypeInfoCell`],
//! which is a thin wrapper over [`OnceLock`]. There is no non-generic path
//! cell because a static string literal already does the job.
//!
//! For generic types the `static CELL` inside a trait method is shared by
//! every instantiation of the generic, so the cell holds a [`TypeId`]-keyed
//! table behind an [`RwLock`]. Entries are leaked to obtain the `'static`
//! lifetime and are never evicted.

use std::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Static storage for the [`TypeInfo`] of one non-generic type.
///
/// # Example
///
/// ```ignore
/// impl Typed for Foo {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Plain(AggregateInfo::new::<Foo>(vec![])))
///     }
/// }
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, computing it from `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage for per-instantiation data of a generic type.
///
/// One `static CELL` declared inside a generic trait method is shared by all
/// instantiations, so the cell keys its entries by the concrete [`TypeId`].
/// Entries are computed lazily; a lost race computes the value twice but
/// only the first insertion survives and is handed out from then on.
pub struct GenericTypeCell<T: 'static>(OnceLock<RwLock<FxHashMap<TypeId, &'static T>>>);

/// Static storage for the [`TypeInfo`] values of a generic type.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Static storage for the rendered type paths of a generic type.
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: 'static> GenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    fn table(&self) -> &RwLock<FxHashMap<TypeId, &'static T>> {
        self.0.get_or_init(|| RwLock::new(FxHashMap::default()))
    }

    /// Returns the entry for `G`, computing it from `f` on first access.
    pub fn get_or_insert<G, F>(&self, f: F) -> &'static T
    where
        G: 'static,
        F: FnOnce() -> T,
    {
        let key = TypeId::of::<G>();
        {
            let table = self.table().read().unwrap_or_else(PoisonError::into_inner);
            if let Some(value) = table.get(&key) {
                return value;
            }
        }

        let mut table = self.table().write().unwrap_or_else(PoisonError::into_inner);
        *table.entry(key).or_insert_with(|| Box::leak(Box::new(f())))
    }
}

impl<T: 'static> Default for GenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::GenericTypePathCell;

    #[test]
    fn generic_cell_interns_per_type() {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();

        let first = CELL.get_or_insert::<u8, _>(|| String::from("a"));
        let again = CELL.get_or_insert::<u8, _>(|| String::from("b"));
        let other = CELL.get_or_insert::<u16, _>(|| String::from("c"));

        assert_eq!(again, "a");
        assert!(std::ptr::eq(first, again));
        assert_eq!(other, "c");
    }
}
