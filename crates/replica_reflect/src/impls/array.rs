use std::fmt;

use crate::Reflect;
use crate::error::ConstructionError;
use crate::impls::{clone_item, impl_reflect_common};
use crate::info::{ArrayInfo, GenericTypeInfoCell, GenericTypePathCell, TypeInfo, TypePath, Typed};
use crate::ops::Array;
use crate::reflection::FromValue;
use crate::registry::{GetTypeRecord, TypeRecord, TypeRegistry};

impl<T: Reflect + Typed + FromValue, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| format!("[{}; {}]", T::type_path(), N))
            .as_str()
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| format!("[{}; {}]", T::type_name(), N))
            .as_str()
    }
}

impl<T: Reflect + Typed + FromValue, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self, _>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(N)))
    }
}

impl<T: Reflect + Typed + FromValue, const N: usize> Reflect for [T; N] {
    impl_reflect_common!(Array);

    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        let mut items = Vec::with_capacity(N);
        for item in self {
            items.push(clone_item(item)?);
        }
        match <[T; N]>::try_from(items) {
            Ok(array) => Ok(Box::new(array)),
            Err(_) => unreachable!("item count preserved"),
        }
    }

    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|item| item as &dyn Reflect))
            .finish()
    }
}

impl<T: Reflect + Typed + FromValue, const N: usize> Array for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn item_at(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|item| item as &dyn Reflect)
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.iter().map(|item| item as &dyn Reflect))
    }

    fn from_items(
        &self,
        items: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, ConstructionError> {
        assemble_array::<T, N>(items)
    }
}

impl<T: Reflect + Typed + FromValue, const N: usize> FromValue for [T; N] {
    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        value.take::<Self>()
    }
}

impl<T: GetTypeRecord + FromValue, const N: usize> GetTypeRecord for [T; N] {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>().with_assemble(assemble_array::<T, N>)
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// Rebuilds `[T; N]` from one boxed value per slot. Shared by the instance
// factory record and the `Array` op.
fn assemble_array<T: Reflect + Typed + FromValue, const N: usize>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, ConstructionError> {
    if items.len() != N {
        return Err(ConstructionError::LengthMismatch {
            type_path: <[T; N]>::type_path().into(),
            expected: N,
            found: items.len(),
        });
    }

    let mut typed = Vec::with_capacity(N);
    for (index, item) in items.into_iter().enumerate() {
        match T::from_boxed(item) {
            Ok(value) => typed.push(value),
            Err(item) => {
                return Err(ConstructionError::ItemMismatch {
                    type_path: <[T; N]>::type_path().into(),
                    index,
                    expected: T::type_path().into(),
                    found: item.reflect_type_path().into(),
                });
            }
        }
    }

    match <[T; N]>::try_from(typed) {
        Ok(array) => Ok(Box::new(array)),
        Err(_) => unreachable!("item count checked"),
    }
}
