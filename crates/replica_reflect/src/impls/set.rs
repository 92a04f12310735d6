use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::Reflect;
use crate::error::{ConstructionError, FieldAccessError};
use crate::impls::{clone_item, impl_reflect_common};
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::List;
use crate::reflection::FromValue;
use crate::registry::{GetTypeRecord, TypeRecord, TypeRegistry};

// Sets are list-shaped for traversal: items are visited in iteration order
// and re-inserted one by one.
macro_rules! impl_set_reflect {
    ($ty:ident, $prefix:literal, $($extra:path),+) => {
        impl<T> TypePath for $ty<T>
        where
            T: Reflect + Typed + FromValue $(+ $extra)+,
        {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self, _>(|| {
                    format!(concat!($prefix, "<{}>"), T::type_path())
                })
                .as_str()
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self, _>(|| {
                    format!(concat!(stringify!($ty), "<{}>"), T::type_name())
                })
                .as_str()
            }
        }

        impl<T> Typed for $ty<T>
        where
            T: Reflect + Typed + FromValue $(+ $extra)+,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self, _>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
            }
        }

        impl<T> Reflect for $ty<T>
        where
            T: Reflect + Typed + FromValue $(+ $extra)+,
        {
            impl_reflect_common!(List);

            fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
                let mut items = $ty::new();
                for item in self {
                    items.insert(clone_item(item)?);
                }
                Ok(Box::new(items))
            }

            fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set()
                    .entries(self.iter().map(|item| item as &dyn Reflect))
                    .finish()
            }
        }

        impl<T> List for $ty<T>
        where
            T: Reflect + Typed + FromValue $(+ $extra)+,
        {
            #[inline]
            fn len(&self) -> usize {
                self.len()
            }

            fn item_at(&self, index: usize) -> Option<&dyn Reflect> {
                self.iter().nth(index).map(|item| item as &dyn Reflect)
            }

            fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(self.iter().map(|item| item as &dyn Reflect))
            }

            fn push_boxed(&mut self, value: Box<dyn Reflect>) -> Result<(), FieldAccessError> {
                match T::from_boxed(value) {
                    Ok(item) => {
                        self.insert(item);
                        Ok(())
                    }
                    Err(value) => Err(FieldAccessError::element_mismatch(
                        self.reflect_type_path(),
                        self.len(),
                        T::type_path(),
                        value.reflect_type_path(),
                    )),
                }
            }

            fn new_vacant(&self) -> Box<dyn List> {
                Box::new($ty::<T>::new())
            }
        }

        impl<T> FromValue for $ty<T>
        where
            T: Reflect + Typed + FromValue $(+ $extra)+,
        {
            #[inline]
            fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
                value.take::<Self>()
            }
        }

        impl<T> GetTypeRecord for $ty<T>
        where
            T: GetTypeRecord + FromValue $(+ $extra)+,
        {
            fn get_type_record() -> TypeRecord {
                TypeRecord::of::<Self>().with_default::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_set_reflect!(HashSet, "std::collections::HashSet", Eq, Hash);
impl_set_reflect!(BTreeSet, "alloc::collections::BTreeSet", Ord);
