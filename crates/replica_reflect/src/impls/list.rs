use std::collections::VecDeque;
use std::fmt;

use crate::Reflect;
use crate::error::{ConstructionError, FieldAccessError};
use crate::impls::{clone_item, impl_reflect_common};
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::List;
use crate::reflection::FromValue;
use crate::registry::{GetTypeRecord, TypeRecord, TypeRegistry};

// Vec and VecDeque share everything except the push method and the path
// prefix.
macro_rules! impl_list_reflect {
    ($ty:ident, $prefix:literal, $push:ident) => {
        impl<T: Reflect + Typed + FromValue> TypePath for $ty<T> {
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

        impl<T: Reflect + Typed + FromValue> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self, _>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
            }
        }

        impl<T: Reflect + Typed + FromValue> Reflect for $ty<T> {
            impl_reflect_common!(List);

            fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
                let mut items = $ty::with_capacity(self.len());
                for item in self {
                    items.$push(clone_item(item)?);
                }
                Ok(Box::new(items))
            }

            fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list()
                    .entries(self.iter().map(|item| item as &dyn Reflect))
                    .finish()
            }
        }

        impl<T: Reflect + Typed + FromValue> List for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                self.len()
            }

            #[inline]
            fn item_at(&self, index: usize) -> Option<&dyn Reflect> {
                self.get(index).map(|item| item as &dyn Reflect)
            }

            fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(self.iter().map(|item| item as &dyn Reflect))
            }

            fn push_boxed(&mut self, value: Box<dyn Reflect>) -> Result<(), FieldAccessError> {
                match T::from_boxed(value) {
                    Ok(item) => {
                        self.$push(item);
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

        impl<T: Reflect + Typed + FromValue> FromValue for $ty<T> {
            #[inline]
            fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
                value.take::<Self>()
            }
        }

        impl<T: GetTypeRecord + FromValue> GetTypeRecord for $ty<T> {
            fn get_type_record() -> TypeRecord {
                TypeRecord::of::<Self>().with_default::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_list_reflect!(Vec, "alloc::vec::Vec", push);
impl_list_reflect!(VecDeque, "alloc::collections::VecDeque", push_back);
