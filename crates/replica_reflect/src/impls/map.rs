use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use crate::Reflect;
use crate::error::{ConstructionError, FieldAccessError};
use crate::impls::{clone_item, impl_reflect_common};
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::reflection::FromValue;
use crate::registry::{GetTypeRecord, TypeRecord, TypeRegistry};

macro_rules! impl_map_reflect {
    ($ty:ident, $prefix:literal, $($key_extra:path),+) => {
        impl<K, V> TypePath for $ty<K, V>
        where
            K: Reflect + Typed + FromValue $(+ $key_extra)+,
            V: Reflect + Typed + FromValue,
        {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self, _>(|| {
                    format!(concat!($prefix, "<{}, {}>"), K::type_path(), V::type_path())
                })
                .as_str()
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self, _>(|| {
                    format!(
                        concat!(stringify!($ty), "<{}, {}>"),
                        K::type_name(),
                        V::type_name()
                    )
                })
                .as_str()
            }
        }

        impl<K, V> Typed for $ty<K, V>
        where
            K: Reflect + Typed + FromValue $(+ $key_extra)+,
            V: Reflect + Typed + FromValue,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self, _>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<K, V> Reflect for $ty<K, V>
        where
            K: Reflect + Typed + FromValue $(+ $key_extra)+,
            V: Reflect + Typed + FromValue,
        {
            impl_reflect_common!(Map);

            fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
                let mut entries = $ty::new();
                for (key, value) in self {
                    entries.insert(clone_item(key)?, clone_item(value)?);
                }
                Ok(Box::new(entries))
            }

            fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(
                        self.iter()
                            .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                    )
                    .finish()
            }
        }

        impl<K, V> Map for $ty<K, V>
        where
            K: Reflect + Typed + FromValue $(+ $key_extra)+,
            V: Reflect + Typed + FromValue,
        {
            #[inline]
            fn len(&self) -> usize {
                self.len()
            }

            fn iter_entries(
                &self,
            ) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    self.iter()
                        .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                )
            }

            fn get_entry(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                let key = key.downcast_ref::<K>()?;
                self.get(key).map(|value| value as &dyn Reflect)
            }

            fn insert_boxed(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), FieldAccessError> {
                let key = match K::from_boxed(key) {
                    Ok(key) => key,
                    Err(key) => {
                        return Err(FieldAccessError::type_mismatch(
                            self.reflect_type_path(),
                            "[key]",
                            K::type_path(),
                            key.reflect_type_path(),
                        ));
                    }
                };
                let value = match V::from_boxed(value) {
                    Ok(value) => value,
                    Err(value) => {
                        return Err(FieldAccessError::type_mismatch(
                            self.reflect_type_path(),
                            "[value]",
                            V::type_path(),
                            value.reflect_type_path(),
                        ));
                    }
                };
                self.insert(key, value);
                Ok(())
            }

            fn new_vacant(&self) -> Box<dyn Map> {
                Box::new($ty::<K, V>::new())
            }
        }

        impl<K, V> FromValue for $ty<K, V>
        where
            K: Reflect + Typed + FromValue $(+ $key_extra)+,
            V: Reflect + Typed + FromValue,
        {
            #[inline]
            fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
                value.take::<Self>()
            }
        }

        impl<K, V> GetTypeRecord for $ty<K, V>
        where
            K: GetTypeRecord + FromValue $(+ $key_extra)+,
            V: GetTypeRecord + FromValue,
        {
            fn get_type_record() -> TypeRecord {
                TypeRecord::of::<Self>().with_default::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_map_reflect!(HashMap, "std::collections::HashMap", Eq, Hash);
impl_map_reflect!(BTreeMap, "alloc::collections::BTreeMap", Ord);
