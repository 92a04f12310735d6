use std::fmt;

use crate::error::{ConstructionError, FieldAccessError};
use crate::impls::{clone_item, impl_reflect_common};
use crate::info::{
    GenericTypeInfoCell, GenericTypePathCell, NullableInfo, TypeInfo, TypePath, Typed,
};
use crate::ops::Nullable;
use crate::reflection::{Absent, FromValue, Reflect};
use crate::registry::{GetTypeRecord, TypeRecord, TypeRegistry};

impl<T: Reflect + Typed + FromValue> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| format!("core::option::Option<{}>", T::type_path()))
            .as_str()
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| format!("Option<{}>", T::type_name()))
            .as_str()
    }
}

impl<T: Reflect + Typed + FromValue> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self, _>(|| TypeInfo::Nullable(NullableInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + FromValue> Reflect for Option<T> {
    impl_reflect_common!(Nullable);

    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        match self {
            None => Ok(Box::new(None::<T>)),
            Some(inner) => Ok(Box::new(Some(clone_item(inner)?))),
        }
    }

    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            None => f.pad("None"),
            Some(inner) => write!(f, "Some({:?})", inner as &dyn Reflect),
        }
    }
}

impl<T: Reflect + Typed + FromValue> Nullable for Option<T> {
    #[inline]
    fn inner(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|inner| inner as &dyn Reflect)
    }

    #[inline]
    fn inner_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|inner| inner as &mut dyn Reflect)
    }

    fn set_inner(&mut self, value: Box<dyn Reflect>) -> Result<(), FieldAccessError> {
        match T::from_boxed(value) {
            Ok(inner) => {
                *self = Some(inner);
                Ok(())
            }
            Err(value) => Err(FieldAccessError::type_mismatch(
                self.reflect_type_path(),
                "[inner]",
                T::type_path(),
                value.reflect_type_path(),
            )),
        }
    }

    #[inline]
    fn clear(&mut self) {
        *self = None;
    }

    fn new_vacant(&self) -> Box<dyn Nullable> {
        Box::new(None::<T>)
    }
}

impl<T: Reflect + Typed + FromValue> FromValue for Option<T> {
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        let value = match value.downcast::<Self>() {
            Ok(option) => return Ok(*option),
            Err(value) => value,
        };
        if value.is::<Absent>() {
            return Ok(None);
        }
        // A bare inner value widens into the nullable slot.
        T::from_boxed(value).map(Some)
    }
}

impl<T: GetTypeRecord + FromValue> GetTypeRecord for Option<T> {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>().with_default::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}
