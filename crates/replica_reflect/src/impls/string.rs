use std::borrow::Cow;
use std::fmt;

use crate::Reflect;
use crate::error::ConstructionError;
use crate::impls::impl_reflect_common;
use crate::info::{NonGenericTypeInfoCell, ScalarInfo, TypeInfo, TypePath, Typed};
use crate::reflection::FromValue;
use crate::registry::{GetTypeRecord, TypeRecord};

// -----------------------------------------------------------------------------
// String

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::string::String"
    }

    #[inline]
    fn type_name() -> &'static str {
        "String"
    }
}

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
    }
}

impl Reflect for String {
    impl_reflect_common!(Scalar);

    #[inline]
    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        Ok(Box::new(self.clone()))
    }

    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromValue for String {
    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        value.take::<Self>()
    }
}

impl GetTypeRecord for String {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>().with_default::<Self>()
    }
}

// -----------------------------------------------------------------------------
// Cow<'static, str>

impl TypePath for Cow<'static, str> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::borrow::Cow<str>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Cow<str>"
    }
}

impl Typed for Cow<'static, str> {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
    }
}

impl Reflect for Cow<'static, str> {
    impl_reflect_common!(Scalar);

    #[inline]
    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        Ok(Box::new(self.clone()))
    }

    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromValue for Cow<'static, str> {
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        let value = match value.downcast::<Self>() {
            Ok(cow) => return Ok(*cow),
            Err(value) => value,
        };
        // An owned string narrows into the borrowed-or-owned form.
        value.take::<String>().map(Cow::Owned)
    }
}

impl GetTypeRecord for Cow<'static, str> {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>().with_default::<Self>()
    }
}
