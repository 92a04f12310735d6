use std::fmt;

use crate::error::ConstructionError;
use crate::info::{NonGenericTypeInfoCell, ScalarInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ValueMut, ValueRef};
use crate::reflection::{FromValue, Reflect};
use crate::registry::{GetTypeRecord, TypeRecord};

// -----------------------------------------------------------------------------
// Absent

/// The "no value" placeholder.
///
/// `Absent` stands in wherever a value slot holds nothing: it is what an
/// absent wire value decodes to, and its type path is the reserved sentinel
/// tag written for `None`. It belongs to the default ignored set, so the
/// copy engine never traverses it.
///
/// # Example
///
/// ```
/// use replica_reflect::{Absent, FromValue, Reflect};
///
/// let nothing: Box<dyn Reflect> = Box::new(Absent);
/// assert_eq!(<Option<i32>>::from_boxed(nothing).unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Absent;

impl Absent {
    /// The reserved wire tag standing for "no value".
    #[inline]
    pub fn reserved_tag() -> &'static str {
        Self::type_path()
    }
}

// Written out by hand rather than derived; the derive would route back
// through this module for nullable handling.
impl TypePath for Absent {
    #[inline]
    fn type_path() -> &'static str {
        "replica_reflect::Absent"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Absent"
    }
}

impl Typed for Absent {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
    }
}

impl Reflect for Absent {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }

    #[inline]
    fn kind(&self) -> crate::info::Kind {
        crate::info::Kind::Scalar
    }

    #[inline]
    fn view(&self) -> ValueRef<'_> {
        ValueRef::Scalar(self)
    }

    #[inline]
    fn view_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Scalar(self)
    }

    #[inline]
    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        Ok(Box::new(Self))
    }

    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromValue for Absent {
    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        value.take::<Self>()
    }
}

impl GetTypeRecord for Absent {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>().with_default::<Self>()
    }
}
