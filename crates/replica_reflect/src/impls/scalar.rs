use std::fmt;

use crate::Reflect;
use crate::error::ConstructionError;
use crate::impls::impl_reflect_common;
use crate::info::{NonGenericTypeInfoCell, ScalarInfo, TypeInfo, TypePath, Typed};
use crate::reflection::FromValue;
use crate::registry::{GetTypeRecord, TypeRecord};

// Primitive scalars use their bare name as path and wire tag, the way
// decoders special-case them.
macro_rules! impl_scalar_reflect {
    ($($ty:ty => $path:literal),* $(,)?) => {
        $(
            impl TypePath for $ty {
                #[inline]
                fn type_path() -> &'static str {
                    $path
                }

                #[inline]
                fn type_name() -> &'static str {
                    $path
                }
            }

            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<$ty>()))
                }
            }

            impl Reflect for $ty {
                impl_reflect_common!(Scalar);

                #[inline]
                fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
                    Ok(Box::new(*self))
                }

                fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(self, f)
                }
            }

            impl FromValue for $ty {
                #[inline]
                fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
                    value.take::<Self>()
                }
            }

            impl GetTypeRecord for $ty {
                fn get_type_record() -> TypeRecord {
                    TypeRecord::of::<$ty>().with_default::<$ty>()
                }
            }
        )*
    };
}

impl_scalar_reflect! {
    bool => "bool",
    char => "char",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    f32 => "f32",
    f64 => "f64",
}
