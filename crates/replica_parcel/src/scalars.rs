//! The fixed table of wire handlers for scalar types.
//!
//! Sub-word integers (and `char`) widen to one 32-bit slot; the 64-bit
//! family shares the 64-bit slot with its two's-complement bits preserved;
//! floats keep native width; text is length-prefixed UTF-8. Handlers are
//! looked up by `TypeId` when encoding and by type name when decoding —
//! scalar names are recognized without consulting a registry.

use std::any::TypeId;
use std::borrow::Cow;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use replica_reflect::Reflect;
use replica_reflect::info::TypePath;

use crate::error::{DecodeError, EncodeError};
use crate::parcel::Parcel;

// -----------------------------------------------------------------------------
// ScalarCodec

/// One scalar's wire handler: its tag plus paired write/read functions.
#[derive(Clone, Copy)]
pub(crate) struct ScalarCodec {
    pub name: &'static str,
    pub write: fn(&mut Parcel, &dyn Reflect) -> Result<(), EncodeError>,
    pub read: fn(&mut Parcel) -> Result<Box<dyn Reflect>, DecodeError>,
}

fn unsupported(value: &dyn Reflect) -> EncodeError {
    EncodeError::UnsupportedScalar {
        type_path: Cow::Borrowed(value.reflect_type_path()),
    }
}

macro_rules! int32_codec {
    ($ty:ty) => {
        ScalarCodec {
            name: <$ty as TypePath>::type_path(),
            write: |parcel, value| {
                let value = value.downcast_ref::<$ty>().ok_or_else(|| unsupported(value))?;
                parcel.write_i32(*value as i32);
                Ok(())
            },
            read: |parcel| Ok(Box::new(parcel.read_i32()? as $ty)),
        }
    };
}

macro_rules! int64_codec {
    ($ty:ty) => {
        ScalarCodec {
            name: <$ty as TypePath>::type_path(),
            write: |parcel, value| {
                let value = value.downcast_ref::<$ty>().ok_or_else(|| unsupported(value))?;
                parcel.write_i64(*value as i64);
                Ok(())
            },
            read: |parcel| Ok(Box::new(parcel.read_i64()? as $ty)),
        }
    };
}

fn all_codecs() -> Vec<(TypeId, ScalarCodec)> {
    vec![
        (
            TypeId::of::<bool>(),
            ScalarCodec {
                name: <bool as TypePath>::type_path(),
                write: |parcel, value| {
                    let value = value.downcast_ref::<bool>().ok_or_else(|| unsupported(value))?;
                    parcel.write_bool(*value);
                    Ok(())
                },
                read: |parcel| Ok(Box::new(parcel.read_bool()?)),
            },
        ),
        (
            TypeId::of::<char>(),
            ScalarCodec {
                name: <char as TypePath>::type_path(),
                write: |parcel, value| {
                    let value = value.downcast_ref::<char>().ok_or_else(|| unsupported(value))?;
                    parcel.write_i32(*value as u32 as i32);
                    Ok(())
                },
                read: |parcel| {
                    let raw = parcel.read_i32()? as u32;
                    match char::from_u32(raw) {
                        Some(value) => Ok(Box::new(value)),
                        None => Err(DecodeError::InvalidScalar { type_path: "char" }),
                    }
                },
            },
        ),
        (TypeId::of::<u8>(), int32_codec!(u8)),
        (TypeId::of::<i8>(), int32_codec!(i8)),
        (TypeId::of::<u16>(), int32_codec!(u16)),
        (TypeId::of::<i16>(), int32_codec!(i16)),
        (TypeId::of::<u32>(), int32_codec!(u32)),
        (TypeId::of::<i32>(), int32_codec!(i32)),
        (TypeId::of::<u64>(), int64_codec!(u64)),
        (TypeId::of::<i64>(), int64_codec!(i64)),
        (TypeId::of::<usize>(), int64_codec!(usize)),
        (TypeId::of::<isize>(), int64_codec!(isize)),
        (
            TypeId::of::<f32>(),
            ScalarCodec {
                name: <f32 as TypePath>::type_path(),
                write: |parcel, value| {
                    let value = value.downcast_ref::<f32>().ok_or_else(|| unsupported(value))?;
                    parcel.write_f32(*value);
                    Ok(())
                },
                read: |parcel| Ok(Box::new(parcel.read_f32()?)),
            },
        ),
        (
            TypeId::of::<f64>(),
            ScalarCodec {
                name: <f64 as TypePath>::type_path(),
                write: |parcel, value| {
                    let value = value.downcast_ref::<f64>().ok_or_else(|| unsupported(value))?;
                    parcel.write_f64(*value);
                    Ok(())
                },
                read: |parcel| Ok(Box::new(parcel.read_f64()?)),
            },
        ),
        (
            TypeId::of::<String>(),
            ScalarCodec {
                name: <String as TypePath>::type_path(),
                write: |parcel, value| {
                    let value = value.downcast_ref::<String>().ok_or_else(|| unsupported(value))?;
                    parcel.write_string(value)?;
                    Ok(())
                },
                read: |parcel| Ok(Box::new(parcel.read_string()?)),
            },
        ),
        (
            TypeId::of::<Cow<'static, str>>(),
            ScalarCodec {
                name: <Cow<'static, str> as TypePath>::type_path(),
                write: |parcel, value| {
                    let value = value
                        .downcast_ref::<Cow<'static, str>>()
                        .ok_or_else(|| unsupported(value))?;
                    parcel.write_string(value)?;
                    Ok(())
                },
                read: |parcel| {
                    let owned: Cow<'static, str> = Cow::Owned(parcel.read_string()?);
                    Ok(Box::new(owned))
                },
            },
        ),
    ]
}

static BY_ID: LazyLock<FxHashMap<TypeId, ScalarCodec>> =
    LazyLock::new(|| all_codecs().into_iter().collect());

static BY_NAME: LazyLock<FxHashMap<&'static str, ScalarCodec>> = LazyLock::new(|| {
    all_codecs()
        .into_iter()
        .map(|(_, codec)| (codec.name, codec))
        .collect()
});

/// The handler for a scalar value's concrete type, if any.
pub(crate) fn by_type_id(type_id: TypeId) -> Option<ScalarCodec> {
    BY_ID.get(&type_id).copied()
}

/// The handler registered under a wire tag, if any.
pub(crate) fn by_name(name: &str) -> Option<ScalarCodec> {
    BY_NAME.get(name).copied()
}
