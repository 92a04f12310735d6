//! The type-tagged wire codec.
//!
//! Every value is written depth-first as a `(tag, presence, payload)`
//! triple: the tag is the value's type path, the presence flag is one
//! 32-bit word (0 terminates the value), and the payload depends on the
//! concrete shape. Decoding resolves the tag — scalar names first, then
//! the registry index — and dispatches on the *target* type's kind rather
//! than re-deriving it from the wire.

use replica_reflect::info::TypeInfo;
use replica_reflect::ops::{ValueMut, ValueRef};
use replica_reflect::registry::TypeRegistry;
use replica_reflect::{Absent, Reflect};

use bytes::Bytes;

use crate::error::{DecodeError, EncodeError, ParcelError};
use crate::parcel::Parcel;
use crate::scalars;

// -----------------------------------------------------------------------------
// encode

/// Serializes `value` into a self-describing byte sequence.
///
/// Encoding dispatches on the concrete value alone; no registry is needed
/// until the bytes are decoded again.
///
/// # Example
///
/// ```
/// use replica_parcel::{decode, encode};
/// use replica_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// let bytes = encode(&42_i32).unwrap();
///
/// let back = decode(&bytes, &registry).unwrap();
/// assert_eq!(back.take::<i32>().unwrap(), 42);
/// ```
pub fn encode(value: &dyn Reflect) -> Result<Bytes, EncodeError> {
    tracing::trace!(type_path = value.reflect_type_path(), "encode");
    let mut parcel = Parcel::new();
    write_value(&mut parcel, value)?;
    Ok(parcel.marshall())
}

fn write_absent(parcel: &mut Parcel) -> Result<(), EncodeError> {
    parcel.write_string(Absent::reserved_tag())?;
    parcel.write_i32(0);
    Ok(())
}

fn write_count(parcel: &mut Parcel, len: usize) -> Result<(), EncodeError> {
    let count = i32::try_from(len).map_err(|_| ParcelError::Oversized { len })?;
    parcel.write_i32(count);
    Ok(())
}

fn write_value(parcel: &mut Parcel, value: &dyn Reflect) -> Result<(), EncodeError> {
    if value.is::<Absent>() {
        return write_absent(parcel);
    }

    match value.view() {
        // A nullable slot is transparent on the wire: its payload carries
        // the tag, its absence carries the sentinel.
        ValueRef::Nullable(nullable) => match nullable.inner() {
            Some(inner) => write_value(parcel, inner),
            None => write_absent(parcel),
        },
        ValueRef::Scalar(scalar) => {
            let codec = scalars::by_type_id(scalar.ty_id()).ok_or_else(|| {
                EncodeError::UnsupportedScalar {
                    type_path: scalar.reflect_type_path().into(),
                }
            })?;
            parcel.write_string(scalar.reflect_type_path())?;
            parcel.write_i32(1);
            (codec.write)(parcel, scalar)
        }
        ValueRef::Array(array) => {
            parcel.write_string(array.reflect_type_path())?;
            parcel.write_i32(1);
            write_count(parcel, array.len())?;
            for item in array.iter_items() {
                write_value(parcel, item)?;
            }
            Ok(())
        }
        ValueRef::List(list) => {
            parcel.write_string(list.reflect_type_path())?;
            parcel.write_i32(1);
            write_count(parcel, list.len())?;
            for item in list.iter_items() {
                write_value(parcel, item)?;
            }
            Ok(())
        }
        ValueRef::Map(map) => {
            parcel.write_string(map.reflect_type_path())?;
            parcel.write_i32(1);
            write_count(parcel, map.len())?;
            for (key, entry) in map.iter_entries() {
                write_value(parcel, key)?;
                write_value(parcel, entry)?;
            }
            Ok(())
        }
        ValueRef::Plain(aggregate) => {
            parcel.write_string(aggregate.reflect_type_path())?;
            parcel.write_i32(1);
            write_count(parcel, aggregate.field_len())?;
            for (name, field) in aggregate.iter_fields() {
                parcel.write_string(name)?;
                write_value(parcel, field)?;
            }
            Ok(())
        }
    }
}

// -----------------------------------------------------------------------------
// decode

/// Reconstructs a value from bytes produced by [`encode`].
///
/// Tags resolve through the scalar handler table first, then through
/// `registry`; an unresolvable tag on a present value fails the whole
/// decode with [`DecodeError::TypeResolution`]. Absent values decode to
/// [`Absent`] before their tag is even resolved.
pub fn decode(bytes: &[u8], registry: &TypeRegistry) -> Result<Box<dyn Reflect>, DecodeError> {
    let mut parcel = Parcel::unmarshall(bytes);
    let value = read_value(&mut parcel, registry)?;
    tracing::trace!(type_path = value.reflect_type_path(), "decoded");
    Ok(value)
}

fn read_count(parcel: &mut Parcel) -> Result<usize, DecodeError> {
    let count = parcel.read_i32()?;
    usize::try_from(count).map_err(|_| ParcelError::NegativeCount { value: count }.into())
}

fn read_value(
    parcel: &mut Parcel,
    registry: &TypeRegistry,
) -> Result<Box<dyn Reflect>, DecodeError> {
    let tag = parcel.read_string()?;
    let present = parcel.read_i32()? == 1;
    if !present {
        return Ok(Box::new(Absent));
    }

    // Scalar names resolve without a registry.
    if let Some(codec) = scalars::by_name(&tag) {
        return (codec.read)(parcel);
    }

    let Some(record) = registry.record_by_path(&tag) else {
        return Err(DecodeError::TypeResolution { tag });
    };

    match record.info() {
        TypeInfo::Scalar(_) => Err(DecodeError::UnsupportedScalar {
            type_path: record.type_path().into(),
        }),
        TypeInfo::Nullable(_) => Err(DecodeError::Malformed {
            detail: "nullable tags never appear on the wire",
        }),
        TypeInfo::Array(_) => {
            let count = read_count(parcel)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_value(parcel, registry)?);
            }
            Ok(record.assemble(items)?)
        }
        TypeInfo::List(_) => {
            let count = read_count(parcel)?;
            let mut instance = record.construct()?;
            {
                let ValueMut::List(list) = instance.view_mut() else {
                    unreachable!("a type record constructs its own type");
                };
                for _ in 0..count {
                    let item = read_value(parcel, registry)?;
                    list.push_boxed(item)?;
                }
            }
            Ok(instance)
        }
        TypeInfo::Map(_) => {
            let count = read_count(parcel)?;
            let mut instance = record.construct()?;
            {
                let ValueMut::Map(map) = instance.view_mut() else {
                    unreachable!("a type record constructs its own type");
                };
                for _ in 0..count {
                    let key = read_value(parcel, registry)?;
                    let value = read_value(parcel, registry)?;
                    map.insert_boxed(key, value)?;
                }
            }
            Ok(instance)
        }
        TypeInfo::Plain(_) => {
            let count = read_count(parcel)?;
            let mut instance = record.construct()?;
            {
                let ValueMut::Plain(fields) = instance.view_mut() else {
                    unreachable!("a type record constructs its own type");
                };
                for _ in 0..count {
                    let name = parcel.read_string()?;
                    let value = read_value(parcel, registry)?;
                    match fields.set_field(&name, value) {
                        Ok(()) => {}
                        // Unknown wire fields are skipped; the shapes on
                        // both ends are allowed to drift.
                        Err(replica_reflect::error::FieldAccessError::NoSuchField {
                            ..
                        }) => {
                            tracing::trace!(field = %name, "skipping unknown wire field");
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
            }
            Ok(instance)
        }
    }
}
