//! Error types surfaced by the buffer and the wire codec.

use std::borrow::Cow;
use std::fmt;

use replica_reflect::error::{ConstructionError, FieldAccessError};

// -----------------------------------------------------------------------------
// ParcelError

/// An enumeration of the ways a raw buffer read or write can fail.
#[derive(Debug)]
pub enum ParcelError {
    /// A read ran past the end of the buffer.
    Truncated { needed: usize, remaining: usize },
    /// A string payload was not valid UTF-8.
    BadString,
    /// A count read from the wire was negative.
    NegativeCount { value: i32 },
    /// A string or container exceeds what a 32-bit slot can describe.
    Oversized { len: usize },
}

impl fmt::Display for ParcelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, remaining } => {
                write!(f, "buffer truncated: needed {needed} bytes, {remaining} remain")
            }
            Self::BadString => f.pad("string payload is not valid UTF-8"),
            Self::NegativeCount { value } => write!(f, "negative count on the wire: {value}"),
            Self::Oversized { len } => write!(f, "length {len} exceeds the 32-bit wire slot"),
        }
    }
}

impl std::error::Error for ParcelError {}

// -----------------------------------------------------------------------------
// EncodeError

/// An enumeration of the ways encoding can fail.
#[derive(Debug)]
pub enum EncodeError {
    /// The value is scalar-shaped but has no wire handler.
    UnsupportedScalar { type_path: Cow<'static, str> },
    /// A buffer write failed.
    Parcel(ParcelError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedScalar { type_path } => {
                write!(f, "scalar `{type_path}` has no wire handler")
            }
            Self::Parcel(err) => write!(f, "buffer write failed: {err}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedScalar { .. } => None,
            Self::Parcel(err) => Some(err),
        }
    }
}

impl From<ParcelError> for EncodeError {
    #[inline]
    fn from(err: ParcelError) -> Self {
        Self::Parcel(err)
    }
}

// -----------------------------------------------------------------------------
// DecodeError

/// An enumeration of the ways decoding can fail.
///
/// Every variant aborts the decode of the enclosing value; a partially
/// populated instance is never returned.
#[derive(Debug)]
pub enum DecodeError {
    /// A type tag on the wire resolves to no registered type.
    TypeResolution { tag: String },
    /// A target instance could not be created.
    Construction(ConstructionError),
    /// A decoded field or element could not be written into the target.
    FieldAccess(FieldAccessError),
    /// The target type is scalar-shaped but has no wire handler.
    UnsupportedScalar { type_path: Cow<'static, str> },
    /// A scalar payload held a value outside the target's domain.
    InvalidScalar { type_path: &'static str },
    /// The payload contradicts the target type's shape.
    Malformed { detail: &'static str },
    /// A buffer read failed.
    Parcel(ParcelError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeResolution { tag } => {
                write!(f, "type tag `{tag}` resolves to no registered type")
            }
            Self::Construction(err) => write!(f, "construction failed: {err}"),
            Self::FieldAccess(err) => write!(f, "field access failed: {err}"),
            Self::UnsupportedScalar { type_path } => {
                write!(f, "scalar `{type_path}` has no wire handler")
            }
            Self::InvalidScalar { type_path } => {
                write!(f, "payload is outside the domain of `{type_path}`")
            }
            Self::Malformed { detail } => write!(f, "malformed payload: {detail}"),
            Self::Parcel(err) => write!(f, "buffer read failed: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Construction(err) => Some(err),
            Self::FieldAccess(err) => Some(err),
            Self::Parcel(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParcelError> for DecodeError {
    #[inline]
    fn from(err: ParcelError) -> Self {
        Self::Parcel(err)
    }
}

impl From<ConstructionError> for DecodeError {
    #[inline]
    fn from(err: ConstructionError) -> Self {
        Self::Construction(err)
    }
}

impl From<FieldAccessError> for DecodeError {
    #[inline]
    fn from(err: FieldAccessError) -> Self {
        Self::FieldAccess(err)
    }
}
