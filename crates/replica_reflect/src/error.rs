//! Error types surfaced by construction, field access and the copy engine.
//!
//! Every failure propagates to the caller of the top-level operation;
//! nothing is logged-and-swallowed. A partially populated result would be
//! indistinguishable from a complete one, so the whole operation fails
//! instead.

use std::borrow::Cow;
use std::fmt;

// -----------------------------------------------------------------------------
// ConstructionError

/// An enumeration of the ways instance creation can fail.
#[derive(Debug)]
pub enum ConstructionError {
    /// The type has no record in the registry, so no construction plan
    /// exists for it.
    NotRegistered { type_path: Cow<'static, str> },
    /// The type is registered but carries no usable constructor.
    NoConstructor { type_path: Cow<'static, str> },
    /// The type does not support a direct clone.
    CloneUnsupported { type_path: Cow<'static, str> },
    /// A fixed array was rebuilt from the wrong number of items.
    LengthMismatch {
        type_path: Cow<'static, str>,
        expected: usize,
        found: usize,
    },
    /// An item could not be converted into a container's component type.
    ItemMismatch {
        type_path: Cow<'static, str>,
        index: usize,
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered { type_path } => {
                write!(f, "type `{type_path}` is not registered")
            }
            Self::NoConstructor { type_path } => {
                write!(f, "type `{type_path}` has no usable constructor")
            }
            Self::CloneUnsupported { type_path } => {
                write!(f, "type `{type_path}` does not support a direct clone")
            }
            Self::LengthMismatch {
                type_path,
                expected,
                found,
            } => {
                write!(
                    f,
                    "`{type_path}` rebuilt from {found} items, expected {expected}"
                )
            }
            Self::ItemMismatch {
                type_path,
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "item {index} of `{type_path}` is `{found}`, expected `{expected}`"
                )
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

// -----------------------------------------------------------------------------
// FieldAccessError

/// An enumeration of the ways a field or element write can fail.
#[derive(Debug)]
pub enum FieldAccessError {
    /// The target aggregate has no field with the requested name.
    NoSuchField {
        type_path: Cow<'static, str>,
        field: Cow<'static, str>,
    },
    /// The written value could not be converted into the slot's declared
    /// type.
    TypeMismatch {
        type_path: Cow<'static, str>,
        field: Cow<'static, str>,
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },
}

impl FieldAccessError {
    /// A missing-field failure on `type_path`.
    pub fn no_such_field(type_path: &'static str, field: &str) -> Self {
        Self::NoSuchField {
            type_path: Cow::Borrowed(type_path),
            field: Cow::Owned(field.to_owned()),
        }
    }

    /// A conversion failure writing `field` of `type_path`.
    pub fn type_mismatch(
        type_path: &'static str,
        field: impl Into<Cow<'static, str>>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            type_path: Cow::Borrowed(type_path),
            field: field.into(),
            expected: Cow::Borrowed(expected),
            found: Cow::Borrowed(found),
        }
    }

    /// A conversion failure writing the element at `index` of a container.
    pub fn element_mismatch(
        type_path: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            type_path: Cow::Borrowed(type_path),
            field: Cow::Owned(format!("[{index}]")),
            expected: Cow::Borrowed(expected),
            found: Cow::Borrowed(found),
        }
    }
}

impl fmt::Display for FieldAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchField { type_path, field } => {
                write!(f, "`{type_path}` has no field `{field}`")
            }
            Self::TypeMismatch {
                type_path,
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field `{field}` of `{type_path}` expects `{expected}`, got `{found}`"
                )
            }
        }
    }
}

impl std::error::Error for FieldAccessError {}

// -----------------------------------------------------------------------------
// CopyError

/// An enumeration of all error outcomes of a deep copy.
#[derive(Debug)]
pub enum CopyError {
    /// The copied value is the coordinator itself. This is a programming
    /// error and always fails the whole call.
    SelfCopy { type_path: Cow<'static, str> },
    /// A destination instance could not be created.
    Construction(ConstructionError),
    /// A field or element of the destination could not be written.
    FieldAccess(FieldAccessError),
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfCopy { type_path } => {
                write!(f, "cannot copy the coordinator `{type_path}` itself")
            }
            Self::Construction(err) => write!(f, "construction failed: {err}"),
            Self::FieldAccess(err) => write!(f, "field access failed: {err}"),
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SelfCopy { .. } => None,
            Self::Construction(err) => Some(err),
            Self::FieldAccess(err) => Some(err),
        }
    }
}

impl From<ConstructionError> for CopyError {
    #[inline]
    fn from(err: ConstructionError) -> Self {
        Self::Construction(err)
    }
}

impl From<FieldAccessError> for CopyError {
    #[inline]
    fn from(err: FieldAccessError) -> Self {
        Self::FieldAccess(err)
    }
}
