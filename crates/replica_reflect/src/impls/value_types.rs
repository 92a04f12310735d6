use std::any::TypeId;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::Reflect;
use crate::error::ConstructionError;
use crate::impls::impl_reflect_common;
use crate::info::{
    GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell, ScalarInfo, TypeInfo,
    TypePath, Typed,
};
use crate::reflection::FromValue;
use crate::registry::{GetTypeRecord, TypeRecord, TypeRegistry};

// Opaque value types: cloned whole, never traversed. These are the standard
// members of the default immutable set.
macro_rules! impl_opaque_scalar {
    ($($ty:ty => ($path:literal, $name:literal)),* $(,)?) => {
        $(
            impl TypePath for $ty {
                #[inline]
                fn type_path() -> &'static str {
                    $path
                }

                #[inline]
                fn type_name() -> &'static str {
                    $name
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
                    Ok(Box::new(self.clone()))
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
        )*
    };
}

impl_opaque_scalar! {
    Duration => ("core::time::Duration", "Duration"),
    PathBuf => ("std::path::PathBuf", "PathBuf"),
    IpAddr => ("std::net::IpAddr", "IpAddr"),
    Ipv4Addr => ("std::net::Ipv4Addr", "Ipv4Addr"),
    Ipv6Addr => ("std::net::Ipv6Addr", "Ipv6Addr"),
    SocketAddr => ("std::net::SocketAddr", "SocketAddr"),
    TypeId => ("core::any::TypeId", "TypeId"),
}

impl GetTypeRecord for Duration {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>().with_default::<Self>()
    }
}

impl GetTypeRecord for PathBuf {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>().with_default::<Self>()
    }
}

// The address family has no vacant value, so these records carry no
// construction plan.
impl GetTypeRecord for IpAddr {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>()
    }
}

impl GetTypeRecord for Ipv4Addr {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>()
    }
}

impl GetTypeRecord for Ipv6Addr {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>()
    }
}

impl GetTypeRecord for SocketAddr {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>()
    }
}

impl GetTypeRecord for TypeId {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>()
    }
}

// -----------------------------------------------------------------------------
// Arc<T>

// A shared handle is scalar-shaped: cloning it aliases the original on
// purpose, which is how "returned by reference" reads for reflected values.

impl<T: Reflect + Typed + FromValue> TypePath for Arc<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| format!("alloc::sync::Arc<{}>", T::type_path()))
            .as_str()
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self, _>(|| format!("Arc<{}>", T::type_name()))
            .as_str()
    }
}

impl<T: Reflect + Typed + FromValue> Typed for Arc<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self, _>(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
    }
}

impl<T: Reflect + Typed + FromValue> Reflect for Arc<T> {
    impl_reflect_common!(Scalar);

    #[inline]
    fn clone_boxed(&self) -> Result<Box<dyn Reflect>, ConstructionError> {
        Ok(Box::new(Arc::clone(self)))
    }

    fn debug_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Arc({:?})", &**self as &dyn Reflect)
    }
}

impl<T: Reflect + Typed + FromValue> FromValue for Arc<T> {
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        let value = match value.downcast::<Self>() {
            Ok(arc) => return Ok(*arc),
            Err(value) => value,
        };
        // A bare inner value moves behind a fresh handle.
        T::from_boxed(value).map(Arc::new)
    }
}

impl<T: GetTypeRecord + FromValue> GetTypeRecord for Arc<T> {
    fn get_type_record() -> TypeRecord {
        TypeRecord::of::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}
