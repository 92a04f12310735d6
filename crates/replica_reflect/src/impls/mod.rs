//! Reflection implementations for the std type universe.
//!
//! - scalars: `bool`, `char`, the integer and float widths
//! - text: `String`, `Cow<'static, str>`
//! - sequences: `Vec<T>`, `VecDeque<T>`, `[T; N]`
//! - sets (list-shaped): `HashSet<T>`, `BTreeSet<T>`
//! - maps: `HashMap<K, V>`, `BTreeMap<K, V>`
//! - nullable: `Option<T>`
//! - opaque value types: `Duration`, `PathBuf`, the IP address family,
//!   `SocketAddr`, `TypeId`, `Arc<T>`

use crate::Reflect;
use crate::error::ConstructionError;

// -----------------------------------------------------------------------------
// Modules

mod array;
mod list;
mod map;
mod option;
mod scalar;
mod set;
mod string;
mod value_types;

// -----------------------------------------------------------------------------
// Shared pieces

/// Implements the kind/view accessors shared by every [`Reflect`] impl.
macro_rules! impl_reflect_common {
    ($kind:ident) => {
        #[inline]
        fn reflect_type_path(&self) -> &'static str {
            <Self as $crate::info::TypePath>::type_path()
        }

        #[inline]
        fn reflect_type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        #[inline]
        fn kind(&self) -> $crate::info::Kind {
            $crate::info::Kind::$kind
        }

        #[inline]
        fn view(&self) -> $crate::ops::ValueRef<'_> {
            $crate::ops::ValueRef::$kind(self)
        }

        #[inline]
        fn view_mut(&mut self) -> $crate::ops::ValueMut<'_> {
            $crate::ops::ValueMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_common;

// Clones one container item back to its concrete type through the direct
// clone hook.
pub(crate) fn clone_item<T: Reflect>(item: &T) -> Result<T, ConstructionError> {
    let boxed = item.clone_boxed()?;
    boxed
        .take::<T>()
        .map_err(|found| ConstructionError::CloneUnsupported {
            type_path: found.reflect_type_path().into(),
        })
}
