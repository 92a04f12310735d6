#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Extern Self
//
// Derive output refers to the crate as `replica_reflect`, including inside
// this crate's own tests, so keep that name bound to `crate`.

extern crate self as replica_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod copy;
pub mod error;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-level exports

pub use reflection::{Absent, FromValue, Reflect};

/// The derive macros, re-exported as a module for qualified use.
pub use replica_reflect_derive as derive;

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

// -----------------------------------------------------------------------------
// auto_register!

/// Submits a type to the process-wide registration collection.
///
/// Emitted by `#[derive(Reflect)]` for non-generic types; a coordinator
/// applies the collected entries when it is created. Expands to nothing
/// when the `auto_register` feature is disabled.
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::AutoRegistration {
                register: |registry| registry.register::<$ty>(),
            }
        }
    };
}

/// Submits a type to the process-wide registration collection.
///
/// The `auto_register` feature is disabled, so this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($ty:ty) => {};
}
