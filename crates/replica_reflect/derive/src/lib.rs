//! Derive macros for `replica_reflect`.
//!
//! `#[derive(Reflect)]` implements the full reflection surface for a
//! named-field or unit struct: `TypePath`, `Typed`, `Reflect`, the
//! `Aggregate` access interface, `FromValue` and `GetTypeRecord`.
//!
//! # Attributes
//!
//! Type level, inside `#[reflect(...)]`:
//!
//! - `default`: attach a construction hook built from the type's
//!   [`Default`]; required for the type to be constructible by the
//!   instance factory (deep copy of the type, decoding it from a wire).
//! - `clone`: attach a direct clone hook built from the type's [`Clone`];
//!   required for the type to participate in the ignored/immutable sets.
//!
//! Field level:
//!
//! - `#[reflect(skip)]`: exclude the field from introspection. Skipped
//!   fields keep their constructed defaults through copy and decode.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Reflect, Default, Clone)]
//! #[reflect(default, clone)]
//! struct Profile {
//!     name: String,
//!     count: i32,
//!     #[reflect(skip)]
//!     scratch: Vec<u8>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod struct_codegen;

#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match struct_codegen::expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
