#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod parcel;
mod scalars;

pub mod error;

// -----------------------------------------------------------------------------
// Top-level exports

pub use codec::{decode, encode};
pub use parcel::Parcel;

pub use bytes::Bytes;
