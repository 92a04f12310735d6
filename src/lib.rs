#![doc = include_str!("../README.md")]

pub use replica_parcel as parcel;
pub use replica_reflect as reflect;

mod replicator;

pub use replicator::Replicator;

/// The usual imports for working with reflected values.
pub mod prelude {
    pub use crate::Replicator;
    pub use replica_parcel::{Bytes, Parcel};
    pub use replica_reflect::derive::Reflect;
    pub use replica_reflect::registry::TypeRegistry;
    pub use replica_reflect::{Absent, FromValue, Reflect};
}
