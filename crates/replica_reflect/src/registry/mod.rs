//! The process-wide type registry: classification policy, name resolution
//! and construction plans.
//!
//! A [`TypeRegistry`] is the explicit context every copy and decode runs
//! against. It owns the [`TypeRecord`] table (keyed by `TypeId`, indexed by
//! type path for wire resolution), the immutable and ignored policy sets,
//! and the coordinator guard. Registries are plain values: tests create
//! isolated ones, the coordinator wraps one in a lock and shares it
//! process-wide.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "auto_register")]
mod auto;
mod type_record;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto::{AutoRegistration, apply_auto_registrations};
pub use type_record::{GetTypeRecord, TypeRecord};
pub use type_registry::{Classification, TypeRegistry};
