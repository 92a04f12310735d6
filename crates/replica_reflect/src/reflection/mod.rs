// -----------------------------------------------------------------------------
// Modules

mod absent;
mod from_value;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use absent::Absent;
pub use from_value::FromValue;
pub use reflect::Reflect;
