use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// AutoRegistration

/// One collected registration, submitted by `#[derive(Reflect)]` for every
/// non-generic type when the `auto_register` feature is enabled.
///
/// Entries are gathered through [`inventory`] at link time and applied in
/// bulk by [`apply_auto_registrations`]; generic types cannot participate
/// because their instantiations are unknown until used.
pub struct AutoRegistration {
    /// Registers the submitting type (and its dependencies).
    pub register: fn(&mut TypeRegistry),
}

inventory::collect!(AutoRegistration);

/// Applies every collected [`AutoRegistration`] to `registry`.
///
/// Repeated application is cheap: registration is idempotent.
pub fn apply_auto_registrations(registry: &mut TypeRegistry) -> usize {
    let mut applied = 0;
    for entry in inventory::iter::<AutoRegistration> {
        (entry.register)(registry);
        applied += 1;
    }
    applied
}
