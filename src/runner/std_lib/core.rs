//! Core built-ins registration.

use crate::runner::plugin::registry::BuiltInRegistry;

use super::console;
use super::range;

/// Register all core host globals with the registry.
pub fn register_core_builtins(registry: &mut BuiltInRegistry) {
    console::register(registry);
    range::register(registry);
}
