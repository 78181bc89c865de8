//! Built-in registry for the host globals seeded into the global frame.

use std::collections::HashMap;

use crate::runner::ds::function_object::{FunctionObject, NativeFn};
use crate::runner::ds::value::JackValue;
use crate::runner::std_lib::register_core_builtins;

/// Named values installed into the global frame of an
/// [`EvalContext`](super::types::EvalContext).
///
/// Registration order is kept, so installing a registry is deterministic and
/// a later registration under the same name replaces the earlier one.
pub struct BuiltInRegistry {
    globals: Vec<(String, JackValue)>,
    index: HashMap<String, usize>,
}

impl BuiltInRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        BuiltInRegistry {
            globals: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry holding the standard host globals (`print`, `range`).
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_builtins(&mut registry);
        registry
    }

    /// Register any value under `name`.
    pub fn register_global(&mut self, name: impl Into<String>, value: JackValue) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.globals[i].1 = value,
            None => {
                self.index.insert(name.clone(), self.globals.len());
                self.globals.push((name, value));
            }
        }
    }

    /// Register a native function under `name`.
    pub fn register_function(&mut self, name: &str, func: NativeFn) {
        self.register_global(name, FunctionObject::native(name, func).into_value());
    }

    pub fn get_global(&self, name: &str) -> Option<&JackValue> {
        self.index.get(name).map(|&i| &self.globals[i].1)
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names in registration order.
    pub fn global_names(&self) -> Vec<&str> {
        self.globals.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub(crate) fn into_globals(self) -> Vec<(String, JackValue)> {
        self.globals
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        Self::with_core()
    }
}
