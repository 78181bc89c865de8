//! The evaluator.
//!
//! - **[`ds`]**: values, interned identities, scope frames and meta records
//! - **[`eval`]**: the dispatcher and the operation library
//! - **[`plugin`]**: interpreter state, configuration and host globals
//! - **[`std_lib`]**: the default host globals

pub mod api;
pub mod ds;
pub mod eval;
pub mod plugin;
pub mod std_lib;
