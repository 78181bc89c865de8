//! Interpreter state and host integration.
//!
//! - **[`EvalContext`]**: the state every evaluation step receives: global
//!   frame, interner, meta registry, parser and output sink.
//! - **[`EvalConfig`]**: tunables, loadable from JSON.
//! - **[`BuiltInRegistry`]**: host globals (`print`, `range`, or your own)
//!   installed into the global frame.
//!
//! ```
//! use jack::runner::ds::value::JackValue;
//! use jack::runner::plugin::registry::BuiltInRegistry;
//! use jack::runner::plugin::types::EvalContext;
//!
//! fn double(_ctx: &mut EvalContext, args: Vec<JackValue>) -> jack::runner::eval::ValueResult {
//!     match args.first() {
//!         Some(JackValue::Number(n)) => Ok(JackValue::float(n.as_f64() * 2.0)),
//!         _ => Ok(JackValue::Null),
//!     }
//! }
//!
//! let mut registry = BuiltInRegistry::with_core();
//! registry.register_function("double", double);
//!
//! let mut ctx = EvalContext::bare(Default::default());
//! ctx.install_core_builtins(registry);
//! let result = ctx.evaluate("(@call double 21)").unwrap();
//! assert_eq!(result, JackValue::integer(42));
//! ```

pub mod config;
pub mod registry;
pub mod types;

pub use config::EvalConfig;
pub use registry::BuiltInRegistry;
pub use types::EvalContext;
