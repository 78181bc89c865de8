//! Host globals seeded into every default global frame.
//!
//! - `print(values...)`: writes the display form of its arguments.
//! - `range(n)`: a generator yielding `0..n`, then Null forever.

pub mod console;
pub mod core;
pub mod range;

pub use self::core::register_core_builtins;
