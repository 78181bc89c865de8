//! # jack - a code-tree evaluator
//!
//! Programs are trees of tagged nodes. Each node names an operation by an
//! interned *form*; the evaluator dispatches on the form and the operation
//! decides which of its arguments to evaluate, in which frame, and how often.
//! Variable reads are interned *symbols*; everything else is a literal.
//!
//! ## Quick Start
//!
//! ```
//! use jack::runner::ds::value::JackValue;
//! use jack::runner::plugin::types::EvalContext;
//!
//! let mut ctx = EvalContext::new();
//! let result = ctx
//!     .evaluate(
//!         r#"
//!         (@vars i)
//!         (@assign i 0)
//!         (@while (@lt i 5) (@assign i (@add i 1)))
//!         i
//!         "#,
//!     )
//!     .unwrap();
//! assert_eq!(result, JackValue::integer(5));
//! ```
//!
//! ### Functions and closures
//!
//! ```
//! use jack::runner::ds::value::JackValue;
//!
//! let result = jack::runner::api::evaluate(
//!     r#"
//!     (@vars counter)
//!     (@assign counter
//!         (@call (@fn
//!             (@vars n)
//!             (@assign n 0)
//!             (@return (@fn (@assign n (@add n 1)))))))
//!     (@call counter)
//!     (@call counter)
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(result, JackValue::integer(2));
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - the code-tree reader and the `CodeParser` contract
//! - **[`runner`]** - the evaluator
//!   - **[`runner::ds`]** - values, identities, scope frames, meta records
//!   - **[`runner::eval`]** - dispatcher and operation library
//!   - **[`runner::plugin`]** - interpreter state, configuration, host globals
//!   - **[`runner::std_lib`]** - `print` and `range`

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
