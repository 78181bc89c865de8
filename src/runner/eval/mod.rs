//! Evaluation module for executing code trees.
//!
//! [`expression::run`] is the single dispatch point: a tagged node is handed
//! to the operation selected by its form, a symbol is looked up, and
//! anything else is a literal.

pub mod types;
pub mod operation;
pub mod expression;
pub mod statement;
pub mod function;

pub use expression::{run, run_codes};
pub use types::{Completion, CompletionResult, ValueResult};
