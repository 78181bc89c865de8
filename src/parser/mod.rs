//! Reading source text into code trees.
//!
//! The evaluator only depends on the [`CodeParser`] contract; the bundled
//! [`CodeTreeParser`] reads a small bracketed notation, and any closure with
//! the right signature can stand in for it.

mod api;
pub mod ast;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::symbol::Interner;
use ast::CodeNode;

pub use api::{CodeTreeParser, Rule};

/// Turns source text into top-level code nodes. Forms and symbols must be
/// interned through `interner` so they compare by identity with the ones the
/// evaluator sees.
pub trait CodeParser {
    fn parse(&self, source: &str, interner: &Interner) -> Result<Vec<CodeNode>, JErrorType>;
}

impl<F> CodeParser for F
where
    F: Fn(&str, &Interner) -> Result<Vec<CodeNode>, JErrorType>,
{
    fn parse(&self, source: &str, interner: &Interner) -> Result<Vec<CodeNode>, JErrorType> {
        self(source, interner)
    }
}
