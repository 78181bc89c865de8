//! Core types for the evaluation engine.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JackValue;

/// Abrupt completion of an evaluation step.
///
/// A normal completion is simply `Ok(value)`. `Return` travels outwards
/// until the nearest function-call boundary turns it back into a value;
/// loops and conditionals pass it through untouched. `Throw` is fatal and
/// reaches the entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Return(JackValue),
    Throw(JErrorType),
}

impl From<JErrorType> for Completion {
    fn from(error: JErrorType) -> Self {
        Completion::Throw(error)
    }
}

/// Result type for value-returning evaluation steps.
pub type ValueResult = Result<JackValue, Completion>;

/// Result type for evaluation steps producing something other than a value.
pub type CompletionResult<T> = Result<T, Completion>;
