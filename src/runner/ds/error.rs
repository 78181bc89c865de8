use thiserror::Error;

/// Every way an evaluation can fail.
///
/// The first four variants are the language's own fatal conditions; the rest
/// cover malformed trees and host-side limits. None of them can be caught by
/// script code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JErrorType {
    #[error("Attempt to access undefined variable '{0}'")]
    UnboundName(String),
    #[error("Attempt to call non-function ({0})")]
    NotCallable(String),
    #[error("Unknown type {0}")]
    UnknownPredicate(String),
    #[error("{0}")]
    Aborted(String),
    #[error("Unknown form @{0}")]
    UnknownForm(String),
    #[error("Type error: {0}")]
    TypeError(String),
    #[error("Malformed code: {0}")]
    MalformedCode(String),
    #[error("Maximum call depth of {0} exceeded")]
    StackOverflow(usize),
    #[error("Return used outside of a function")]
    ReturnOutsideFunction,
    #[error("Syntax error: {0}")]
    SyntaxError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Output error: {0}")]
    OutputError(String),
}

impl JErrorType {
    /// True for errors raised by the script itself through `abort`.
    pub fn is_abort(&self) -> bool {
        matches!(self, JErrorType::Aborted(_))
    }
}
