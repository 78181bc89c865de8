//! One-shot entry points.

use crate::parser::CodeParser;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JackValue;
use crate::runner::plugin::types::EvalContext;

/// Evaluate `source` in a fresh default context.
pub fn evaluate(source: &str) -> Result<JackValue, JErrorType> {
    EvalContext::new().evaluate(source)
}

/// Evaluate `source` in a fresh default context that reads code with
/// `parser`, which `eval` also uses.
pub fn evaluate_with(parser: impl CodeParser + 'static, source: &str) -> Result<JackValue, JErrorType> {
    let mut ctx = EvalContext::new();
    ctx.set_parser(parser);
    ctx.evaluate(source)
}
