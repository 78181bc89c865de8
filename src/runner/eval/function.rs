//! Function creation and invocation.
//!
//! A closure is the frame it was created in plus its body nodes. Calling one
//! runs the body in a fresh child of that frame carrying the argument list;
//! `params` then binds positional arguments to names.

use std::rc::Rc;

use crate::parser::ast::CodeNode;
use crate::runner::ds::env_record::EnvironmentRecord;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{Closure, FunctionObject};
use crate::runner::ds::lex_env::LexEnvironmentRef;
use crate::runner::ds::operations::lex_env::new_function_environment;
use crate::runner::ds::value::JackValue;
use crate::runner::plugin::types::EvalContext;

use super::expression::{run, run_arg, run_codes};
use super::types::{Completion, ValueResult};

/// `fn(body...)`: capture the current frame.
pub(crate) fn make_closure(args: &[CodeNode], env: &LexEnvironmentRef) -> JackValue {
    FunctionObject::Closure(Closure {
        env: env.clone(),
        codes: Rc::new(args.to_vec()),
    })
    .into_value()
}

/// `params(name...)`: bind the i-th argument of the current call to the
/// i-th name. Missing arguments bind Null.
pub(crate) fn declare_params(args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let mut frame = env.borrow_mut();
    for (index, code) in args.iter().enumerate() {
        let value = frame.inner.argument(index);
        frame
            .inner
            .create_mutable_binding(code.as_name()?.to_string(), value);
    }
    Ok(JackValue::Null)
}

/// `return(value)`: unwinds to the nearest enclosing call.
pub(crate) fn return_value(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let value = run_arg(ctx, args, 0, env)?;
    Err(Completion::Return(value))
}

/// `call(target, arg...)`: every operand is evaluated in the caller's frame,
/// target first.
pub(crate) fn invoke(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let target = run_arg(ctx, args, 0, env)?;
    let mut argv = Vec::with_capacity(args.len().saturating_sub(1));
    for code in args.iter().skip(1) {
        argv.push(run(ctx, code, env)?);
    }
    call_value(ctx, &target, argv)
}

/// Call `target` with already evaluated arguments.
///
/// This is the only place a `return` turns back into a value; aborts and
/// errors pass through untouched.
#[tracing::instrument(level = "debug", skip_all)]
pub fn call_value(ctx: &mut EvalContext, target: &JackValue, args: Vec<JackValue>) -> ValueResult {
    let function = match target {
        JackValue::Function(f) => f.clone(),
        other => return Err(JErrorType::NotCallable(other.to_string()).into()),
    };
    ctx.enter_call()?;
    let result = match &*function {
        FunctionObject::Closure(closure) => {
            let frame = new_function_environment(&closure.env, args);
            run_codes(ctx, &closure.codes, &frame)
        }
        FunctionObject::Native { func, .. } => func(ctx, args),
        FunctionObject::Host { func, .. } => func(ctx, args),
    };
    ctx.exit_call();
    match result {
        Err(Completion::Return(value)) => Ok(value),
        other => other,
    }
}
