//! Control flow and binding forms.

use crate::parser::ast::CodeNode;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::LexEnvironmentRef;
use crate::runner::ds::operations::lex_env::{
    assign_binding, declare_binding, lookup_binding, new_declarative_environment,
};
use crate::runner::ds::operations::object::{meta_call, meta_get, meta_keys, meta_len};
use crate::runner::ds::operations::type_conversion::{to_boolean, to_string};
use crate::runner::ds::value::JackValue;
use crate::runner::plugin::types::EvalContext;

use super::expression::{arg, run, run_arg, run_codes};
use super::types::ValueResult;

// ============================================================================
// Bindings
// ============================================================================

/// Declare each named variable in the current frame, initialised to Null.
pub(crate) fn declare_vars(args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    for code in args {
        declare_binding(env, code.as_name()?, JackValue::Null);
    }
    Ok(JackValue::Null)
}

/// Evaluate the value, then overwrite the nearest existing binding.
pub(crate) fn assign(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let name = arg(args, 0)?.as_name()?;
    let value = run_arg(ctx, args, 1, env)?;
    assign_binding(env, name, value.clone())?;
    Ok(value)
}

pub(crate) fn lookup(args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let name = arg(args, 0)?.as_name()?;
    Ok(lookup_binding(env, name)?)
}

// ============================================================================
// Conditionals and loops
// ============================================================================

/// `if(cond1, body1, cond2, body2, ..., [else])`. Runs in the current frame.
pub(crate) fn execute_if(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let mut pairs = args.chunks_exact(2);
    for pair in &mut pairs {
        let condition = run(ctx, &pair[0], env)?;
        if to_boolean(&condition) {
            return run_codes(ctx, pair[1].as_codes(), env);
        }
    }
    match pairs.remainder() {
        [otherwise] => run_codes(ctx, otherwise.as_codes(), env),
        _ => Ok(JackValue::Null),
    }
}

/// `while(cond, body...)`. One child frame serves every iteration.
pub(crate) fn execute_while(
    ctx: &mut EvalContext,
    args: &[CodeNode],
    env: &LexEnvironmentRef,
) -> ValueResult {
    let condition = arg(args, 0)?;
    let body = &args[1..];
    let loop_env = new_declarative_environment(Some(env.clone()));
    let mut result = JackValue::Null;
    while to_boolean(&run(ctx, condition, &loop_env)?) {
        result = run_codes(ctx, body, &loop_env)?;
    }
    Ok(result)
}

/// `for(iterable, names, body...)`.
///
/// The iterable's meta record picks the protocol, checked in order:
/// callable values are generators stepped until they yield Null, sized
/// values are walked by index, keyed values by key. With two names the
/// first receives the index or key and the second the item.
pub(crate) fn execute_for(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let iterable = run_arg(ctx, args, 0, env)?;
    let names = arg(args, 1)?.as_names()?;
    if names.is_empty() || names.len() > 2 {
        return Err(JErrorType::MalformedCode(format!(
            "for takes one or two names, got {}",
            names.len()
        ))
        .into());
    }
    let body = &args[2..];
    let meta = ctx.metas.adapt(&iterable)?;
    let loop_env = new_declarative_environment(Some(env.clone()));

    let bind = |position: JackValue, item: JackValue| match names.as_slice() {
        [key_name, item_name] => {
            declare_binding(&loop_env, key_name, position);
            declare_binding(&loop_env, item_name, item);
        }
        [item_name] => declare_binding(&loop_env, item_name, item),
        _ => {}
    };

    let mut result = JackValue::Null;
    if meta.has_call() {
        let mut step = 0;
        loop {
            let item = meta_call(ctx, &iterable, &meta)?;
            if item.is_null() {
                break;
            }
            bind(JackValue::integer(step), item);
            result = run_codes(ctx, body, &loop_env)?;
            step += 1;
        }
    } else if meta.has_len() {
        let len = meta_len(ctx, &iterable, &meta)?;
        for i in 0..len {
            let index = JackValue::integer(i as i64);
            let item = meta_get(ctx, &iterable, &index)?;
            bind(index, item);
            result = run_codes(ctx, body, &loop_env)?;
        }
    } else if meta.has_keys() {
        for key in meta_keys(ctx, &iterable, &meta)? {
            let item = meta_get(ctx, &iterable, &key)?;
            bind(key, item);
            result = run_codes(ctx, body, &loop_env)?;
        }
    } else {
        return Err(JErrorType::TypeError(format!("{} is not iterable", iterable.type_name())).into());
    }
    Ok(result)
}

// ============================================================================
// Abort and eval
// ============================================================================

pub(crate) fn abort(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let message = to_string(&run_arg(ctx, args, 0, env)?);
    tracing::error!(%message, "script aborted");
    Err(JErrorType::Aborted(message).into())
}

/// Parse a source string with the context's parser and run it in the
/// current frame.
pub(crate) fn eval_source(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let source = match run_arg(ctx, args, 0, env)? {
        JackValue::String(source) => source,
        other => {
            return Err(JErrorType::TypeError(format!(
                "eval expects a string, got {}",
                other.type_name()
            ))
            .into())
        }
    };
    let codes = ctx.parse(&source)?;
    run_codes(ctx, &codes, env)
}
