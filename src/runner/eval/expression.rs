//! Code evaluation and the expression forms.
//!
//! This module holds the dispatcher ([`run`], [`run_codes`]) together with
//! the comparison, arithmetic, logic, access and constructor operations.
//! Control flow lives in [`super::statement`], functions in
//! [`super::function`].

use std::collections::HashMap;

use crate::parser::ast::CodeNode;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::LexEnvironmentRef;
use crate::runner::ds::object::{KeyedObject, PropertyKey};
use crate::runner::ds::operations::lex_env::lookup_binding;
use crate::runner::ds::operations::object::{meta_delete, meta_get, meta_has, meta_set};
use crate::runner::ds::operations::test_and_comparison::{
    less_than, less_than_or_equal, strict_equality_comparison,
};
use crate::runner::ds::operations::type_conversion::{to_boolean, to_number, to_string};
use crate::runner::ds::value::{JackValue, NumberType};
use crate::runner::plugin::types::EvalContext;

use super::function::{declare_params, invoke, make_closure, return_value};
use super::operation::Operation;
use super::statement::{
    abort, assign, declare_vars, eval_source, execute_for, execute_if, execute_while, lookup,
};
use super::types::ValueResult;

/// Remaining native stack below which evaluation moves to a fresh segment.
const STACK_RED_ZONE: usize = 100 * 1024;

/// Size of each segment allocated when the red zone is reached.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Evaluate one node in `env`.
///
/// Script recursion is bounded by `max_call_depth`, not by the native stack.
pub fn run(ctx: &mut EvalContext, code: &CodeNode, env: &LexEnvironmentRef) -> ValueResult {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_PER_RECURSION, || run_node(ctx, code, env))
}

fn run_node(ctx: &mut EvalContext, code: &CodeNode, env: &LexEnvironmentRef) -> ValueResult {
    match code {
        CodeNode::Tagged(form, args) => {
            let operation = form
                .operation()
                .ok_or_else(|| JErrorType::UnknownForm(form.name().to_string()))?;
            tracing::trace!(form = form.name(), args = args.len(), "dispatch");
            dispatch(ctx, operation, args, env)
        }
        CodeNode::Symbol(symbol) => Ok(lookup_binding(env, symbol.name())?),
        CodeNode::Literal(value) => Ok(value.clone()),
        CodeNode::Sequence(codes) => run_codes(ctx, codes, env),
    }
}

/// Evaluate nodes in order in the same frame; the last result wins.
pub fn run_codes(ctx: &mut EvalContext, codes: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let mut result = JackValue::Null;
    for code in codes {
        result = run(ctx, code, env)?;
    }
    Ok(result)
}

/// Evaluate argument `index`. A missing argument evaluates to Null.
pub(crate) fn run_arg(
    ctx: &mut EvalContext,
    args: &[CodeNode],
    index: usize,
    env: &LexEnvironmentRef,
) -> ValueResult {
    match args.get(index) {
        Some(code) => run(ctx, code, env),
        None => Ok(JackValue::Null),
    }
}

pub(crate) fn arg(args: &[CodeNode], index: usize) -> Result<&CodeNode, JErrorType> {
    args.get(index)
        .ok_or_else(|| JErrorType::MalformedCode(format!("missing argument {}", index)))
}

fn dispatch(
    ctx: &mut EvalContext,
    operation: Operation,
    args: &[CodeNode],
    env: &LexEnvironmentRef,
) -> ValueResult {
    match operation {
        Operation::Params => declare_params(args, env),
        Operation::Vars => declare_vars(args, env),
        Operation::Fn => Ok(make_closure(args, env)),
        Operation::Call => invoke(ctx, args, env),
        Operation::Assign => assign(ctx, args, env),
        Operation::Lookup => lookup(args, env),
        Operation::Return => return_value(ctx, args, env),
        Operation::Abort => abort(ctx, args, env),
        Operation::Eval => eval_source(ctx, args, env),

        Operation::If => execute_if(ctx, args, env),
        Operation::While => execute_while(ctx, args, env),
        Operation::For => execute_for(ctx, args, env),

        Operation::Le | Operation::Lt | Operation::Eq | Operation::Neq => {
            let left = run_arg(ctx, args, 0, env)?;
            let right = run_arg(ctx, args, 1, env)?;
            let result = match operation {
                Operation::Le => less_than_or_equal(&left, &right)?,
                Operation::Lt => less_than(&left, &right)?,
                Operation::Eq => strict_equality_comparison(&left, &right),
                _ => !strict_equality_comparison(&left, &right),
            };
            Ok(JackValue::Boolean(result))
        }

        Operation::Add
        | Operation::Sub
        | Operation::Mul
        | Operation::Div
        | Operation::Pow
        | Operation::Mod => {
            let left = run_arg(ctx, args, 0, env)?;
            let right = run_arg(ctx, args, 1, env)?;
            Ok(match operation {
                Operation::Add => add_values(&left, &right)?,
                Operation::Sub => subtract_values(&left, &right)?,
                Operation::Mul => multiply_values(&left, &right)?,
                Operation::Div => divide_values(&left, &right)?,
                Operation::Pow => power_values(&left, &right)?,
                _ => modulo_values(&left, &right)?,
            })
        }
        Operation::Unm => {
            let value = run_arg(ctx, args, 0, env)?;
            Ok(negate_number(&value)?)
        }

        // Both operands always run; only the choice of result depends on the
        // first one.
        Operation::Or => {
            let left = run_arg(ctx, args, 0, env)?;
            let right = run_arg(ctx, args, 1, env)?;
            Ok(if to_boolean(&left) { left } else { right })
        }
        Operation::And => {
            let left = run_arg(ctx, args, 0, env)?;
            let right = run_arg(ctx, args, 1, env)?;
            Ok(if to_boolean(&left) { right } else { left })
        }
        Operation::Xor => {
            let left = run_arg(ctx, args, 0, env)?;
            let right = run_arg(ctx, args, 1, env)?;
            Ok(JackValue::Boolean(to_boolean(&left) != to_boolean(&right)))
        }
        Operation::Not => {
            let value = run_arg(ctx, args, 0, env)?;
            Ok(JackValue::Boolean(!to_boolean(&value)))
        }

        Operation::In => {
            let value = run_arg(ctx, args, 0, env)?;
            let key = run_arg(ctx, args, 1, env)?;
            Ok(JackValue::Boolean(meta_has(ctx, &value, &key)?))
        }
        Operation::Len => {
            let value = run_arg(ctx, args, 0, env)?;
            Ok(length_of(&value))
        }
        Operation::Get => {
            let obj = run_arg(ctx, args, 0, env)?;
            let key = run_arg(ctx, args, 1, env)?;
            meta_get(ctx, &obj, &key)
        }
        Operation::Set => {
            let obj = run_arg(ctx, args, 0, env)?;
            let key = run_arg(ctx, args, 1, env)?;
            let value = run_arg(ctx, args, 2, env)?;
            meta_set(ctx, &obj, &key, value)
        }
        Operation::Delete => {
            let obj = run_arg(ctx, args, 0, env)?;
            let key = run_arg(ctx, args, 1, env)?;
            meta_delete(ctx, &obj, &key)
        }

        Operation::List => Ok(JackValue::new_list(run_each(ctx, args, env)?)),
        Operation::Tuple => Ok(JackValue::new_tuple(run_each(ctx, args, env)?)),
        Operation::Object => build_object(ctx, args, env),
        Operation::Is => {
            let value = run_arg(ctx, args, 0, env)?;
            let name = arg(args, 1)?.as_name()?;
            let predicate = TYPE_PREDICATES
                .get(name)
                .ok_or_else(|| JErrorType::UnknownPredicate(name.to_string()))?;
            Ok(JackValue::Boolean(predicate(&value)))
        }
    }
}

fn run_each(
    ctx: &mut EvalContext,
    args: &[CodeNode],
    env: &LexEnvironmentRef,
) -> Result<Vec<JackValue>, super::types::Completion> {
    args.iter().map(|code| run(ctx, code, env)).collect()
}

/// Keys and values are evaluated pairwise, left to right, and stored through
/// the regular `set` policy.
fn build_object(ctx: &mut EvalContext, args: &[CodeNode], env: &LexEnvironmentRef) -> ValueResult {
    let object = JackValue::new_object(KeyedObject::new());
    for i in (0..args.len()).step_by(2) {
        let key = run_arg(ctx, args, i, env)?;
        let value = run_arg(ctx, args, i + 1, env)?;
        meta_set(ctx, &object, &key, value)?;
    }
    Ok(object)
}

/// Direct length read, without going through meta records.
fn length_of(value: &JackValue) -> JackValue {
    match value {
        JackValue::String(s) => JackValue::integer(s.chars().count() as i64),
        JackValue::List(l) => JackValue::integer(l.borrow().len() as i64),
        JackValue::Tuple(t) => JackValue::integer(t.borrow().len() as i64),
        JackValue::Buffer(b) => JackValue::integer(b.borrow().len() as i64),
        JackValue::Object(o) => o
            .borrow()
            .get(&PropertyKey::Str("length".to_string()))
            .cloned()
            .unwrap_or(JackValue::Null),
        _ => JackValue::Null,
    }
}

// ============================================================================
// Arithmetic operations
// ============================================================================

fn add_values(left: &JackValue, right: &JackValue) -> Result<JackValue, JErrorType> {
    if matches!(left, JackValue::String(_)) || matches!(right, JackValue::String(_)) {
        return Ok(JackValue::String(format!(
            "{}{}",
            to_string(left),
            to_string(right)
        )));
    }
    apply_numeric_op(left, right, i64::checked_add, |a, b| a + b)
}

fn subtract_values(left: &JackValue, right: &JackValue) -> Result<JackValue, JErrorType> {
    apply_numeric_op(left, right, i64::checked_sub, |a, b| a - b)
}

fn multiply_values(left: &JackValue, right: &JackValue) -> Result<JackValue, JErrorType> {
    apply_numeric_op(left, right, i64::checked_mul, |a, b| a * b)
}

/// Integer results only for exact divisions; anything else, division by
/// zero included, is float division.
fn divide_values(left: &JackValue, right: &JackValue) -> Result<JackValue, JErrorType> {
    apply_numeric_op(
        left,
        right,
        |a, b| {
            if b != 0 && a.checked_rem(b) == Some(0) {
                a.checked_div(b)
            } else {
                None
            }
        },
        |a, b| a / b,
    )
}

fn modulo_values(left: &JackValue, right: &JackValue) -> Result<JackValue, JErrorType> {
    apply_numeric_op(left, right, i64::checked_rem, |a, b| a % b)
}

fn power_values(left: &JackValue, right: &JackValue) -> Result<JackValue, JErrorType> {
    apply_numeric_op(
        left,
        right,
        |a, b| {
            if (0..=u32::MAX as i64).contains(&b) {
                a.checked_pow(b as u32)
            } else {
                None
            }
        },
        f64::powf,
    )
}

fn negate_number(value: &JackValue) -> Result<JackValue, JErrorType> {
    Ok(match to_number(value)? {
        NumberType::Integer(i) => match i.checked_neg() {
            Some(n) => JackValue::integer(n),
            None => JackValue::float(-(*i as f64)),
        },
        NumberType::Float(f) => JackValue::float(-f),
    })
}

/// Integer operands use `int_op`, falling back to `float_op` when it
/// declines (overflow, inexact or undefined results).
fn apply_numeric_op<F, G>(
    left: &JackValue,
    right: &JackValue,
    int_op: F,
    float_op: G,
) -> Result<JackValue, JErrorType>
where
    F: Fn(i64, i64) -> Option<i64>,
    G: Fn(f64, f64) -> f64,
{
    let a = to_number(left)?;
    let b = to_number(right)?;
    if let (NumberType::Integer(x), NumberType::Integer(y)) = (a, b) {
        if let Some(n) = int_op(*x, *y) {
            return Ok(JackValue::integer(n));
        }
    }
    Ok(JackValue::float(float_op(a.as_f64(), b.as_f64())))
}

// ============================================================================
// Type predicates
// ============================================================================

type TypePredicate = fn(&JackValue) -> bool;

lazy_static! {
    static ref TYPE_PREDICATES: HashMap<&'static str, TypePredicate> = {
        let mut predicates: HashMap<&'static str, TypePredicate> = HashMap::new();
        predicates.insert("Integer", is_integer);
        predicates.insert("Null", |v| matches!(v, JackValue::Null));
        predicates.insert("Boolean", |v| matches!(v, JackValue::Boolean(_)));
        predicates.insert("String", |v| matches!(v, JackValue::String(_)));
        predicates.insert("Buffer", |v| matches!(v, JackValue::Buffer(_)));
        predicates.insert("Function", |v| matches!(v, JackValue::Function(_)));
        predicates.insert("Tuple", |v| matches!(v, JackValue::Tuple(_)));
        predicates.insert("List", |v| matches!(v, JackValue::List(_)));
        predicates.insert("Object", |v| matches!(v, JackValue::Object(_)));
        predicates
    };
}

/// Whole numbers in the unsigned 32-bit range.
fn is_integer(value: &JackValue) -> bool {
    match value {
        JackValue::Number(NumberType::Integer(i)) => (0..=u32::MAX as i64).contains(i),
        JackValue::Number(NumberType::Float(f)) => {
            f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64
        }
        _ => false,
    }
}
