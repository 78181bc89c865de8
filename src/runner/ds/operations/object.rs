//! The generic access policy behind `get`, `set`, `in` and `delete`.
//!
//! Lookup order for reads and writes:
//! 1. a [`Form`](crate::runner::ds::symbol::Form) key addresses the value's
//!    meta slot of that name, for `in` and `delete` too;
//! 2. an own member under the key is read or written directly;
//! 3. the meta record's `get`/`set` capability (hook or built-in) handles it;
//! 4. otherwise nothing happens and the result is Null.
//!
//! Only non-function heap values take part in `get`/`set`; any other target
//! reads as Null and ignores writes.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::meta::{
    MetaKind, MetaRecordRef, HOOK_CALL, HOOK_DELETE, HOOK_GET, HOOK_HAS, HOOK_KEYS, HOOK_LEN,
    HOOK_SET,
};
use crate::runner::ds::operations::type_conversion::{
    to_boolean, to_property_key, to_sequence_index,
};
use crate::runner::ds::value::{JackValue, NumberType};
use crate::runner::eval::function::call_value;
use crate::runner::eval::types::{CompletionResult, ValueResult};
use crate::runner::plugin::types::EvalContext;

fn takes_part_in_access(obj: &JackValue) -> bool {
    obj.is_heap() && !matches!(obj, JackValue::Function(_))
}

/// Reads the own member of `obj` under `key`, if there is one.
pub fn get_own_property(obj: &JackValue, key: &JackValue) -> Result<Option<JackValue>, JErrorType> {
    Ok(match obj {
        JackValue::List(l) => to_sequence_index(key).and_then(|i| l.borrow().get(i).cloned()),
        JackValue::Tuple(t) => to_sequence_index(key).and_then(|i| t.borrow().get(i).cloned()),
        JackValue::Buffer(b) => to_sequence_index(key)
            .and_then(|i| b.borrow().get(i).map(|byte| JackValue::integer(*byte as i64))),
        JackValue::Object(o) => o.borrow().get(&to_property_key(key)?).cloned(),
        _ => None,
    })
}

pub fn has_own_property(obj: &JackValue, key: &JackValue) -> Result<bool, JErrorType> {
    Ok(match obj {
        JackValue::Object(o) => o.borrow().has_own_property(&to_property_key(key)?),
        _ => get_own_property(obj, key)?.is_some(),
    })
}

fn to_byte(value: &JackValue) -> Result<u8, JErrorType> {
    match value {
        JackValue::Number(NumberType::Integer(i)) if (0..=255).contains(i) => Ok(*i as u8),
        other => Err(JErrorType::TypeError(format!(
            "a buffer holds bytes, got {}",
            other
        ))),
    }
}

fn require_index(obj: &JackValue, key: &JackValue) -> Result<usize, JErrorType> {
    to_sequence_index(key).ok_or_else(|| {
        JErrorType::TypeError(format!(
            "{} index must be a non-negative integer, got {}",
            obj.type_name(),
            key
        ))
    })
}

/// Built-in write for sequence and keyed values. Lists grow (padding with
/// Null); tuples and buffers keep their length.
fn write_property(obj: &JackValue, key: &JackValue, value: JackValue) -> Result<JackValue, JErrorType> {
    match obj {
        JackValue::List(l) => {
            let index = require_index(obj, key)?;
            let mut items = l.borrow_mut();
            if index >= items.len() {
                items.resize(index + 1, JackValue::Null);
            }
            items[index] = value.clone();
        }
        JackValue::Tuple(t) => {
            let index = require_index(obj, key)?;
            let mut items = t.borrow_mut();
            let len = items.len();
            match items.get_mut(index) {
                Some(slot) => *slot = value.clone(),
                None => {
                    return Err(JErrorType::TypeError(format!(
                        "index {} is outside a tuple of length {}",
                        index, len
                    )))
                }
            }
        }
        JackValue::Buffer(b) => {
            let index = require_index(obj, key)?;
            let byte = to_byte(&value)?;
            let mut bytes = b.borrow_mut();
            let len = bytes.len();
            match bytes.get_mut(index) {
                Some(slot) => *slot = byte,
                None => {
                    return Err(JErrorType::TypeError(format!(
                        "index {} is outside a buffer of length {}",
                        index, len
                    )))
                }
            }
        }
        JackValue::Object(o) => {
            o.borrow_mut().insert(to_property_key(key)?, value.clone());
        }
        _ => return Ok(JackValue::Null),
    }
    Ok(value)
}

pub fn meta_get(ctx: &mut EvalContext, obj: &JackValue, key: &JackValue) -> ValueResult {
    if !takes_part_in_access(obj) {
        return Ok(JackValue::Null);
    }
    let meta = ctx.metas.adapt(obj)?;
    if let JackValue::Form(form) = key {
        return Ok(meta.slot(form.name()));
    }
    if let Some(value) = get_own_property(obj, key)? {
        return Ok(value);
    }
    if let Some(hook) = meta.hook(HOOK_GET) {
        return call_value(ctx, &hook, vec![key.clone()]);
    }
    Ok(JackValue::Null)
}

pub fn meta_set(
    ctx: &mut EvalContext,
    obj: &JackValue,
    key: &JackValue,
    value: JackValue,
) -> ValueResult {
    if !takes_part_in_access(obj) {
        return Ok(JackValue::Null);
    }
    let meta = ctx.metas.adapt(obj)?;
    if let JackValue::Form(form) = key {
        return Ok(meta.set_slot(form.name(), value));
    }
    if has_own_property(obj, key)? {
        return Ok(write_property(obj, key, value)?);
    }
    if let Some(hook) = meta.hook(HOOK_SET) {
        return call_value(ctx, &hook, vec![key.clone(), value]);
    }
    Ok(write_property(obj, key, value)?)
}

pub fn meta_has(ctx: &mut EvalContext, obj: &JackValue, key: &JackValue) -> CompletionResult<bool> {
    let meta = ctx.metas.adapt(obj)?;
    if let JackValue::Form(form) = key {
        return Ok(!matches!(meta.slot(form.name()), JackValue::Null));
    }
    if let Some(hook) = meta.hook(HOOK_HAS) {
        let found = call_value(ctx, &hook, vec![key.clone()])?;
        return Ok(to_boolean(&found));
    }
    Ok(has_own_property(obj, key)?)
}

pub fn meta_delete(ctx: &mut EvalContext, obj: &JackValue, key: &JackValue) -> ValueResult {
    let meta = ctx.metas.adapt(obj)?;
    if let JackValue::Form(form) = key {
        meta.set_slot(form.name(), JackValue::Null);
        return Ok(JackValue::Null);
    }
    if let Some(hook) = meta.hook(HOOK_DELETE) {
        return call_value(ctx, &hook, vec![key.clone()]);
    }
    match obj {
        JackValue::Object(o) => {
            o.borrow_mut().remove(&to_property_key(key)?);
        }
        JackValue::List(_) | JackValue::Tuple(_) => {
            if has_own_property(obj, key)? {
                write_property(obj, key, JackValue::Null)?;
            }
        }
        JackValue::Buffer(_) => {
            if has_own_property(obj, key)? {
                write_property(obj, key, JackValue::integer(0))?;
            }
        }
        _ => {}
    }
    Ok(JackValue::Null)
}

pub fn meta_len(ctx: &mut EvalContext, obj: &JackValue, meta: &MetaRecordRef) -> CompletionResult<usize> {
    if let Some(hook) = meta.hook(HOOK_LEN) {
        return match call_value(ctx, &hook, vec![])? {
            JackValue::Number(NumberType::Integer(n)) if n >= 0 => Ok(n as usize),
            other => Err(JErrorType::TypeError(format!(
                "len hook returned {}, expected a non-negative integer",
                other
            ))
            .into()),
        };
    }
    Ok(match obj {
        JackValue::List(l) => l.borrow().len(),
        JackValue::Tuple(t) => t.borrow().len(),
        JackValue::Buffer(b) => b.borrow().len(),
        _ => 0,
    })
}

pub fn meta_keys(
    ctx: &mut EvalContext,
    obj: &JackValue,
    meta: &MetaRecordRef,
) -> CompletionResult<Vec<JackValue>> {
    if let Some(hook) = meta.hook(HOOK_KEYS) {
        return match call_value(ctx, &hook, vec![])? {
            JackValue::List(l) => Ok(l.borrow().clone()),
            JackValue::Tuple(t) => Ok(t.borrow().to_vec()),
            other => Err(JErrorType::TypeError(format!(
                "keys hook returned {}, expected a list",
                other
            ))
            .into()),
        };
    }
    Ok(match obj {
        JackValue::Object(o) if meta.kind() == MetaKind::Keyed => {
            o.borrow().keys().map(|k| k.to_value()).collect()
        }
        _ => vec![],
    })
}

/// One step of the generator protocol: call with no arguments.
pub fn meta_call(ctx: &mut EvalContext, obj: &JackValue, meta: &MetaRecordRef) -> ValueResult {
    match meta.hook(HOOK_CALL) {
        Some(hook) => call_value(ctx, &hook, vec![]),
        None => call_value(ctx, obj, vec![]),
    }
}
