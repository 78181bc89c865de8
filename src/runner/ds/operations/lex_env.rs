use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::ds::env_record::{DeclarativeEnvironmentRecord, EnvironmentRecord};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::{LexEnvironment, LexEnvironmentRef};
use crate::runner::ds::value::JackValue;

pub fn new_declarative_environment(outer_lex: Option<LexEnvironmentRef>) -> LexEnvironmentRef {
    Rc::new(RefCell::new(LexEnvironment {
        inner: DeclarativeEnvironmentRecord::new(),
        outer: outer_lex,
    }))
}

/// Frame for a function call: a child of the closure's captured frame that
/// carries the call's argument list.
pub fn new_function_environment(
    closure_env: &LexEnvironmentRef,
    arguments: Vec<JackValue>,
) -> LexEnvironmentRef {
    Rc::new(RefCell::new(LexEnvironment {
        inner: DeclarativeEnvironmentRecord::with_arguments(arguments),
        outer: Some(closure_env.clone()),
    }))
}

/// The nearest frame, starting at `lex`, that owns `name`.
pub fn get_identifier_reference(lex: &LexEnvironmentRef, name: &str) -> Option<LexEnvironmentRef> {
    let mut current = Some(lex.clone());
    while let Some(env) = current {
        if env.borrow().inner.has_binding(name) {
            return Some(env);
        }
        current = env.borrow().outer.clone();
    }
    None
}

pub fn lookup_binding(lex: &LexEnvironmentRef, name: &str) -> Result<JackValue, JErrorType> {
    match get_identifier_reference(lex, name) {
        Some(env) => env.borrow().inner.get_binding_value(name),
        None => Err(JErrorType::UnboundName(name.to_string())),
    }
}

/// Writes to the nearest owning frame. Never creates a binding.
pub fn assign_binding(
    lex: &LexEnvironmentRef,
    name: &str,
    value: JackValue,
) -> Result<(), JErrorType> {
    match get_identifier_reference(lex, name) {
        Some(env) => env.borrow_mut().inner.set_mutable_binding(name, value),
        None => Err(JErrorType::UnboundName(name.to_string())),
    }
}

/// Binds `name` in `lex` itself, shadowing any ancestor binding.
pub fn declare_binding(lex: &LexEnvironmentRef, name: &str, value: JackValue) {
    lex.borrow_mut()
        .inner
        .create_mutable_binding(name.to_string(), value);
}
