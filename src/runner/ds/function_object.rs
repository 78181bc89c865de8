use std::rc::Rc;

use crate::parser::ast::CodeNode;
use crate::runner::ds::lex_env::LexEnvironmentRef;
use crate::runner::ds::value::JackValue;
use crate::runner::eval::types::ValueResult;
use crate::runner::plugin::types::EvalContext;

/// Function signature for built-in functions.
pub type NativeFn = fn(ctx: &mut EvalContext, args: Vec<JackValue>) -> ValueResult;

/// Built-in function carrying its own state (generators handed out by `range`).
pub type HostFn = Box<dyn Fn(&mut EvalContext, Vec<JackValue>) -> ValueResult>;

/// A script function: the frame it was created in plus its body.
pub struct Closure {
    pub env: LexEnvironmentRef,
    pub codes: Rc<Vec<CodeNode>>,
}

pub enum FunctionObject {
    Closure(Closure),
    Native { name: String, func: NativeFn },
    Host { name: String, func: HostFn },
}

impl FunctionObject {
    pub fn native(name: impl Into<String>, func: NativeFn) -> Self {
        FunctionObject::Native {
            name: name.into(),
            func,
        }
    }

    pub fn host(
        name: impl Into<String>,
        func: impl Fn(&mut EvalContext, Vec<JackValue>) -> ValueResult + 'static,
    ) -> Self {
        FunctionObject::Host {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FunctionObject::Closure(_) => "anonymous",
            FunctionObject::Native { name, .. } => name,
            FunctionObject::Host { name, .. } => name,
        }
    }

    pub fn into_value(self) -> JackValue {
        JackValue::Function(Rc::new(self))
    }
}
