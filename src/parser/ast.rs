use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::symbol::{Form, Symbol};
use crate::runner::ds::value::JackValue;

/// A node of a code tree.
///
/// Arguments of a tagged node are not evaluated up front; the operation
/// decides what to run, when, and how often.
#[derive(Clone, Debug)]
pub enum CodeNode {
    /// Passed through unchanged.
    Literal(JackValue),
    /// Variable read.
    Symbol(Symbol),
    /// `[form, arg0, arg1, ...]`
    Tagged(Form, Vec<CodeNode>),
    /// A bare list of nodes: a body, or a list of binding names.
    Sequence(Vec<CodeNode>),
}

impl CodeNode {
    pub fn tagged(form: Form, args: Vec<CodeNode>) -> Self {
        CodeNode::Tagged(form, args)
    }

    pub fn literal(value: JackValue) -> Self {
        CodeNode::Literal(value)
    }

    /// Nodes making up a body. A lone node is a body of one.
    pub fn as_codes(&self) -> &[CodeNode] {
        match self {
            CodeNode::Sequence(codes) => codes,
            other => std::slice::from_ref(other),
        }
    }

    /// Name carried by a binding position: a string literal or a symbol.
    pub fn as_name(&self) -> Result<&str, JErrorType> {
        match self {
            CodeNode::Literal(JackValue::String(name)) => Ok(name),
            CodeNode::Symbol(symbol) => Ok(symbol.name()),
            other => Err(JErrorType::MalformedCode(format!(
                "expected a name, found {}",
                other
            ))),
        }
    }

    /// Names listed in a binding list such as the one `for` takes.
    pub fn as_names(&self) -> Result<Vec<&str>, JErrorType> {
        self.as_codes().iter().map(|code| code.as_name()).collect()
    }
}

impl Display for CodeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CodeNode::Literal(JackValue::String(s)) => write!(f, "{:?}", s),
            CodeNode::Literal(value) => write!(f, "{}", value),
            CodeNode::Symbol(symbol) => write!(f, "{}", symbol.name()),
            CodeNode::Tagged(form, args) => {
                write!(f, "({}", form)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
            CodeNode::Sequence(codes) => {
                write!(f, "[")?;
                for (i, code) in codes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", code)?;
                }
                write!(f, "]")
            }
        }
    }
}
