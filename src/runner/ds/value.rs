use std::cell::RefCell;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object::{KeyedObject, PropertyKey};
use crate::runner::ds::operations::type_conversion::{
    TYPE_STR_BOOLEAN, TYPE_STR_BUFFER, TYPE_STR_FORM, TYPE_STR_FUNCTION, TYPE_STR_LIST,
    TYPE_STR_NULL, TYPE_STR_NUMBER, TYPE_STR_OBJECT, TYPE_STR_STRING, TYPE_STR_SYMBOL,
    TYPE_STR_TUPLE,
};
use crate::runner::ds::symbol::{Form, Symbol};

pub type BufferRef = Rc<RefCell<Vec<u8>>>;
pub type ListRef = Rc<RefCell<Vec<JackValue>>>;
pub type TupleRef = Rc<RefCell<Box<[JackValue]>>>;
pub type ObjectRef = Rc<RefCell<KeyedObject>>;
pub type FunctionRef = Rc<FunctionObject>;

pub enum JackValue {
    /// The "no value" marker: unset variables, missing arguments, the end of
    /// a generator.
    Null,
    Boolean(bool),
    Number(NumberType),
    String(String),
    Symbol(Symbol),
    Form(Form),
    Buffer(BufferRef),
    List(ListRef),
    Tuple(TupleRef),
    Object(ObjectRef),
    Function(FunctionRef),
}

impl JackValue {
    pub fn integer(i: i64) -> Self {
        JackValue::Number(NumberType::Integer(i))
    }

    pub fn float(f: f64) -> Self {
        JackValue::Number(NumberType::Float(f))
    }

    pub fn string(s: impl Into<String>) -> Self {
        JackValue::String(s.into())
    }

    pub fn new_list(items: Vec<JackValue>) -> Self {
        JackValue::List(Rc::new(RefCell::new(items)))
    }

    pub fn new_tuple(items: Vec<JackValue>) -> Self {
        JackValue::Tuple(Rc::new(RefCell::new(items.into_boxed_slice())))
    }

    pub fn new_buffer(bytes: Vec<u8>) -> Self {
        JackValue::Buffer(Rc::new(RefCell::new(bytes)))
    }

    pub fn new_object(object: KeyedObject) -> Self {
        JackValue::Object(Rc::new(RefCell::new(object)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JackValue::Null)
    }

    /// Values with reference identity. Only these can be adapted by the meta
    /// registry.
    pub fn is_heap(&self) -> bool {
        matches!(
            self,
            JackValue::Buffer(_)
                | JackValue::List(_)
                | JackValue::Tuple(_)
                | JackValue::Object(_)
                | JackValue::Function(_)
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JackValue::Null => TYPE_STR_NULL,
            JackValue::Boolean(_) => TYPE_STR_BOOLEAN,
            JackValue::Number(_) => TYPE_STR_NUMBER,
            JackValue::String(_) => TYPE_STR_STRING,
            JackValue::Symbol(_) => TYPE_STR_SYMBOL,
            JackValue::Form(_) => TYPE_STR_FORM,
            JackValue::Buffer(_) => TYPE_STR_BUFFER,
            JackValue::List(_) => TYPE_STR_LIST,
            JackValue::Tuple(_) => TYPE_STR_TUPLE,
            JackValue::Object(_) => TYPE_STR_OBJECT,
            JackValue::Function(_) => TYPE_STR_FUNCTION,
        }
    }
}

impl Clone for JackValue {
    fn clone(&self) -> Self {
        match self {
            JackValue::Null => JackValue::Null,
            JackValue::Boolean(b) => JackValue::Boolean(*b),
            JackValue::Number(n) => JackValue::Number(n.clone()),
            JackValue::String(s) => JackValue::String(s.to_string()),
            JackValue::Symbol(s) => JackValue::Symbol(s.clone()),
            JackValue::Form(f) => JackValue::Form(f.clone()),
            JackValue::Buffer(b) => JackValue::Buffer(b.clone()),
            JackValue::List(l) => JackValue::List(l.clone()),
            JackValue::Tuple(t) => JackValue::Tuple(t.clone()),
            JackValue::Object(o) => JackValue::Object(o.clone()),
            JackValue::Function(f) => JackValue::Function(f.clone()),
        }
    }
}

impl Display for JackValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JackValue::Null => write!(f, "{}", TYPE_STR_NULL),
            JackValue::Boolean(b) => write!(f, "{}", b),
            JackValue::Number(n) => write!(f, "{}", n),
            JackValue::String(s) => write!(f, "{}", s),
            JackValue::Symbol(s) => write!(f, "{}", s),
            JackValue::Form(form) => write!(f, "{}", form),
            JackValue::Buffer(b) => {
                write!(f, "<Buffer")?;
                for byte in b.borrow().iter() {
                    write!(f, " {:02x}", byte)?;
                }
                write!(f, ">")
            }
            JackValue::List(l) => {
                write!(f, "[")?;
                write_items(f, l.borrow().iter())?;
                write!(f, "]")
            }
            JackValue::Tuple(t) => {
                write!(f, "(")?;
                write_items(f, t.borrow().iter())?;
                write!(f, ")")
            }
            JackValue::Object(o) => {
                write!(f, "{{")?;
                for (i, (key, value)) in o.borrow().entries().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match key {
                        PropertyKey::Str(s) => write!(f, "{}: {}", s, value)?,
                        PropertyKey::Sym(s) => write!(f, "{}: {}", s, value)?,
                    }
                }
                write!(f, "}}")
            }
            JackValue::Function(func) => write!(f, "[Function {}]", func.name()),
        }
    }
}

fn write_items<'a>(
    f: &mut Formatter<'_>,
    items: impl Iterator<Item = &'a JackValue>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Debug for JackValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JackValue::Null => write!(f, "JackValue::Null"),
            JackValue::Boolean(b) => write!(f, "JackValue::Boolean({})", b),
            JackValue::Number(n) => write!(f, "JackValue::Number({:?})", n),
            JackValue::String(s) => write!(f, "JackValue::String({:?})", s),
            JackValue::Symbol(s) => write!(f, "JackValue::Symbol({})", s),
            JackValue::Form(form) => write!(f, "JackValue::Form({})", form),
            JackValue::Function(func) => write!(f, "JackValue::Function({})", func.name()),
            other => write!(f, "JackValue::{}({})", other.type_name(), other),
        }
    }
}

/// Strict equality: no coercion, except that integers and floats compare by
/// numeric value. Heap values compare by identity.
impl PartialEq for JackValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JackValue::Null, JackValue::Null) => true,
            (JackValue::Boolean(a), JackValue::Boolean(b)) => a == b,
            (JackValue::Number(a), JackValue::Number(b)) => a == b,
            (JackValue::String(a), JackValue::String(b)) => a == b,
            (JackValue::Symbol(a), JackValue::Symbol(b)) => a == b,
            (JackValue::Form(a), JackValue::Form(b)) => a == b,
            (JackValue::Buffer(a), JackValue::Buffer(b)) => Rc::ptr_eq(a, b),
            (JackValue::List(a), JackValue::List(b)) => Rc::ptr_eq(a, b),
            (JackValue::Tuple(a), JackValue::Tuple(b)) => Rc::ptr_eq(a, b),
            (JackValue::Object(a), JackValue::Object(b)) => Rc::ptr_eq(a, b),
            (JackValue::Function(a), JackValue::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub enum NumberType {
    Integer(i64),
    Float(f64),
}

impl NumberType {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumberType::Integer(i) => *i as f64,
            NumberType::Float(f) => *f,
        }
    }
}

impl Display for NumberType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumberType::Integer(i) => write!(f, "{}", i),
            NumberType::Float(nf) => {
                if nf.is_nan() {
                    write!(f, "NaN")
                } else if nf.is_infinite() {
                    write!(f, "{}", if *nf > 0.0 { "Infinity" } else { "-Infinity" })
                } else if nf.fract() == 0.0 && nf.abs() < 1e15 {
                    write!(f, "{:.0}", nf)
                } else {
                    write!(f, "{}", nf)
                }
            }
        }
    }
}

impl Clone for NumberType {
    fn clone(&self) -> Self {
        match self {
            NumberType::Integer(i) => NumberType::Integer(*i),
            NumberType::Float(nf) => NumberType::Float(*nf),
        }
    }
}

impl PartialEq for NumberType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumberType::Integer(a), NumberType::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}
