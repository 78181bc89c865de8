use std::collections::HashMap;

/// Every operation a form can name. Forms resolve to one of these when they
/// are interned; names outside this table stay unresolved and fail at
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Scope and functions
    Params,
    Vars,
    Fn,
    Call,
    Assign,
    Lookup,
    Return,
    Abort,
    Eval,
    // Control flow
    If,
    While,
    For,
    // Comparison
    Le,
    Lt,
    Eq,
    Neq,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    Unm,
    // Logic
    Or,
    And,
    Xor,
    Not,
    // Access
    In,
    Len,
    Get,
    Set,
    Delete,
    // Constructors and predicates
    List,
    Tuple,
    Object,
    Is,
}

const ALL_OPERATIONS: &[(&str, Operation)] = &[
    ("params", Operation::Params),
    ("vars", Operation::Vars),
    ("fn", Operation::Fn),
    ("call", Operation::Call),
    ("assign", Operation::Assign),
    ("lookup", Operation::Lookup),
    ("return", Operation::Return),
    ("abort", Operation::Abort),
    ("eval", Operation::Eval),
    ("if", Operation::If),
    ("while", Operation::While),
    ("for", Operation::For),
    ("le", Operation::Le),
    ("lt", Operation::Lt),
    ("eq", Operation::Eq),
    ("neq", Operation::Neq),
    ("add", Operation::Add),
    ("sub", Operation::Sub),
    ("mul", Operation::Mul),
    ("div", Operation::Div),
    ("pow", Operation::Pow),
    ("mod", Operation::Mod),
    ("unm", Operation::Unm),
    ("or", Operation::Or),
    ("and", Operation::And),
    ("xor", Operation::Xor),
    ("not", Operation::Not),
    ("in", Operation::In),
    ("len", Operation::Len),
    ("get", Operation::Get),
    ("set", Operation::Set),
    ("delete", Operation::Delete),
    ("list", Operation::List),
    ("tuple", Operation::Tuple),
    ("object", Operation::Object),
    ("is", Operation::Is),
];

lazy_static! {
    static ref OPERATIONS_BY_NAME: HashMap<&'static str, Operation> =
        ALL_OPERATIONS.iter().cloned().collect();
}

impl Operation {
    pub fn from_name(name: &str) -> Option<Self> {
        OPERATIONS_BY_NAME.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        ALL_OPERATIONS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }
}
