//! Interned identities.
//!
//! A [`Form`] tags an operation node in a code tree and a [`Symbol`] marks a
//! variable read (or serves as a key value). Both are compared by pointer:
//! interning the same name twice hands back the very same allocation, so
//! dispatch and keying never compare strings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::runner::eval::operation::Operation;

pub struct FormData {
    name: String,
    operation: Option<Operation>,
}

/// Operation tag. The operation is resolved once, when the name is interned.
#[derive(Clone)]
pub struct Form(Rc<FormData>);

impl Form {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn operation(&self) -> Option<Operation> {
        self.0.operation
    }
}

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Form {}

impl Hash for Form {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state)
    }
}

impl Display for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0.name)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0.name)
    }
}

pub struct SymbolData {
    name: String,
}

/// Variable-read marker and hashable key value.
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

impl Symbol {
    pub fn name(&self) -> &str {
        &self.0.name
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0.name)
    }
}

/// The two interning namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    Form,
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Form(Form),
    Symbol(Symbol),
}

/// Name tables for forms and symbols.
///
/// Entries are never removed: an identity handed out once stays valid, and
/// unique, for as long as the interner lives. One interner is shared by the
/// reader and the evaluator of a context.
#[derive(Default)]
pub struct Interner {
    forms: RefCell<HashMap<String, Form>>,
    symbols: RefCell<HashMap<String, Symbol>>,
}

impl Interner {
    pub fn new() -> Self {
        Interner::default()
    }

    pub fn intern(&self, kind: IdentityKind, name: &str) -> Identity {
        match kind {
            IdentityKind::Form => Identity::Form(self.form(name)),
            IdentityKind::Symbol => Identity::Symbol(self.symbol(name)),
        }
    }

    pub fn form(&self, name: &str) -> Form {
        if let Some(form) = self.forms.borrow().get(name) {
            return form.clone();
        }
        let form = Form(Rc::new(FormData {
            name: name.to_string(),
            operation: Operation::from_name(name),
        }));
        self.forms
            .borrow_mut()
            .insert(name.to_string(), form.clone());
        form
    }

    pub fn symbol(&self, name: &str) -> Symbol {
        if let Some(symbol) = self.symbols.borrow().get(name) {
            return symbol.clone();
        }
        let symbol = Symbol(Rc::new(SymbolData {
            name: name.to_string(),
        }));
        self.symbols
            .borrow_mut()
            .insert(name.to_string(), symbol.clone());
        symbol
    }

    pub fn form_count(&self) -> usize {
        self.forms.borrow().len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_interning_is_identity() {
        let interner = Interner::new();
        let a = interner.form("add");
        let b = interner.form("add");
        assert!(Rc::ptr_eq(&a.0, &b.0));
        assert_eq!(interner.form_count(), 1);
    }

    #[test]
    fn test_symbol_interning_is_identity() {
        let interner = Interner::new();
        let a = interner.symbol("x");
        let b = interner.symbol("x");
        assert_eq!(a, b);
        assert_ne!(a, interner.symbol("y"));
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let interner = Interner::new();
        let form = interner.intern(IdentityKind::Form, "len");
        let symbol = interner.intern(IdentityKind::Symbol, "len");
        assert_ne!(form, symbol);
        assert_eq!(interner.form_count(), 1);
        assert_eq!(interner.symbol_count(), 1);
    }

    #[test]
    fn test_form_resolves_operation() {
        let interner = Interner::new();
        assert_eq!(interner.form("while").operation(), Some(Operation::While));
        assert_eq!(interner.form("frobnicate").operation(), None);
    }
}
