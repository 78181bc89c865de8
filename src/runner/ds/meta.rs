//! Per-value meta records.
//!
//! Every heap value that takes part in generic access (`get`, `set`, `in`,
//! `delete`, `for`) is adapted to a [`MetaRecord`] describing which access
//! capabilities it supports. Records are created lazily, cached per value
//! identity, and keep their capability set for life even if the value's
//! shape changes later.
//!
//! Records also carry form-keyed slots: writing a function into the slot
//! named after a capability (`len`, `keys`, `call`, `get`, `set`, `has`,
//! `delete`) overrides that capability for the value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object::KeyedObject;
use crate::runner::ds::value::JackValue;

pub const HOOK_LEN: &str = "len";
pub const HOOK_KEYS: &str = "keys";
pub const HOOK_CALL: &str = "call";
pub const HOOK_GET: &str = "get";
pub const HOOK_SET: &str = "set";
pub const HOOK_HAS: &str = "has";
pub const HOOK_DELETE: &str = "delete";

/// Intrinsic kind, fixed when the record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    /// Lists, tuples and buffers: `len` plus index-based get/set/delete.
    Sequence,
    /// Functions: `call`, which doubles as the generator protocol.
    Callable,
    /// Keyed objects: `keys` plus get/set/has/delete by key.
    Keyed,
}

pub struct MetaRecord {
    kind: MetaKind,
    slots: RefCell<HashMap<String, JackValue>>,
}

pub type MetaRecordRef = Rc<MetaRecord>;

impl MetaRecord {
    fn new(kind: MetaKind) -> Self {
        MetaRecord {
            kind,
            slots: RefCell::new(HashMap::new()),
        }
    }

    pub fn kind(&self) -> MetaKind {
        self.kind
    }

    pub fn slot(&self, name: &str) -> JackValue {
        self.slots
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(JackValue::Null)
    }

    pub fn set_slot(&self, name: &str, value: JackValue) -> JackValue {
        self.slots
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        value
    }

    /// The override installed for capability `name`, if any.
    pub fn hook(&self, name: &str) -> Option<JackValue> {
        match self.slot(name) {
            JackValue::Null => None,
            hook => Some(hook),
        }
    }

    pub fn has_len(&self) -> bool {
        self.kind == MetaKind::Sequence || self.hook(HOOK_LEN).is_some()
    }

    pub fn has_call(&self) -> bool {
        self.kind == MetaKind::Callable || self.hook(HOOK_CALL).is_some()
    }

    pub fn has_keys(&self) -> bool {
        self.kind == MetaKind::Keyed || self.hook(HOOK_KEYS).is_some()
    }

    pub fn has_get(&self) -> bool {
        self.kind != MetaKind::Callable || self.hook(HOOK_GET).is_some()
    }

    pub fn has_set(&self) -> bool {
        self.kind != MetaKind::Callable || self.hook(HOOK_SET).is_some()
    }

    pub fn has_has(&self) -> bool {
        self.kind == MetaKind::Keyed || self.hook(HOOK_HAS).is_some()
    }

    pub fn has_delete(&self) -> bool {
        self.kind != MetaKind::Callable || self.hook(HOOK_DELETE).is_some()
    }
}

/// Weak handle used to tell whether a cached value is still alive. Holding it
/// also pins the allocation, so the address key cannot be reused by another
/// value while the entry exists.
enum WeakHeap {
    Buffer(Weak<RefCell<Vec<u8>>>),
    List(Weak<RefCell<Vec<JackValue>>>),
    Tuple(Weak<RefCell<Box<[JackValue]>>>),
    Object(Weak<RefCell<KeyedObject>>),
    Function(Weak<FunctionObject>),
}

impl WeakHeap {
    fn is_alive(&self) -> bool {
        match self {
            WeakHeap::Buffer(w) => w.strong_count() > 0,
            WeakHeap::List(w) => w.strong_count() > 0,
            WeakHeap::Tuple(w) => w.strong_count() > 0,
            WeakHeap::Object(w) => w.strong_count() > 0,
            WeakHeap::Function(w) => w.strong_count() > 0,
        }
    }
}

fn heap_handle(value: &JackValue) -> Option<(usize, WeakHeap, MetaKind)> {
    Some(match value {
        JackValue::Buffer(b) => (
            Rc::as_ptr(b) as *const () as usize,
            WeakHeap::Buffer(Rc::downgrade(b)),
            MetaKind::Sequence,
        ),
        JackValue::List(l) => (
            Rc::as_ptr(l) as *const () as usize,
            WeakHeap::List(Rc::downgrade(l)),
            MetaKind::Sequence,
        ),
        JackValue::Tuple(t) => (
            Rc::as_ptr(t) as *const () as usize,
            WeakHeap::Tuple(Rc::downgrade(t)),
            MetaKind::Sequence,
        ),
        JackValue::Object(o) => (
            Rc::as_ptr(o) as *const () as usize,
            WeakHeap::Object(Rc::downgrade(o)),
            MetaKind::Keyed,
        ),
        JackValue::Function(f) => (
            Rc::as_ptr(f) as *const () as usize,
            WeakHeap::Function(Rc::downgrade(f)),
            MetaKind::Callable,
        ),
        _ => return None,
    })
}

/// Side table from value identity to meta record.
///
/// Entries never keep their value alive. Dead entries are reclaimed in
/// batches once the table outgrows twice its live size.
pub struct MetaRegistry {
    records: HashMap<usize, (WeakHeap, MetaRecordRef)>,
    min_sweep: usize,
    sweep_at: usize,
}

impl MetaRegistry {
    pub fn new(sweep_threshold: usize) -> Self {
        let min_sweep = sweep_threshold.max(1);
        MetaRegistry {
            records: HashMap::new(),
            min_sweep,
            sweep_at: min_sweep,
        }
    }

    /// The record for `value`, created on first use. Only heap values have
    /// identity; anything else is a type error.
    pub fn adapt(&mut self, value: &JackValue) -> Result<MetaRecordRef, JErrorType> {
        let (address, weak, kind) = heap_handle(value).ok_or_else(|| {
            JErrorType::TypeError(format!(
                "a {} has no meta record",
                value.type_name()
            ))
        })?;
        if let Some((_, record)) = self.records.get(&address) {
            return Ok(record.clone());
        }
        if self.records.len() >= self.sweep_at {
            self.sweep();
        }
        tracing::debug!(?kind, address, "creating meta record");
        let record = Rc::new(MetaRecord::new(kind));
        self.records.insert(address, (weak, record.clone()));
        Ok(record)
    }

    /// The cached record for `value`, without creating one.
    pub fn peek(&self, value: &JackValue) -> Option<MetaRecordRef> {
        let (address, _, _) = heap_handle(value)?;
        self.records.get(&address).map(|(_, record)| record.clone())
    }

    /// Drops entries whose value is gone. Returns how many were dropped.
    pub fn sweep(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|_, (weak, _)| weak.is_alive());
        let reclaimed = before - self.records.len();
        self.sweep_at = (self.records.len() * 2).max(self.min_sweep);
        tracing::debug!(reclaimed, live = self.records.len(), "swept meta records");
        reclaimed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
