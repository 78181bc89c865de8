use std::collections::HashMap;

use crate::runner::ds::symbol::Symbol;
use crate::runner::ds::value::JackValue;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Sym(Symbol),
}

impl PropertyKey {
    pub fn to_value(&self) -> JackValue {
        match self {
            PropertyKey::Str(s) => JackValue::String(s.clone()),
            PropertyKey::Sym(s) => JackValue::Symbol(s.clone()),
        }
    }
}

/// Ordered key/value mapping with no inherited members.
///
/// Keys enumerate in first-insertion order; overwriting a key keeps its
/// position.
#[derive(Default)]
pub struct KeyedObject {
    entries: Vec<(PropertyKey, JackValue)>,
    index: HashMap<PropertyKey, usize>,
}

impl KeyedObject {
    pub fn new() -> Self {
        KeyedObject::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&JackValue> {
        self.index.get(key).map(|i| &self.entries[*i].1)
    }

    pub fn insert(&mut self, key: PropertyKey, value: JackValue) {
        match self.index.get(&key) {
            Some(i) => self.entries[*i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn remove(&mut self, key: &PropertyKey) -> Option<JackValue> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (_, i) in self.index.iter_mut() {
            if *i > position {
                *i -= 1;
            }
        }
        Some(value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PropertyKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PropertyKey, &JackValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}
