use std::collections::HashMap;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JackValue;

/// The bindings owned by a single scope frame.
pub trait EnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool;
    /// Creates the binding, or overwrites it when the name is already owned.
    fn create_mutable_binding(&mut self, name: String, value: JackValue);
    fn set_mutable_binding(&mut self, name: &str, value: JackValue) -> Result<(), JErrorType>;
    fn get_binding_value(&self, name: &str) -> Result<JackValue, JErrorType>;
}

pub struct DeclarativeEnvironmentRecord {
    bindings: HashMap<String, JackValue>,
    /// Call arguments, present only on frames created by a function call.
    arguments: Option<Vec<JackValue>>,
}

impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        DeclarativeEnvironmentRecord {
            bindings: HashMap::new(),
            arguments: None,
        }
    }

    pub fn with_arguments(arguments: Vec<JackValue>) -> Self {
        DeclarativeEnvironmentRecord {
            bindings: HashMap::new(),
            arguments: Some(arguments),
        }
    }

    /// Positional argument `index`, or Null when the call passed fewer.
    pub fn argument(&self, index: usize) -> JackValue {
        self.arguments
            .as_ref()
            .and_then(|args| args.get(index))
            .cloned()
            .unwrap_or(JackValue::Null)
    }
}

impl Default for DeclarativeEnvironmentRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentRecord for DeclarativeEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn create_mutable_binding(&mut self, name: String, value: JackValue) {
        self.bindings.insert(name, value);
    }

    fn set_mutable_binding(&mut self, name: &str, value: JackValue) -> Result<(), JErrorType> {
        match self.bindings.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(JErrorType::UnboundName(name.to_string())),
        }
    }

    fn get_binding_value(&self, name: &str) -> Result<JackValue, JErrorType> {
        self.bindings
            .get(name)
            .cloned()
            .ok_or_else(|| JErrorType::UnboundName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_requires_existing_binding() {
        let mut record = DeclarativeEnvironmentRecord::new();
        assert!(record.set_mutable_binding("x", JackValue::integer(1)).is_err());
        record.create_mutable_binding("x".to_string(), JackValue::Null);
        assert!(record.set_mutable_binding("x", JackValue::integer(1)).is_ok());
        assert_eq!(record.get_binding_value("x"), Ok(JackValue::integer(1)));
    }

    #[test]
    fn test_missing_arguments_are_null() {
        let record = DeclarativeEnvironmentRecord::with_arguments(vec![JackValue::integer(7)]);
        assert_eq!(record.argument(0), JackValue::integer(7));
        assert_eq!(record.argument(1), JackValue::Null);
        assert_eq!(DeclarativeEnvironmentRecord::new().argument(0), JackValue::Null);
    }
}
