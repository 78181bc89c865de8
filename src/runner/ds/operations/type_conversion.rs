use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::PropertyKey;
use crate::runner::ds::value::{JackValue, NumberType};

pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_FORM: &str = "form";
pub const TYPE_STR_BUFFER: &str = "buffer";
pub const TYPE_STR_LIST: &str = "list";
pub const TYPE_STR_TUPLE: &str = "tuple";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn to_boolean(value: &JackValue) -> bool {
    match value {
        JackValue::Null => false,
        JackValue::Boolean(b) => *b,
        JackValue::Number(n) => match n {
            NumberType::Integer(i) => *i != 0,
            NumberType::Float(f) => !(*f == 0.0 || f.is_nan()),
        },
        JackValue::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Text used when a value is spliced into a string. Matches what `print`
/// shows.
pub fn to_string(value: &JackValue) -> String {
    value.to_string()
}

pub fn to_number(value: &JackValue) -> Result<&NumberType, JErrorType> {
    match value {
        JackValue::Number(n) => Ok(n),
        other => Err(JErrorType::TypeError(format!(
            "expected a number, got {}",
            other.type_name()
        ))),
    }
}

pub fn to_property_key(value: &JackValue) -> Result<PropertyKey, JErrorType> {
    match value {
        JackValue::Symbol(s) => Ok(PropertyKey::Sym(s.clone())),
        JackValue::String(s) => Ok(PropertyKey::Str(s.clone())),
        JackValue::Null => Ok(PropertyKey::Str("undefined".to_string())),
        JackValue::Boolean(_) | JackValue::Number(_) => Ok(PropertyKey::Str(to_string(value))),
        other => Err(JErrorType::TypeError(format!(
            "a {} cannot be used as an object key",
            other.type_name()
        ))),
    }
}

/// Index for `value` when it names a sequence position: a non-negative
/// integer or the canonical decimal string of one.
pub fn to_sequence_index(value: &JackValue) -> Option<usize> {
    match value {
        JackValue::Number(NumberType::Integer(i)) if *i >= 0 => Some(*i as usize),
        JackValue::Number(NumberType::Float(f)) if *f >= 0.0 && f.fract() == 0.0 => {
            Some(*f as usize)
        }
        JackValue::String(s) => canonical_numeric_index_string(s),
        _ => None,
    }
}

pub fn canonical_numeric_index_string(s: &str) -> Option<usize> {
    let index = s.parse::<usize>().ok()?;
    if index.to_string() == s {
        Some(index)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!to_boolean(&JackValue::Null));
        assert!(!to_boolean(&JackValue::integer(0)));
        assert!(!to_boolean(&JackValue::float(f64::NAN)));
        assert!(!to_boolean(&JackValue::string("")));
        assert!(to_boolean(&JackValue::string("0")));
        assert!(to_boolean(&JackValue::new_list(vec![])));
    }

    #[test]
    fn test_canonical_index() {
        assert_eq!(canonical_numeric_index_string("12"), Some(12));
        assert_eq!(canonical_numeric_index_string("012"), None);
        assert_eq!(canonical_numeric_index_string("-1"), None);
        assert_eq!(to_sequence_index(&JackValue::integer(-1)), None);
        assert_eq!(to_sequence_index(&JackValue::string("3")), Some(3));
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(
            to_property_key(&JackValue::integer(1)),
            Ok(PropertyKey::Str("1".to_string()))
        );
        assert_eq!(
            to_property_key(&JackValue::Null),
            Ok(PropertyKey::Str("undefined".to_string()))
        );
        assert!(to_property_key(&JackValue::new_list(vec![])).is_err());
    }

    #[test]
    fn test_null_splices_as_it_prints() {
        assert_eq!(to_string(&JackValue::Null), JackValue::Null.to_string());
        assert_eq!(to_string(&JackValue::Null), "null");
    }
}
