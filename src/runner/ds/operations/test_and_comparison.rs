use std::cmp::Ordering;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::{JackValue, NumberType};

pub fn strict_equality_comparison(a: &JackValue, b: &JackValue) -> bool {
    a == b
}

/// Ordering between two numbers or two strings. `None` when either side is
/// NaN. Any other pairing is a type error.
pub fn compare_values(a: &JackValue, b: &JackValue) -> Result<Option<Ordering>, JErrorType> {
    match (a, b) {
        (JackValue::Number(NumberType::Integer(x)), JackValue::Number(NumberType::Integer(y))) => {
            Ok(Some(x.cmp(y)))
        }
        (JackValue::Number(x), JackValue::Number(y)) => Ok(x.as_f64().partial_cmp(&y.as_f64())),
        (JackValue::String(x), JackValue::String(y)) => Ok(Some(x.cmp(y))),
        _ => Err(JErrorType::TypeError(format!(
            "cannot compare {} with {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

pub fn less_than(a: &JackValue, b: &JackValue) -> Result<bool, JErrorType> {
    Ok(matches!(compare_values(a, b)?, Some(Ordering::Less)))
}

pub fn less_than_or_equal(a: &JackValue, b: &JackValue) -> Result<bool, JErrorType> {
    Ok(matches!(
        compare_values(a, b)?,
        Some(Ordering::Less) | Some(Ordering::Equal)
    ))
}
