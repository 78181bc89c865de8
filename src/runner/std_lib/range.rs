//! The `range` global and its generators.

use std::cell::Cell;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::operations::type_conversion::to_number;
use crate::runner::ds::value::JackValue;
use crate::runner::eval::ValueResult;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

pub fn register(registry: &mut BuiltInRegistry) {
    registry.register_function("range", range);
}

/// range(n) - a generator yielding `0, 1, ..., n-1`, then Null on every
/// later call. A missing `n` counts as zero.
fn range(_ctx: &mut EvalContext, args: Vec<JackValue>) -> ValueResult {
    let limit = match args.first() {
        None | Some(JackValue::Null) => 0.0,
        Some(value) => to_number(value)?.as_f64(),
    };
    if limit.is_nan() {
        return Err(JErrorType::TypeError("range limit is NaN".to_string()).into());
    }
    Ok(counter(limit).into_value())
}

fn counter(limit: f64) -> FunctionObject {
    let next = Cell::new(0_i64);
    FunctionObject::host("range", move |_, _| {
        let current = next.get();
        if (current as f64) < limit {
            next.set(current + 1);
            Ok(JackValue::integer(current))
        } else {
            Ok(JackValue::Null)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::eval::function::call_value;
    use crate::runner::plugin::config::EvalConfig;

    #[test]
    fn test_generator_yields_then_stays_exhausted() {
        let mut ctx = EvalContext::bare(EvalConfig::default());
        let generator = range(&mut ctx, vec![JackValue::integer(2)]).unwrap();
        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(call_value(&mut ctx, &generator, vec![]).unwrap());
        }
        assert_eq!(
            seen,
            vec![
                JackValue::integer(0),
                JackValue::integer(1),
                JackValue::Null,
                JackValue::Null
            ]
        );
    }

    #[test]
    fn test_non_numeric_limit_is_rejected() {
        let mut ctx = EvalContext::bare(EvalConfig::default());
        assert!(range(&mut ctx, vec![JackValue::string("3")]).is_err());
    }
}
