//! The `print` global.

use crate::runner::ds::value::JackValue;
use crate::runner::eval::ValueResult;
use crate::runner::plugin::registry::BuiltInRegistry;
use crate::runner::plugin::types::EvalContext;

/// Register `print` with the registry.
pub fn register(registry: &mut BuiltInRegistry) {
    registry.register_function("print", print);
}

/// Format all arguments for output, separated by spaces.
pub fn format_args(args: &[JackValue]) -> String {
    args.iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// print - write a line to the context's output sink.
fn print(ctx: &mut EvalContext, args: Vec<JackValue>) -> ValueResult {
    ctx.write_line(&format_args(&args))?;
    Ok(JackValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::error::JErrorType;
    use std::io;

    struct ClosedSink;

    impl io::Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_reports_sink_failures() {
        let mut ctx = EvalContext::new();
        ctx.set_output(Box::new(ClosedSink));
        assert!(matches!(
            ctx.evaluate("(@call print 1)"),
            Err(JErrorType::OutputError(_))
        ));
    }

    #[test]
    fn test_format_args() {
        let args = vec![
            JackValue::string("x"),
            JackValue::integer(1),
            JackValue::float(2.5),
            JackValue::Null,
            JackValue::new_list(vec![JackValue::Boolean(true)]),
        ];
        assert_eq!(format_args(&args), "x 1 2.5 null [true]");
    }
}
