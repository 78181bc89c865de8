//! Shared helpers for the integration tests.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use jack::runner::ds::error::JErrorType;
use jack::runner::ds::value::JackValue;
use jack::runner::plugin::config::EvalConfig;
use jack::runner::plugin::types::EvalContext;

/// Output sink whose contents stay readable after it is handed to a context.
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Helper to evaluate a program in a fresh context, returning the final value.
#[allow(dead_code)]
pub fn run_jack(source: &str) -> Result<JackValue, JErrorType> {
    EvalContext::new().evaluate(source)
}

/// Helper to evaluate a program, also returning everything it printed.
#[allow(dead_code)]
pub fn run_jack_with_output(source: &str) -> (Result<JackValue, JErrorType>, String) {
    run_jack_with_config(source, EvalConfig::default())
}

#[allow(dead_code)]
pub fn run_jack_with_config(
    source: &str,
    config: EvalConfig,
) -> (Result<JackValue, JErrorType>, String) {
    let output = SharedOutput::default();
    let mut ctx = EvalContext::with_config(config);
    ctx.set_output(Box::new(output.clone()));
    let result = ctx.evaluate(source);
    (result, output.contents())
}
