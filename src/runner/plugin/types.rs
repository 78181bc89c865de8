//! Interpreter state shared by every evaluation step.

use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::rc::Rc;

use crate::parser::ast::CodeNode;
use crate::parser::{CodeParser, CodeTreeParser};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::lex_env::LexEnvironmentRef;
use crate::runner::ds::meta::MetaRegistry;
use crate::runner::ds::operations::lex_env::{
    declare_binding, lookup_binding, new_declarative_environment,
};
use crate::runner::ds::symbol::Interner;
use crate::runner::ds::value::JackValue;
use crate::runner::eval::{run_codes, Completion};

use super::config::EvalConfig;
use super::registry::BuiltInRegistry;

/// Execution context threaded through the evaluator and handed to native
/// functions.
///
/// It owns the global frame, the form/symbol interner, the meta registry,
/// the parser used by `eval`, and the sink `print` writes to.
pub struct EvalContext {
    pub interner: Rc<Interner>,
    pub metas: MetaRegistry,
    pub config: EvalConfig,
    global_env: LexEnvironmentRef,
    parser: Rc<dyn CodeParser>,
    output: Box<dyn Write>,
    call_depth: usize,
}

impl EvalContext {
    /// A context with default configuration and the core host globals.
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        let mut ctx = Self::bare(config);
        ctx.install_core_builtins(BuiltInRegistry::with_core());
        ctx
    }

    /// Load the configuration from a JSON file.
    pub fn from_config_file(path: &Path) -> Result<Self, JErrorType> {
        Ok(Self::with_config(EvalConfig::load(path)?))
    }

    /// A context with an empty global frame.
    pub fn bare(config: EvalConfig) -> Self {
        EvalContext {
            interner: Rc::new(Interner::new()),
            metas: MetaRegistry::new(config.meta_sweep_threshold),
            config,
            global_env: new_declarative_environment(None),
            parser: Rc::new(CodeTreeParser),
            output: Box::new(io::stdout()),
            call_depth: 0,
        }
    }

    /// Install every global of `registry` into the global frame.
    pub fn install_core_builtins(&mut self, registry: BuiltInRegistry) {
        for (name, value) in registry.into_globals() {
            self.define_global(&name, value);
        }
    }

    pub fn global_env(&self) -> &LexEnvironmentRef {
        &self.global_env
    }

    pub fn define_global(&mut self, name: &str, value: JackValue) {
        declare_binding(&self.global_env, name, value);
    }

    /// Read a binding from the global frame.
    pub fn get_binding(&self, name: &str) -> Result<JackValue, JErrorType> {
        lookup_binding(&self.global_env, name)
    }

    pub fn set_parser(&mut self, parser: impl CodeParser + 'static) {
        self.parser = Rc::new(parser);
    }

    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    /// Write one line to the output sink.
    pub fn write_line(&mut self, line: &str) -> Result<(), JErrorType> {
        writeln!(self.output, "{}", line)
            .and_then(|_| self.output.flush())
            .map_err(|e| JErrorType::OutputError(e.to_string()))
    }

    pub fn parse(&self, source: &str) -> Result<Vec<CodeNode>, JErrorType> {
        let codes = self.parser.parse(source, &self.interner)?;
        tracing::debug!(nodes = codes.len(), "parsed source");
        Ok(codes)
    }

    /// Parse and run a whole program.
    pub fn evaluate(&mut self, source: &str) -> Result<JackValue, JErrorType> {
        let result = self.parse(source).and_then(|codes| self.run_codes_isolated(&codes));
        self.finish(result)
    }

    /// Run an already built program.
    pub fn run_program(&mut self, codes: &[CodeNode]) -> Result<JackValue, JErrorType> {
        let result = self.run_codes_isolated(codes);
        self.finish(result)
    }

    /// Programs run in a fresh child of the global frame, so their top-level
    /// declarations do not leak into later programs.
    fn run_codes_isolated(&mut self, codes: &[CodeNode]) -> Result<JackValue, JErrorType> {
        let frame = new_declarative_environment(Some(self.global_env.clone()));
        match run_codes(self, codes, &frame) {
            Ok(value) => Ok(value),
            Err(Completion::Return(_)) => Err(JErrorType::ReturnOutsideFunction),
            Err(Completion::Throw(error)) => Err(error),
        }
    }

    fn finish(&mut self, result: Result<JackValue, JErrorType>) -> Result<JackValue, JErrorType> {
        if let Err(error) = &result {
            if self.config.exit_on_fatal {
                let _ = self.output.flush();
                eprintln!("{}", error);
                process::exit(1);
            }
        }
        result
    }

    pub(crate) fn enter_call(&mut self) -> Result<(), JErrorType> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(JErrorType::StackOverflow(self.config.max_call_depth));
        }
        self.call_depth += 1;
        Ok(())
    }

    pub(crate) fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
