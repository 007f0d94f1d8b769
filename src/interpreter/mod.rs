pub mod context;
pub mod error;
pub mod formatter;
mod tree;

use crate::program::Program;
use crate::string::Ident;
use crate::Integer;
use context::ExecutionContext;
use error::RunError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
pub use tree::TreeWalkStatementInterpreter;

/// Loop iterations allowed before a loop is reported as possibly infinite.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Body executions a single `while` or `for` may perform.
    pub max_iterations: usize,
}

impl InterpreterConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Runs whole programs. Holds no state between runs.
pub struct Interpreter {
    config: InterpreterConfig,
    interpreter: TreeWalkStatementInterpreter,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            config,
            interpreter: TreeWalkStatementInterpreter::new(config.max_iterations),
        }
    }

    pub fn get_config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Runs `program` top to bottom in a fresh context.
    pub fn run(&self, program: &Program) -> RunReport {
        info!(statements = program.len(), "starting run");
        let mut context = ExecutionContext::new();
        let error = self.execute(program, &mut context).err();
        match &error {
            Some(error) => warn!(statement = error.statement, %error, "run aborted"),
            None => info!(outputs = context.outputs().len(), "run finished"),
        }
        RunReport::new(context, error)
    }

    /// Runs `program` against an existing context, stopping at the first
    /// faulting root statement. Mutations made before the fault are kept.
    pub fn execute(&self, program: &Program, context: &mut ExecutionContext) -> Result<(), RunError> {
        for (index, statement) in program.iter().enumerate() {
            self.interpreter
                .interpret_statement(context, statement)
                .map_err(|error| RunError {
                    statement: index,
                    error,
                })?;
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}

/// Final state of a run and the error that stopped it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Variables in the order they were first declared.
    pub variables: Vec<(Ident, Integer)>,
    /// Arrays in the order they were first declared.
    pub arrays: Vec<(Ident, Vec<Integer>)>,
    pub outputs: Vec<String>,
    pub error: Option<RunError>,
}

impl RunReport {
    pub fn new(context: ExecutionContext, error: Option<RunError>) -> Self {
        let (variables, arrays, outputs) = context.into_parts();
        Self {
            variables: variables.into_entries(),
            arrays: arrays.into_entries(),
            outputs,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn variable(&self, name: &str) -> Option<Integer> {
        self.variables
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| *value)
    }

    pub fn array(&self, name: &str) -> Option<&[Integer]> {
        self.arrays
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, values)| values.as_slice())
    }
}
