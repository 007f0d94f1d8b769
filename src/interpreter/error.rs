use crate::lexer::Span;
use crate::parser::error::ParserError;
use crate::string::Ident;
use crate::Integer;
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("Syntax Error: {0}")]
    SyntaxError(ParserError),
    #[error("Unknown Identifier: {0}")]
    UnknownIdentifier(Ident),
    #[error("Unknown Array: {0}")]
    UnknownArray(Ident),
    #[error("Invalid Identifier: '{0}'")]
    InvalidIdentifier(CompactString),
    #[error("Undeclared Variable: {0}")]
    UndeclaredVariable(Ident),
    #[error("Undeclared Array: {0}")]
    UndeclaredArray(Ident),
    #[error("Index Out Of Bounds: {name}[{index}]")]
    IndexOutOfBounds { name: Ident, index: Integer },
    #[error("Invalid Operator: '{0}'")]
    InvalidOperator(CompactString),
    #[error("Division By Zero")]
    DivisionByZero,
    #[error("Integer Overflow")]
    Overflow,
    #[error("Invalid Array Size: {0}")]
    InvalidArraySize(Integer),
    #[error("Zero Step")]
    ZeroStep,
    #[error("Possible Infinite Loop: exceeded {0} iterations")]
    PossibleInfiniteLoop(usize),
    #[error("Incompatible Swap: cannot swap a variable with an array element")]
    IncompatibleSwap,
    #[error("Invalid Swap Operand: '{0}'")]
    InvalidSwapOperand(CompactString),
}

/// The expression text an error was raised from, with the span it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionOrigin {
    pub text: CompactString,
    pub span: Span,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct RuntimeError {
    #[source]
    pub kind: RuntimeErrorKind,
    pub origin: Option<ExpressionOrigin>,
}

impl RuntimeError {
    pub fn in_expression(kind: RuntimeErrorKind, text: &str, span: Span) -> Self {
        Self {
            kind,
            origin: Some(ExpressionOrigin {
                text: text.into(),
                span,
            }),
        }
    }

    pub fn syntax(error: ParserError, text: &str) -> Self {
        let span = error.span;
        Self::in_expression(RuntimeErrorKind::SyntaxError(error), text, span)
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::SyntaxError(_) => "RT001",
            RuntimeErrorKind::UnknownIdentifier(_) => "RT002",
            RuntimeErrorKind::UnknownArray(_) => "RT003",
            RuntimeErrorKind::InvalidIdentifier(_) => "RT004",
            RuntimeErrorKind::UndeclaredVariable(_) => "RT005",
            RuntimeErrorKind::UndeclaredArray(_) => "RT006",
            RuntimeErrorKind::IndexOutOfBounds { .. } => "RT007",
            RuntimeErrorKind::InvalidOperator(_) => "RT008",
            RuntimeErrorKind::DivisionByZero => "RT009",
            RuntimeErrorKind::Overflow => "RT010",
            RuntimeErrorKind::InvalidArraySize(_) => "RT011",
            RuntimeErrorKind::ZeroStep => "RT012",
            RuntimeErrorKind::PossibleInfiniteLoop(_) => "RT013",
            RuntimeErrorKind::IncompatibleSwap => "RT014",
            RuntimeErrorKind::InvalidSwapOperand(_) => "RT015",
        }
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        Self { kind, origin: None }
    }
}

/// The single error that aborted a run, with the root statement it came from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Statement {statement}: {error}")]
pub struct RunError {
    /// Index of the faulting statement within the root program.
    pub statement: usize,
    #[source]
    pub error: RuntimeError,
}

impl RunError {
    pub fn kind(&self) -> &RuntimeErrorKind {
        &self.error.kind
    }
}
