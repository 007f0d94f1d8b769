use crate::lexer::{LexicalError, Span, TokenKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    #[error("Expected {expected} but got {actual}")]
    UnexpectedToken {
        actual: TokenKind,
        expected: TokenKind,
    },
    #[error("Expected an operand but got {0}")]
    NonExpression(TokenKind),
    #[error("Integer literal is too large")]
    LiteralTooLarge,
    #[error("Expression is nested too deeply")]
    TooDeep,
    #[error("{0}")]
    LexicalError(#[from] LexicalError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at position {}", .span.start)]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
}

impl ParserError {
    /// Byte offset of the offending character within the expression text.
    pub fn position(&self) -> usize {
        self.span.start
    }
}

impl From<LexicalError> for ParserError {
    fn from(error: LexicalError) -> Self {
        let span = error.span;
        Self {
            kind: ParserErrorKind::LexicalError(error),
            span,
        }
    }
}
