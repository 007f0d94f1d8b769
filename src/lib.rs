pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod statement;
pub mod string;

/// The only value type of the language.
pub type Integer = i64;
