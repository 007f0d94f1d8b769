mod cursor;
mod error;
mod token;

use crate::string::{is_identifier_continue, is_identifier_start};
use cursor::Cursor;
pub use error::{LexicalError, LexicalErrorKind};
pub use token::{Span, Token, TokenKind};

/// Scans an arithmetic expression into tokens on demand.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.source
    }

    pub fn get_lexeme(&self, span: &Span) -> Option<&'src str> {
        self.source.get(span.range())
    }

    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.cursor.skip_while(|c| c.is_whitespace());

        let Some(current) = self.cursor.next_char() else {
            let end = self.source.len();
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, 0),
            });
        };

        let start = current.offset;
        let just = |kind: TokenKind| {
            Ok(Token {
                kind,
                span: Span::new(start, 1),
            })
        };

        match current.value {
            '(' => just(TokenKind::LeftParenthesis),
            ')' => just(TokenKind::RightParenthesis),
            '[' => just(TokenKind::LeftBracket),
            ']' => just(TokenKind::RightBracket),
            '+' => just(TokenKind::Plus),
            '-' => just(TokenKind::Minus),
            '*' => just(TokenKind::Star),
            '/' => just(TokenKind::Slash),
            '%' => just(TokenKind::Percent),
            '0'..='9' => {
                self.cursor.skip_while(|c| c.is_ascii_digit());
                Ok(self.emit(TokenKind::Number, start))
            }
            c if is_identifier_start(c) => {
                self.cursor.skip_while(is_identifier_continue);
                Ok(self.emit(TokenKind::Ident, start))
            }
            c => Err(LexicalError {
                kind: LexicalErrorKind::Unrecognized(c),
                span: Span::new(start, current.next_offset() - start),
            }),
        }
    }

    fn emit(&mut self, kind: TokenKind, start: usize) -> Token {
        let end = self.cursor.offset();
        Token {
            kind,
            span: Span::new(start, end - start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().expect("valid input");
            kinds.push(token.kind);
            if token.kind == TokenKind::Eof {
                return kinds;
            }
        }
    }

    #[test]
    fn scans_element_reference() {
        assert_eq!(
            kinds("arr[i + 1]"),
            [
                TokenKind::Ident,
                TokenKind::LeftBracket,
                TokenKind::Ident,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_cover_lexemes() {
        let mut lexer = Lexer::new("  count_1 * 42");
        let ident = lexer.next_token().unwrap();
        assert_eq!(lexer.get_lexeme(&ident.span), Some("count_1"));
        let _ = lexer.next_token().unwrap();
        let number = lexer.next_token().unwrap();
        assert_eq!(lexer.get_lexeme(&number.span), Some("42"));
        assert_eq!(lexer.next_token().unwrap().span, Span::new(14, 0));
    }

    #[test]
    fn reports_unrecognized_character() {
        let mut lexer = Lexer::new("1 $ 2");
        let _ = lexer.next_token();
        let error = lexer.next_token().unwrap_err();
        assert_eq!(error.kind, LexicalErrorKind::Unrecognized('$'));
        assert_eq!(error.span, Span::new(2, 1));
    }
}
