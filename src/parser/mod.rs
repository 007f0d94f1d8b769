pub mod error;
pub mod expression;

use crate::lexer::{Lexer, Token, TokenKind};
use error::{ParserError, ParserErrorKind};
use expression::{
    Expression, ExpressionNode, ExpressionNodeRef, IncompleteExpression, InfixOperator,
    PrefixOperator,
};

/// Operands that may be open at once: prefix operators, parentheses and
/// element indices each open one.
pub const MAX_NESTING_DEPTH: usize = 256;
/// Height the parsed tree may reach, counting long operator chains.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Recursive descent parser for integer arithmetic expressions.
///
/// Precedence from tightest to loosest: unary `+`/`-`, then `*`, `/`, `%`,
/// then binary `+`/`-`. Binary operators are left associative.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    lookahead: Option<Token>,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
            depth: 0,
        }
    }

    pub fn get_source(&self) -> &'src str {
        self.lexer.get_source()
    }

    fn peek(&mut self) -> Result<Token, ParserError> {
        match self.lookahead {
            Some(token) => Ok(token),
            None => {
                let token = self.lexer.next_token()?;
                self.lookahead = Some(token);
                Ok(token)
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, ParserError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => Ok(self.lexer.next_token()?),
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        let next_token = self.next_token()?;
        if next_token.kind != expected {
            Err(ParserError {
                kind: ParserErrorKind::UnexpectedToken {
                    actual: next_token.kind,
                    expected,
                },
                span: next_token.span,
            })
        } else {
            Ok(next_token)
        }
    }

    fn eat_if(&mut self, next: TokenKind) -> Result<Option<Token>, ParserError> {
        let next_token = self.peek()?;
        if next_token.kind != next {
            Ok(None)
        } else {
            self.lookahead = None;
            Ok(Some(next_token))
        }
    }

    /// Pushes `node`, rejecting trees too tall to evaluate.
    fn push(
        &self,
        tree: &mut IncompleteExpression,
        node: ExpressionNode,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let span = node.span();
        let node = tree.push(node);
        if tree.depth(node) > MAX_TREE_DEPTH {
            return Err(ParserError {
                kind: ParserErrorKind::TooDeep,
                span,
            });
        }
        Ok(node)
    }
}

impl<'src> Parser<'src> {
    /// Parses the whole source as a single expression.
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let mut tree = IncompleteExpression::new();
        let root = self.parse_additive(&mut tree)?;
        self.expect(TokenKind::Eof)?;

        Ok(Expression::new(tree, root)
            .expect("Root was obtained from the tree itself so it must be valid."))
    }

    fn parse_additive(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = self.parse_multiplicative(tree)?;
        loop {
            let token = self.peek()?;
            let Some(operator) = InfixOperator::additive(token.kind) else {
                return Ok(lhs);
            };
            self.lookahead = None;
            let rhs = self.parse_multiplicative(tree)?;
            lhs = self.push(
                tree,
                ExpressionNode::Infix {
                    operator,
                    lhs,
                    rhs,
                    span: token.span,
                },
            )?;
        }
    }

    fn parse_multiplicative(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = self.parse_unary(tree)?;
        loop {
            let token = self.peek()?;
            let Some(operator) = InfixOperator::multiplicative(token.kind) else {
                return Ok(lhs);
            };
            self.lookahead = None;
            let rhs = self.parse_unary(tree)?;
            lhs = self.push(
                tree,
                ExpressionNode::Infix {
                    operator,
                    lhs,
                    rhs,
                    span: token.span,
                },
            )?;
        }
    }

    /// Every nested operand passes through here, so this is where nesting is
    /// counted.
    fn parse_unary(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.peek()?;
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserError {
                kind: ParserErrorKind::TooDeep,
                span: token.span,
            });
        }

        self.depth += 1;
        let node = match PrefixOperator::from_token(token.kind) {
            Some(operator) => {
                self.lookahead = None;
                let rhs = self.parse_unary(tree)?;
                self.push(
                    tree,
                    ExpressionNode::Prefix {
                        operator,
                        rhs,
                        span: token.span,
                    },
                )?
            }
            None => self.parse_primary(tree)?,
        };
        self.depth -= 1;
        Ok(node)
    }

    fn parse_primary(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.next_token()?;
        let lexeme = self
            .lexer
            .get_lexeme(&token.span)
            .expect("Lexed token has a valid span");

        match token.kind {
            TokenKind::Number => {
                let value = lexeme.parse().map_err(|_| ParserError {
                    kind: ParserErrorKind::LiteralTooLarge,
                    span: token.span,
                })?;
                Ok(tree.push(ExpressionNode::Number {
                    value,
                    span: token.span,
                }))
            }
            TokenKind::Ident => {
                let name = lexeme.into();
                if self.eat_if(TokenKind::LeftBracket)?.is_some() {
                    let index = self.parse_additive(tree)?;
                    let closing = self.expect(TokenKind::RightBracket)?;
                    self.push(
                        tree,
                        ExpressionNode::Element {
                            name,
                            index,
                            span: token.span.merge(&closing.span),
                        },
                    )
                } else {
                    Ok(tree.push(ExpressionNode::Variable {
                        name,
                        span: token.span,
                    }))
                }
            }
            TokenKind::LeftParenthesis => {
                let inner = self.parse_additive(tree)?;
                self.expect(TokenKind::RightParenthesis)?;
                Ok(inner)
            }
            kind => Err(ParserError {
                kind: ParserErrorKind::NonExpression(kind),
                span: token.span,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(source: &str) -> ParserError {
        Parser::new(source)
            .parse_expression()
            .expect_err("expression should be rejected")
    }

    #[test]
    fn unary_binds_tighter_than_multiplication() {
        let expression = Parser::new("-a * 2").parse_expression().unwrap();
        let ExpressionNode::Infix { operator, lhs, .. } = expression.get_root() else {
            panic!("expected an infix root");
        };
        assert_eq!(*operator, InfixOperator::Multiply);
        assert!(matches!(
            expression.get_node(*lhs),
            Some(ExpressionNode::Prefix {
                operator: PrefixOperator::Minus,
                ..
            })
        ));
    }

    #[test]
    fn element_span_covers_brackets() {
        let expression = Parser::new(" arr[i]").parse_expression().unwrap();
        assert_eq!(expression.get_root().span().range(), 1..7);
    }

    #[test]
    fn reports_positions() {
        assert_eq!(parse_error("").position(), 0);
        assert_eq!(parse_error("(1 + 2").position(), 6);
        assert_eq!(parse_error("1 + 2)").position(), 5);
        assert_eq!(parse_error("1 +* 2").position(), 3);
        assert_eq!(parse_error("a[1").position(), 3);
        assert_eq!(parse_error("3 # 4").position(), 2);
    }

    #[test]
    fn rejects_oversized_literal() {
        let error = parse_error("99999999999999999999");
        assert_eq!(error.kind, ParserErrorKind::LiteralTooLarge);
    }

    #[test]
    fn limits_nesting() {
        let source = format!("{}1", "-".repeat(100_000));
        let error = parse_error(&source);
        assert_eq!(error.kind, ParserErrorKind::TooDeep);
        assert_eq!(error.position(), MAX_NESTING_DEPTH);

        let depth = MAX_NESTING_DEPTH - 1;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(Parser::new(&source).parse_expression().is_ok());
    }

    #[test]
    fn limits_operator_chains() {
        let source = format!("{}1", "1 + ".repeat(MAX_TREE_DEPTH - 1));
        assert!(Parser::new(&source).parse_expression().is_ok());

        let source = format!("{}1", "1 + ".repeat(MAX_TREE_DEPTH));
        assert_eq!(parse_error(&source).kind, ParserErrorKind::TooDeep);
    }
}
