mod arithmetic;
pub mod formatter;

use crate::interpreter::context::ExecutionContext;
use crate::interpreter::error::{RuntimeError, RuntimeErrorKind};
use crate::parser::expression::{Expression, ExpressionNode, ExpressionNodeRef};
use crate::parser::Parser;
use crate::string::Ident;
use crate::Integer;
use arithmetic::{apply_infix, apply_prefix};
use tracing::trace;

/// Parses and evaluates `text` against `context`.
pub fn evaluate(text: &str, context: &ExecutionContext) -> Result<Integer, RuntimeError> {
    ExpressionEvaluator::new(context).evaluate(text)
}

/// A storage slot that can be read and written: a variable or an array element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Place {
    Variable(Ident),
    Element { name: Ident, index: Integer },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Variable,
    Element,
}

impl Place {
    pub fn kind(&self) -> PlaceKind {
        match self {
            Place::Variable(_) => PlaceKind::Variable,
            Place::Element { .. } => PlaceKind::Element,
        }
    }
}

pub struct ExpressionEvaluator<'ctx> {
    context: &'ctx ExecutionContext,
}

impl<'ctx> ExpressionEvaluator<'ctx> {
    pub fn new(context: &'ctx ExecutionContext) -> Self {
        Self { context }
    }

    pub fn evaluate(&self, text: &str) -> Result<Integer, RuntimeError> {
        let expression = parse(text)?;
        let value = self.evaluate_node(text, &expression, expression.get_root_ref())?;
        trace!(expression = text, value, "evaluated expression");
        Ok(value)
    }

    /// Parses `text` and reports which kind of place it names, without
    /// looking anything up.
    pub fn classify_place(text: &str) -> Result<Option<PlaceKind>, RuntimeError> {
        let expression = parse(text)?;
        Ok(match bare_root(text, &expression) {
            Some(ExpressionNode::Variable { .. }) => Some(PlaceKind::Variable),
            Some(ExpressionNode::Element { .. }) => Some(PlaceKind::Element),
            _ => None,
        })
    }

    /// Resolves `text` as a place. `Ok(None)` means the text is a valid
    /// expression but not a bare name or element reference. Parenthesised
    /// names such as `(a)` are not places.
    ///
    /// The referenced variable or element must exist.
    pub fn resolve_place(&self, text: &str) -> Result<Option<Place>, RuntimeError> {
        let expression = parse(text)?;
        match bare_root(text, &expression) {
            Some(ExpressionNode::Variable { name, span }) => {
                if self.context.variable(name).is_none() {
                    return Err(RuntimeError::in_expression(
                        RuntimeErrorKind::UnknownIdentifier(name.clone()),
                        text,
                        *span,
                    ));
                }
                Ok(Some(Place::Variable(name.clone())))
            }
            Some(ExpressionNode::Element { name, index, span }) => {
                let index = self.evaluate_node(text, &expression, *index)?;
                self.context
                    .array_value(name, index)
                    .map_err(|error| RuntimeError::in_expression(error.kind, text, *span))?;
                Ok(Some(Place::Element {
                    name: name.clone(),
                    index,
                }))
            }
            _ => Ok(None),
        }
    }

    fn evaluate_node(
        &self,
        text: &str,
        expression: &Expression,
        node: ExpressionNodeRef,
    ) -> Result<Integer, RuntimeError> {
        let current_node = expression
            .get_node(node)
            .expect("Node ref came from the tree itself so it must exist.");

        match current_node {
            ExpressionNode::Number { value, .. } => Ok(*value),
            ExpressionNode::Variable { name, span } => {
                self.context.variable(name).ok_or_else(|| {
                    RuntimeError::in_expression(
                        RuntimeErrorKind::UnknownIdentifier(name.clone()),
                        text,
                        *span,
                    )
                })
            }
            ExpressionNode::Element { name, index, span } => {
                let index = self.evaluate_node(text, expression, *index)?;
                self.context
                    .array_value(name, index)
                    .map_err(|error| RuntimeError::in_expression(error.kind, text, *span))
            }
            ExpressionNode::Prefix {
                operator,
                rhs,
                span,
            } => {
                let rhs = self.evaluate_node(text, expression, *rhs)?;
                apply_prefix(*operator, rhs)
                    .map_err(|kind| RuntimeError::in_expression(kind, text, *span))
            }
            ExpressionNode::Infix {
                operator,
                lhs,
                rhs,
                span,
            } => {
                let lhs = self.evaluate_node(text, expression, *lhs)?;
                let rhs = self.evaluate_node(text, expression, *rhs)?;
                apply_infix(*operator, lhs, rhs)
                    .map_err(|kind| RuntimeError::in_expression(kind, text, *span))
            }
        }
    }
}

/// The root node, provided it spans all of `text` apart from surrounding
/// whitespace.
fn bare_root<'e>(text: &str, expression: &'e Expression) -> Option<&'e ExpressionNode> {
    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len();
    let root = expression.get_root();
    (root.span().range() == (start..end)).then_some(root)
}

fn parse(text: &str) -> Result<Expression, RuntimeError> {
    Parser::new(text)
        .parse_expression()
        .map_err(|error| RuntimeError::syntax(error, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ExecutionContext {
        let mut context = ExecutionContext::new();
        context.declare_variable("a");
        context.set_variable("a", 5).unwrap();
        context.declare_array("arr", 3).unwrap();
        context.replace_array("arr", vec![10, 20, 30]).unwrap();
        context
    }

    #[test]
    fn resolves_places() {
        let context = context();
        let evaluator = ExpressionEvaluator::new(&context);
        assert_eq!(
            evaluator.resolve_place(" a ").unwrap(),
            Some(Place::Variable("a".into()))
        );
        assert_eq!(
            evaluator.resolve_place("arr[a - 4]").unwrap(),
            Some(Place::Element {
                name: "arr".into(),
                index: 1
            })
        );
        assert_eq!(evaluator.resolve_place("a + 1").unwrap(), None);
        assert_eq!(
            ExpressionEvaluator::classify_place("missing[0]").unwrap(),
            Some(PlaceKind::Element)
        );
        assert_eq!(evaluator.resolve_place("(a)").unwrap(), None);
        assert_eq!(evaluator.resolve_place("(arr[0])").unwrap(), None);
        assert_eq!(ExpressionEvaluator::classify_place(" (a) ").unwrap(), None);
    }

    #[test]
    fn place_must_exist() {
        let context = context();
        let evaluator = ExpressionEvaluator::new(&context);
        let error = evaluator.resolve_place("b").unwrap_err();
        assert_eq!(error.kind, RuntimeErrorKind::UnknownIdentifier("b".into()));
        let error = evaluator.resolve_place("arr[3]").unwrap_err();
        assert_eq!(
            error.kind,
            RuntimeErrorKind::IndexOutOfBounds {
                name: "arr".into(),
                index: 3
            }
        );
    }

    #[test]
    fn errors_point_into_the_expression() {
        let context = context();
        let error = evaluate("a + missing", &context).unwrap_err();
        let origin = error.origin.expect("expression errors carry their origin");
        assert_eq!(origin.text.as_str(), "a + missing");
        assert_eq!(origin.span.range(), 4..11);

        let error = evaluate("a / (a - 5)", &context).unwrap_err();
        assert_eq!(error.kind, RuntimeErrorKind::DivisionByZero);
        assert_eq!(error.origin.unwrap().span.range(), 2..3);
    }
}
