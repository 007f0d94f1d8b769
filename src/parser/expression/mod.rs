mod operator;
mod tree;

pub use operator::{InfixOperator, PrefixOperator};
pub use tree::{Expression, ExpressionNode, ExpressionNodeRef, IncompleteExpression};
