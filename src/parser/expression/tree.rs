use crate::lexer::Span;
use crate::string::Ident;
use crate::Integer;

use super::{InfixOperator, PrefixOperator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionNodeRef(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode {
    Number {
        value: Integer,
        span: Span,
    },
    Variable {
        name: Ident,
        span: Span,
    },
    Element {
        name: Ident,
        index: ExpressionNodeRef,
        span: Span,
    },
    Prefix {
        operator: PrefixOperator,
        rhs: ExpressionNodeRef,
        span: Span,
    },
    Infix {
        operator: InfixOperator,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
        /// Span of the operator token.
        span: Span,
    },
}

impl ExpressionNode {
    pub fn span(&self) -> Span {
        match self {
            ExpressionNode::Number { span, .. }
            | ExpressionNode::Variable { span, .. }
            | ExpressionNode::Element { span, .. }
            | ExpressionNode::Prefix { span, .. }
            | ExpressionNode::Infix { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IncompleteExpression {
    nodes: Vec<ExpressionNode>,
    /// Height of the subtree rooted at each node. Leaves have height 1.
    depths: Vec<usize>,
}

impl IncompleteExpression {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            depths: Vec::new(),
        }
    }

    pub fn push(&mut self, node: ExpressionNode) -> ExpressionNodeRef {
        let depth = 1 + match &node {
            ExpressionNode::Number { .. } | ExpressionNode::Variable { .. } => 0,
            ExpressionNode::Element { index, .. } => self.depth(*index),
            ExpressionNode::Prefix { rhs, .. } => self.depth(*rhs),
            ExpressionNode::Infix { lhs, rhs, .. } => self.depth(*lhs).max(self.depth(*rhs)),
        };
        self.nodes.push(node);
        self.depths.push(depth);
        ExpressionNodeRef(self.nodes.len() as u32 - 1)
    }

    pub fn depth(&self, node: ExpressionNodeRef) -> usize {
        self.depths.get(node.0 as usize).copied().unwrap_or(0)
    }
}

/// A parsed expression stored as a flat arena of nodes.
#[derive(Debug, Clone)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: ExpressionNodeRef,
}

impl Expression {
    pub fn new(tree: IncompleteExpression, root: ExpressionNodeRef) -> Option<Self> {
        if !(0..tree.nodes.len()).contains(&(root.0 as usize)) {
            None
        } else {
            Some(Self {
                nodes: tree.nodes,
                root,
            })
        }
    }

    pub fn get_root_ref(&self) -> ExpressionNodeRef {
        self.root
    }

    pub fn get_root(&self) -> &ExpressionNode {
        self.get_node(self.root)
            .expect("The root exists within the tree.")
    }

    pub fn get_node(&self, node: ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }
}
