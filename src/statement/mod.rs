mod comparator;

pub use comparator::Comparator;
use serde::{Deserialize, Serialize};

/// One block of a program. Every field holds the raw text typed into the
/// editor; nothing is parsed until the statement runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    Assignment(Assignment),
    Expression(ExpressionBlock),
    If(IfBlock),
    While(WhileBlock),
    For(ForBlock),
    ArrayDeclaration(ArrayDeclaration),
    ArrayAssignment(ArrayAssignment),
    Swap(SwapBlock),
    ArrayFill(ArrayFillBlock),
}

/// A comparison between two expressions, as used by `if`, `else if` and `while`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub left: String,
    pub operator: String,
    pub right: String,
}

impl Condition {
    pub fn new(left: &str, operator: &str, right: &str) -> Self {
        Self {
            left: left.into(),
            operator: operator.into(),
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// Comma separated names, each initialised to zero.
    pub names: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub variable: String,
    pub expression: String,
}

/// Evaluates an expression and logs `answer = <value>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionBlock {
    pub expression: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfBlock {
    pub condition: Condition,
    #[serde(default)]
    pub body: Vec<Statement>,
    #[serde(default)]
    pub else_ifs: Vec<ElseIf>,
    #[serde(default)]
    pub otherwise: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElseIf {
    pub condition: Condition,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhileBlock {
    pub condition: Condition,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForBlock {
    pub variable: String,
    pub from: String,
    pub to: String,
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default)]
    pub body: Vec<Statement>,
}

fn default_step() -> String {
    "1".into()
}

impl Default for ForBlock {
    fn default() -> Self {
        Self {
            variable: "i".into(),
            from: String::new(),
            to: String::new(),
            step: default_step(),
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayDeclaration {
    pub name: String,
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayAssignment {
    pub name: String,
    pub index: String,
    pub expression: String,
}

/// Exchanges two variables or two array elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapBlock {
    pub first: String,
    pub second: String,
}

/// Replaces the whole array with comma separated expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayFillBlock {
    pub name: String,
    pub values: String,
}

impl Statement {
    pub fn declare(names: &str) -> Self {
        Self::VariableDeclaration(VariableDeclaration {
            names: names.into(),
        })
    }

    pub fn assign(variable: &str, expression: &str) -> Self {
        Self::Assignment(Assignment {
            variable: variable.into(),
            expression: expression.into(),
        })
    }

    pub fn expression(expression: &str) -> Self {
        Self::Expression(ExpressionBlock {
            expression: expression.into(),
        })
    }

    pub fn if_then(condition: Condition, body: Vec<Statement>) -> Self {
        Self::If(IfBlock {
            condition,
            body,
            else_ifs: Vec::new(),
            otherwise: None,
        })
    }

    pub fn while_loop(condition: Condition, body: Vec<Statement>) -> Self {
        Self::While(WhileBlock { condition, body })
    }

    pub fn for_loop(variable: &str, from: &str, to: &str, step: &str, body: Vec<Statement>) -> Self {
        Self::For(ForBlock {
            variable: variable.into(),
            from: from.into(),
            to: to.into(),
            step: step.into(),
            body,
        })
    }

    pub fn declare_array(name: &str, size: &str) -> Self {
        Self::ArrayDeclaration(ArrayDeclaration {
            name: name.into(),
            size: size.into(),
        })
    }

    pub fn assign_element(name: &str, index: &str, expression: &str) -> Self {
        Self::ArrayAssignment(ArrayAssignment {
            name: name.into(),
            index: index.into(),
            expression: expression.into(),
        })
    }

    pub fn swap(first: &str, second: &str) -> Self {
        Self::Swap(SwapBlock {
            first: first.into(),
            second: second.into(),
        })
    }

    pub fn fill(name: &str, values: &str) -> Self {
        Self::ArrayFill(ArrayFillBlock {
            name: name.into(),
            values: values.into(),
        })
    }

    /// Adds an `else if` branch. Has no effect on statements other than `if`.
    pub fn with_else_if(mut self, condition: Condition, branch: Vec<Statement>) -> Self {
        if let Self::If(block) = &mut self {
            block.else_ifs.push(ElseIf {
                condition,
                body: branch,
            });
        }
        self
    }

    /// Sets the `else` branch. Has no effect on statements other than `if`.
    pub fn with_else(mut self, branch: Vec<Statement>) -> Self {
        if let Self::If(block) = &mut self {
            block.otherwise = Some(branch);
        }
        self
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Statement::VariableDeclaration(_) => "variable declaration",
            Statement::Assignment(_) => "assignment",
            Statement::Expression(_) => "expression",
            Statement::If(_) => "if",
            Statement::While(_) => "while",
            Statement::For(_) => "for",
            Statement::ArrayDeclaration(_) => "array declaration",
            Statement::ArrayAssignment(_) => "array assignment",
            Statement::Swap(_) => "swap",
            Statement::ArrayFill(_) => "array fill",
        }
    }
}
