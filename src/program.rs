use crate::interpreter::InterpreterConfig;
use crate::statement::Statement;
use serde::{Deserialize, Serialize};

/// The root list of statements forming one runnable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn get_statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn get_statement_mut(&mut self, index: usize) -> Option<&mut Statement> {
        self.statements.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Inserts at `index`, clamped to the end of the program.
    pub fn insert(&mut self, index: usize, statement: Statement) {
        let index = index.min(self.statements.len());
        self.statements.insert(index, statement);
    }

    pub fn remove(&mut self, index: usize) -> Option<Statement> {
        (index < self.statements.len()).then(|| self.statements.remove(index))
    }

    /// Moves the statement at `from` so that it ends up at `to`. Returns
    /// `false` if either index is out of range.
    pub fn move_statement(&mut self, from: usize, to: usize) -> bool {
        let length = self.statements.len();
        if from >= length || to >= length {
            return false;
        }
        let statement = self.statements.remove(from);
        self.statements.insert(to, statement);
        true
    }
}

impl From<Vec<Statement>> for Program {
    fn from(statements: Vec<Statement>) -> Self {
        Self::new(statements)
    }
}

/// On-disk program format: the statements plus optional interpreter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramFile {
    #[serde(default)]
    pub config: Option<InterpreterConfig>,
    pub statements: Program,
}

impl ProgramFile {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(program: &Program) -> Vec<String> {
        program
            .iter()
            .map(|statement| match statement {
                Statement::Expression(block) => block.expression.clone(),
                other => other.get_name().into(),
            })
            .collect()
    }

    #[test]
    fn moves_statements() {
        let mut program = Program::new(
            ["1", "2", "3"]
                .into_iter()
                .map(Statement::expression)
                .collect(),
        );
        assert!(program.move_statement(0, 2));
        assert_eq!(names(&program), ["2", "3", "1"]);
        assert!(program.move_statement(2, 0));
        assert_eq!(names(&program), ["1", "2", "3"]);
        assert!(!program.move_statement(3, 0));
    }

    #[test]
    fn insert_and_remove() {
        let mut program = Program::default();
        program.insert(10, Statement::expression("1"));
        program.insert(0, Statement::declare("a"));
        assert_eq!(names(&program), ["variable declaration", "1"]);
        assert_eq!(program.remove(5), None);
        assert_eq!(program.remove(0), Some(Statement::declare("a")));
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn reads_program_files() {
        let text = r#"{
            "config": { "max_iterations": 10 },
            "statements": [
                { "kind": "variable_declaration", "names": "a" },
                { "kind": "while",
                  "condition": { "left": "a", "operator": "<", "right": "3" },
                  "body": [ { "kind": "assignment", "variable": "a", "expression": "a + 1" } ] }
            ]
        }"#;
        let file = ProgramFile::from_json(text).unwrap();
        assert_eq!(file.config.map(|config| config.max_iterations), Some(10));
        assert_eq!(file.statements.len(), 2);
        assert!(matches!(
            file.statements.get_statement(1),
            Some(Statement::While(block)) if block.body.len() == 1
        ));
    }
}
