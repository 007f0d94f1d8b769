use tracing::{debug, trace};

use super::context::ExecutionContext;
use super::error::{RuntimeError, RuntimeErrorKind};
use crate::evaluator::{ExpressionEvaluator, Place, PlaceKind};
use crate::statement::{
    ArrayAssignment, ArrayDeclaration, ArrayFillBlock, Assignment, Comparator, Condition,
    ExpressionBlock, ForBlock, IfBlock, Statement, SwapBlock, VariableDeclaration, WhileBlock,
};
use crate::string::{is_identifier, split_list};
use crate::Integer;

/// Executes statements by walking the statement tree.
pub struct TreeWalkStatementInterpreter {
    max_iterations: usize,
}

impl TreeWalkStatementInterpreter {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn interpret_statement(
        &self,
        context: &mut ExecutionContext,
        statement: &Statement,
    ) -> Result<(), RuntimeError> {
        debug!(kind = statement.get_name(), "executing statement");
        match statement {
            Statement::VariableDeclaration(decl) => {
                self.interpret_variable_declaration(context, decl)
            }
            Statement::Assignment(stmt) => self.interpret_assignment(context, stmt),
            Statement::Expression(stmt) => self.interpret_expression(context, stmt),
            Statement::If(stmt) => self.interpret_if(context, stmt),
            Statement::While(stmt) => self.interpret_while(context, stmt),
            Statement::For(stmt) => self.interpret_for(context, stmt),
            Statement::ArrayDeclaration(decl) => self.interpret_array_declaration(context, decl),
            Statement::ArrayAssignment(stmt) => self.interpret_array_assignment(context, stmt),
            Statement::Swap(stmt) => self.interpret_swap(context, stmt),
            Statement::ArrayFill(stmt) => self.interpret_array_fill(context, stmt),
        }
    }

    pub fn interpret_block(
        &self,
        context: &mut ExecutionContext,
        statements: &[Statement],
    ) -> Result<(), RuntimeError> {
        for statement in statements {
            self.interpret_statement(context, statement)?;
        }
        Ok(())
    }

    pub fn evaluate(&self, context: &ExecutionContext, text: &str) -> Result<Integer, RuntimeError> {
        ExpressionEvaluator::new(context).evaluate(text)
    }

    fn evaluate_condition(
        &self,
        context: &ExecutionContext,
        condition: &Condition,
    ) -> Result<bool, RuntimeError> {
        let lhs = self.evaluate(context, &condition.left)?;
        let rhs = self.evaluate(context, &condition.right)?;
        let comparator: Comparator = condition.operator.parse()?;
        Ok(comparator.compare(lhs, rhs))
    }
}

// Declarations and assignments
impl TreeWalkStatementInterpreter {
    fn interpret_variable_declaration(
        &self,
        context: &mut ExecutionContext,
        decl: &VariableDeclaration,
    ) -> Result<(), RuntimeError> {
        let names: Vec<&str> = split_list(&decl.names).collect();
        if let Some(invalid) = names.iter().find(|name| !is_identifier(name)) {
            return Err(RuntimeErrorKind::InvalidIdentifier((*invalid).into()).into());
        }
        for name in names {
            context.declare_variable(name);
        }
        Ok(())
    }

    fn interpret_assignment(
        &self,
        context: &mut ExecutionContext,
        stmt: &Assignment,
    ) -> Result<(), RuntimeError> {
        let value = self.evaluate(context, &stmt.expression)?;
        context.set_variable(stmt.variable.trim(), value)
    }

    fn interpret_expression(
        &self,
        context: &mut ExecutionContext,
        stmt: &ExpressionBlock,
    ) -> Result<(), RuntimeError> {
        let value = self.evaluate(context, &stmt.expression)?;
        context.append_output(format!("answer = {value}"));
        Ok(())
    }
}

// Control flow
impl TreeWalkStatementInterpreter {
    fn interpret_if(&self, context: &mut ExecutionContext, stmt: &IfBlock) -> Result<(), RuntimeError> {
        if self.evaluate_condition(context, &stmt.condition)? {
            return self.interpret_block(context, &stmt.body);
        }
        for branch in stmt.else_ifs.iter() {
            if self.evaluate_condition(context, &branch.condition)? {
                return self.interpret_block(context, &branch.body);
            }
        }
        match &stmt.otherwise {
            Some(body) => self.interpret_block(context, body),
            None => Ok(()),
        }
    }

    fn interpret_while(
        &self,
        context: &mut ExecutionContext,
        stmt: &WhileBlock,
    ) -> Result<(), RuntimeError> {
        let mut iterations = 0;
        while self.evaluate_condition(context, &stmt.condition)? {
            if iterations == self.max_iterations {
                return Err(RuntimeErrorKind::PossibleInfiniteLoop(self.max_iterations).into());
            }
            iterations += 1;
            trace!(iteration = iterations, "while iteration");
            self.interpret_block(context, &stmt.body)?;
        }
        Ok(())
    }

    fn interpret_for(&self, context: &mut ExecutionContext, stmt: &ForBlock) -> Result<(), RuntimeError> {
        let from = self.evaluate(context, &stmt.from)?;
        let to = self.evaluate(context, &stmt.to)?;
        let step = self.evaluate(context, &stmt.step)?;

        let name = stmt.variable.trim();
        if !is_identifier(name) {
            return Err(RuntimeErrorKind::InvalidIdentifier(name.into()).into());
        }
        if step == 0 {
            return Err(RuntimeErrorKind::ZeroStep.into());
        }

        let shadowed = context.variable(name);
        let mut current = from;
        let mut iterations = 0;
        while (step > 0 && current <= to) || (step < 0 && current >= to) {
            if iterations == self.max_iterations {
                return Err(RuntimeErrorKind::PossibleInfiniteLoop(self.max_iterations).into());
            }
            iterations += 1;
            trace!(variable = name, value = current, "for iteration");
            context.bind_variable(name, current);
            self.interpret_block(context, &stmt.body)?;

            // Past `Integer::MAX` or `Integer::MIN` is also past `to`.
            match current.checked_add(step) {
                Some(next) => current = next,
                None => break,
            }
        }

        match shadowed {
            Some(value) => {
                context.bind_variable(name, value);
            }
            None => {
                context.remove_variable(name);
            }
        }
        Ok(())
    }
}

// Arrays
impl TreeWalkStatementInterpreter {
    fn interpret_array_declaration(
        &self,
        context: &mut ExecutionContext,
        decl: &ArrayDeclaration,
    ) -> Result<(), RuntimeError> {
        let name = decl.name.trim();
        if !is_identifier(name) {
            return Err(RuntimeErrorKind::InvalidIdentifier(name.into()).into());
        }
        let size = self.evaluate(context, &decl.size)?;
        context.declare_array(name, size)
    }

    fn interpret_array_assignment(
        &self,
        context: &mut ExecutionContext,
        stmt: &ArrayAssignment,
    ) -> Result<(), RuntimeError> {
        let index = self.evaluate(context, &stmt.index)?;
        let value = self.evaluate(context, &stmt.expression)?;
        context.set_array_value(stmt.name.trim(), index, value)
    }

    fn interpret_array_fill(
        &self,
        context: &mut ExecutionContext,
        stmt: &ArrayFillBlock,
    ) -> Result<(), RuntimeError> {
        let name = stmt.name.trim();
        if context.array(name).is_none() {
            return Err(RuntimeErrorKind::UndeclaredArray(name.into()).into());
        }
        let values = split_list(&stmt.values)
            .map(|item| self.evaluate(context, item))
            .collect::<Result<Vec<_>, _>>()?;
        context.replace_array(name, values)
    }

    fn interpret_swap(&self, context: &mut ExecutionContext, stmt: &SwapBlock) -> Result<(), RuntimeError> {
        let first = stmt.first.trim();
        let second = stmt.second.trim();

        if place_kind(first)? != place_kind(second)? {
            return Err(RuntimeErrorKind::IncompatibleSwap.into());
        }

        let evaluator = ExpressionEvaluator::new(context);
        let first = evaluator
            .resolve_place(first)?
            .ok_or_else(|| invalid_swap_operand(first))?;
        let second = evaluator
            .resolve_place(second)?
            .ok_or_else(|| invalid_swap_operand(second))?;

        match (first, second) {
            (Place::Variable(first), Place::Variable(second)) => {
                let first_value = read_variable(context, &first)?;
                let second_value = read_variable(context, &second)?;
                context.set_variable(&first, second_value)?;
                context.set_variable(&second, first_value)
            }
            (
                Place::Element {
                    name: first_name,
                    index: first_index,
                },
                Place::Element {
                    name: second_name,
                    index: second_index,
                },
            ) => {
                let first_value = context.array_value(&first_name, first_index)?;
                let second_value = context.array_value(&second_name, second_index)?;
                context.set_array_value(&first_name, first_index, second_value)?;
                context.set_array_value(&second_name, second_index, first_value)
            }
            _ => Err(RuntimeErrorKind::IncompatibleSwap.into()),
        }
    }
}

fn place_kind(text: &str) -> Result<PlaceKind, RuntimeError> {
    ExpressionEvaluator::classify_place(text)?.ok_or_else(|| invalid_swap_operand(text))
}

fn invalid_swap_operand(text: &str) -> RuntimeError {
    RuntimeErrorKind::InvalidSwapOperand(text.into()).into()
}

fn read_variable(context: &ExecutionContext, name: &str) -> Result<Integer, RuntimeError> {
    context
        .variable(name)
        .ok_or_else(|| RuntimeErrorKind::UnknownIdentifier(name.into()).into())
}
