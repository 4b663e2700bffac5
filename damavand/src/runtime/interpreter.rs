use std::collections::HashMap;

use tracing::trace;

use crate::error::RuntimeError;
use crate::ir::ast::{Call, Expression, FunctionDef, Program, Statement};

use super::OutputSink;
use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Nested user function calls allowed before the run aborts.
    pub max_call_depth: usize,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            max_call_depth: 64,
        }
    }
}

/// Tree-walking evaluator. Owns one global variable table and one function
/// table; `run` consumes it so no state outlives a program.
pub struct Interpreter<'p, 's> {
    globals: HashMap<String, Value>,
    functions: HashMap<&'p str, &'p FunctionDef>,
    sink: &'s mut dyn OutputSink,
    options: InterpreterOptions,
    depth: usize,
}

impl<'p, 's> Interpreter<'p, 's> {
    pub fn new(sink: &'s mut dyn OutputSink) -> Self {
        Self::with_options(sink, InterpreterOptions::default())
    }

    pub fn with_options(sink: &'s mut dyn OutputSink, options: InterpreterOptions) -> Self {
        Self {
            globals: HashMap::new(),
            functions: HashMap::new(),
            sink,
            options,
            depth: 0,
        }
    }

    pub fn run(mut self, program: &'p Program) -> Result<(), RuntimeError> {
        self.exec_block(&program.statements)
    }

    fn exec_block(&mut self, statements: &'p [Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            self.exec_statement(statement)?;
        }
        Ok(())
    }

    fn exec_statement(&mut self, statement: &'p Statement) -> Result<(), RuntimeError> {
        match statement {
            Statement::FunctionDef(function) => {
                trace!(name = %function.name, params = function.params.len(), "define function");
                self.functions.insert(&function.name, function);
            }
            Statement::Call(call) => {
                self.call(call)?;
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expression(condition)?.is_truthy() {
                    self.exec_block(then_branch)?;
                } else {
                    self.exec_block(else_branch)?;
                }
            }
            Statement::While { condition, body } => {
                while self.eval_expression(condition)?.is_truthy() {
                    self.exec_block(body)?;
                }
            }
            Statement::Print { value } => {
                let value = self.eval_expression(value)?;
                self.sink.write_line(&value.to_string())?;
            }
            Statement::Assign { target, value } => {
                let value = self.eval_expression(value)?;
                self.globals.insert(target.clone(), value);
            }
        }
        Ok(())
    }

    fn eval_expression(&mut self, expression: &'p Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Literal(literal) => Ok(Value::from(literal)),
            // Unknown names read as None rather than failing
            Expression::Variable(name) => {
                Ok(self.globals.get(name).cloned().unwrap_or(Value::None))
            }
            Expression::Unary { op, operand } => {
                let operand = self.eval_expression(operand)?;
                Value::unary(*op, operand)
            }
            Expression::Binary { left, op, right } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                Value::binary(*op, left, right)
            }
            Expression::Call(call) => self.call(call),
        }
    }

    /// Runs a user function against the live global table, then rolls the
    /// table back to its pre-call state. There is no `return`, so the
    /// result is always `Value::None`.
    fn call(&mut self, call: &'p Call) -> Result<Value, RuntimeError> {
        let function = self
            .functions
            .get(call.name.as_str())
            .copied()
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: call.name.clone(),
                span: call.span,
            })?;

        if call.args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                name: call.name.clone(),
                expected: function.params.len(),
                found: call.args.len(),
                span: call.span,
            });
        }
        if self.depth >= self.options.max_call_depth {
            return Err(RuntimeError::RecursionLimit {
                name: call.name.clone(),
                limit: self.options.max_call_depth,
                span: call.span,
            });
        }

        // Arguments see the caller's table only
        let mut bindings = Vec::with_capacity(call.args.len());
        for (param, arg) in function.params.iter().zip(&call.args) {
            bindings.push((param.clone(), self.eval_expression(arg)?));
        }

        trace!(name = %call.name, args = bindings.len(), depth = self.depth, "call");
        let saved = self.globals.clone();
        self.globals.extend(bindings);
        self.depth += 1;
        let result = self.exec_block(&function.body);
        self.depth -= 1;
        self.globals = saved;

        result.map(|()| Value::None)
    }
}
