use crate::ast::{Comparison, Condition, Operand, Statement, Visitor};
use crate::environment::Environment;
use crate::parser::Parser;
use crate::token::{Token, TokenKind};
use crate::value::{TypeTag, Value};
use log::debug;
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("[line {line}:{column}] Invalid {type_tag} literal '{lexeme}'")]
    InvalidLiteral {
        type_tag: TypeTag,
        lexeme: String,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] Unsupported comparison: {left} {operator} {right}")]
    UnsupportedComparison {
        left: TypeTag,
        operator: String,
        right: TypeTag,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] A {kind} cannot be compared")]
    UnsupportedOperand {
        kind: TokenKind,
        line: usize,
        column: usize,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("Interpreter has halted")]
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// Executes statements against one flat variable store, writing `put`
/// output to `out`.
pub struct Interpreter<W: Write> {
    environment: Environment,
    imports: BTreeSet<String>,
    out: W,
    state: State,
}

impl<'a, W: Write> Visitor<Statement<'a>, Result<(), RuntimeError>> for Interpreter<W> {
    fn visit(&mut self, stmt: &Statement<'a>) -> Result<(), RuntimeError> {
        match stmt {
            Statement::Import { module } => {
                debug!("import {{{}}} has no runtime effect", module.lexeme);
                self.imports.insert(module.lexeme.to_string());
            }
            Statement::Declare {
                name,
                type_tag,
                literal,
            } => {
                let value = literal_value(*type_tag, literal)?;
                debug!("{} ({}) = {}", name.lexeme, type_tag, value);
                self.environment.define(name.lexeme, value);
            }
            Statement::Print(operand) => {
                let token = operand.token();
                match operand {
                    Operand::Variable(_) => match self.environment.get(token.lexeme) {
                        Some(value) => writeln!(self.out, "{}", value)?,
                        None => {
                            debug!("'{}' is not bound, printing it as text", token.lexeme);
                            writeln!(self.out, "{}", token.lexeme)?
                        }
                    },
                    Operand::Literal(_) => writeln!(self.out, "{}", token.lexeme)?,
                }
            }
            Statement::If { condition, body } => {
                let result = self.evaluate(condition)?;
                debug!(
                    "condition {} {} {} is {}",
                    condition.left.token().lexeme,
                    condition.operator.lexeme,
                    condition.right.token().lexeme,
                    result
                );
                if result {
                    for stmt in body {
                        self.execute(stmt)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Interpreter<W> {
        Interpreter {
            environment: Environment::new(),
            imports: BTreeSet::new(),
            out,
            state: State::Running,
        }
    }
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
    /// Module names named by `import`, which are otherwise ignored.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(|x| x.as_str())
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn into_output(self) -> W {
        self.out
    }
    pub fn execute(&mut self, stmt: &Statement) -> Result<(), RuntimeError> {
        if self.state == State::Halted {
            return Err(RuntimeError::Halted);
        }
        let result = stmt.accept(self);
        if result.is_err() {
            self.state = State::Halted;
        }
        result
    }
    /// Pulls statements from `parser` and runs each one before asking for the
    /// next. Halts at end of input or on the first error.
    pub fn interpret(&mut self, parser: &mut Parser) -> Result<(), crate::Error> {
        if self.state == State::Halted {
            return Err(RuntimeError::Halted.into());
        }
        loop {
            let stmt = match parser.next_statement() {
                Ok(Some(stmt)) => stmt,
                Ok(None) => break,
                Err(e) => {
                    self.state = State::Halted;
                    return Err(e.into());
                }
            };
            self.execute(&stmt)?;
        }
        self.state = State::Halted;
        self.out.flush().map_err(RuntimeError::from)?;
        Ok(())
    }
    fn evaluate(&self, condition: &Condition) -> Result<bool, RuntimeError> {
        let left = self.operand_value(&condition.left)?;
        let right = self.operand_value(&condition.right)?;
        let operator = condition.operator;
        let unsupported = || RuntimeError::UnsupportedComparison {
            left: left.type_tag(),
            operator: operator.lexeme.to_string(),
            right: right.type_tag(),
            line: operator.line,
            column: operator.column,
        };
        let comparison = Comparison::from_str(operator.lexeme).map_err(|_| unsupported())?;
        match left.compare(&right) {
            Some(ordering) => Ok(comparison.holds(ordering)),
            None => Err(unsupported()),
        }
    }
    fn operand_value(&self, operand: &Operand) -> Result<Value, RuntimeError> {
        match operand {
            Operand::Variable(token) => Ok(self
                .environment
                .get(token.lexeme)
                .cloned()
                .unwrap_or_else(|| Value::Text(token.lexeme.to_string()))),
            Operand::Literal(token) => {
                let type_tag = match token.kind {
                    TokenKind::Number => TypeTag::Int,
                    TokenKind::Float => TypeTag::Float,
                    TokenKind::String => TypeTag::String,
                    kind => {
                        return Err(RuntimeError::UnsupportedOperand {
                            kind,
                            line: token.line,
                            column: token.column,
                        })
                    }
                };
                literal_value(type_tag, token)
            }
        }
    }
}

fn literal_value(type_tag: TypeTag, token: &Token) -> Result<Value, RuntimeError> {
    Value::from_literal(type_tag, token.lexeme).ok_or_else(|| RuntimeError::InvalidLiteral {
        type_tag,
        lexeme: token.lexeme.to_string(),
        line: token.line,
        column: token.column,
    })
}
