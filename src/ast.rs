use super::token::{Token, TokenKind};
use super::value::TypeTag;
use std::cmp::Ordering;
use strum_macros::{Display, EnumString};

/// Either side of a condition, or the argument of `put`.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    Literal(&'a Token<'a>),
    Variable(&'a Token<'a>),
}

impl<'a> Operand<'a> {
    pub fn token(&self) -> &'a Token<'a> {
        match self {
            Operand::Literal(x) | Operand::Variable(x) => *x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Comparison {
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = "<")]
    Less,
}

impl Comparison {
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Greater => ordering == Ordering::Greater,
            Comparison::Less => ordering == Ordering::Less,
        }
    }
}

/// `operand relop operand`. The operator is kept as a token and resolved
/// when the condition is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition<'a> {
    pub left: Operand<'a>,
    pub operator: &'a Token<'a>,
    pub right: Operand<'a>,
}

pub trait Visitor<T, Output> {
    fn visit(&mut self, n: &T) -> Output;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Import {
        module: &'a Token<'a>,
    },
    Declare {
        name: &'a Token<'a>,
        type_tag: TypeTag,
        literal: &'a Token<'a>,
    },
    Print(Operand<'a>),
    If {
        condition: Condition<'a>,
        body: Vec<Statement<'a>>,
    },
}

impl<'a> Statement<'a> {
    pub fn accept<T>(&self, v: &mut dyn Visitor<Statement<'a>, T>) -> T {
        v.visit(self)
    }
}

pub struct AstPrinter {}

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, args: Vec<String>) -> String {
        let mut x = String::from("(");
        x.push_str(name);
        for arg in args {
            x.push_str(" ");
            x.push_str(arg.as_str());
        }
        x.push_str(")");
        x
    }
    fn operand(&mut self, operand: &Operand) -> String {
        let token = operand.token();
        match token.kind {
            TokenKind::String => format!("{:?}", token.lexeme),
            _ => token.lexeme.to_string(),
        }
    }
}

impl<'a> Visitor<Statement<'a>, String> for AstPrinter {
    fn visit(&mut self, n: &Statement<'a>) -> String {
        match n {
            Statement::Import { module } => {
                self.parenthesize("import", vec![module.lexeme.to_string()])
            }
            Statement::Declare {
                name,
                type_tag,
                literal,
            } => {
                let value = self.operand(&Operand::Literal(literal));
                self.parenthesize(
                    "var",
                    vec![name.lexeme.to_string(), type_tag.to_string(), value],
                )
            }
            Statement::Print(operand) => {
                let arg = self.operand(operand);
                self.parenthesize("put", vec![arg])
            }
            Statement::If { condition, body } => {
                let left = self.operand(&condition.left);
                let right = self.operand(&condition.right);
                let test = self.parenthesize(condition.operator.lexeme, vec![left, right]);
                let mut args = vec![test];
                for stmt in body {
                    args.push(stmt.accept(self));
                }
                self.parenthesize("if", args)
            }
        }
    }
}

#[cfg(test)]
mod ast_tests {
    use crate::ast::{AstPrinter, Comparison, Condition, Operand, Statement};
    use crate::token::{Token, TokenKind};
    use crate::value::TypeTag;
    use std::cmp::Ordering;
    use std::str::FromStr;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token {
            kind,
            lexeme,
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn basic_ast_test() {
        let three = token(TokenKind::Number, "3");
        let less = token(TokenKind::Operator, "<");
        let x = token(TokenKind::Identifier, "x");
        let yes = token(TokenKind::String, "yes");
        let int = token(TokenKind::Number, "5");
        let statement = Statement::If {
            condition: Condition {
                left: Operand::Literal(&three),
                operator: &less,
                right: Operand::Variable(&x),
            },
            body: vec![
                Statement::Declare {
                    name: &x,
                    type_tag: TypeTag::Int,
                    literal: &int,
                },
                Statement::Print(Operand::Literal(&yes)),
            ],
        };
        let mut printer = AstPrinter {};
        assert_eq!(
            statement.accept(&mut printer),
            "(if (< 3 x) (var x int 5) (put \"yes\"))"
        );
    }

    #[test]
    fn comparisons() {
        assert_eq!(Comparison::from_str(">").unwrap(), Comparison::Greater);
        assert!(Comparison::from_str("=").is_err());
        assert!(Comparison::Less.holds(Ordering::Less));
        assert!(!Comparison::Less.holds(Ordering::Equal));
        assert!(!Comparison::Greater.holds(Ordering::Equal));
    }
}
