use super::ast::{Condition, Operand, Statement};
use super::token::{Token, TokenKind};
use super::value::TypeTag;
use log::debug;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("[line {line}:{column}] Syntax error: expected {expected}, found {found}")]
    Syntax {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    #[error(
        "[line {line}:{column}] Type mismatch: '{name}' is declared {declared} but was given {supplied} '{lexeme}'"
    )]
    TypeMismatch {
        name: String,
        declared: TypeTag,
        supplied: TokenKind,
        lexeme: String,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] Missing ';' after {statement}, found {found}")]
    MissingTerminator {
        statement: &'static str,
        found: String,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] Conditionals nested deeper than {limit} levels")]
    TooDeeplyNested {
        limit: usize,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] Literals of type {type_tag} are not supported")]
    UnsupportedLiteral {
        type_tag: TypeTag,
        line: usize,
        column: usize,
    },
}

// Stands in for a missing EndOfInput when the token list was not scanned.
static END_OF_INPUT: Token<'static> = Token {
    kind: TokenKind::EndOfInput,
    lexeme: "",
    line: 0,
    column: 0,
};

/// How many `if` bodies may enclose one another.
pub const MAX_NESTING: usize = 256;

/// Recursive-descent parser over a scanned token list.
///
/// Statements can be pulled one at a time with `next_statement`, which is how
/// the interpreter drives it, or all at once with `parse`.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    depth: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Parser<'a> {
        Parser {
            tokens,
            current: 0,
            depth: 0,
            nesting: 0,
        }
    }
    pub fn parse(&mut self) -> Result<Vec<Statement<'a>>, ParseError> {
        let mut statements: Vec<Statement<'a>> = Vec::new();
        while let Some(statement) = self.next_statement()? {
            statements.push(statement);
        }
        Ok(statements)
    }
    /// The next top-level statement, or `None` once only end of input remains.
    pub fn next_statement(&mut self) -> Result<Option<Statement<'a>>, ParseError> {
        if self.is_at_end() {
            return Ok(None);
        }
        let statement = self.statement()?;
        debug!("parsed {:?}", statement);
        Ok(Some(statement))
    }
    fn statement(&mut self) -> Result<Statement<'a>, ParseError> {
        let token = self.peek();
        match (token.kind, token.lexeme) {
            (TokenKind::Keyword, "import") => {
                self.advance();
                self.import_statement()
            }
            (TokenKind::Keyword, "var") => {
                self.advance();
                self.var_declaration()
            }
            (TokenKind::Keyword, "if") => {
                self.advance();
                self.if_statement(token)
            }
            (TokenKind::Keyword, "put") => {
                self.advance();
                self.put_statement()
            }
            _ => Err(self.error("a statement")),
        }
    }
    fn import_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        self.consume_symbol("{")?;
        let module = self.consume(TokenKind::Identifier, "a module name")?;
        self.consume_symbol("}")?;
        self.terminator("import statement")?;
        Ok(Statement::Import { module })
    }
    fn var_declaration(&mut self) -> Result<Statement<'a>, ParseError> {
        let name = self.consume(TokenKind::Identifier, "a variable name")?;
        let type_token = self.consume(TokenKind::Type, "a type name")?;
        let type_tag = TypeTag::from_str(type_token.lexeme)
            .map_err(|_| self.error_at(type_token, "a type name"))?;
        if !self.peek().is(TokenKind::Operator, "=") {
            return Err(self.error("'='"));
        }
        self.advance();

        let literal = self.peek();
        match type_tag.literal_kind() {
            None => {
                return Err(ParseError::UnsupportedLiteral {
                    type_tag,
                    line: literal.line,
                    column: literal.column,
                })
            }
            Some(kind) if kind == literal.kind => {
                self.advance();
            }
            Some(_) if literal.kind.is_literal() => {
                return Err(ParseError::TypeMismatch {
                    name: name.lexeme.to_string(),
                    declared: type_tag,
                    supplied: literal.kind,
                    lexeme: literal.lexeme.to_string(),
                    line: literal.line,
                    column: literal.column,
                })
            }
            Some(kind) => return Err(self.error(&format!("{} for type {}", kind, type_tag))),
        }
        self.terminator("variable declaration")?;
        Ok(Statement::Declare {
            name,
            type_tag,
            literal,
        })
    }
    fn if_statement(&mut self, keyword: &Token) -> Result<Statement<'a>, ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::TooDeeplyNested {
                limit: MAX_NESTING,
                line: keyword.line,
                column: keyword.column,
            });
        }
        self.consume_symbol("(")?;
        let left = self.operand()?;
        let operator = self.consume(TokenKind::Operator, "a comparison operator")?;
        let right = self.operand()?;
        self.consume_symbol(")")?;
        let condition = Condition {
            left,
            operator,
            right,
        };

        self.nesting += 1;
        let body = if self.peek().is(TokenKind::Symbol, "{") {
            self.advance();
            self.block()?
        } else {
            vec![self.statement()?]
        };
        self.nesting -= 1;
        Ok(Statement::If { condition, body })
    }
    fn block(&mut self) -> Result<Vec<Statement<'a>>, ParseError> {
        let mut statements: Vec<Statement<'a>> = Vec::new();
        self.depth += 1;
        while !self.peek().is(TokenKind::Symbol, "}") {
            if self.is_at_end() {
                return Err(self.error("'}' after block"));
            }
            statements.push(self.statement()?);
        }
        self.advance();
        self.depth -= 1;
        Ok(statements)
    }
    fn put_statement(&mut self) -> Result<Statement<'a>, ParseError> {
        self.consume_symbol("{")?;
        let token = self.peek();
        let operand = match token.kind {
            TokenKind::String => Operand::Literal(token),
            TokenKind::Identifier => Operand::Variable(token),
            _ => return Err(self.error("a string or identifier")),
        };
        self.advance();
        self.consume_symbol("}")?;
        self.terminator("put statement")?;
        Ok(Statement::Print(operand))
    }
    fn operand(&mut self) -> Result<Operand<'a>, ParseError> {
        let token = self.peek();
        let operand = match token.kind {
            TokenKind::Number | TokenKind::Float | TokenKind::String => Operand::Literal(token),
            TokenKind::Identifier => Operand::Variable(token),
            _ => return Err(self.error("a number, string or identifier")),
        };
        self.advance();
        Ok(operand)
    }
    // The last statement of a block may leave out its ';' before the '}'.
    fn terminator(&mut self, statement: &'static str) -> Result<(), ParseError> {
        let token = self.peek();
        if token.is(TokenKind::Symbol, ";") {
            self.advance();
            Ok(())
        } else if self.depth > 0 && token.is(TokenKind::Symbol, "}") {
            Ok(())
        } else {
            Err(ParseError::MissingTerminator {
                statement,
                found: token.describe(),
                line: token.line,
                column: token.column,
            })
        }
    }
    fn consume(&mut self, kind: TokenKind, expected: &str) -> Result<&'a Token<'a>, ParseError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error(expected))
        }
    }
    fn consume_symbol(&mut self, symbol: &str) -> Result<&'a Token<'a>, ParseError> {
        if self.peek().is(TokenKind::Symbol, symbol) {
            Ok(self.advance())
        } else {
            Err(self.error(&format!("'{}'", symbol)))
        }
    }
    fn advance(&mut self) -> &'a Token<'a> {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }
    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }
    fn peek(&self) -> &'a Token<'a> {
        self.tokens.get(self.current).unwrap_or(&END_OF_INPUT)
    }
    fn error(&self, expected: &str) -> ParseError {
        self.error_at(self.peek(), expected)
    }
    fn error_at(&self, token: &Token, expected: &str) -> ParseError {
        ParseError::Syntax {
            expected: expected.to_string(),
            found: token.describe(),
            line: token.line,
            column: token.column,
        }
    }
}
