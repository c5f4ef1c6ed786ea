use crate::token::{Token, TokenKind};
use log::trace;
use phf::phf_map;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScanError {
    #[error("[line {line}:{column}] Error: Unexpected character '{character}'")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] Error: Unterminated string")]
    UnterminatedString { line: usize, column: usize },
}

// `line` and `column` give the position of the next unread character.
struct Scanner<'a> {
    source: &'a str,
    iter: Peekable<CharIndices<'a>>,
    start: usize,
    start_line: usize,
    start_column: usize,
    line: usize,
    column: usize,
}

/// Splits `source` into tokens, ending with exactly one `EndOfInput`.
/// Stops at the first lexical error.
pub fn scan_tokens(source: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = Scanner {
        source,
        iter: source.char_indices().peekable(),
        start: 0,
        start_line: 1,
        start_column: 1,
        line: 1,
        column: 1,
    };
    let mut tokens: Vec<Token> = Vec::new();

    while let Some(&(idx, _)) = scanner.iter.peek() {
        scanner.begin(idx);
        if let Some(token) = scanner.scan_token()? {
            tokens.push(token);
        }
    }
    scanner.begin(source.len());
    tokens.push(scanner.token(TokenKind::EndOfInput));
    trace!("scanned {} tokens", tokens.len());
    Ok(tokens)
}

impl<'a> Scanner<'a> {
    fn begin(&mut self, idx: usize) {
        self.start = idx;
        self.start_line = self.line;
        self.start_column = self.column;
    }
    fn scan_token(&mut self) -> Result<Option<Token<'a>>, ScanError> {
        let c = match self.advance() {
            Some((_, c)) => c,
            None => return Ok(None),
        };
        match c {
            c if c.is_whitespace() => Ok(None),
            'a'..='z' | 'A'..='Z' | '_' => Ok(Some(self.word())),
            '0'..='9' => Ok(Some(self.number()?)),
            '"' => Ok(Some(self.string()?)),
            '=' | '+' | '-' | '*' | '/' | '>' | '<' => Ok(Some(self.token(TokenKind::Operator))),
            ';' | '(' | ')' | '{' | '}' | '[' | ']' => Ok(Some(self.token(TokenKind::Symbol))),
            _ => Err(ScanError::UnexpectedCharacter {
                character: c,
                line: self.start_line,
                column: self.start_column,
            }),
        }
    }
    fn current(&mut self) -> usize {
        match self.iter.peek() {
            None => self.source.len(),
            Some((idx, _)) => *idx,
        }
    }
    fn advance(&mut self) -> Option<(usize, char)> {
        let next = self.iter.next();
        match next {
            Some((_, '\n')) => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        next
    }
    fn token(&mut self, kind: TokenKind) -> Token<'a> {
        let current = self.current();
        Token {
            kind,
            lexeme: &self.source[self.start..current],
            line: self.start_line,
            column: self.start_column,
        }
    }
    fn string(&mut self) -> Result<Token<'a>, ScanError> {
        loop {
            match self.advance() {
                None => {
                    return Err(ScanError::UnterminatedString {
                        line: self.start_line,
                        column: self.start_column,
                    })
                }
                Some((_, '"')) => break,
                Some(_) => {}
            }
        }
        let current = self.current();
        Ok(Token {
            kind: TokenKind::String,
            lexeme: &self.source[self.start + 1..current - 1],
            line: self.start_line,
            column: self.start_column,
        })
    }
    fn digits(&mut self) {
        while let Some((_, '0'..='9')) = self.iter.peek() {
            self.advance();
        }
    }
    fn number(&mut self) -> Result<Token<'a>, ScanError> {
        self.digits();

        let mut kind = TokenKind::Number;
        if let Some((_, '.')) = self.iter.peek() {
            let mut x = self.iter.clone();
            x.next();
            if let Some((_, '0'..='9')) = x.peek() {
                self.advance();
                self.digits();
                kind = TokenKind::Float;
            }
        }

        // Digits running straight into a word are rejected, not split.
        if let Some(&(_, c)) = self.iter.peek() {
            if c.is_ascii_alphabetic() || c == '_' {
                return Err(ScanError::UnexpectedCharacter {
                    character: c,
                    line: self.line,
                    column: self.column,
                });
            }
        }
        Ok(self.token(kind))
    }
    fn word(&mut self) -> Token<'a> {
        while let Some((_, c)) = self.iter.peek() {
            match c {
                '0'..='9' | 'a'..='z' | 'A'..='Z' | '_' => {
                    self.advance();
                }
                _ => break,
            }
        }
        let current = self.current();
        match RESERVED.get(&self.source[self.start..current]) {
            None => self.token(TokenKind::Identifier),
            Some(kind) => self.token(*kind),
        }
    }
}

// Reserved words win over identifiers.
static RESERVED: phf::Map<&'static str, TokenKind> = phf_map! {
    "var" => TokenKind::Keyword,
    "if" => TokenKind::Keyword,
    "import" => TokenKind::Keyword,
    "put" => TokenKind::Keyword,
    "int" => TokenKind::Type,
    "float" => TokenKind::Type,
    "string" => TokenKind::Type,
    "bool" => TokenKind::Type,
    "list" => TokenKind::Type,
    "dict" => TokenKind::Type,
    "true" => TokenKind::Bool,
    "false" => TokenKind::Bool,
};
