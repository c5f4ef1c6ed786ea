use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    #[strum(serialize = "keyword")]
    Keyword,
    #[strum(serialize = "identifier")]
    Identifier,
    #[strum(serialize = "integer literal")]
    Number,
    #[strum(serialize = "float literal")]
    Float,
    #[strum(serialize = "string literal")]
    String,
    #[strum(serialize = "boolean literal")]
    Bool,
    #[strum(serialize = "type name")]
    Type,
    #[strum(serialize = "operator")]
    Operator,
    #[strum(serialize = "symbol")]
    Symbol,
    #[strum(serialize = "end of input")]
    EndOfInput,
}

impl TokenKind {
    pub fn is_literal(self) -> bool {
        match self {
            TokenKind::Number | TokenKind::Float | TokenKind::String | TokenKind::Bool => true,
            _ => false,
        }
    }
}

/// A classified slice of the source. String lexemes exclude their quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub line: usize,
    pub column: usize,
}

impl<'a> Token<'a> {
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => "end of input".to_string(),
            TokenKind::String => format!("{} \"{}\"", self.kind, self.lexeme),
            _ => format!("{} '{}'", self.kind, self.lexeme),
        }
    }
}
