use serde::{Deserialize, Serialize};

/// A single token from the source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Token text; for literals this is the content between the delimiters
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }
}

/// All token kinds of the configuration dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Names and literals
    /// Key or bare word: `[A-Za-z_][A-Za-z0-9_]*`
    Identifier,
    /// `[[...]]` literal, lexeme is the raw content
    String,
    /// Run of digits and dots, lexeme kept verbatim (`1.2.3` included)
    Number,
    /// `true` or `false`
    Boolean,
    /// `$...$` literal, lexeme is the raw postfix text
    Expression,

    // Punctuation
    /// `=`
    Equals,
    /// `;`
    Semicolon,
    /// `@{`
    LBrace,
    /// `};`
    RBrace,

    // Special
    /// End of input marker
    Eof,
}

impl TokenKind {
    /// Check if token can sit in a value position
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::Number | TokenKind::Boolean | TokenKind::Expression
        )
    }

    /// Uppercase name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Expression => "EXPRESSION",
            TokenKind::Equals => "EQUALS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
