use super::token::{Token, TokenKind};
use crate::config::Recovery;
use crate::error::{Error, Result};

/// Scanner for the bracketed configuration dialect
///
/// Rules are tried in a fixed order at each position: whitespace, `%` comments,
/// `[[...]]` strings, `$...$` expressions, `@{` / `};`, `=` / `;`, numbers, then
/// identifiers (with `true`/`false` promoted to booleans).
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Anomalies skipped under tolerant recovery
    warnings: Vec<Error>,
    recovery: Recovery,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    start_line: usize,
    start_column: usize,
}

impl Scanner {
    /// Creates a tolerant scanner over source text
    pub fn new(source: &str) -> Self {
        Self::with_recovery(source, Recovery::Tolerant)
    }

    /// Creates a scanner with an explicit recovery policy
    pub fn with_recovery(source: &str, recovery: Recovery) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            warnings: Vec::new(),
            recovery,
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Scans all tokens, terminated by an EOF token
    ///
    /// Only fails under [`Recovery::Strict`].
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token()?;
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, "", self.line, self.column));

        Ok(std::mem::take(&mut self.tokens))
    }

    /// Anomalies skipped so far under tolerant recovery
    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.peek();

        match c {
            ' ' | '\t' | '\r' | '\n' => {
                self.advance();
            }

            '%' => self.skip_line_comment(),

            '[' if self.peek_next() == '[' => self.scan_delimited("[[", "]]", TokenKind::String)?,

            '$' => self.scan_delimited("$", "$", TokenKind::Expression)?,

            '@' if self.peek_next() == '{' => {
                self.advance_by(2);
                self.add_token(TokenKind::LBrace);
            }
            '}' if self.peek_next() == ';' => {
                self.advance_by(2);
                self.add_token(TokenKind::RBrace);
            }

            '=' => {
                self.advance();
                self.add_token(TokenKind::Equals);
            }
            ';' => {
                self.advance();
                self.add_token(TokenKind::Semicolon);
            }

            c if c.is_ascii_digit() => self.scan_number(),

            c if c.is_alphabetic() || c == '_' => self.scan_identifier(),

            _ => {
                self.advance();
                self.anomaly(Error::UnexpectedCharacter {
                    ch: c,
                    line: self.start_line,
                    column: self.start_column,
                })?;
            }
        }

        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    /// Reads a literal up to the closing delimiter; the lexeme is the raw content.
    /// An unterminated literal swallows the rest of the input.
    fn scan_delimited(&mut self, open: &str, close: &str, kind: TokenKind) -> Result<()> {
        self.advance_by(open.chars().count());
        let content_start = self.current;

        while !self.is_at_end() {
            if self.matches_ahead(close) {
                let value: String = self.source[content_start..self.current].iter().collect();
                self.advance_by(close.chars().count());
                self.push_token(kind, value);
                return Ok(());
            }
            self.advance();
        }

        let literal = if kind == TokenKind::String {
            "string"
        } else {
            "expression"
        };
        self.anomaly(Error::UnterminatedLiteral {
            literal,
            line: self.start_line,
            column: self.start_column,
        })
    }

    fn scan_number(&mut self) {
        while self.peek().is_ascii_digit() || self.peek() == '.' {
            self.advance();
        }
        self.add_token(TokenKind::Number);
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        let kind = match text.as_str() {
            "true" | "false" => TokenKind::Boolean,
            _ => TokenKind::Identifier,
        };
        self.push_token(kind, text);
    }

    fn anomaly(&mut self, error: Error) -> Result<()> {
        if self.recovery.is_strict() {
            return Err(error);
        }
        tracing::warn!("skipping lexical anomaly: {}", error);
        self.warnings.push(error);
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn matches_ahead(&self, pattern: &str) -> bool {
        let mut idx = self.current;
        for expected in pattern.chars() {
            if idx >= self.source.len() || self.source[idx] != expected {
                return false;
            }
            idx += 1;
        }
        true
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.push_token(kind, lexeme);
    }

    fn push_token(&mut self, kind: TokenKind, lexeme: String) {
        tracing::trace!(
            "token {} {:?} at {}:{}",
            kind,
            lexeme,
            self.start_line,
            self.start_column
        );
        self.tokens.push(Token::new(
            kind,
            lexeme,
            self.start_line,
            self.start_column,
        ));
    }
}

/// Tokenizes source text under tolerant recovery
pub fn tokenize(source: &str) -> Vec<Token> {
    // tolerant scanning records anomalies as warnings and never returns Err
    Scanner::new(source).scan_tokens().unwrap_or_default()
}
