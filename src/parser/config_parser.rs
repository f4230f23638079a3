use super::ast::{Literal, Node, Program, Statement};
use crate::config::{Recovery, TranslateOptions};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Recursive-descent parser for the configuration dialect
///
/// ```text
/// statement  := assignment | block
/// assignment := IDENTIFIER EQUALS value SEMICOLON
///             | IDENTIFIER EQUALS LBRACE statement* RBRACE
/// block      := IDENTIFIER LBRACE statement* RBRACE
/// value      := STRING | NUMBER | BOOLEAN | EXPRESSION
/// ```
///
/// One token of lookahead after an IDENTIFIER picks the production. Tokens that
/// cannot start a statement are skipped under tolerant recovery and rejected under
/// strict recovery; a missing terminator is always an error.
pub struct ConfigParser {
    tokens: Vec<Token>,
    current: usize,
    recovery: Recovery,
    max_depth: usize,
    depth: usize,
    /// Tokens skipped under tolerant recovery
    warnings: Vec<Error>,
}

impl ConfigParser {
    /// Creates a tolerant parser
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, &TranslateOptions::default())
    }

    /// Creates a parser with explicit recovery and depth limit
    pub fn with_options(mut tokens: Vec<Token>, options: &TranslateOptions) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (line, column) = tokens
                .last()
                .map(|t| (t.line, t.column + t.lexeme.chars().count()))
                .unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", line, column));
        }

        ConfigParser {
            tokens,
            current: 0,
            recovery: options.recovery,
            max_depth: options.max_depth,
            depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Parses the tokens into an AST
    pub fn parse(&mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(statement) = self.parse_statement()? {
                statements.push(statement);
            }
        }

        Ok(Program::new(statements))
    }

    /// Tokens skipped so far under tolerant recovery
    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    /// Parse one statement, or skip one unusable token and return `None`
    fn parse_statement(&mut self) -> Result<Option<Statement>> {
        if !self.check(TokenKind::Identifier) {
            self.skip()?;
            return Ok(None);
        }

        let statement = match self.peek_next_kind() {
            TokenKind::LBrace => self.parse_block()?,
            TokenKind::Equals => self.parse_assignment()?,
            _ => {
                self.skip()?;
                return Ok(None);
            }
        };

        tracing::trace!("parsed statement '{}'", statement.key());
        Ok(Some(statement))
    }

    /// Parse `key = value;` or `key = @{ ... };`
    fn parse_assignment(&mut self) -> Result<Statement> {
        let key = self.consume(TokenKind::Identifier)?.lexeme;
        self.consume(TokenKind::Equals)?;

        if self.check(TokenKind::LBrace) {
            let body = self.parse_block_body()?;
            return Ok(Statement::assign(key, Node::Block(body)));
        }

        let value = self.parse_value()?;
        self.consume(TokenKind::Semicolon)?;

        Ok(Statement::assign(key, value))
    }

    /// Parse `key @{ ... };`
    fn parse_block(&mut self) -> Result<Statement> {
        let key = self.consume(TokenKind::Identifier)?.lexeme;
        let body = self.parse_block_body()?;
        Ok(Statement::block(key, body))
    }

    /// Parse `@{ statement* };`
    fn parse_block_body(&mut self) -> Result<Vec<Statement>> {
        let open = self.consume(TokenKind::LBrace)?;

        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
                line: open.line,
            });
        }

        let mut body = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(statement) = self.parse_statement()? {
                body.push(statement);
            }
        }

        self.consume(TokenKind::RBrace)?;
        self.depth -= 1;

        Ok(body)
    }

    fn parse_value(&mut self) -> Result<Node> {
        let token = self.peek().clone();

        let node = match token.kind {
            TokenKind::String => Node::string(token.lexeme),
            TokenKind::Number => Node::Value(Literal::from_number(&token.lexeme)),
            TokenKind::Boolean => Node::bool(token.lexeme == "true"),
            TokenKind::Expression => Node::expr(token.lexeme),
            // bare words are kept as strings
            TokenKind::Identifier if !self.recovery.is_strict() => Node::string(token.lexeme),
            got => {
                return Err(Error::ExpectedValue {
                    got,
                    line: token.line,
                    column: token.column,
                })
            }
        };

        self.advance();
        Ok(node)
    }

    fn skip(&mut self) -> Result<()> {
        let token = self.peek();
        let error = Error::StrayToken {
            kind: token.kind,
            line: token.line,
            column: token.column,
        };

        if self.recovery.is_strict() {
            return Err(error);
        }

        tracing::warn!("skipping token: {}", error);
        self.warnings.push(error);
        self.advance();
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn peek_next_kind(&self) -> TokenKind {
        self.tokens
            .get(self.current + 1)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn consume(&mut self, expected: TokenKind) -> Result<Token> {
        if self.check(expected) {
            return Ok(self.advance());
        }

        let got = self.peek();
        Err(Error::UnexpectedToken {
            expected,
            got: got.kind,
            line: got.line,
            column: got.column,
        })
    }
}
