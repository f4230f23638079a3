//! Error types for the configuration translator

use thiserror::Error;

use crate::lexer::TokenKind;

/// Translator errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexical errors (strict recovery only)
    /// Character that cannot start any token
    ///
    /// **Triggered by:** Stray punctuation such as `-`, `#` or `!` outside a literal
    /// **Tolerant mode:** the character is skipped with a warning instead
    #[error("Unexpected character '{ch}' at line {line}, column {column}")]
    UnexpectedCharacter {
        /// Offending character
        ch: char,
        /// Line number (1-indexed)
        line: usize,
        /// Column number (1-indexed)
        column: usize,
    },

    /// String or expression literal with no closing delimiter
    ///
    /// **Example:** `name = [[unfinished;`
    /// **Tolerant mode:** the literal is dropped with a warning instead
    #[error("Unterminated {literal} literal starting at line {line}, column {column}")]
    UnterminatedLiteral {
        /// Literal kind ("string" or "expression")
        literal: &'static str,
        /// Line where the literal opened
        line: usize,
        /// Column where the literal opened
        column: usize,
    },

    // Parse errors
    /// A required token is missing
    ///
    /// **Triggered by:** A missing `;` after an assignment, or a block without `};`
    #[error("Expected {expected}, got {got} at line {line}, column {column}")]
    UnexpectedToken {
        /// Token kind the grammar requires here
        expected: TokenKind,
        /// Token kind actually found
        got: TokenKind,
        /// Line of the token found
        line: usize,
        /// Column of the token found
        column: usize,
    },

    /// Value position holds something that is not a value
    ///
    /// **Example:** `port = ;`
    #[error("Expected a value, got {got} at line {line}, column {column}")]
    ExpectedValue {
        /// Token kind actually found
        got: TokenKind,
        /// Line of the token found
        line: usize,
        /// Column of the token found
        column: usize,
    },

    /// Token that cannot start a statement
    ///
    /// **Example:** `= 5;` or `server host = 1;`
    /// **Tolerant mode:** the token is skipped with a warning instead
    #[error("Unexpected {kind} at line {line}, column {column}: expected an assignment or block")]
    StrayToken {
        /// Kind of the skipped token
        kind: TokenKind,
        /// Line of the token
        line: usize,
        /// Column of the token
        column: usize,
    },

    /// Block nesting exceeds the configured limit
    #[error("Blocks nested deeper than {limit} levels at line {line}")]
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
        /// Line of the block that crossed the limit
        line: usize,
    },

    // Expression errors (recovered by the resolver)
    /// Operator applied with fewer than two operands on the stack
    ///
    /// **Example:** `$5 +$`
    #[error("Stack underflow: operator '{operator}' needs 2 operands, found {available}")]
    StackUnderflow {
        /// Operator being applied
        operator: char,
        /// Operands available at that point
        available: usize,
    },

    /// Operator applied to operands it does not support
    ///
    /// **Example:** `$[[a]] 2 *$` after substitution yields a string times an int
    #[error("Invalid operation: {op} on types {left_type} and {right_type}")]
    InvalidOperation {
        /// Operation name
        op: &'static str,
        /// Left operand type
        left_type: &'static str,
        /// Right operand type
        right_type: &'static str,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Aborts the translation
    Fatal,
    /// Recovered locally, the translation continues with a substitute
    Recoverable,
    /// Anomaly that tolerant mode skips over
    Warning,
}

impl Error {
    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::UnexpectedToken { .. } => ErrorSeverity::Fatal,
            Error::ExpectedValue { .. } => ErrorSeverity::Fatal,
            Error::NestingTooDeep { .. } => ErrorSeverity::Fatal,

            Error::StackUnderflow { .. } => ErrorSeverity::Recoverable,
            Error::InvalidOperation { .. } => ErrorSeverity::Recoverable,

            Error::UnexpectedCharacter { .. } => ErrorSeverity::Warning,
            Error::UnterminatedLiteral { .. } => ErrorSeverity::Warning,
            Error::StrayToken { .. } => ErrorSeverity::Warning,
        }
    }

    /// Source line the error points at, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedCharacter { line, .. }
            | Error::UnterminatedLiteral { line, .. }
            | Error::UnexpectedToken { line, .. }
            | Error::ExpectedValue { line, .. }
            | Error::StrayToken { line, .. }
            | Error::NestingTooDeep { line, .. } => Some(*line),
            Error::StackUnderflow { .. } | Error::InvalidOperation { .. } => None,
        }
    }
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, Error>;
