//! # cfgdsl - Bracketed Configuration Dialect Translator
//!
//! Translates a small configuration dialect into a nested, insertion-ordered
//! table that any serde serializer (TOML, JSON, ...) can emit.
//!
//! ## Quick Start
//!
//! ```rust
//! use cfgdsl::{translate, TranslateOptions, Value};
//!
//! # fn main() -> cfgdsl::Result<()> {
//! let source = r#"
//!     % service settings
//!     name = [[gateway]];
//!     port = 8080;
//!     server @{
//!         host = [[localhost]];
//!         admin_port = $port 1 +$;
//!     };
//!     backup_port = $server.admin_port 1000 +$;
//! "#;
//!
//! let config = translate(source, &TranslateOptions::default())?;
//!
//! assert_eq!(config.get("name"), Some(&Value::from("gateway")));
//! assert_eq!(config.get_path("server.admin_port"), Some(&Value::Int(8081)));
//! assert_eq!(config.get("backup_port"), Some(&Value::Int(9081)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - `key = value;` assigns a value, `key @{ ... };` (or `key = @{ ... };`) opens a block
//! - `[[...]]` is a raw string, digits with `.` are numbers, `true`/`false` are booleans
//! - `$...$` is a postfix expression over `+ - * /`: `$port 1000 +$`
//! - `%` starts a comment that runs to the end of the line
//!
//! ## Architecture
//!
//! ```text
//! Source → Scanner → Tokens → ConfigParser → Statements → Resolver → Table
//!                                                  ↘ ExpressionEvaluator ↗
//! ```
//!
//! - [`Scanner`] - Tokenizes source text into positioned tokens
//! - [`Parser`] - Builds assignments and blocks by recursive descent
//! - [`Resolver`] - Resolves the tree into a [`Table`], evaluating expressions
//! - [`Environment`] - Document-wide bindings visible to expressions
//!
//! ## Error Handling
//!
//! Translation either produces a complete table or fails once. Expressions that
//! cannot be evaluated never fail a translation; they are stored as `${text}`:
//!
//! ```rust
//! # use cfgdsl::{translate, TranslateOptions, Value};
//! let config = translate("ratio = $5 +$;", &TranslateOptions::default()).unwrap();
//! assert_eq!(config.get("ratio"), Some(&Value::from("${5 +}")));
//!
//! let err = translate("port = 8080", &TranslateOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "Expected SEMICOLON, got EOF at line 1, column 12");
//! ```

pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use config::{Recovery, Substitution, TranslateOptions};
pub use error::{Error, ErrorSeverity, Result};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{ConfigParser, Literal, Node, Program, Statement};
pub use runtime::{evaluate, resolve, Environment, ExpressionEvaluator, Resolver, Table, Value};

/// Type alias for the dialect scanner (lexer).
pub type Scanner = lexer::Scanner;

/// Type alias for the recursive-descent parser.
pub type Parser = ConfigParser;

/// Outcome of a translation together with the anomalies tolerant recovery skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Resolved output table
    pub table: Table,
    /// Lexical anomalies and stray tokens, in the order they were skipped
    pub warnings: Vec<Error>,
}

/// Runs the full pipeline: scan, parse, resolve
pub fn translate(source: &str, options: &TranslateOptions) -> Result<Table> {
    translate_with_warnings(source, options).map(|translation| translation.table)
}

/// Like [`translate`], also reporting what tolerant recovery skipped
pub fn translate_with_warnings(source: &str, options: &TranslateOptions) -> Result<Translation> {
    let mut scanner = Scanner::with_recovery(source, options.recovery);
    let tokens = scanner.scan_tokens()?;

    let mut parser = Parser::with_options(tokens, options);
    let program = parser.parse()?;

    let mut warnings = scanner.warnings().to_vec();
    warnings.extend_from_slice(parser.warnings());

    let table = Resolver::with_options(options).resolve(&program.statements);
    tracing::debug!(
        "translated {} top-level keys with {} warnings",
        table.len(),
        warnings.len()
    );

    Ok(Translation { table, warnings })
}
