//! Lexical analysis
//!
//! Converts source text into a stream of positioned tokens.

mod scanner;
mod token;

pub use scanner::{tokenize, Scanner};
pub use token::{Token, TokenKind};
