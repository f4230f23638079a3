//! Parser Module
//!
//! Builds the assignment/block tree from the token stream.

mod ast;
mod config_parser;

pub use ast::{Literal, Node, Program, Statement};
pub use config_parser::ConfigParser;
