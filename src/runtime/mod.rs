//! Resolution of parsed statements into the output table

mod environment;
pub mod expression;
mod resolver;
mod value;

pub use environment::Environment;
pub use expression::{evaluate, BinaryOp, ExpressionEvaluator};
pub use resolver::{placeholder, resolve, Resolver};
pub use value::{Table, Value};
