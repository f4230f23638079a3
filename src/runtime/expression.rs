//! Postfix evaluator for `$...$` expressions
//!
//! Operands are whitespace-separated and operators follow their operands:
//! `$port 1000 +$`. There is no precedence and no grouping, only the binary
//! operators `+ - * /`.

use std::borrow::Cow;

use crate::config::Substitution;
use crate::error::{Error, Result};
use crate::runtime::{Environment, Value};

/// Binary operators of the expression language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Parses an operator token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }

    /// Applies the operator; integer arithmetic saturates, mixed operands
    /// promote to float, division by zero yields `0`
    pub fn apply(self, left: Value, right: Value) -> Result<Value> {
        match self {
            BinaryOp::Add => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Ok(Value::Int(l.saturating_add(r))),
                (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l + r)),
                (Value::Int(l), Value::Float(r)) => Ok(Value::Float(l as f64 + r)),
                (Value::Float(l), Value::Int(r)) => Ok(Value::Float(l + r as f64)),
                (Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
                (l, r) => Err(invalid("add", &l, &r)),
            },

            BinaryOp::Sub => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Ok(Value::Int(l.saturating_sub(r))),
                (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l - r)),
                (Value::Int(l), Value::Float(r)) => Ok(Value::Float(l as f64 - r)),
                (Value::Float(l), Value::Int(r)) => Ok(Value::Float(l - r as f64)),
                (l, r) => Err(invalid("subtract", &l, &r)),
            },

            BinaryOp::Mul => match (left, right) {
                (Value::Int(l), Value::Int(r)) => Ok(Value::Int(l.saturating_mul(r))),
                (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l * r)),
                (Value::Int(l), Value::Float(r)) => Ok(Value::Float(l as f64 * r)),
                (Value::Float(l), Value::Int(r)) => Ok(Value::Float(l * r as f64)),
                (l, r) => Err(invalid("multiply", &l, &r)),
            },

            BinaryOp::Div => match (left, right) {
                (Value::Int(_) | Value::Float(_), r) if r.is_zero() => Ok(Value::Int(0)),
                (Value::Int(l), Value::Int(r)) => match l.checked_rem(r) {
                    Some(0) => Ok(Value::Int(l / r)),
                    _ => Ok(Value::Float(l as f64 / r as f64)),
                },
                (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l / r)),
                (Value::Int(l), Value::Float(r)) => Ok(Value::Float(l as f64 / r)),
                (Value::Float(l), Value::Int(r)) => Ok(Value::Float(l / r as f64)),
                (l, r) => Err(invalid("divide", &l, &r)),
            },
        }
    }
}

fn invalid(op: &'static str, left: &Value, right: &Value) -> Error {
    Error::InvalidOperation {
        op,
        left_type: left.type_name(),
        right_type: right.type_name(),
    }
}

/// Evaluator for postfix expressions against an [`Environment`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEvaluator {
    substitution: Substitution,
}

impl ExpressionEvaluator {
    pub fn new(substitution: Substitution) -> Self {
        ExpressionEvaluator { substitution }
    }

    /// Evaluates expression text
    ///
    /// An empty expression is `0`; a single operand is returned as is (a bound
    /// value, a number, or the raw word); otherwise the result is the top of
    /// the operand stack. Errors mean the text could not be evaluated.
    pub fn evaluate(&self, expression: &str, env: &Environment) -> Result<Value> {
        let text = match self.substitution {
            Substitution::WholeToken => Cow::Borrowed(expression),
            Substitution::Textual => Cow::Owned(substitute_textual(expression, env)),
        };

        let tokens: Vec<&str> = text.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Ok(Value::Int(0)),
            [single] => Ok(self.operand(single, env)),
            _ => self.evaluate_postfix(&tokens, env),
        }
    }

    fn evaluate_postfix(&self, tokens: &[&str], env: &Environment) -> Result<Value> {
        let mut stack: Vec<Value> = Vec::new();

        for token in tokens {
            match BinaryOp::from_token(token) {
                Some(op) => {
                    if stack.len() < 2 {
                        return Err(Error::StackUnderflow {
                            operator: op.symbol(),
                            available: stack.len(),
                        });
                    }
                    let right = stack.pop();
                    let left = stack.pop();
                    if let (Some(left), Some(right)) = (left, right) {
                        stack.push(op.apply(left, right)?);
                    }
                }
                None => stack.push(self.operand(token, env)),
            }
        }

        if stack.len() > 1 {
            tracing::debug!(
                "{} operands left on the stack, using the last one",
                stack.len()
            );
        }
        Ok(stack.pop().unwrap_or(Value::Int(0)))
    }

    /// Numeric literal, then bound variable, then the raw word
    fn operand(&self, token: &str, env: &Environment) -> Value {
        if let Some(number) = parse_number(token) {
            return number;
        }
        if let Some(value) = env.lookup(token) {
            return value.clone();
        }
        Value::String(token.to_string())
    }
}

/// Replaces every bound name in the raw text with its value's text form.
///
/// Names are replaced wherever they occur, also inside longer words, and in
/// binding order, so `port` is substituted inside `port2` before `port2` is seen.
fn substitute_textual(expression: &str, env: &Environment) -> String {
    let mut text = expression.to_string();
    for (name, value) in env.iter() {
        if !name.is_empty() && text.contains(name) {
            text = text.replace(name, &value.to_string());
        }
    }
    text
}

/// Optional `-`, then digits with at most one `.`; int without the dot, float with it
fn parse_number(token: &str) -> Option<Value> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    let valid = digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if !valid {
        return None;
    }

    if token.contains('.') {
        token.parse::<f64>().ok().map(Value::Float)
    } else {
        token.parse::<i64>().ok().map(Value::Int)
    }
}

/// Evaluates with whole-token substitution
pub fn evaluate(expression: &str, env: &Environment) -> Result<Value> {
    ExpressionEvaluator::default().evaluate(expression, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Table;

    fn eval(expression: &str) -> Result<Value> {
        evaluate(expression, &Environment::new())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("5 3 +").unwrap(), Value::Int(8));
        assert_eq!(eval("10 2 -").unwrap(), Value::Int(8));
        assert_eq!(eval("4 3 *").unwrap(), Value::Int(12));
        assert_eq!(eval("10 2 /").unwrap(), Value::Int(5));
        assert_eq!(eval("7 2 /").unwrap(), Value::Float(3.5));
        assert_eq!(eval("1.5 2 *").unwrap(), Value::Float(3.0));
        assert_eq!(eval("2 3 4 * +").unwrap(), Value::Int(14));
        assert_eq!(eval("10 -4 +").unwrap(), Value::Int(6));
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        assert_eq!(eval("10 0 /").unwrap(), Value::Int(0));
        assert_eq!(eval("2.5 0.0 /").unwrap(), Value::Int(0));
    }

    #[test]
    fn test_variables() {
        let env: Environment = [("port", Value::Int(8080))].into_iter().collect();
        assert_eq!(
            evaluate("port 1000 +", &env).unwrap(),
            Value::Int(9080)
        );
        assert_eq!(evaluate("port", &env).unwrap(), Value::Int(8080));
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(eval("").unwrap(), Value::Int(0));
        assert_eq!(eval("   ").unwrap(), Value::Int(0));
        assert_eq!(eval("42").unwrap(), Value::Int(42));
        assert_eq!(eval("4.2").unwrap(), Value::Float(4.2));
        assert_eq!(eval("hello").unwrap(), Value::from("hello"));
        assert_eq!(eval("1.2.3").unwrap(), Value::from("1.2.3"));
    }

    #[test]
    fn test_leftover_operands_use_top() {
        assert_eq!(eval("1 2").unwrap(), Value::Int(2));
        assert_eq!(eval("1 2 3 +").unwrap(), Value::Int(5));
    }

    #[test]
    fn test_stack_underflow() {
        assert_eq!(
            eval("5 +").unwrap_err(),
            Error::StackUnderflow {
                operator: '+',
                available: 1
            }
        );
        assert_eq!(
            eval("+ 1").unwrap_err(),
            Error::StackUnderflow {
                operator: '+',
                available: 0
            }
        );
    }

    #[test]
    fn test_heterogeneous_operands() {
        let env: Environment = [("prefix", Value::from("api_"))].into_iter().collect();
        assert_eq!(
            evaluate("prefix v1 +", &env).unwrap(),
            Value::from("api_v1")
        );

        assert_eq!(
            eval("word 2 *").unwrap_err(),
            Error::InvalidOperation {
                op: "multiply",
                left_type: "string",
                right_type: "int"
            }
        );
    }

    #[test]
    fn test_saturating_integers() {
        assert_eq!(
            eval("9223372036854775807 1 +").unwrap(),
            Value::Int(i64::MAX)
        );
    }

    #[test]
    fn test_namespace_paths() {
        let server: Table = [("port", Value::Int(8080))].into_iter().collect();
        let mut env = Environment::new();
        env.define("server", server);

        assert_eq!(
            evaluate("server.port 1 +", &env).unwrap(),
            Value::Int(8081)
        );
        assert!(matches!(
            evaluate("server 1 +", &env),
            Err(Error::InvalidOperation { left_type: "table", .. })
        ));
    }

    #[test]
    fn test_whole_token_ignores_substrings() {
        let env: Environment = [("port", Value::Int(80)), ("port2", Value::Int(443))]
            .into_iter()
            .collect();
        let evaluator = ExpressionEvaluator::new(Substitution::WholeToken);
        assert_eq!(
            evaluator.evaluate("port2 1 +", &env).unwrap(),
            Value::Int(444)
        );
    }

    #[test]
    fn test_textual_substitution_hazard() {
        let env: Environment = [("port", Value::Int(80)), ("port2", Value::Int(443))]
            .into_iter()
            .collect();
        let evaluator = ExpressionEvaluator::new(Substitution::Textual);

        assert_eq!(evaluator.evaluate("port 1 +", &env).unwrap(), Value::Int(81));
        // `port` is replaced inside `port2` first, leaving the number 802
        assert_eq!(
            evaluator.evaluate("port2 1 +", &env).unwrap(),
            Value::Int(803)
        );
    }

    #[test]
    fn test_textual_float_text_form() {
        let env: Environment = [("ratio", Value::Float(2.0))].into_iter().collect();
        let evaluator = ExpressionEvaluator::new(Substitution::Textual);
        assert_eq!(
            evaluator.evaluate("ratio 3 *", &env).unwrap(),
            Value::Float(6.0)
        );
    }
}
