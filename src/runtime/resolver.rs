use crate::config::{Substitution, TranslateOptions};
use crate::parser::{Node, Statement};
use crate::runtime::{Environment, ExpressionEvaluator, Table, Value};

/// Walks the statement tree and produces the output table
///
/// Statements are resolved once, in document order. Every resolved key is
/// bound in one shared environment right away, so an expression sees every key
/// before it, including keys inside earlier blocks, and never the ones after it.
/// A block's own key is bound only once the block is complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    evaluator: ExpressionEvaluator,
}

impl Resolver {
    pub fn new(substitution: Substitution) -> Self {
        Resolver {
            evaluator: ExpressionEvaluator::new(substitution),
        }
    }

    pub fn with_options(options: &TranslateOptions) -> Self {
        Self::new(options.substitution)
    }

    /// Resolves statements against a fresh environment
    pub fn resolve(&self, statements: &[Statement]) -> Table {
        let mut env = Environment::new();
        self.resolve_in(statements, &mut env)
    }

    /// Resolves statements against `env`, leaving their bindings behind
    pub fn resolve_in(&self, statements: &[Statement], env: &mut Environment) -> Table {
        let mut table = Table::new();

        for statement in statements {
            let (key, value) = match statement {
                Statement::Assignment { key, value } => (key, self.resolve_value(value, env)),
                Statement::Block { key, body } => (key, Value::Table(self.resolve_in(body, env))),
            };

            if table.insert(key.as_str(), value.clone()).is_some() {
                tracing::debug!("key '{}' reassigned, last value wins", key);
            }
            env.define(key.as_str(), value);
        }

        table
    }

    fn resolve_value(&self, node: &Node, env: &mut Environment) -> Value {
        match node {
            Node::Value(literal) => Value::from(literal.clone()),
            Node::Expression(text) => match self.evaluator.evaluate(text, env) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!("could not evaluate ${}$: {}", text, err);
                    placeholder(text)
                }
            },
            Node::Block(body) => Value::Table(self.resolve_in(body, env)),
        }
    }
}

/// String stored in place of an expression that could not be evaluated
pub fn placeholder(expression: &str) -> Value {
    Value::String(format!("${{{}}}", expression))
}

/// Resolves statements with whole-token substitution
pub fn resolve(statements: &[Statement]) -> Table {
    Resolver::default().resolve(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_simple() {
        let result = resolve(&[
            Statement::assign("name", Node::string("test")),
            Statement::assign("port", Node::int(8080)),
        ]);

        let expected: Table = [("name", Value::from("test")), ("port", Value::Int(8080))]
            .into_iter()
            .collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_resolve_block() {
        let result = resolve(&[Statement::block(
            "server",
            vec![
                Statement::assign("host", Node::string("localhost")),
                Statement::assign("port", Node::int(8080)),
            ],
        )]);

        let server = result.get("server").and_then(Value::as_table).unwrap();
        assert_eq!(server.get("host"), Some(&Value::from("localhost")));
        assert_eq!(server.get("port"), Some(&Value::Int(8080)));
    }

    #[test]
    fn test_expressions_see_earlier_keys_only() {
        let result = resolve(&[
            Statement::assign("early", Node::expr("late 1 +")),
            Statement::assign("late", Node::int(5)),
            Statement::assign("after", Node::expr("late 1 +")),
        ]);

        assert_eq!(result.get("early"), Some(&placeholder("late 1 +")));
        assert_eq!(result.get("after"), Some(&Value::Int(6)));
    }

    #[test]
    fn test_block_key_bound_after_block() {
        let result = resolve(&[
            Statement::block(
                "server",
                vec![
                    Statement::assign("port", Node::int(8080)),
                    Statement::assign("next", Node::expr("port 1 +")),
                    Statement::assign("own", Node::expr("server.port")),
                ],
            ),
            Statement::assign("backup", Node::expr("server.port 10 +")),
        ]);

        let server = result.get("server").and_then(Value::as_table).unwrap();
        assert_eq!(server.get("next"), Some(&Value::Int(8081)));
        assert_eq!(server.get("own"), Some(&Value::from("server.port")));
        assert_eq!(result.get("backup"), Some(&Value::Int(8090)));
    }

    #[test]
    fn test_block_keys_visible_to_later_siblings() {
        let result = resolve(&[
            Statement::block("a", vec![Statement::assign("port", Node::int(1))]),
            Statement::block("b", vec![Statement::assign("x", Node::expr("port 1 +"))]),
            Statement::assign("y", Node::expr("port 1 +")),
        ]);

        assert_eq!(result.get_path("b.x"), Some(&Value::Int(2)));
        assert_eq!(result.get("y"), Some(&Value::Int(2)));
        // inner keys stay inside their block's table
        assert!(!result.contains_key("port"));
    }

    #[test]
    fn test_inner_key_rebinds_outer_name() {
        let result = resolve(&[
            Statement::assign("port", Node::int(8080)),
            Statement::block(
                "server",
                vec![Statement::assign("port", Node::expr("port 1 +"))],
            ),
            Statement::assign("after", Node::expr("port")),
        ]);

        assert_eq!(result.get("port"), Some(&Value::Int(8080)));
        assert_eq!(result.get_path("server.port"), Some(&Value::Int(8081)));
        assert_eq!(result.get("after"), Some(&Value::Int(8081)));
    }

    #[test]
    fn test_outer_keys_visible_inside_block() {
        let result = resolve(&[
            Statement::assign("base", Node::int(100)),
            Statement::block(
                "limits",
                vec![Statement::assign("max", Node::expr("base 2 *"))],
            ),
        ]);

        let limits = result.get("limits").and_then(Value::as_table).unwrap();
        assert_eq!(limits.get("max"), Some(&Value::Int(200)));
    }

    #[test]
    fn test_failed_expression_becomes_placeholder() {
        let result = resolve(&[Statement::assign("bad", Node::expr("1 +"))]);
        assert_eq!(result.get("bad"), Some(&Value::from("${1 +}")));
    }

    #[test]
    fn test_block_valued_assignment() {
        let result = resolve(&[
            Statement::assign(
                "config",
                Node::Block(vec![Statement::assign("key", Node::string("value"))]),
            ),
            Statement::assign("copy", Node::expr("config.key")),
        ]);

        let config = result.get("config").and_then(Value::as_table).unwrap();
        assert_eq!(config.get("key"), Some(&Value::from("value")));
        assert_eq!(result.get("copy"), Some(&Value::from("value")));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let result = resolve(&[
            Statement::assign("a", Node::int(1)),
            Statement::assign("b", Node::int(2)),
            Statement::assign("a", Node::expr("a 10 *")),
        ]);

        let keys: Vec<&str> = result.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(result.get("a"), Some(&Value::Int(10)));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let statements = vec![
            Statement::assign("port", Node::int(8080)),
            Statement::block(
                "server",
                vec![Statement::assign("port", Node::expr("port 1 +"))],
            ),
        ];
        let resolver = Resolver::default();
        assert_eq!(resolver.resolve(&statements), resolver.resolve(&statements));
    }
}
