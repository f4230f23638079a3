use serde::{Deserialize, Serialize};

/// Parsed configuration document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements in document order
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Key assignment: `key = value;`
    Assignment {
        /// Key being assigned
        key: String,
        /// Literal or embedded expression
        value: Node,
    },

    /// Nested block: `key @{ ... };` or `key = @{ ... };`
    Block {
        /// Key the block's table is stored under
        key: String,
        /// Statements inside the block
        body: Vec<Statement>,
    },
}

impl Statement {
    /// Creates an assignment statement
    pub fn assign(key: impl Into<String>, value: Node) -> Self {
        Statement::Assignment {
            key: key.into(),
            value,
        }
    }

    /// Creates a block statement
    pub fn block(key: impl Into<String>, body: Vec<Statement>) -> Self {
        Statement::Block {
            key: key.into(),
            body,
        }
    }

    /// Key the statement binds
    pub fn key(&self) -> &str {
        match self {
            Statement::Assignment { key, .. } | Statement::Block { key, .. } => key,
        }
    }
}

/// Right-hand side of an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Literal already coerced at parse time
    Value(Literal),
    /// Unevaluated postfix expression text
    Expression(String),
    /// Block in value position, resolved like a nested block
    Block(Vec<Statement>),
}

impl Node {
    pub fn string(s: impl Into<String>) -> Self {
        Node::Value(Literal::String(s.into()))
    }

    pub fn int(n: i64) -> Self {
        Node::Value(Literal::Int(n))
    }

    pub fn float(f: f64) -> Self {
        Node::Value(Literal::Float(f))
    }

    pub fn bool(b: bool) -> Self {
        Node::Value(Literal::Bool(b))
    }

    pub fn expr(text: impl Into<String>) -> Self {
        Node::Expression(text.into())
    }
}

/// Scalar literal payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// `[[...]]` content, a bare word, or a number lexeme that failed coercion
    String(String),
    /// Number lexeme without `.`
    Int(i64),
    /// Number lexeme with a single `.`
    Float(f64),
    /// `true` / `false`
    Bool(bool),
}

impl Literal {
    /// Coerces a NUMBER lexeme: integer without `.`, float with one, raw text otherwise
    pub fn from_number(lexeme: &str) -> Self {
        let parsed = if lexeme.contains('.') {
            lexeme.parse::<f64>().ok().map(Literal::Float)
        } else {
            lexeme.parse::<i64>().ok().map(Literal::Int)
        };
        parsed.unwrap_or_else(|| Literal::String(lexeme.to_string()))
    }
}
