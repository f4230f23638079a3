use crate::runtime::{Table, Value};

/// Variable bindings visible to embedded expressions
///
/// A single binding store shared by the whole document. Keys bound inside a
/// block stay visible to everything resolved after them, sibling blocks and
/// the top level included. Rebinding a name replaces its value but keeps the
/// position of its first binding.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: Table,
}

impl Environment {
    /// Creates an empty environment
    pub fn new() -> Self {
        Environment::default()
    }

    /// Binds a name, replacing any earlier binding
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name, value);
    }

    /// Gets the value bound to an exact name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Gets the value of a name or of a dotted path into a bound table
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.get(path) {
            return Some(value);
        }
        if !path.contains('.') {
            return None;
        }
        self.bindings.get_path(path)
    }

    /// Checks if a name is bound
    pub fn exists(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bindings in the order their names were first bound
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl From<Table> for Environment {
    fn from(bindings: Table) -> Self {
        Environment { bindings }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Environment::from(iter.into_iter().collect::<Table>())
    }
}
