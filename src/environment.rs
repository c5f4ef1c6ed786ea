use super::value::Value;

use std::collections::BTreeMap;

/// The variable store of one running program.
///
/// There is a single flat scope: a binding made inside an `if` body is still
/// visible once the body has finished.
#[derive(Debug, Default)]
pub struct Environment {
    values: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment {
            values: BTreeMap::new(),
        }
    }
    /// Binds `name`, returning the value it replaced.
    pub fn define(&mut self, name: &str, value: Value) -> Option<Value> {
        self.values.insert(name.to_string(), value)
    }
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
