//! A small tree-walking evaluator for the expressions found inside patterns

use rustc_hash::FxHashMap as HashMap;
use std::rc::Rc;

use super::evaluator::Evaluator;
use super::value::{ObjectKind, Value};
use crate::ast::{Expression, LiteralValue, PropertyKey};
use crate::error::{messages, Error, Result};

/// Evaluates default values and computed keys against a set of globals
///
/// Host functions registered with [`Interpreter::register_native`] are the
/// way embedders observe evaluation order and inject failures.
pub struct Interpreter {
    globals: HashMap<String, Value>,
}

impl Interpreter {
    /// Create an interpreter with `undefined`, `NaN` and `Infinity` defined
    pub fn new() -> Self {
        let mut globals = HashMap::default();
        globals.insert("undefined".to_string(), Value::Undefined);
        globals.insert("NaN".to_string(), Value::Number(f64::NAN));
        globals.insert("Infinity".to_string(), Value::Number(f64::INFINITY));
        Self { globals }
    }

    /// Define or overwrite a global binding
    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    /// Look up a global binding
    pub fn get_global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Register a native function under `name`
    pub fn register_native<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        self.set_global(name, Value::new_native_function(name, Rc::new(func)));
    }

    fn property_name(&mut self, key: &PropertyKey) -> Result<String> {
        match key {
            PropertyKey::Computed(expr) => {
                let value = self.evaluate(expr)?;
                self.to_property_key(&value)
            }
            other => Ok(other.static_name().unwrap_or_default()),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for Interpreter {
    fn evaluate(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(lit) => Ok(match &lit.value {
                LiteralValue::Null => Value::Null,
                LiteralValue::Boolean(b) => Value::Boolean(*b),
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::String(s) => Value::String(s.clone()),
            }),
            Expression::Identifier(id) => self
                .globals
                .get(&id.name)
                .cloned()
                .ok_or_else(|| Error::reference_error(messages::not_defined(&id.name))),
            Expression::Array(arr) => {
                let elements = arr
                    .elements
                    .iter()
                    .map(|e| self.evaluate(e))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::new_array(elements))
            }
            Expression::Object(obj) => {
                let mut entries = Vec::with_capacity(obj.properties.len());
                for (key, value) in &obj.properties {
                    let name = self.property_name(key)?;
                    let value = self.evaluate(value)?;
                    entries.push((name, value));
                }
                Ok(Value::new_object_from_entries(entries))
            }
            Expression::Call(call) => {
                let callee = self
                    .globals
                    .get(&call.callee.name)
                    .cloned()
                    .ok_or_else(|| Error::reference_error(messages::not_defined(&call.callee.name)))?;
                let args = call
                    .arguments
                    .iter()
                    .map(|a| self.evaluate(a))
                    .collect::<Result<Vec<_>>>()?;
                let func = match &callee {
                    Value::Object(obj) => match &obj.borrow().kind {
                        ObjectKind::NativeFunction { func, .. } => Some(func.clone()),
                        _ => None,
                    },
                    _ => None,
                };
                match func {
                    Some(func) => func(&args),
                    None => Err(Error::type_error(messages::not_a_function(&call.callee.name))),
                }
            }
        }
    }
}
