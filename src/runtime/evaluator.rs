//! The evaluator contract consumed by the destructuring compiler
//!
//! The compiler never looks inside expressions or values on its own. It asks
//! an [`Evaluator`] to evaluate default values and computed keys, to open the
//! iteration protocol on array-pattern sources, and to read properties from
//! object-pattern sources. Only `evaluate` is required; the remaining
//! operations have default implementations over [`Value`].

use super::iter::{ArrayIterator, SourceIterator, StringIterator};
use super::value::{ObjectKind, ObjectRef, Value};
use crate::ast::Expression;
use crate::error::{Error, Result};

/// A value that properties can be read from
///
/// Produced by [`Evaluator::coerce_to_property_source`]; primitives stay
/// unboxed and expose only what their wrapper objects would.
#[derive(Debug, Clone)]
pub enum PropertySource {
    /// A heap object
    Object(ObjectRef),
    /// A boolean, number or string
    Primitive(Value),
}

/// Operations the compiler needs from the surrounding engine
pub trait Evaluator {
    /// Evaluate an embedded expression (default value or computed key)
    fn evaluate(&mut self, expr: &Expression) -> Result<Value>;

    /// Open the iteration protocol on `value`
    fn iterate(&mut self, value: &Value) -> Result<Box<dyn SourceIterator>> {
        match value {
            Value::String(s) => Ok(Box::new(StringIterator::new(s))),
            Value::Object(obj) => {
                let factory = match &obj.borrow().kind {
                    ObjectKind::Array(_) => None,
                    ObjectKind::Iterable(factory) => Some(factory.clone()),
                    _ => {
                        return Err(Error::NotIterable {
                            value: value.describe(),
                        })
                    }
                };
                match factory {
                    Some(factory) => factory(),
                    None => Ok(Box::new(ArrayIterator::new(obj.clone()))),
                }
            }
            _ => Err(Error::NotIterable {
                value: value.describe(),
            }),
        }
    }

    /// Require `value` to be usable as a property source
    ///
    /// Only undefined and null are rejected.
    fn coerce_to_property_source(&mut self, value: &Value) -> Result<PropertySource> {
        match value {
            Value::Undefined | Value::Null => Err(Error::NotCoercible {
                value: value.to_js_string(),
                property: None,
            }),
            Value::Object(obj) => Ok(PropertySource::Object(obj.clone())),
            primitive => Ok(PropertySource::Primitive(primitive.clone())),
        }
    }

    /// Read property `key`; a missing property is undefined
    fn get_property(&mut self, source: &PropertySource, key: &str) -> Result<Value> {
        match source {
            PropertySource::Object(obj) => Ok(obj.borrow().get_own(key).unwrap_or(Value::Undefined)),
            PropertySource::Primitive(Value::String(s)) => Ok(string_property(s, key)),
            PropertySource::Primitive(_) => Ok(Value::Undefined),
        }
    }

    /// Own enumerable string-keyed properties in enumeration order
    fn own_enumerable_entries(&mut self, source: &PropertySource) -> Result<Vec<(String, Value)>> {
        match source {
            PropertySource::Object(obj) => Ok(obj.borrow().enumerable_entries()),
            PropertySource::Primitive(Value::String(s)) => Ok(s
                .encode_utf16()
                .enumerate()
                .map(|(i, unit)| (i.to_string(), Value::String(String::from_utf16_lossy(&[unit]))))
                .collect()),
            PropertySource::Primitive(_) => Ok(Vec::new()),
        }
    }

    /// Convert the value of a computed key to a property name
    fn to_property_key(&mut self, value: &Value) -> Result<String> {
        Ok(value.to_js_string())
    }
}

/// Properties of a string wrapper: indexed code units and `length`
fn string_property(s: &str, key: &str) -> Value {
    if key == "length" {
        return Value::Number(s.encode_utf16().count() as f64);
    }
    match super::value::array_index(key) {
        Some(index) => s
            .encode_utf16()
            .nth(index)
            .map(|unit| Value::String(String::from_utf16_lossy(&[unit])))
            .unwrap_or(Value::Undefined),
        None => Value::Undefined,
    }
}
