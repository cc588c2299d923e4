//! JavaScript value types
//!
//! This module defines the runtime representation of the values that flow
//! through destructuring: the source value, the elements and properties
//! extracted from it, and the fresh containers built for rest targets.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::iter::SourceIterator;
use crate::error::Result;

/// Shared, mutable reference to a heap object
pub type ObjectRef = Rc<RefCell<Object>>;

/// Type alias for native function implementations
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value>>;

/// Produces a fresh iterator each time an iterable object is iterated
pub type IterableFactory = Rc<dyn Fn() -> Result<Box<dyn SourceIterator>>>;

/// A JavaScript value
#[derive(Clone)]
pub enum Value {
    /// undefined
    Undefined,
    /// null
    Null,
    /// Boolean value
    Boolean(bool),
    /// Number (IEEE 754 double)
    Number(f64),
    /// String
    String(String),
    /// Object (includes arrays and functions)
    Object(ObjectRef),
}

impl Value {
    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is nullish (null or undefined)
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Create a string value
    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    /// Create a new empty object value
    pub fn new_object() -> Value {
        Value::Object(Rc::new(RefCell::new(Object::new(ObjectKind::Ordinary))))
    }

    /// Create a new object whose enumerable properties are `entries`, in order
    pub fn new_object_from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> Value {
        let mut object = Object::new(ObjectKind::Ordinary);
        for (key, value) in entries {
            object.set_property(key, value);
        }
        Value::Object(Rc::new(RefCell::new(object)))
    }

    /// Create a new array value
    pub fn new_array(elements: Vec<Value>) -> Value {
        Value::Object(Rc::new(RefCell::new(Object::new(ObjectKind::Array(elements)))))
    }

    /// Create an iterable object backed by a host iterator factory
    pub fn new_iterable(factory: IterableFactory) -> Value {
        Value::Object(Rc::new(RefCell::new(Object::new(ObjectKind::Iterable(factory)))))
    }

    /// Create a native function value
    pub fn new_native_function(name: impl Into<String>, func: NativeFn) -> Value {
        Value::Object(Rc::new(RefCell::new(Object::new(ObjectKind::NativeFunction {
            name: name.into(),
            func,
        }))))
    }

    /// Get the typeof string
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(obj) => match obj.borrow().kind {
                ObjectKind::NativeFunction { .. } => "function",
                _ => "object",
            },
        }
    }

    /// Strict equality (===)
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Convert to JavaScript string representation (ToString)
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(true) => "true".to_string(),
            Value::Boolean(false) => "false".to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::String(s) => s.clone(),
            Value::Object(obj) => {
                let obj = obj.borrow();
                match &obj.kind {
                    ObjectKind::Array(arr) => arr
                        .iter()
                        .map(|v| if v.is_nullish() { String::new() } else { v.to_js_string() })
                        .collect::<Vec<_>>()
                        .join(","),
                    ObjectKind::NativeFunction { name, .. } => {
                        format!("function {}() {{ [native code] }}", name)
                    }
                    _ => "[object Object]".to_string(),
                }
            }
        }
    }

    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("\"{}\"", s),
            Value::Object(obj) => match &obj.borrow().kind {
                ObjectKind::Array(_) => "array".to_string(),
                ObjectKind::NativeFunction { name, .. } => format!("function {}", name),
                _ => "object".to_string(),
            },
            other => other.to_js_string(),
        }
    }

    /// Elements of an array value
    pub fn as_array(&self) -> Option<Vec<Value>> {
        match self {
            Value::Object(obj) => match &obj.borrow().kind {
                ObjectKind::Array(elements) => Some(elements.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Own enumerable properties of an ordinary object, in insertion order
    pub fn entries(&self) -> Vec<(String, Value)> {
        match self {
            Value::Object(obj) => obj.borrow().enumerable_entries(),
            _ => Vec::new(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            // NaN compares equal to itself here so values can be asserted on
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self.strict_equals(other),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(obj) => {
                let obj = obj.borrow();
                match &obj.kind {
                    ObjectKind::Array(elements) => f.debug_list().entries(elements.iter()).finish(),
                    ObjectKind::NativeFunction { name, .. } => write!(f, "[Function: {}]", name),
                    ObjectKind::Iterable(_) => write!(f, "[Iterable]"),
                    ObjectKind::Ordinary => f
                        .debug_map()
                        .entries(obj.properties.iter().map(|(k, p)| (k, &p.value)))
                        .finish(),
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_js_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Format a number the way JavaScript's Number::toString does
///
/// Uses the shortest digit string that round-trips, switching to exponent
/// form when the decimal exponent is at least 21 or at most -7.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n < 0.0 {
        return format!("-{}", number_to_string(-n));
    }

    // `{:e}` yields the shortest round-trip digits as `d[.ddd]e<exp>`
    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let point = exponent + 1;

    if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
        }
    }
}

/// A data property
#[derive(Debug, Clone)]
pub struct Property {
    /// Property value
    pub value: Value,
    /// Whether the property shows up in own-property enumeration
    pub enumerable: bool,
}

/// A heap object
pub struct Object {
    /// Object kind
    pub kind: ObjectKind,
    /// Own properties in insertion order
    pub properties: IndexMap<String, Property>,
    /// Reserved slot holding the internals object of Intl-style objects
    pub internals: Option<ObjectRef>,
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            ObjectKind::Ordinary => "Ordinary",
            ObjectKind::Array(_) => "Array",
            ObjectKind::Iterable(_) => "Iterable",
            ObjectKind::NativeFunction { .. } => "NativeFunction",
        };
        f.debug_struct("Object")
            .field("kind", &kind)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Kind of object
pub enum ObjectKind {
    /// Plain object
    Ordinary,
    /// Array with dense elements
    Array(Vec<Value>),
    /// Host iterable producing a fresh iterator per iteration
    Iterable(IterableFactory),
    /// Native function
    NativeFunction { name: String, func: NativeFn },
}

impl Object {
    /// Create an object with no properties
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            properties: IndexMap::new(),
            internals: None,
        }
    }

    /// Set an enumerable data property, keeping its position if it exists
    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.properties.get_mut(&key) {
            Some(prop) => prop.value = value,
            None => {
                self.properties.insert(
                    key,
                    Property {
                        value,
                        enumerable: true,
                    },
                );
            }
        }
    }

    /// Define a non-enumerable data property
    pub fn define_hidden(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(
            key.into(),
            Property {
                value,
                enumerable: false,
            },
        );
    }

    /// Get an own property by key, including array indices and `length`
    pub fn get_own(&self, key: &str) -> Option<Value> {
        if let ObjectKind::Array(elements) = &self.kind {
            if key == "length" {
                return Some(Value::Number(elements.len() as f64));
            }
            if let Some(index) = array_index(key) {
                return elements.get(index).cloned();
            }
        }
        self.properties.get(key).map(|p| p.value.clone())
    }

    /// Own enumerable string-keyed properties in enumeration order
    ///
    /// Array indices come first in ascending order, then named properties
    /// in insertion order.
    pub fn enumerable_entries(&self) -> Vec<(String, Value)> {
        let mut entries = Vec::new();
        if let ObjectKind::Array(elements) = &self.kind {
            entries.extend(
                elements
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v.clone())),
            );
        }
        entries.extend(
            self.properties
                .iter()
                .filter(|(_, p)| p.enumerable)
                .map(|(k, p)| (k.clone(), p.value.clone())),
        );
        entries
    }
}

/// Parse a canonical array index ("0", "1", ... but not "01" or "-1")
pub fn array_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}
