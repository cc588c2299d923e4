//! Iteration protocol used by array destructuring

use super::value::{ObjectKind, ObjectRef, Value};
use crate::error::Result;

/// A source iterator obtained from an iterable value
///
/// Mirrors the JavaScript iterator protocol: `next_value` is one `next()`
/// step returning `None` once the iterator is done, and `close` is the
/// iterator-close step (`return()`), which may run user-visible cleanup.
pub trait SourceIterator {
    /// Advance one step
    fn next_value(&mut self) -> Result<Option<Value>>;

    /// Release the iterator
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Iterator over an array, reading elements by index
///
/// Reads are live: elements appended during destructuring are observed.
pub struct ArrayIterator {
    array: ObjectRef,
    index: usize,
}

impl ArrayIterator {
    /// Create an iterator positioned at the first element
    pub fn new(array: ObjectRef) -> Self {
        Self { array, index: 0 }
    }
}

impl SourceIterator for ArrayIterator {
    fn next_value(&mut self) -> Result<Option<Value>> {
        let array = self.array.borrow();
        match &array.kind {
            ObjectKind::Array(elements) => {
                let value = elements.get(self.index).cloned();
                if value.is_some() {
                    self.index += 1;
                }
                Ok(value)
            }
            _ => Ok(None),
        }
    }
}

/// Iterator over the code points of a string
pub struct StringIterator {
    chars: Vec<char>,
    index: usize,
}

impl StringIterator {
    /// Create an iterator over `s`
    pub fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
            index: 0,
        }
    }
}

impl SourceIterator for StringIterator {
    fn next_value(&mut self) -> Result<Option<Value>> {
        let value = self
            .chars
            .get(self.index)
            .map(|c| Value::String(c.to_string()));
        if value.is_some() {
            self.index += 1;
        }
        Ok(value)
    }
}

/// Iterator over a fixed list of values, for host code building iterables
pub struct VecIterator {
    values: std::vec::IntoIter<Value>,
}

impl VecIterator {
    /// Create an iterator yielding `values` in order
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }
}

impl SourceIterator for VecIterator {
    fn next_value(&mut self) -> Result<Option<Value>> {
        Ok(self.values.next())
    }
}
