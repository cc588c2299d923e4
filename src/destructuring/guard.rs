//! Scoped ownership of an array-pattern source iterator

use tracing::warn;

use crate::error::Result;
use crate::runtime::{SourceIterator, Value};

/// Owns a source iterator and closes it exactly once
///
/// [`IteratorGuard::finish`] closes the iterator and merges the close
/// result with the result of the walk. If the guard is dropped without
/// finishing (a panic unwinding through the compiler), `Drop` closes it.
/// Once the iterator reports exhaustion it is never stepped again.
pub struct IteratorGuard {
    iter: Box<dyn SourceIterator>,
    done: bool,
    closed: bool,
    steps: usize,
}

impl IteratorGuard {
    /// Take ownership of `iter`
    pub fn new(iter: Box<dyn SourceIterator>) -> Self {
        Self {
            iter,
            done: false,
            closed: false,
            steps: 0,
        }
    }

    /// Advance one step; `None` once the iterator is exhausted
    pub fn step(&mut self) -> Result<Option<Value>> {
        if self.done {
            return Ok(None);
        }
        self.steps += 1;
        match self.iter.next_value() {
            Ok(Some(value)) => Ok(Some(value)),
            Ok(None) => {
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                self.done = true;
                Err(e)
            }
        }
    }

    /// Collect every remaining value
    pub fn drain(&mut self) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        while let Some(value) = self.step()? {
            values.push(value);
        }
        Ok(values)
    }

    /// Whether the iterator has reported exhaustion
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of times the underlying iterator was stepped
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Close the iterator and combine the close outcome with `result`
    ///
    /// A close failure replaces a successful result. When `result` is
    /// already an error, that error is returned and the close failure is
    /// only logged.
    pub fn finish<T>(mut self, result: Result<T>) -> Result<T> {
        self.closed = true;
        let closed = self.iter.close();
        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_error)) => {
                warn!(error = %close_error, "iterator close failed while propagating an earlier error");
                Err(e)
            }
        }
    }
}

impl Drop for IteratorGuard {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Err(e) = self.iter.close() {
                warn!(error = %e, "iterator close failed during drop");
            }
        }
    }
}
