//! Shared test helpers for integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use quickbind::ast::Identifier;
use quickbind::destructuring::{BindingStrategy, TargetEmitter};
use quickbind::error::Error;
use quickbind::runtime::{Interpreter, SourceIterator, Value};

/// Install a tracing subscriber honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One call observed by a [`RecordingEmitter`]
#[derive(Debug, Clone, PartialEq)]
pub enum Emitted {
    Declare {
        name: String,
        strategy: BindingStrategy,
        value: Value,
    },
    Assign {
        name: String,
        value: Value,
    },
}

impl Emitted {
    pub fn name(&self) -> &str {
        match self {
            Emitted::Declare { name, .. } | Emitted::Assign { name, .. } => name,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Emitted::Declare { value, .. } | Emitted::Assign { value, .. } => value,
        }
    }
}

/// Target emitter that records every call, optionally failing on one name
#[derive(Default)]
pub struct RecordingEmitter {
    pub calls: Vec<Emitted>,
    pub fail_on: Option<String>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(name: &str) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(name.to_string()),
        }
    }

    /// Bound names and values in call order
    pub fn bindings(&self) -> Vec<(String, Value)> {
        self.calls
            .iter()
            .map(|c| (c.name().to_string(), c.value().clone()))
            .collect()
    }

    fn check(&self, name: &Identifier) -> quickbind::Result<()> {
        match &self.fail_on {
            Some(fail) if *fail == name.name => Err(Error::ReferenceNotFound {
                name: name.name.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl TargetEmitter for RecordingEmitter {
    fn declare(&mut self, name: &Identifier, strategy: BindingStrategy, value: Value) -> quickbind::Result<()> {
        self.check(name)?;
        self.calls.push(Emitted::Declare {
            name: name.name.clone(),
            strategy,
            value,
        });
        Ok(())
    }

    fn assign(&mut self, name: &Identifier, value: Value) -> quickbind::Result<()> {
        self.check(name)?;
        self.calls.push(Emitted::Assign {
            name: name.name.clone(),
            value,
        });
        Ok(())
    }
}

/// Counters shared between a test and a [`counting_iterable`]
#[derive(Default)]
pub struct IterCounters {
    pub opened: Cell<usize>,
    pub nexts: Cell<usize>,
    pub closes: Cell<usize>,
}

struct CountingIterator {
    values: Vec<Value>,
    index: usize,
    counters: Rc<IterCounters>,
    fail_close: bool,
}

impl SourceIterator for CountingIterator {
    fn next_value(&mut self) -> quickbind::Result<Option<Value>> {
        self.counters.nexts.set(self.counters.nexts.get() + 1);
        let value = self.values.get(self.index).cloned();
        self.index += 1;
        Ok(value)
    }

    fn close(&mut self) -> quickbind::Result<()> {
        self.counters.closes.set(self.counters.closes.get() + 1);
        if self.fail_close {
            Err(Error::thrown("close failed"))
        } else {
            Ok(())
        }
    }
}

/// An iterable producing `values` that counts protocol calls
pub fn counting_iterable(values: Vec<Value>) -> (Value, Rc<IterCounters>) {
    iterable(values, false)
}

/// Like [`counting_iterable`], but `close` fails
pub fn failing_close_iterable(values: Vec<Value>) -> (Value, Rc<IterCounters>) {
    iterable(values, true)
}

fn iterable(values: Vec<Value>, fail_close: bool) -> (Value, Rc<IterCounters>) {
    let counters = Rc::new(IterCounters::default());
    let shared = counters.clone();
    let value = Value::new_iterable(Rc::new(move || -> quickbind::Result<Box<dyn SourceIterator>> {
        shared.opened.set(shared.opened.get() + 1);
        Ok(Box::new(CountingIterator {
            values: values.clone(),
            index: 0,
            counters: shared.clone(),
            fail_close,
        }))
    }));
    (value, counters)
}

/// An interpreter whose functions log their calls
///
/// `k()` returns `"a"`, `m()` returns `"b"`, `f()` returns 42, `g()`
/// returns 7, and `boom()` throws. Every call appends its name to the log.
pub fn logging_interpreter() -> (Interpreter, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut interp = Interpreter::new();
    for (name, result) in [
        ("k", Value::string("a")),
        ("m", Value::string("b")),
        ("f", Value::Number(42.0)),
        ("g", Value::Number(7.0)),
    ] {
        let log = log.clone();
        let fn_name = name.to_string();
        interp.register_native(name, move |_| {
            log.borrow_mut().push(fn_name.clone());
            Ok(result.clone())
        });
    }
    let boom_log = log.clone();
    interp.register_native("boom", move |_| {
        boom_log.borrow_mut().push("boom".to_string());
        Err(Error::thrown("boom"))
    });
    (interp, log)
}
