//! Locale-object support
//!
//! Intl-style objects keep their state on a separate internals object
//! attached to a reserved slot. Objects are set up by named initializers
//! registered in an [`IntlRegistry`]; formatting output is retrieved from
//! external libraries with [`call_formatting`].
//!
//! Nothing here interacts with destructuring.

mod format;
mod locale;

pub use format::{call_formatting, call_formatting_into, FormatStatus, INITIAL_CHAR_BUFFER_SIZE};
pub use locale::{icu_locale, last_ditch_locale, modern_language_tag, OLD_STYLE_LANGUAGE_TAG_MAPPINGS};

use rustc_hash::FxHashMap as HashMap;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::runtime::{Object, ObjectKind, ObjectRef, Value};

/// Sets up the internals object of a freshly initialized locale object
///
/// Called with the internals object, the `locales` argument and the
/// `options` argument.
pub type LocaleInitializer = Rc<dyn Fn(&ObjectRef, &Value, &Value) -> Result<()>>;

/// Extra behavior for legacy `DateTimeFormat`-style initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeFormatOptions {
    #[default]
    Standard,
    /// Record `mozExtensions` on the internals object
    EnableMozExtensions,
}

/// Named locale-object initializers
#[derive(Default)]
pub struct IntlRegistry {
    initializers: HashMap<String, LocaleInitializer>,
}

impl IntlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `initializer` under `name`, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, initializer: F)
    where
        F: Fn(&ObjectRef, &Value, &Value) -> Result<()> + 'static,
    {
        self.initializers.insert(name.into(), Rc::new(initializer));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.initializers.contains_key(name)
    }

    fn initializer(&self, name: &str) -> Result<LocaleInitializer> {
        self.initializers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::InternalError(format!("unknown locale initializer '{}'", name)))
    }

    /// Initialize a new locale object with the named initializer
    ///
    /// A fresh internals object replaces whatever `obj` had attached.
    pub fn initialize_locale_object(
        &self,
        obj: &ObjectRef,
        initializer: &str,
        locales: &Value,
        options: &Value,
    ) -> Result<()> {
        self.initialize(obj, initializer, locales, options, DateTimeFormatOptions::Standard)
    }

    /// Initialize an existing object in place, for legacy constructors
    ///
    /// `this_value` is initialized when it is an object; otherwise a new
    /// object is created. Returns the initialized object.
    pub fn legacy_initialize(
        &self,
        this_value: &Value,
        initializer: &str,
        locales: &Value,
        options: &Value,
        dtf_options: DateTimeFormatOptions,
    ) -> Result<Value> {
        let obj = match this_value {
            Value::Object(obj) => obj.clone(),
            _ => Rc::new(RefCell::new(Object::new(ObjectKind::Ordinary))),
        };
        self.initialize(&obj, initializer, locales, options, dtf_options)?;
        Ok(Value::Object(obj))
    }

    fn initialize(
        &self,
        obj: &ObjectRef,
        initializer: &str,
        locales: &Value,
        options: &Value,
        dtf_options: DateTimeFormatOptions,
    ) -> Result<()> {
        let init = self.initializer(initializer)?;
        debug!(initializer, ?dtf_options, "initializing locale object");

        let internals = Rc::new(RefCell::new(Object::new(ObjectKind::Ordinary)));
        if dtf_options == DateTimeFormatOptions::EnableMozExtensions {
            internals.borrow_mut().set_property("mozExtensions", Value::Boolean(true));
        }
        obj.borrow_mut().internals = Some(internals.clone());
        init(&internals, locales, options)
    }
}

/// The internals object of `obj`, attaching an empty one if needed
pub fn get_internals_object(obj: &ObjectRef) -> ObjectRef {
    let mut object = obj.borrow_mut();
    object
        .internals
        .get_or_insert_with(|| Rc::new(RefCell::new(Object::new(ObjectKind::Ordinary))))
        .clone()
}
