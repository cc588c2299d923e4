//! The destructuring walk
//!
//! Patterns are compiled by a strictly left-to-right, depth-first walk.
//! Each step either pulls a value from the source (an iterator step for
//! array patterns, a property read for object patterns), applies the
//! default when that value is `undefined`, and hands the result to the
//! target: a name goes to the [`TargetEmitter`], a nested pattern is
//! walked in place. The first failure aborts the walk; bindings already
//! emitted stay emitted.

use rustc_hash::FxHashSet as HashSet;
use tracing::{debug, trace};

use super::emitter::TargetEmitter;
use super::flavor::{binding_strategy_for, BindingStrategy, DestructuringFlavor};
use super::guard::IteratorGuard;
use crate::ast::*;
use crate::config::CompileOptions;
use crate::error::{Error, Result};
use crate::runtime::{Evaluator, Value};

/// Names that never denote an assignable reference in strict mode code
const STRICT_RESTRICTED_NAMES: [&str; 2] = ["eval", "arguments"];

/// Compile `pattern` against `source` with default options
pub fn compile(
    pattern: &Pattern,
    flavor: DestructuringFlavor,
    source: Value,
    evaluator: &mut dyn Evaluator,
    emitter: &mut dyn TargetEmitter,
) -> Result<()> {
    compile_with_options(
        pattern,
        flavor,
        source,
        evaluator,
        emitter,
        &CompileOptions::default(),
    )
}

/// Compile `pattern` against `source`
pub fn compile_with_options(
    pattern: &Pattern,
    flavor: DestructuringFlavor,
    source: Value,
    evaluator: &mut dyn Evaluator,
    emitter: &mut dyn TargetEmitter,
    options: &CompileOptions,
) -> Result<()> {
    let strategy = binding_strategy_for(flavor);
    debug!(%flavor, ?strategy, strict = options.strict, "compiling destructuring pattern");

    let mut destructurer = Destructurer {
        evaluator,
        emitter,
        strategy,
        options,
        depth: 0,
    };
    destructurer.compile_pattern(pattern, source)
}

/// State of one in-flight compilation
struct Destructurer<'a> {
    evaluator: &'a mut dyn Evaluator,
    emitter: &'a mut dyn TargetEmitter,
    strategy: BindingStrategy,
    options: &'a CompileOptions,
    /// Current sub-pattern nesting depth
    depth: usize,
}

impl Destructurer<'_> {
    fn compile_pattern(&mut self, pattern: &Pattern, source: Value) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::stack_depth_exceeded(self.depth, self.options.max_depth));
        }

        let result = match pattern {
            Pattern::Array(arr) => self.compile_array_pattern(arr, source),
            Pattern::Object(obj) => self.compile_object_pattern(obj, source),
        };

        self.depth -= 1;
        result
    }

    // ========== Array Patterns ==========

    fn compile_array_pattern(&mut self, arr: &ArrayPattern, source: Value) -> Result<()> {
        // Opening the iterator is observable even for `[]`
        let iter = self.evaluator.iterate(&source)?;
        let mut guard = IteratorGuard::new(iter);
        let result = self.bind_array_elements(arr, &mut guard);
        trace!(depth = self.depth, steps = guard.steps(), ok = result.is_ok(), "closing source iterator");
        guard.finish(result)
    }

    fn bind_array_elements(&mut self, arr: &ArrayPattern, guard: &mut IteratorGuard) -> Result<()> {
        for (index, element) in arr.elements.iter().enumerate() {
            match element {
                ArrayElement::Hole(_) => {
                    guard.step()?;
                    trace!(index, "skipped hole");
                }
                ArrayElement::Binding(binding) => {
                    let value = guard.step()?.unwrap_or(Value::Undefined);
                    trace!(index, exhausted = guard.is_done(), "array element");
                    let value = self.apply_default(value, binding.default.as_ref())?;
                    self.bind_target(&binding.target, value)?;
                }
            }
        }

        if let Some(rest) = &arr.rest {
            let remaining = guard.drain()?;
            trace!(count = remaining.len(), "array rest");
            self.bind_target(rest, Value::new_array(remaining))?;
        }

        Ok(())
    }

    // ========== Object Patterns ==========

    fn compile_object_pattern(&mut self, obj: &ObjectPattern, source: Value) -> Result<()> {
        let source = self
            .evaluator
            .coerce_to_property_source(&source)
            .map_err(|e| match e {
                Error::NotCoercible { value, property: None } => Error::NotCoercible {
                    value,
                    property: obj.properties.first().and_then(|p| p.key.static_name()),
                },
                other => other,
            })?;

        let mut consumed = HashSet::default();
        for prop in &obj.properties {
            let key = self.property_key(&prop.key)?;
            let value = self.evaluator.get_property(&source, &key)?;
            trace!(key = %key, "object property");
            let value = self.apply_default(value, prop.default.as_ref())?;
            self.bind_target(&prop.target, value)?;
            consumed.insert(key);
        }

        if let Some(rest) = &obj.rest {
            let entries = self.evaluator.own_enumerable_entries(&source)?;
            let remaining: Vec<(String, Value)> = entries
                .into_iter()
                .filter(|(key, _)| !consumed.contains(key))
                .collect();
            trace!(count = remaining.len(), excluded = consumed.len(), "object rest");
            self.bind_target(rest, Value::new_object_from_entries(remaining))?;
        }

        Ok(())
    }

    fn property_key(&mut self, key: &PropertyKey) -> Result<String> {
        match key {
            PropertyKey::Computed(expr) => {
                let value = self.evaluator.evaluate(expr)?;
                self.evaluator.to_property_key(&value)
            }
            PropertyKey::Identifier(id) => Ok(id.name.clone()),
            PropertyKey::String(s) => Ok(s.clone()),
            PropertyKey::Number(n) => Ok(crate::runtime::number_to_string(*n)),
        }
    }

    // ========== Targets ==========

    fn apply_default(&mut self, value: Value, default: Option<&Expression>) -> Result<Value> {
        match default {
            Some(expr) if value.is_undefined() => {
                trace!("applying default value");
                self.evaluator.evaluate(expr)
            }
            _ => Ok(value),
        }
    }

    fn bind_target(&mut self, target: &Target, value: Value) -> Result<()> {
        match target {
            Target::Name(id) => self.bind_name(id, value),
            Target::Pattern(pattern) => self.compile_pattern(pattern, value),
        }
    }

    fn bind_name(&mut self, id: &Identifier, value: Value) -> Result<()> {
        if self.strategy.declares() {
            trace!(name = %id.name, strategy = ?self.strategy, "declare");
            return self.emitter.declare(id, self.strategy, value);
        }

        if self.options.strict && STRICT_RESTRICTED_NAMES.contains(&id.name.as_str()) {
            return Err(Error::AssignmentTargetUnresolvable {
                name: id.name.clone(),
            });
        }
        trace!(name = %id.name, "assign");
        self.emitter.assign(id, value)
    }
}
