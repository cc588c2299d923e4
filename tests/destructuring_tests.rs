//! Destructuring compiler tests
//!
//! Patterns are parsed from source, sources are built with the stock
//! interpreter or with counting iterables, and bindings are observed
//! through a recording emitter.

mod common;

use common::*;

use quickbind::prelude::*;

fn eval(interp: &mut Interpreter, source: &str) -> Value {
    interp.evaluate(&parse_expression(source).unwrap()).unwrap()
}

fn run(
    pattern: &str,
    source: Value,
    flavor: DestructuringFlavor,
    interp: &mut Interpreter,
    emitter: &mut RecordingEmitter,
) -> Result<()> {
    init_tracing();
    let pattern = parse_pattern(pattern).unwrap();
    compile(&pattern, flavor, source, interp, emitter)
}

/// Declare `pattern` against the interpreter-evaluated `source`
fn declare(pattern: &str, source: &str) -> (Result<()>, Vec<(String, Value)>, Vec<String>) {
    let (mut interp, log) = logging_interpreter();
    let source = eval(&mut interp, source);
    let mut emitter = RecordingEmitter::new();
    let result = run(pattern, source, DestructuringFlavor::Declaration, &mut interp, &mut emitter);
    let calls = log.borrow().clone();
    (result, emitter.bindings(), calls)
}

fn bound(name: &str, value: Value) -> (String, Value) {
    (name.to_string(), value)
}

fn keys(value: &Value) -> Vec<String> {
    value.entries().into_iter().map(|(k, _)| k).collect()
}

mod array_patterns {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binds_in_order_and_closes_once() {
        let (source, counters) = counting_iterable(vec![1.0.into(), 2.0.into(), 3.0.into()]);
        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::new();
        run("[a, b, c]", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter).unwrap();

        assert_eq!(
            emitter.bindings(),
            vec![
                bound("a", Value::Number(1.0)),
                bound("b", Value::Number(2.0)),
                bound("c", Value::Number(3.0)),
            ]
        );
        assert_eq!(counters.opened.get(), 1);
        assert_eq!(counters.nexts.get(), 3);
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_short_source_binds_undefined() {
        let (source, counters) = counting_iterable(vec![1.0.into()]);
        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::new();
        run("[a, b, c]", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter).unwrap();

        assert_eq!(
            emitter.bindings(),
            vec![
                bound("a", Value::Number(1.0)),
                bound("b", Value::Undefined),
                bound("c", Value::Undefined),
            ]
        );
        // Exhaustion is observed once; the iterator is not stepped after it
        assert_eq!(counters.nexts.get(), 2);
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_default_only_on_undefined() {
        let (result, bindings, calls) = declare("[a = f()]", "[]");
        result.unwrap();
        assert_eq!(bindings, vec![bound("a", Value::Number(42.0))]);
        assert_eq!(calls, vec!["f"]);

        let (result, bindings, calls) = declare("[a = f()]", "[null]");
        result.unwrap();
        assert_eq!(bindings, vec![bound("a", Value::Null)]);
        assert!(calls.is_empty());

        let (result, bindings, calls) = declare("[a = f()]", "[undefined]");
        result.unwrap();
        assert_eq!(bindings, vec![bound("a", Value::Number(42.0))]);
        assert_eq!(calls, vec!["f"]);
    }

    #[test]
    fn test_falsy_values_bypass_defaults() {
        let (result, bindings, calls) = declare("[a = f(), b = f(), c = f(), d = f()]", "[0, '', false, null]");
        result.unwrap();
        assert!(calls.is_empty());
        assert_eq!(
            bindings,
            vec![
                bound("a", Value::Number(0.0)),
                bound("b", Value::string("")),
                bound("c", Value::Boolean(false)),
                bound("d", Value::Null),
            ]
        );
    }

    #[test]
    fn test_holes_consume_a_step() {
        let (source, counters) = counting_iterable(vec![1.0.into(), 2.0.into()]);
        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::new();
        run("[, b]", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter).unwrap();

        assert_eq!(emitter.bindings(), vec![bound("b", Value::Number(2.0))]);
        assert_eq!(counters.nexts.get(), 2);
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_rest_collects_remaining_values() {
        let (source, counters) = counting_iterable(vec![1.0.into(), 2.0.into(), 3.0.into()]);
        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::new();
        run("[a, ...rest]", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter).unwrap();

        let bindings = emitter.bindings();
        assert_eq!(bindings[0], bound("a", Value::Number(1.0)));
        assert_eq!(bindings[1].0, "rest");
        assert_eq!(
            bindings[1].1.as_array(),
            Some(vec![Value::Number(2.0), Value::Number(3.0)])
        );
        assert_eq!(counters.nexts.get(), 4);
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_rest_after_exhaustion_is_empty() {
        let (result, bindings, _) = declare("[a, b, ...rest]", "[1]");
        result.unwrap();
        assert_eq!(bindings[2].1.as_array(), Some(vec![]));
    }

    #[test]
    fn test_rest_into_nested_pattern() {
        let (result, bindings, _) = declare("[a, ...[b, {length}]]", "[1, 2, 'xyz']");
        result.unwrap();
        assert_eq!(
            bindings,
            vec![
                bound("a", Value::Number(1.0)),
                bound("b", Value::Number(2.0)),
                bound("length", Value::Number(3.0)),
            ]
        );
    }

    #[test]
    fn test_strings_iterate_by_code_point() {
        let (result, bindings, _) = declare("[a, ...rest]", "'x\\u{1F600}y'");
        result.unwrap();
        assert_eq!(bindings[0], bound("a", Value::string("x")));
        assert_eq!(
            bindings[1].1.as_array(),
            Some(vec![Value::string("\u{1F600}"), Value::string("y")])
        );
    }

    #[test]
    fn test_non_iterable_sources() {
        for source in ["{}", "undefined", "null", "1", "true"] {
            let (result, bindings, _) = declare("[a]", source);
            assert!(matches!(result, Err(Error::NotIterable { .. })), "{}", source);
            assert!(bindings.is_empty());
        }

        let (result, _, _) = declare("[]", "undefined");
        assert_eq!(result.unwrap_err().to_string(), "TypeError: undefined is not iterable");
    }
}

mod object_patterns {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rest_excludes_consumed_keys_in_source_order() {
        let (result, bindings, _) = declare("{a, ...rest}", "{a: 1, b: 2, c: 3}");
        result.unwrap();
        assert_eq!(bindings[0], bound("a", Value::Number(1.0)));
        assert_eq!(keys(&bindings[1].1), vec!["b", "c"]);

        let (result, bindings, _) = declare("{b, ...rest}", "{a: 1, b: 2, c: 3}");
        result.unwrap();
        assert_eq!(keys(&bindings[1].1), vec!["a", "c"]);
    }

    #[test]
    fn test_rest_excludes_duplicate_keys() {
        let (result, bindings, _) = declare("{a: x, a: y, ...rest}", "{a: 1, b: 2}");
        result.unwrap();
        assert_eq!(bindings[0], bound("x", Value::Number(1.0)));
        assert_eq!(bindings[1], bound("y", Value::Number(1.0)));
        assert_eq!(keys(&bindings[2].1), vec!["b"]);
    }

    #[test]
    fn test_rest_is_a_fresh_object() {
        let (mut interp, _) = logging_interpreter();
        let source = eval(&mut interp, "{a: 1}");
        let mut emitter = RecordingEmitter::new();
        run("{...rest}", source.clone(), DestructuringFlavor::Declaration, &mut interp, &mut emitter).unwrap();

        let rest = emitter.bindings()[0].1.clone();
        assert!(!rest.strict_equals(&source));
        assert_eq!(rest.entries(), source.entries());
    }

    #[test]
    fn test_computed_keys_evaluate_in_position() {
        let (result, bindings, calls) = declare("{[k()]: x, [m()]: y}", "{}");
        result.unwrap();
        assert_eq!(calls, vec!["k", "m"]);
        assert_eq!(
            bindings,
            vec![bound("x", Value::Undefined), bound("y", Value::Undefined)]
        );

        let (result, _, calls) = declare("{[k()]: x, [m()]: y = boom(), [f()]: z}", "{a: 1}");
        assert!(result.is_err());
        assert_eq!(calls, vec!["k", "m", "boom"]);
    }

    /// Interpreter whose property lookups fail for one key
    struct FailingLookup {
        inner: Interpreter,
        key: &'static str,
    }

    impl Evaluator for FailingLookup {
        fn evaluate(&mut self, expr: &Expression) -> Result<Value> {
            self.inner.evaluate(expr)
        }

        fn get_property(&mut self, source: &PropertySource, key: &str) -> Result<Value> {
            if key == self.key {
                return Err(Error::thrown(format!("cannot read '{}'", key)));
            }
            self.inner.get_property(source, key)
        }
    }

    fn declare_failing_on(
        key: &'static str,
        pattern: &str,
        source: &str,
    ) -> (Result<()>, Vec<(String, Value)>, Vec<String>) {
        init_tracing();
        let (mut inner, log) = logging_interpreter();
        let source = eval(&mut inner, source);
        let mut evaluator = FailingLookup { inner, key };
        let mut emitter = RecordingEmitter::new();
        let pattern = parse_pattern(pattern).unwrap();
        let result = compile(&pattern, DestructuringFlavor::Declaration, source, &mut evaluator, &mut emitter);
        let calls = log.borrow().clone();
        (result, emitter.bindings(), calls)
    }

    #[test]
    fn test_failing_lookup_stops_after_its_key() {
        for source in ["{a: 1, b: 2}", "{}"] {
            let (result, bindings, calls) = declare_failing_on("a", "{[k()]: x, [m()]: y}", source);
            assert!(matches!(
                result,
                Err(Error::EvaluationFailure { ref message, .. }) if message == "cannot read 'a'"
            ));
            assert_eq!(calls, vec!["k"]);
            assert!(bindings.is_empty());
        }
    }

    #[test]
    fn test_failing_lookup_keeps_earlier_keys_and_bindings() {
        let (result, bindings, calls) =
            declare_failing_on("b", "{[k()]: x, [m()]: y, [f()]: z}", "{a: 1}");
        assert!(result.is_err());
        assert_eq!(calls, vec!["k", "m"]);
        assert_eq!(bindings, vec![bound("x", Value::Number(1.0))]);

        let (result, bindings, calls) = declare_failing_on("b", "{[k()]: x, [f()]: z}", "{}");
        result.unwrap();
        assert_eq!(calls, vec!["k", "f"]);
        assert_eq!(
            bindings,
            vec![bound("x", Value::Undefined), bound("z", Value::Undefined)]
        );
    }

    #[test]
    fn test_large_and_small_numeric_keys() {
        let source = "{'1e+21': 5, '1e-7': 6, '1.5e+300': 7, '0.000001': 8}";
        let (result, bindings, _) = declare("{1e21: a, 1e-7: b, 1.5e300: c, 0.000001: d}", source);
        result.unwrap();
        assert_eq!(
            bindings,
            vec![
                bound("a", Value::Number(5.0)),
                bound("b", Value::Number(6.0)),
                bound("c", Value::Number(7.0)),
                bound("d", Value::Number(8.0)),
            ]
        );

        let (result, bindings, _) =
            declare("{[1e21]: a, [1e-7]: b, [100]: c}", "{'1e+21': 5, '1e-7': 6, 100: 9}");
        result.unwrap();
        assert_eq!(
            bindings,
            vec![
                bound("a", Value::Number(5.0)),
                bound("b", Value::Number(6.0)),
                bound("c", Value::Number(9.0)),
            ]
        );
    }

    #[test]
    fn test_computed_key_values_are_converted() {
        let (result, bindings, _) = declare("{[f()]: x, [null]: y}", "{42: 'n', null: 'z'}");
        result.unwrap();
        assert_eq!(
            bindings,
            vec![bound("x", Value::string("n")), bound("y", Value::string("z"))]
        );
    }

    #[test]
    fn test_defaults_and_missing_properties() {
        let (result, bindings, calls) = declare("{a = f(), b = f(), c}", "{a: 0}");
        result.unwrap();
        assert_eq!(calls, vec!["f"]);
        assert_eq!(
            bindings,
            vec![
                bound("a", Value::Number(0.0)),
                bound("b", Value::Number(42.0)),
                bound("c", Value::Undefined),
            ]
        );
    }

    #[test]
    fn test_primitive_sources() {
        let (result, bindings, _) = declare("{length, 0: first, ...rest}", "'ab'");
        result.unwrap();
        assert_eq!(bindings[0], bound("length", Value::Number(2.0)));
        assert_eq!(bindings[1], bound("first", Value::string("a")));
        assert_eq!(keys(&bindings[2].1), vec!["1"]);

        for source in ["0", "false", "''"] {
            let (result, bindings, _) = declare("{a}", source);
            result.unwrap();
            assert_eq!(bindings, vec![bound("a", Value::Undefined)]);
        }
    }

    #[test]
    fn test_nullish_sources_are_not_coercible() {
        for source in ["undefined", "null"] {
            let (result, bindings, calls) = declare("{[k()]: a}", source);
            assert!(matches!(result, Err(Error::NotCoercible { .. })), "{}", source);
            assert!(bindings.is_empty());
            // Coercion happens before any key is evaluated
            assert!(calls.is_empty());
        }
    }

    #[test]
    fn test_array_sources_expose_indices_and_length() {
        let (result, bindings, _) = declare("{0: a, length, ...rest}", "[1, 2]");
        result.unwrap();
        assert_eq!(bindings[0], bound("a", Value::Number(1.0)));
        assert_eq!(bindings[1], bound("length", Value::Number(2.0)));
        assert_eq!(keys(&bindings[2].1), vec!["1"]);
    }
}

mod evaluation_order {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_patterns_interleave_depth_first() {
        let (result, bindings, calls) =
            declare("{[k()]: [a = f(), b], [m()]: {c = g()}}", "{a: [], b: {}}");
        result.unwrap();
        assert_eq!(calls, vec!["k", "f", "m", "g"]);
        assert_eq!(
            bindings,
            vec![
                bound("a", Value::Number(42.0)),
                bound("b", Value::Undefined),
                bound("c", Value::Number(7.0)),
            ]
        );
    }
}

mod flavor_routing {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strategies(flavor: DestructuringFlavor) -> Vec<Emitted> {
        let mut interp = Interpreter::new();
        let source = eval(&mut interp, "[1, {b: 2}]");
        let mut emitter = RecordingEmitter::new();
        run("[a, {b}]", source, flavor, &mut interp, &mut emitter).unwrap();
        emitter.calls
    }

    #[test]
    fn test_declarations_and_parameters_use_different_strategies() {
        let declared = strategies(DestructuringFlavor::Declaration);
        let params = strategies(DestructuringFlavor::FormalParameterInVarScope);
        assert_eq!(declared.len(), 2);
        assert!(declared.iter().all(|c| matches!(
            c,
            Emitted::Declare {
                strategy: BindingStrategy::DeclareInNearestDeclarativeScope,
                ..
            }
        )));
        assert!(params.iter().all(|c| matches!(
            c,
            Emitted::Declare {
                strategy: BindingStrategy::DeclareInEnclosingVarScope,
                ..
            }
        )));
    }

    #[test]
    fn test_assignment_never_declares() {
        let assigned = strategies(DestructuringFlavor::Assignment);
        assert_eq!(assigned.len(), 2);
        assert!(assigned.iter().all(|c| matches!(c, Emitted::Assign { .. })));
    }

    #[test]
    fn test_flavors_land_in_different_scopes() {
        let arena = ScopeArena::new();
        let global = arena.alloc(ScopeKind::Global, None);
        let function = arena.alloc(ScopeKind::Function, Some(global));
        let params = arena.alloc(ScopeKind::Parameter, Some(function));
        let pattern = parse_pattern("{x, y}").unwrap();
        let mut interp = Interpreter::new();

        let source = eval(&mut interp, "{x: 1, y: 2}");
        let mut emitter = DeclarationEmitter::new(params, BindingKind::Parameter);
        compile(&pattern, DestructuringFlavor::Declaration, source.clone(), &mut interp, &mut emitter).unwrap();
        assert_eq!(params.binding_names(), vec!["x", "y"]);
        assert!(function.binding_names().is_empty());

        let mut emitter = DeclarationEmitter::new(params, BindingKind::Parameter);
        compile(
            &pattern,
            DestructuringFlavor::FormalParameterInVarScope,
            source,
            &mut interp,
            &mut emitter,
        )
        .unwrap();
        assert_eq!(function.binding_names(), vec!["x", "y"]);
        assert_eq!(function.resolve_value("y"), Some(Value::Number(2.0)));
    }
}

mod failures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_abort_keeps_earlier_bindings() {
        let (source, counters) = counting_iterable(vec![1.0.into(), 2.0.into(), 3.0.into()]);
        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::failing_on("b");
        let result = run("[a, b, c]", source, DestructuringFlavor::Assignment, &mut interp, &mut emitter);

        assert!(matches!(result, Err(Error::ReferenceNotFound { .. })));
        assert_eq!(emitter.bindings(), vec![bound("a", Value::Number(1.0))]);
        assert_eq!(counters.nexts.get(), 2);
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_object_abort_stops_walk() {
        let (mut interp, log) = logging_interpreter();
        let source = eval(&mut interp, "{a: 1, b: 2}");
        let mut emitter = RecordingEmitter::failing_on("b");
        let result = run("{a, b, [k()]: c}", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter);

        assert!(result.is_err());
        assert_eq!(emitter.bindings(), vec![bound("a", Value::Number(1.0))]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_iterator_closed_when_default_throws() {
        let (source, counters) = counting_iterable(vec![1.0.into()]);
        let (mut interp, _) = logging_interpreter();
        let mut emitter = RecordingEmitter::new();
        let result = run("[a, b = boom(), c]", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter);

        assert_eq!(result.unwrap_err().to_string(), "Error: boom");
        assert_eq!(counters.closes.get(), 1);
        assert_eq!(emitter.bindings(), vec![bound("a", Value::Number(1.0))]);
    }

    #[test]
    fn test_close_failure_after_success_propagates() {
        let (source, counters) = failing_close_iterable(vec![1.0.into()]);
        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::new();
        let result = run("[a]", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter);

        assert_eq!(result.unwrap_err().to_string(), "Error: close failed");
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_original_error_wins_over_close_failure() {
        let (source, counters) = failing_close_iterable(vec![]);
        let (mut interp, _) = logging_interpreter();
        let mut emitter = RecordingEmitter::new();
        let result = run("[a = boom()]", source, DestructuringFlavor::Declaration, &mut interp, &mut emitter);

        assert_eq!(result.unwrap_err().to_string(), "Error: boom");
        assert_eq!(counters.closes.get(), 1);
    }

    #[test]
    fn test_nested_iterators_all_closed_on_failure() {
        let (inner, inner_counters) = counting_iterable(vec![]);
        let (outer, outer_counters) = counting_iterable(vec![inner]);
        let (mut interp, _) = logging_interpreter();
        let mut emitter = RecordingEmitter::new();
        let result = run("[[a = boom()], b]", outer, DestructuringFlavor::Declaration, &mut interp, &mut emitter);

        assert!(result.is_err());
        assert_eq!(inner_counters.closes.get(), 1);
        assert_eq!(outer_counters.closes.get(), 1);
        assert_eq!(outer_counters.nexts.get(), 1);
        assert!(emitter.calls.is_empty());
    }
}

mod options {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_strict_restricted_assignment_target() {
        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::new();
        let pattern = parse_pattern("[x, arguments]").unwrap();
        let source = eval(&mut interp, "[1, 2]");
        let result = compile_with_options(
            &pattern,
            DestructuringFlavor::Assignment,
            source,
            &mut interp,
            &mut emitter,
            &CompileOptions::strict(),
        );

        assert!(matches!(
            result,
            Err(Error::AssignmentTargetUnresolvable { ref name }) if name == "arguments"
        ));
        assert_eq!(emitter.bindings(), vec![bound("x", Value::Number(1.0))]);
    }

    #[test]
    fn test_options_from_file_limit_depth() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "strict": true, "maxDepth": 1 }}"#).unwrap();
        let options = CompileOptions::from_file(file.path()).unwrap();
        assert!(options.strict);
        assert_eq!(options.max_depth, 1);

        let mut interp = Interpreter::new();
        let mut emitter = RecordingEmitter::new();
        let source = eval(&mut interp, "[[1]]");
        let pattern = parse_pattern("[[a]]").unwrap();
        let result = compile_with_options(
            &pattern,
            DestructuringFlavor::Declaration,
            source,
            &mut interp,
            &mut emitter,
            &options,
        );
        assert!(matches!(result, Err(Error::ResourceLimitError { .. })));
    }
}

mod built_patterns {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickbind::ast::{Expression, LiteralValue};

    #[test]
    fn test_patterns_built_in_code() {
        // {x = 1, [key]: [a, , b = f()], ...r}
        let pattern = Pattern::Object(
            ObjectPattern::new(vec![
                PropertyBinding::shorthand("x").with_default(Expression::literal(LiteralValue::Number(1.0))),
                PropertyBinding::new(
                    PropertyKey::Computed(Box::new(Expression::identifier("key"))),
                    Pattern::Array(ArrayPattern::new(vec![
                        ArrayElement::target(Target::name("a")),
                        ArrayElement::hole(),
                        ArrayElement::with_default(Target::name("b"), Expression::call("f")),
                    ]))
                    .into(),
                ),
            ])
            .with_rest(Target::name("r")),
        );

        let (mut interp, log) = logging_interpreter();
        interp.set_global("key", Value::string("list"));
        let source = eval(&mut interp, "{list: [1, 2], y: true}");
        let mut emitter = RecordingEmitter::new();
        compile(&pattern, DestructuringFlavor::Declaration, source, &mut interp, &mut emitter).unwrap();

        let bindings = emitter.bindings();
        assert_eq!(
            bindings[..3].to_vec(),
            vec![
                bound("x", Value::Number(1.0)),
                bound("a", Value::Number(1.0)),
                bound("b", Value::Number(42.0)),
            ]
        );
        assert_eq!(keys(&bindings[3].1), vec!["y"]);
        assert_eq!(*log.borrow(), vec!["f"]);
    }
}
