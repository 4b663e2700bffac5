use damavand::{Error, ErrorKind, InterpreterOptions, RuntimeError, execute, run_source};

fn output_of(source: &str) -> Vec<String> {
    let outcome = run_source(source);
    assert_eq!(outcome.error, None, "program should run cleanly");
    outcome.output
}

fn runtime_error_of(source: &str) -> RuntimeError {
    match run_source(source).error {
        Some(Error::Runtime(e)) => e,
        other => panic!("expected runtime error, got {other:?}"),
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(output_of("print 2 + 3 * 4\nprint (2 + 3) * 4"), vec!["14", "20"]);
}

#[test]
fn division_is_true_division() {
    assert_eq!(output_of("print 7 / 2\nprint 4 / 2"), vec!["3.5", "2.0"]);
}

#[test]
fn float_operand_promotes_result() {
    assert_eq!(output_of("print 1 + 2.5\nprint 2 * 3"), vec!["3.5", "6"]);
}

#[test]
fn comparison_chain_evaluates_left_to_right() {
    assert_eq!(output_of("print 1 < 2 == true"), vec!["True"]);
}

#[test]
fn strings_concatenate_and_print_escapes() {
    assert_eq!(
        output_of("greeting = 'hello' + \", \" + 'world'\nprint greeting\nprint \"a\\nb\""),
        vec!["hello, world", "a\nb"]
    );
}

#[test]
fn if_else_runs_exactly_one_branch() {
    assert_eq!(output_of("if (false) { print 1 } else { print 2 }"), vec!["2"]);
    assert_eq!(output_of("if (0) { print 1 }"), Vec::<String>::new());
}

#[test]
fn while_with_false_condition_never_runs() {
    assert!(output_of("while (false) { print 1 }").is_empty());
}

#[test]
fn while_counts_up() {
    let source = "i = 0\nwhile (i < 3) {\n  print i\n  i = i + 1\n}";
    assert_eq!(output_of(source), vec!["0", "1", "2"]);
}

#[test]
fn truthiness_drives_conditions() {
    let source = r#"
if ("") { print "empty string" }
if (0.0) { print "zero float" }
if (missing) { print "missing" }
if ("x") { print "text" }
if (-1) { print "negative" }
"#;
    assert_eq!(output_of(source), vec!["text", "negative"]);
}

#[test]
fn undefined_variable_reads_as_none() {
    assert_eq!(output_of("print z"), vec!["None"]);
    assert_eq!(output_of("print !z"), vec!["True"]);
}

#[test]
fn call_rolls_back_mutations_of_existing_globals() {
    let source = "fff f(x) { y = x }\ny = 10\nf(5)\nprint y";
    assert_eq!(output_of(source), vec!["10"]);
}

#[test]
fn parameters_and_new_variables_vanish_after_call() {
    let source = "fff f(x) { fresh = x * 2\n print fresh }\nf(4)\nprint x\nprint fresh";
    assert_eq!(output_of(source), vec!["8", "None", "None"]);
}

#[test]
fn callee_sees_caller_globals_during_call() {
    let source = "fff show() { print counter }\ncounter = 3\nshow()";
    assert_eq!(output_of(source), vec!["3"]);
}

#[test]
fn parameter_shadows_global_only_inside_call() {
    let source = "fff f(n) { print n }\nn = 'outer'\nf('inner')\nprint n";
    assert_eq!(output_of(source), vec!["inner", "outer"]);
}

#[test]
fn arguments_are_evaluated_in_callers_table() {
    let source = "fff f(a, b) { print a\n print b }\na = 1\nf(2, a)";
    assert_eq!(output_of(source), vec!["2", "1"]);
}

#[test]
fn recursion_terminates_and_rolls_back_each_level() {
    let source = r#"
fff countdown(n) {
  if (n > 0) {
    print n
    countdown(n - 1)
  }
}
countdown(3)
print n
"#;
    assert_eq!(output_of(source), vec!["3", "2", "1", "None"]);
}

#[test]
fn redefinition_replaces_function() {
    let source = "fff f() { print 1 }\nfff f() { print 2 }\nf()";
    assert_eq!(output_of(source), vec!["2"]);
}

#[test]
fn functions_are_registered_when_their_definition_runs() {
    let err = runtime_error_of("early()\nfff early() { print 1 }");
    assert!(matches!(err, RuntimeError::UndefinedFunction { ref name, .. } if name == "early"));
}

#[test]
fn undefined_function_stops_the_run() {
    let outcome = run_source("print 'before'\ng()\nprint 'after'");
    assert_eq!(outcome.output, vec!["before"]);
    let error = outcome.error.expect("run should fail");
    assert_eq!(error.kind(), ErrorKind::Runtime);
    assert_eq!(error.to_string(), "Undefined function g at 2:1");
}

#[test]
fn argument_count_must_match() {
    let err = runtime_error_of("fff pair(a, b) { print a }\npair(1)");
    assert!(matches!(
        err,
        RuntimeError::ArgumentCountMismatch {
            expected: 2,
            found: 1,
            ..
        }
    ));
}

#[test]
fn error_inside_call_aborts_the_run() {
    let outcome = run_source("fff bad() { x = 1\n missing() }\nbad()");
    assert!(matches!(
        outcome.error,
        Some(Error::Runtime(RuntimeError::UndefinedFunction { .. }))
    ));
}

#[test]
fn mixed_text_and_number_addition_is_rejected() {
    let err = runtime_error_of("print 'a' + 1");
    assert_eq!(
        err,
        RuntimeError::UnsupportedOperands {
            op: "+".to_string(),
            left: "string",
            right: "int",
        }
    );
}

#[test]
fn mismatched_equality_is_false() {
    assert_eq!(output_of("print 1 == '1'\nprint 1 != '1'"), vec!["False", "True"]);
}

#[test]
fn dividing_by_zero_is_a_runtime_error() {
    assert_eq!(runtime_error_of("print 1 / 0"), RuntimeError::DivisionByZero);
}

#[test]
fn negating_a_boolean_is_rejected() {
    assert!(matches!(
        runtime_error_of("print -true"),
        RuntimeError::UnsupportedOperand { operand: "bool", .. }
    ));
}

#[test]
fn deep_recursion_hits_the_call_limit() {
    let mut output: Vec<String> = Vec::new();
    let options = InterpreterOptions { max_call_depth: 16 };
    let err = execute("fff down() { down() }\ndown()", &mut output, options)
        .expect_err("unbounded recursion should fail");
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::RecursionLimit { limit: 16, .. })
    ));
    assert_eq!(err.to_string(), "Maximum call depth of 16 exceeded calling down at 1:14");
}

#[test]
fn default_call_limit_fires_before_stack_runs_out() {
    // Runs on the ordinary test thread, not a large custom stack
    let outcome = run_source("fff f(n) { if (n > 0) { f(n - 1) } }\nf(300)\nprint 'ok'");
    assert!(outcome.output.is_empty());
    assert!(matches!(
        outcome.error,
        Some(Error::Runtime(RuntimeError::RecursionLimit { limit: 64, .. }))
    ));
}

#[test]
fn recursion_within_default_limit_completes() {
    let source = "fff f(n) { if (n > 0) { f(n - 1) } else { print 'bottom' } }\nf(60)";
    assert_eq!(output_of(source), vec!["bottom"]);
}

#[test]
fn overflowing_floats_reach_nan_which_compares_false() {
    let source = r#"
x = 1.0
while (x < x * 10) { x = x * 10 }
nan = x - x
print x
print nan < 1
print nan >= 1
print nan == nan
"#;
    assert_eq!(output_of(source), vec!["inf", "False", "False", "False"]);
}
