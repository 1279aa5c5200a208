#[macro_use]
mod common;

run_runtime_err!(calling_a_bool, "true();", "is not callable");

run_runtime_err!(calling_nil, "nil();", "is not callable");

run_runtime_err!(calling_a_number, "123();", "is not callable");

run_runtime_err!(calling_a_class_without_new, "class Foo {} Foo();", "is not a callable");

run_runtime_err!(calling_a_string, "\"str\"();", "is not callable");

run_static_err!(too_many_arguments, &format!("fun f() {{}} f({});", (0..256).map(|n| n.to_string()).collect::<Vec<_>>().join(",")), "Can't have more than 255 arguments");
