#[macro_use]
mod common;

run_ok!(global_assignment_returns_value, "var a = 1; print a = 2;", ["2"]);

run_ok!(assignment_is_right_associative, "var a; var b; a = b = 3; print a; print b;", ["3", "3"]);

run_ok!(local_assignment_is_visible_after, "{ var a = 1; a = 2; print a; }", ["2"]);

run_static_err!(invalid_assignment_target, "1 = 2;", "Invalid assignment target");

run_static_err!(assigning_to_this_is_rejected, "class Foo { public fun bar() { this = 1; } }", "Invalid assignment target");

run_runtime_err!(assigning_undeclared_global, "a = 1;", "was never declared");
