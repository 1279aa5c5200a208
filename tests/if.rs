#[macro_use]
mod common;

run_static_err!(class_in_then, "if (true) class Foo {}", "Expect expression");

run_static_err!(class_in_else, "if (false) 1; else class Foo {}", "Expect expression");

run_static_err!(fun_in_then, "if (true) fun foo() {}", "Expect expression");

run_static_err!(fun_in_else, "if (false) 1; else fun foo() {}", "Expect expression");

run_ok!(
    dangling_else_binds_to_nearest_if,
    "if (true) if (false) print \"bad\"; else print \"good\";",
    ["good"]
);

run_ok!(
    else_branch_runs_when_condition_is_false,
    "if (true) print \"good\"; else print \"bad\";
     if (false) print \"bad\"; else print \"good\";
     if (false) print \"bad\"; else { print \"block\"; }",
    ["good", "good", "block"]
);

run_ok!(
    then_branch_runs_when_condition_is_true,
    "if (true) print \"good\"; else print \"bad\";
     if (true) { print \"block\"; }
     var a = false;
     if (!a) print true;",
    ["good", "block", "true"]
);

run_ok!(
    truthiness_of_non_bool_values,
    "if (0) print \"zero is truthy\"; else print \"false\";
     if (nil) print \"bad\"; else print \"nil\";
     if (1) print \"true\"; else print \"bad\";",
    ["zero is truthy", "nil", "true"]
);
