#[macro_use]
mod common;

run_ok!(
    equality,
    "print true == true; print true == false; print false == true; print true != false;",
    ["true", "false", "false", "true"]
);

run_ok!(negation, "print !true; print !false; print !!true;", ["false", "true", "true"]);

run_ok!(equality_across_types_is_false_not_an_error, "print true == 1; print true == nil;", ["false", "false"]);

run_runtime_err!(ordering_a_bool_is_a_type_error, "print true < false;", "Operands must be two numbers");
