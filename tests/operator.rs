#[macro_use]
mod common;

run_ok!(
    add_numbers_and_concatenate_strings,
    "print 0 + 0;
     print 123 + 456;
     print \"str\" + \"ing\";",
    ["0", "579", "string"]
);

run_runtime_err!(
    add_rejects_mismatched_types,
    "print true + \"nope\";",
    "Operands must be two numbers of the same kind"
);

run_runtime_err!(
    add_rejects_number_plus_non_number,
    "print 1 + true;",
    "Operands must be two numbers of the same kind"
);

run_ok!(divide_numbers, "print 8 / 2; print 5 / 5; print 10.0 / 4.0;", ["4", "1", "2.5"]);

run_runtime_err!(divide_by_zero_is_a_runtime_error, "print 1 / 0;", "Division by zero");

run_runtime_err!(divide_rejects_mismatched_types, "print true / 1;", "Operands must be two numbers of the same kind");

run_ok!(
    comparison_operators,
    "print 1 < 2;
     print 2 < 2;
     print 2 <= 2;
     print 2 > 1;
     print 1 >= 2;",
    ["true", "false", "true", "true", "false"]
);

run_runtime_err!(
    greater_rejects_non_numbers,
    "print \"a\" > \"b\";",
    "Operands must be two numbers of the same kind"
);

run_ok!(
    equality_compares_structurally_across_kinds,
    "print 1 == 1;
     print \"a\" == \"a\";
     print \"a\" == \"b\";
     print true == true;
     print nil_is_nil();
     fun nil_is_nil() { return nil == nil; }",
    ["true", "true", "false", "true", "true"]
);

run_ok!(
    equals_by_identity_for_classes_and_instances,
    "class Foo {}
     var a = new Foo();
     var b = new Foo();
     print a == a;
     print a == b;
     print Foo == Foo;",
    ["true", "false", "true"]
);

run_ok!(multiply_numbers, "print 5 * 3; print 1.234 * 3.0; print 0 * 100;", ["15", "3.702", "0"]);

run_runtime_err!(
    multiply_rejects_mismatched_types,
    "print nil * 1;",
    "Operands must be two numbers of the same kind"
);

run_ok!(negate_numbers, "print -3; print -(-3); print -3.0;", ["-3", "3", "-3.0"]);

run_runtime_err!(negate_rejects_a_string, "print -\"str\";", "Operand must be a number");

run_runtime_err!(negate_rejects_an_instance, "class Foo {} print -new Foo();", "Operand must be a number");

run_ok!(
    bang_negates_truthiness_without_erroring_on_any_type,
    "print !true;
     print !false;
     print !nil;
     print !0;",
    ["false", "true", "true", "false"]
);

run_ok!(
    not_equals,
    "print 1 != 2;
     print 1 != 1;
     print \"a\" != \"b\";",
    ["true", "false", "true"]
);

run_ok!(subtract_numbers, "print 3 - 2; print 2 - 2; print 3 - 7; print 10 - 3;", ["1", "0", "-4", "7"]);
