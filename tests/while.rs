#[macro_use]
mod common;

run_static_err!(class_in_body, "while (false) class Foo {}", "Expect expression");

run_static_err!(fun_in_body, "while (false) fun foo() {}", "Expect expression");

run_static_err!(var_in_body, "while (false) var a = 1;", "Expect expression");

run_ok!(
    closure_in_body_captures_its_own_iteration,
    "var fns = [];
     var i = 0;
     while (i < 3) {
         var j = i;
         fun capture() { return j; }
         fns.push(capture);
         i = i + 1;
     }
     print fns[0]();
     print fns[1]();
     print fns[2]();",
    ["0", "1", "2"]
);

run_ok!(
    return_a_closure_created_inside_a_while_loop,
    "fun make() {
         var i = 0;
         while (i < 1) {
             i = i + 1;
             fun f() { return \"from loop\"; }
             return f;
         }
     }
     print make()();",
    ["from loop"]
);

run_ok!(
    return_from_inside_a_while_loop_stops_the_loop,
    "fun find() {
         var i = 0;
         while (true) {
             if (i == 3) return i;
             i = i + 1;
         }
     }
     print find();",
    ["3"]
);

run_ok!(
    while_loop_runs_until_its_condition_is_false,
    "var i = 0;
     var out = \"\";
     while (i < 3) { out = out + i; i = i + 1; }
     print out;",
    ["012"]
);
