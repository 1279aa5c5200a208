#[macro_use]
mod common;

run_static_err!(
    class_in_body,
    "for (var i = 0; i < 1; i = i + 1) class Foo {}",
    "Expect expression"
);

run_static_err!(fun_in_body, "for (var i = 0; i < 1; i = i + 1) fun foo() {}", "Expect expression");

run_ok!(
    closure_in_body_captures_each_iteration,
    "var fns = [];
     for (var i = 0; i < 3; i = i + 1) {
         var j = i;
         fun capture() { return j; }
         fns.push(capture);
     }
     print fns[0]();
     print fns[1]();
     print fns[2]();",
    ["0", "1", "2"]
);

run_ok!(
    return_from_inside_a_for_loop,
    "fun find() {
         for (var i = 0; i < 5; i = i + 1) {
             if (i == 3) return i;
         }
         return -1;
     }
     print find();",
    ["3"]
);

run_ok!(
    counts_down_with_a_decrement_clause,
    "var out = \"\";
     for (var i = 3; i > 0; i = i - 1) out = out + i;
     print out;",
    ["321"]
);
