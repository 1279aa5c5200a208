#[macro_use]
mod common;

run_ok!(empty_block_is_a_no_op, "{ } print \"ok\";", ["ok"]);

run_ok!(inner_scope_shadows_outer, "var a = \"outer\"; { var a = \"inner\"; print a; } print a;", ["inner", "outer"]);

run_ok!(block_does_not_leak_its_locals, "{ var a = 1; } print \"ok\";", ["ok"]);
