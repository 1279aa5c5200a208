#[macro_use]
mod common;

run_ok!(
    init_runs_with_constructor_arguments,
    "class Foo {
         public var a;
         public var b;
         public fun init(a, b) { this.a = a; this.b = b; }
     }
     var foo = new Foo(1, 2);
     print foo.a;
     print foo.b;",
    ["1", "2"]
);

run_ok!(no_init_means_a_bare_default_constructor, "class Foo {} print new Foo();", ["<instance Foo>"]);

run_runtime_err!(default_constructor_rejects_arguments, "class Foo {} new Foo(1, 2, 3);", "Expected 0 arguments but got 3");

run_runtime_err!(init_arity_mismatch_is_caught, "class Foo { public fun init(a, b) {} } new Foo(1);", "Expected 2 arguments but got 1");

run_ok!(
    an_early_return_from_init_still_yields_the_instance,
    "class Foo { public fun init() { print \"init\"; return; print \"unreachable\"; } }
     print new Foo();",
    ["init", "<instance Foo>"]
);

run_static_err!(init_cannot_return_a_value, "class Foo { public fun init() { return 1; } }", "Can't return a value from an initializer");

run_ok!(
    init_can_be_invoked_again_through_a_bound_method,
    "class Foo { public var a; public fun init(a) { this.a = a; } }
     var foo = new Foo(1);
     foo.init(2);
     print foo.a;",
    ["2"]
);
