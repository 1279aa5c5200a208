#[macro_use]
mod common;

run_ok!(
    derived_class_without_its_own_init_falls_back_to_the_base_constructor,
    "class Base { public var a; public fun init(a) { this.a = a; } }
     class Derived : Base {}
     print new Derived(5).a;
     print Derived;",
    ["5", "<class Derived>"]
);

run_ok!(
    a_function_stored_in_a_variable_still_prints_its_declared_name,
    "fun f() {}
     var g = f;
     print g;",
    ["<fn f>"]
);
