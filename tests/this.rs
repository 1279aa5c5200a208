#[macro_use]
mod common;

run_ok!(
    this_is_captured_by_a_closure_defined_inside_a_method,
    "class Foo {
         public var a = \"ok\";
         public fun makeGetter() {
             fun getter() { print this.a; }
             return getter;
         }
     }
     new Foo().makeGetter()();",
    ["ok"]
);

run_ok!(
    this_binds_to_the_innermost_enclosing_instance_in_a_nested_class,
    "class Outer {
         public fun method() {
             class Inner {
                 public fun method() { print this; }
             }
             new Inner().method();
         }
     }
     new Outer().method();",
    ["<instance Inner>"]
);

run_ok!(
    a_nested_closure_in_a_method_still_sees_this,
    "class Foo {
         public var a = \"ok\";
         public fun outer() {
             fun middle() {
                 fun inner() { print this.a; }
                 return inner;
             }
             return middle();
         }
     }
     new Foo().outer()();",
    ["ok"]
);

run_static_err!(this_at_top_level_is_rejected, "print this;", "Can't use 'this' outside of a class");

run_ok!(
    this_refers_to_the_receiver_inside_a_method,
    "class Foo { public var a = \"ok\"; public fun show() { print this.a; } }
     new Foo().show();",
    ["ok"]
);

run_static_err!(
    this_in_a_top_level_function_is_rejected,
    "fun f() { print this; }",
    "Can't use 'this' outside of a class"
);
