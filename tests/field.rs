#[macro_use]
mod common;

run_ok!(
    get_and_set_on_instance,
    "class Foo { public var bar; public var baz; }
     var foo = new Foo();
     foo.bar = \"bar value\";
     foo.baz = \"baz value\";
     print foo.bar;
     print foo.baz;",
    ["bar value", "baz value"]
);

run_ok!(
    method_is_found_through_get_property,
    "class Foo { public fun bar() { return \"got method\"; } }
     print new Foo().bar();",
    ["got method"]
);

run_ok!(
    method_binds_this_when_fetched,
    "class Foo { public var a = 1; public fun get() { return this.a; } }
     var foo = new Foo();
     var m = foo.get;
     print m();",
    ["1"]
);

run_runtime_err!(set_on_bool, "true.foo = 1;", "is not capable of having any properties");

run_runtime_err!(set_on_class, "class Foo {} Foo.bar = 1;", "is not capable of having any properties");

run_runtime_err!(
    set_on_function,
    "fun foo() {}
     foo.bar = 1;",
    "is not capable of having any properties"
);

run_runtime_err!(set_on_null, "nil.foo = 1;", "is not capable of having any properties");

run_runtime_err!(set_on_num, "123.foo = \"value\";", "is not capable of having any properties");

run_runtime_err!(set_on_string, "\"str\".foo = 1;", "is not capable of having any properties");

run_runtime_err!(
    set_undeclared_field_is_rejected,
    "class Foo {}
     new Foo().bar = 1;",
    "doesn't have a property named 'bar'"
);

run_runtime_err!(
    undefined_field_read,
    "class Foo {}
     print new Foo().bar;",
    "doesn't have a property named 'bar'"
);
