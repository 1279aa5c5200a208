#[macro_use]
mod common;

run_ok!(empty_class_prints_its_name, "class Foo {} print Foo;", ["<class Foo>"]);

run_static_err!(class_cannot_inherit_from_itself, "class Foo : Foo {}", "A class can't inherit from itself");

run_ok!(
    derived_class_dispatches_overridden_and_inherited_methods,
    "class A { public fun say() { print \"in a\"; } }
     class B : A { public fun say() { print \"in b\"; super.say(); } }
     class C : B {}
     new C().say();",
    ["in b", "in a"]
);

run_runtime_err!(inheriting_from_a_non_class, "var Foo = 1; class Bar : Foo {}", "Superclass must be a class");

run_ok!(
    class_can_reference_itself_in_a_static_method,
    "class Foo { public static fun make() { return new Foo(); } } print Foo.make();",
    ["<instance Foo>"]
);
