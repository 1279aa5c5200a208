#[macro_use]
mod common;

run_ok!(
    bound_super_method_receives_the_subclass_instance_as_this,
    "class A { public fun method() { print \"A.method(\" + this.name + \")\"; } }
     class B : A {
         public var name;
         public fun init(name) { this.name = name; }
         public fun test() { var m = super.method; m(); }
     }
     new B(\"arg\").test();",
    ["A.method(arg)"]
);

run_ok!(
    super_can_reach_a_different_method_than_the_overriding_one,
    "class Base { public fun foo() { print \"Base.foo()\"; } }
     class Derived : Base { public fun bar() { print \"Derived.bar()\"; super.foo(); } }
     new Derived().bar();",
    ["Derived.bar()", "Base.foo()"]
);

run_ok!(
    super_can_reach_the_overridden_version_of_the_same_method,
    "class Base { public fun foo() { print \"Base.foo()\"; } }
     class Derived : Base { public fun foo() { print \"Derived.foo()\"; super.foo(); } }
     new Derived().foo();",
    ["Derived.foo()", "Base.foo()"]
);

run_ok!(
    a_super_call_inside_a_closure_still_resolves_against_the_defining_class,
    "class Base { public fun name() { return \"Base\"; } }
     class Derived : Base {
         public fun makePrinter() {
             fun printer() { print super.name(); }
             return printer;
         }
     }
     new Derived().makePrinter()();",
    ["Base"]
);

run_ok!(
    super_parens_call_the_base_constructor_directly,
    "class Base { public var a; public var b; public fun init(a, b) { print \"Base.init(a, b)\"; this.a = a; this.b = b; } }
     class Derived : Base { public fun init() { print \"Derived.init()\"; super(1, 2); } }
     new Derived();",
    ["Derived.init()", "Base.init(a, b)"]
);

run_runtime_err!(
    super_call_checks_arity,
    "class Base { public fun init(a, b) {} }
     class Derived : Base { public fun init() { super(1, 2, 3, 4); } }
     new Derived();",
    "Expected 2 arguments but got 4"
);

run_ok!(
    a_class_two_levels_up_is_still_reachable_through_super,
    "class A { public fun foo() { print \"A.foo()\"; } }
     class B : A {}
     class C : B { public fun foo() { print \"C.foo()\"; super.foo(); } }
     new C().foo();",
    ["C.foo()", "A.foo()"]
);

run_runtime_err!(
    super_call_with_too_few_arguments_is_caught_at_the_call,
    "class Base { public fun method(a, b) {} }
     class Derived : Base { public fun test() { super.method(1); } }
     new Derived().test();",
    "Expected 2 arguments but got 1"
);

run_static_err!(
    using_super_with_no_superclass_is_rejected,
    "class Foo { public fun bar() { super.bar(); } }",
    "Can't use 'super' in a class with no superclass"
);

run_runtime_err!(
    a_method_only_present_on_the_subclass_is_not_reachable_through_super,
    "class Base {}
     class Derived : Base { public fun test() { super.doesNotExist(); } }
     new Derived().test();",
    "doesn't have a property named 'doesNotExist'"
);

run_static_err!(
    super_must_be_followed_by_a_dot_or_parens,
    "class A {} class B : A { public fun test() { super; } }",
    "Expect '.' after 'super'"
);

run_ok!(
    reassigning_the_name_a_subclass_was_declared_with_does_not_change_its_super_binding,
    "class Base { public fun method() { print \"Base.method()\"; } }
     class Derived : Base { public fun test() { super.method(); } }
     new Derived().test();
     var Derived2 = 1;
     class Derived : Base { public fun test() { super.method(); } }
     new Derived().test();",
    ["Base.method()", "Base.method()"]
);

run_static_err!(
    super_at_top_level_is_rejected,
    "super.foo;",
    "Can't use 'super' outside of a class"
);

run_ok!(
    super_in_a_method_inherited_two_classes_down_still_resolves,
    "class A { public fun name() { return \"A\"; } }
     class B : A {}
     class C : B { public fun test() { print super.name(); } }
     new C().test();",
    ["A"]
);

run_static_err!(
    super_in_a_top_level_function_is_rejected,
    "fun f() { super.foo(); }",
    "Can't use 'super' outside of a class"
);

run_static_err!(
    super_without_a_dot_before_a_semicolon_is_rejected,
    "class A {} class B : A { public fun test() { super ; } }",
    "Expect '.' after 'super'"
);

run_static_err!(
    super_with_a_dot_but_no_method_name_is_rejected,
    "class A {} class B : A { public fun test() { super. ; } }",
    "Expect superclass method name"
);

run_ok!(
    this_still_refers_to_the_receiver_inside_a_superclass_method,
    "class Base { public var a; public fun show() { print this.a; } }
     class Derived : Base { public fun init(a) { this.a = a; } }
     var d = new Derived(\"a\");
     d.show();
     var e = new Derived(\"b\");
     e.show();",
    ["a", "b"]
);
