//! Classes and instances. Grounded on the teacher's `Class`/`Instance`
//! (`Callable` impl constructing a bare instance, `HashMap<String,
//! Function>` method table); generalized with `superclass`,
//! `static_methods`, `declared_fields`, and native-class construction per
//! spec.md §3/§3.6.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::NativeError;
use crate::function::Function;
use crate::interpreter::Interpreter;
use crate::object::NativePayload;
use crate::stmt::FieldData;

pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub methods: HashMap<String, Rc<Function>>,
    pub static_methods: HashMap<String, Rc<Function>>,
    pub declared_fields: HashSet<String>,
    /// The environment instance methods and field initializers close over:
    /// the environment the `class` statement ran in, or (for a derived
    /// class) one more frame wrapping it that binds `super`. `None` for
    /// native classes, which have neither.
    pub method_closure: Option<Rc<RefCell<Environment>>>,
    /// Declared fields in source order, carrying their (optional) default
    /// value expression; evaluated per-instance at construction time with
    /// `this` bound to the new instance. Empty for native classes.
    pub field_initializers: Vec<FieldData>,
    /// Present only for classes registered through `register_native_class`;
    /// invoked by `new` instead of looking up an `init` method.
    #[allow(clippy::type_complexity)]
    pub native_constructor: Option<Rc<dyn Fn(&mut Interpreter, &[crate::object::Object]) -> Result<NativePayload, NativeError>>>,
}

impl Class {
    pub fn new(
        name: String,
        superclass: Option<Rc<RefCell<Class>>>,
        methods: HashMap<String, Rc<Function>>,
        static_methods: HashMap<String, Rc<Function>>,
        declared_fields: HashSet<String>,
    ) -> Self {
        Class {
            name,
            superclass,
            methods,
            static_methods,
            declared_fields,
            method_closure: None,
            field_initializers: Vec::new(),
            native_constructor: None,
        }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.methods.get(name) {
            return Some(Rc::clone(method));
        }
        self.superclass.as_ref().and_then(|parent| parent.borrow().find_method(name))
    }

    pub fn find_static_method(&self, name: &str) -> Option<Rc<Function>> {
        if let Some(method) = self.static_methods.get(name) {
            return Some(Rc::clone(method));
        }
        self.superclass.as_ref().and_then(|parent| parent.borrow().find_static_method(name))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.declared_fields.contains(name)
            || self.superclass.as_ref().is_some_and(|parent| parent.borrow().has_field(name))
    }

    pub fn find_init(&self) -> Option<Rc<Function>> {
        self.find_method("init")
    }
}

impl std::fmt::Debug for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    pub fields: HashMap<String, crate::object::Object>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new() }
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<instance {}>", self.class.borrow().name)
    }
}
