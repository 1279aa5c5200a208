//! Lexical environments: a name→value frame plus an optional parent link.
//!
//! Kept near-verbatim from the teacher's `Environment` (`HashMap` per
//! frame, `Option<Rc<RefCell<Environment>>>` enclosing link, `ancestor`
//! walk), renamed to the `_or_null`/`_or_false` vocabulary spec.md §4.5
//! gives the host API (`get_at_or_null`, `set_at_or_false`, `get_or_null`,
//! `set_or_false`) so resolver-guided lookups and global reads/writes share
//! one surface. Frame creation and teardown are traced via the `log` facade
//! (`trace!` on push in `new`, `trace!` on pop in `Drop`), per DESIGN.md's
//! logging entry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        log::trace!("push scope (enclosing: {})", enclosing.is_some());
        Environment { enclosing, values: HashMap::new() }
    }

    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), value);
    }

    fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Option<Rc<RefCell<Environment>>> {
        let mut current = Rc::clone(env);
        for _ in 0..distance {
            let parent = current.borrow().enclosing.clone()?;
            current = parent;
        }
        Some(current)
    }

    /// Reads `name` exactly `distance` frames above `env`, or `None` if no
    /// such ancestor exists or the name isn't bound there.
    pub fn get_at_or_null(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Option<Object> {
        let target = Environment::ancestor(env, distance)?;
        let value = target.borrow().values.get(name).cloned();
        value
    }

    /// Writes `name` exactly `distance` frames above `env`, returning
    /// `false` if no such ancestor exists or the name isn't already bound
    /// there.
    pub fn set_at_or_false(env: &Rc<RefCell<Environment>>, distance: usize, name: &str, value: Object) -> bool {
        let Some(target) = Environment::ancestor(env, distance) else { return false };
        let mut frame = target.borrow_mut();
        if frame.values.contains_key(name) {
            frame.values.insert(name.to_string(), value);
            true
        } else {
            false
        }
    }

    /// Reads `name` directly from `env` with no parent chaining; used for
    /// globals, which never resolve through the resolver's distance map.
    pub fn get_or_null(env: &Rc<RefCell<Environment>>, name: &str) -> Option<Object> {
        env.borrow().values.get(name).cloned()
    }

    /// Writes `name` directly on `env`, returning `false` if it was never
    /// declared there.
    pub fn set_or_false(env: &Rc<RefCell<Environment>>, name: &str, value: Object) -> bool {
        let mut frame = env.borrow_mut();
        if frame.values.contains_key(name) {
            frame.values.insert(name.to_string(), value);
            true
        } else {
            false
        }
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        log::trace!("pop scope");
    }
}
