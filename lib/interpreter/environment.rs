use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::object::Object;

pub type Env = Rc<RefCell<Environment>>;

/// Variable scope. Lookups fall through to the enclosing scope; writes always
/// land in this one.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn new_enclosed_environment(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    pub fn set(&mut self, name: &str, value: Object) {
        self.store.insert(name.to_string(), value);
    }
}
