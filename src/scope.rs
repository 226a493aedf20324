use crate::error::{Result, YatError};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope; children keep their parent alive through it.
pub type ScopeRef = Rc<RefCell<Scope>>;

#[derive(Debug, Clone, Default)]
pub struct Scope {
    values: HashMap<String, Value>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            values: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            values: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Wraps a fresh root scope in a shared handle.
    pub fn root() -> ScopeRef {
        Rc::new(RefCell::new(Scope::new()))
    }

    /// Wraps a fresh child of `parent` in a shared handle.
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Scope::with_parent(Rc::clone(parent))))
    }

    /// Binds `name` in this scope's own mapping. Ancestors are never touched.
    pub fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks `name` up here, then in each ancestor in turn. The walk is a
    /// loop: chains get as long as the call depth.
    pub fn get(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        let mut next = self.parent.clone();

        while let Some(node) = next {
            let scope = node.borrow();

            if let Some(value) = scope.values.get(name) {
                return Ok(value.clone());
            }

            next = scope.parent.clone();
        }

        Err(YatError::Name(name.to_string()))
    }

    pub fn contains_local(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }
}
