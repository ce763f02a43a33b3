use gc::{Finalize, Trace};
use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

use super::gc::GcShared;
use crate::error::{Error, Result};
use crate::symbol::Symbol;

/// A scope: its own bindings plus a read-only link to the enclosing one.
pub struct Environment<V: Trace + 'static> {
    parent: Option<GcShared<Environment<V>>>,
    bindings: HashMap<Symbol, V>,
}

impl<V: Trace> Default for Environment<V> {
    fn default() -> Environment<V> {
        Environment {
            parent: None,
            bindings: HashMap::new(),
        }
    }
}

#[derive(Debug)]
struct FmtEnvironment<'a, V: Trace + Debug + 'static> {
    parent: Option<&'a GcShared<Environment<V>>>,
    bindings: hash_map::Keys<'a, Symbol, V>,
}

impl<V: Trace + Debug> Debug for Environment<V> {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        FmtEnvironment {
            parent: self.parent.as_ref(),
            bindings: self.bindings.keys(),
        }.fmt(fmt)
    }
}

impl<V: Trace> Finalize for Environment<V> {}
unsafe impl<V: Trace> Trace for Environment<V> {
    custom_trace!(this, {
        if let Some(ref env) = this.parent {
            mark(env);
        }
        for v in this.bindings.values() {
            mark(v);
        }
    });
}

impl<V: Trace + Clone> Environment<V> {
    /// An empty scope nested in `parent`.
    pub fn new_child(parent: &GcShared<Environment<V>>) -> Environment<V> {
        Environment {
            parent: Some(parent.clone()),
            bindings: HashMap::new(),
        }
    }

    /// Binds `name` in this scope, shadowing or overwriting as needed.
    pub fn define(&mut self, name: Symbol, value: V) {
        self.bindings.insert(name, value);
    }

    /// Rebinds `name` in the innermost scope that already has it.
    pub fn set(&mut self, name: &Symbol, value: V) -> Result<()> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        let mut env = match self.parent {
            Some(ref parent) => parent.clone(),
            None => return Err(Error::UnboundVariable(name.clone())),
        };

        loop {
            env = {
                let mut envref = env.borrow_mut();

                if let Some(slot) = envref.bindings.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }

                match envref.parent {
                    Some(ref parent) => parent.clone(),
                    None => return Err(Error::UnboundVariable(name.clone())),
                }
            }
        }
    }

    /// The value bound to `name` in the nearest scope that has it.
    pub fn lookup(&self, name: &Symbol) -> Result<V> {
        if let Some(value) = self.bindings.get(name) {
            return Ok(value.clone());
        }

        let mut environment = match self.parent {
            Some(ref parent) => parent.clone(),
            None => return Err(Error::UnboundVariable(name.clone())),
        };

        loop {
            environment = {
                let borrowed = environment.borrow();
                if let Some(value) = borrowed.bindings.get(name) {
                    return Ok(value.clone());
                }
                match borrowed.parent {
                    Some(ref parent) => parent.clone(),
                    None => return Err(Error::UnboundVariable(name.clone())),
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::gc::shared;
    use super::*;
    use crate::symbol::make_symbol;

    type Env = Environment<i64>;

    #[test]
    fn lookup_walks_outward() {
        let mut root = Env::default();
        root.define(make_symbol("x"), 1);
        let root = shared(root);

        let child = shared(Env::new_child(&root));
        let grandchild = Env::new_child(&child);

        assert_eq!(grandchild.lookup(&make_symbol("x")), Ok(1));
        assert_eq!(
            grandchild.lookup(&make_symbol("y")),
            Err(Error::UnboundVariable(make_symbol("y")))
        );
    }

    #[test]
    fn define_is_local() {
        let mut root = Env::default();
        root.define(make_symbol("x"), 1);
        let root = shared(root);

        let mut child = Env::new_child(&root);
        child.define(make_symbol("x"), 2);

        assert_eq!(child.lookup(&make_symbol("x")), Ok(2));
        assert_eq!(root.borrow().lookup(&make_symbol("x")), Ok(1));
    }

    #[test]
    fn set_mutates_defining_scope() {
        let mut root = Env::default();
        root.define(make_symbol("x"), 1);
        let root = shared(root);

        let mut child = Env::new_child(&root);
        assert_eq!(child.set(&make_symbol("x"), 5), Ok(()));

        assert_eq!(root.borrow().lookup(&make_symbol("x")), Ok(5));
        assert!(child.bindings.is_empty());
    }

    #[test]
    fn set_unbound() {
        let root = shared(Env::default());
        let mut child = Env::new_child(&root);
        assert_eq!(
            child.set(&make_symbol("nope"), 1),
            Err(Error::UnboundVariable(make_symbol("nope")))
        );
    }
}
