//! Interned symbols
//!
//! Every distinct piece of symbol text maps to exactly one shared
//! allocation, so two symbols can be compared by pointer.
use gc::{Finalize, Trace};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

lazy_static! {
    static ref SYMBOL_TABLE: Mutex<HashMap<String, Symbol>> = Mutex::new(HashMap::new());
}

/// An interned identifier
#[derive(Clone)]
pub struct Symbol(Arc<str>);

/// Finds or creates the unique symbol for `text`.
pub fn make_symbol(text: &str) -> Symbol {
    // A poisoned table still holds valid entries.
    let mut table = SYMBOL_TABLE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(symbol) = table.get(text) {
        return symbol.clone();
    }

    trace!("interning {:?}", text);
    let symbol = Symbol(Arc::from(text));
    table.insert(text.to_owned(), symbol.clone());
    symbol
}

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Symbol({})", &*self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Finalize for Symbol {}
unsafe impl Trace for Symbol {
    unsafe_empty_trace!();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_text_same_symbol() {
        let a = make_symbol("lambda");
        let b = make_symbol("lambda");
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_different_symbol() {
        assert_ne!(make_symbol("car"), make_symbol("cdr"));
    }

    #[test]
    fn display() {
        assert_eq!(make_symbol("set!").to_string(), "set!");
        assert_eq!(make_symbol("set!").as_str(), "set!");
    }
}
