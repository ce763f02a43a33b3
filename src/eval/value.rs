use gc::{Finalize, Gc, Trace};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::environment::Environment as GenericEnvironment;
use super::gc::GcShared;
use crate::error::{Error, Result};
use crate::number::{Complex, Number};
use crate::symbol::Symbol;

pub type Environment = GenericEnvironment<Value>;

/// Lisp values. Source code is made of these too.
#[derive(Debug, Clone)]
pub enum Value {
    /// The value of a definition; prints as nothing
    Unspecified,
    /// `#t` / `#f`
    Boolean(bool),
    /// A 64-bit integer
    Integer(i64),
    /// A 64-bit float
    Float(f64),
    /// A complex number (`1+2i`)
    Complex(Complex),
    /// A string
    String(String),
    /// An interned symbol
    Symbol(Symbol),
    /// A list, `()` included
    List(Gc<Vec<Value>>),
    /// A natively implemented procedure
    Primitive(Primitive),
    /// A user defined procedure
    Closure(Gc<Closure>),
}

/// A procedure built by `lambda` or by `(define (name ...) ...)`
pub struct Closure {
    pub name: String,
    pub params: Vec<Symbol>,
    pub body: Vec<Value>,
    pub environment: GcShared<Environment>,
}

impl Debug for Closure {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

impl Finalize for Closure {}
unsafe impl Trace for Closure {
    custom_trace!(this, {
        mark(&this.body);
        mark(&this.environment);
    });
}

pub type PrimitiveFn = fn(Vec<Value>) -> Result<Value>;

/// How many arguments a primitive takes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, given: usize) -> bool {
        match self {
            Arity::Exact(n) => given == n,
            Arity::AtLeast(n) => given >= n,
            Arity::Between(lo, hi) => given >= lo && given <= hi,
        }
    }

    pub fn describe(self) -> String {
        match self {
            Arity::Exact(n) => format!("{}", n),
            Arity::AtLeast(n) => format!("at least {}", n),
            Arity::Between(lo, hi) => format!("{} to {}", lo, hi),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    pub fun: PrimitiveFn,
    pub arity: Arity,
}

impl Primitive {
    pub fn call(&self, arguments: Vec<Value>) -> Result<Value> {
        if !self.arity.accepts(arguments.len()) {
            return Err(Error::Arity {
                name: self.name.to_owned(),
                expected: self.arity.describe(),
                given: arguments.len(),
            });
        }
        (self.fun)(arguments)
    }
}

impl Debug for Primitive {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "Primitive({}, {:?})", self.name, self.arity)
    }
}

impl Finalize for Value {}
unsafe impl Trace for Value {
    custom_trace!(this, {
        use self::Value::*;
        match *this {
            List(ref list) => mark(list),
            Closure(ref closure) => mark(closure),
            Unspecified | Boolean(_) | Integer(_) | Float(_) | Complex(_) | String(_)
            | Symbol(_) | Primitive(_) => {}
        }
    });
}

// Truthiness: everything but `#f` counts as true
impl<'a> From<&'a Value> for bool {
    fn from(v: &Value) -> bool {
        match *v {
            Value::Boolean(false) => false,
            _ => true,
        }
    }
}

// Structural equality, what `equal?` computes
impl PartialEq<Value> for Value {
    fn eq(&self, other: &Value) -> bool {
        use self::Value::*;

        match (self, other) {
            (&List(ref x), &List(ref y)) => **x == **y,
            (&String(ref x), &String(ref y)) => x == y,
            (&Complex(x), &Complex(y)) => x == y,
            (&Closure(_), &Closure(_)) | (&Primitive(_), &Primitive(_)) => self.is_identical(other),
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => a.num_eq(b),
                _ => self.is_identical(other),
            },
        }
    }
}

macro_rules! simple_type {
    ($name:ident, $var:pat) => (
        pub fn $name(&self) -> bool {
            match *self {
                $var => true,
                _ => false
            }
        }
    );
    ($name:ident, $var:pat, $var2:pat) => (
        pub fn $name(&self) -> bool {
            match *self {
                $var | $var2 => true,
                _ => false
            }
        }
    );
    ($name:ident, $var:pat, $var2:pat, $var3:pat) => (
        pub fn $name(&self) -> bool {
            match *self {
                $var | $var2 | $var3 => true,
                _ => false
            }
        }
    )
}

impl Value {
    pub fn list(values: Vec<Value>) -> Value {
        Value::List(Gc::new(values))
    }

    pub fn string<A: AsRef<str>>(s: A) -> Value {
        Value::String(s.as_ref().to_owned())
    }

    pub fn symbol(s: &str) -> Value {
        Value::Symbol(crate::symbol::make_symbol(s))
    }

    simple_type!(is_symbol, Value::Symbol(..));
    simple_type!(is_procedure, Value::Closure(..), Value::Primitive(..));
    simple_type!(is_string, Value::String(..));
    simple_type!(is_boolean, Value::Boolean(..));
    simple_type!(is_list, Value::List(..));
    simple_type!(is_number, Value::Integer(_), Value::Float(_), Value::Complex(_));
    simple_type!(is_unspecified, Value::Unspecified);

    pub fn is_null(&self) -> bool {
        self.as_list().map_or(false, <[Value]>::is_empty)
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match *self {
            Value::List(ref list) => Some(&list[..]),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match *self {
            Value::Symbol(ref s) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<Number> {
        match *self {
            Value::Integer(n) => Some(Number::Integer(n)),
            Value::Float(f) => Some(Number::Float(f)),
            Value::Complex(c) => Some(Number::Complex(c)),
            _ => None,
        }
    }

    /// Identity, what `eq?` computes: atoms by value, the rest by pointer.
    pub fn is_identical(&self, other: &Value) -> bool {
        use self::Value::*;

        match (self, other) {
            (&Unspecified, &Unspecified) => true,
            (&Boolean(x), &Boolean(y)) => x == y,
            (&Integer(x), &Integer(y)) => x == y,
            (&Float(x), &Float(y)) => x == y,
            (&Complex(x), &Complex(y)) => x == y,
            (&String(ref x), &String(ref y)) => x == y,
            (&Symbol(ref x), &Symbol(ref y)) => x == y,
            (&List(ref x), &List(ref y)) => {
                (x.is_empty() && y.is_empty())
                    || (&**x as *const Vec<Value>) == (&**y as *const Vec<Value>)
            }
            (&Closure(ref x), &Closure(ref y)) => {
                (&**x as *const self::Closure) == (&**y as *const self::Closure)
            }
            (&Primitive(ref x), &Primitive(ref y)) => {
                x.name == y.name && (x.fun as usize) == (y.fun as usize)
            }
            _ => false,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Value {
        match n {
            Number::Integer(n) => Value::Integer(n),
            Number::Float(f) => Value::Float(f),
            Number::Complex(c) => Value::Complex(c),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Boolean(b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!bool::from(&Value::Boolean(false)));
        assert!(bool::from(&Value::Boolean(true)));
        assert!(bool::from(&Value::list(vec![])));
        assert!(bool::from(&Value::Integer(0)));
        assert!(bool::from(&Value::string("")));
    }

    #[test]
    fn structural_equality() {
        let a = Value::list(vec![Value::Integer(1), Value::string("x")]);
        let b = Value::list(vec![Value::Integer(1), Value::string("x")]);
        assert_eq!(a, b);
        assert!(!a.is_identical(&b));
        assert!(a.is_identical(&a.clone()));
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::string("1"));
    }

    #[test]
    fn symbols_are_identical() {
        assert!(Value::symbol("abc").is_identical(&Value::symbol("abc")));
        assert!(Value::list(vec![]).is_identical(&Value::list(vec![])));
    }

    #[test]
    fn arity() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(5));
        assert!(!Arity::AtLeast(1).accepts(0));
        assert!(Arity::Between(1, 2).accepts(2));
        assert_eq!(Arity::Between(1, 2).describe(), "1 to 2");
    }
}
