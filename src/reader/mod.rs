//! Convert tokens into S-expressions
use fallible_iterator::FallibleIterator;

mod datum;

pub use self::datum::{atom, parse_datum};
use crate::error::{Error, Result};
use crate::eval::Value;
use crate::lexer::{InPort, LineSource};

/// Reads the next top-level form from `port`, `None` once it is exhausted.
pub fn parse<S: LineSource>(port: &mut InPort<S>) -> Result<Option<Value>> {
    parse_datum(port)
}

/// The forms of a port, one at a time
pub struct Datums<'a, S> {
    port: &'a mut InPort<S>,
}

impl<'a, S: LineSource> Datums<'a, S> {
    pub fn new(port: &'a mut InPort<S>) -> Datums<'a, S> {
        Datums { port }
    }
}

impl<'a, S: LineSource> FallibleIterator for Datums<'a, S> {
    type Item = Value;
    type Error = Error;

    fn next(&mut self) -> Result<Option<Value>> {
        parse_datum(self.port)
    }
}
