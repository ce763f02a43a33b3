//! Convert text into tokens
use fallible_iterator::FallibleIterator;

#[macro_use]
mod macros;
#[macro_use]
mod chars;

mod port;
mod token;

pub use self::port::{InPort, LineSource, Lines};
pub use self::token::{next_token, AbbreviationKind, Token};
use crate::error::Error;

/// A stream of tokens
pub struct Tokens<'a, S> {
    port: &'a mut InPort<S>,
}

impl<'a, S: LineSource> FallibleIterator for Tokens<'a, S> {
    type Item = Token;
    type Error = Error;

    fn next(&mut self) -> Result<Option<Token>, Error> {
        next_token(self.port)
    }
}

impl<'a, S: LineSource> Tokens<'a, S> {
    pub fn new(port: &'a mut InPort<S>) -> Tokens<'a, S> {
        Tokens { port }
    }
}
