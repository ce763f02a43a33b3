use std::io::{self, BufRead, Cursor};

use super::chars::Chars;
use crate::error::Result;

/// Anything that hands out text one line at a time.
pub trait LineSource {
    /// The next line, including its terminator if it had one, or `None`
    /// once the source is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Adapts any `BufRead` (stdin, a file, an in-memory buffer).
pub struct Lines<R>(R);

impl<R: BufRead> LineSource for Lines<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.0.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

impl<'a, S: LineSource + ?Sized> LineSource for &'a mut S {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

/// An input port: a line source plus the line being tokenized.
pub struct InPort<S> {
    source: S,
    pub(super) line: Chars,
}

impl<S: LineSource> InPort<S> {
    pub fn new(source: S) -> InPort<S> {
        InPort {
            source,
            line: Chars::default(),
        }
    }

    /// Pulls the next line into the buffer. `false` at end of input.
    pub(super) fn refill(&mut self) -> Result<bool> {
        match self.source.read_line()? {
            Some(line) => {
                trace!("read line {:?}", line);
                self.line = Chars::from_str(&line);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The part of the buffered line not yet consumed.
    pub fn pending(&self) -> String {
        self.line.rest()
    }
}

impl<R: BufRead> InPort<Lines<R>> {
    pub fn from_reader(reader: R) -> InPort<Lines<R>> {
        InPort::new(Lines(reader))
    }
}

impl InPort<Lines<Cursor<String>>> {
    pub fn from_text(text: &str) -> InPort<Lines<Cursor<String>>> {
        InPort::from_reader(Cursor::new(text.to_owned()))
    }
}
