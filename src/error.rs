use std::error;
use std::fmt;
use std::io;
use std::result;

use crate::symbol::Symbol;

pub type Result<T> = result::Result<T, Error>;

/// Everything that can go wrong while reading or evaluating a form.
///
/// None of these are fatal to a session: the driver reports them and
/// moves on to the next top-level form.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed input or a malformed special form
    Syntax(String),
    /// Lookup or `set!` of a symbol with no binding
    UnboundVariable(Symbol),
    /// A procedure got the wrong number of arguments
    Arity {
        name: String,
        expected: String,
        given: usize,
    },
    /// A `define` with a target it cannot bind
    Definition(String),
    /// A primitive operation failed
    Runtime(String),
    /// The input source failed
    Io(String),
    /// Raised by `(exit)`; ends the session
    Exit,
}

impl Error {
    /// The diagnostic prefix the session driver prints before the message.
    pub fn kind(&self) -> &'static str {
        match *self {
            Error::Syntax(_) => "SyntaxError",
            Error::UnboundVariable(_) => "UnboundVariableError",
            Error::Arity { .. } => "ArityError",
            Error::Definition(_) => "DefinitionError",
            Error::Runtime(_) => "RuntimeError",
            Error::Io(_) => "IOError",
            Error::Exit => "Exit",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Syntax(ref msg)
            | Error::Definition(ref msg)
            | Error::Runtime(ref msg)
            | Error::Io(ref msg) => fmt.write_str(msg),
            Error::UnboundVariable(ref name) => write!(fmt, "{} is not defined", name),
            Error::Arity {
                ref name,
                ref expected,
                given,
            } => write!(
                fmt,
                "{} expected {} argument(s), got {}",
                name, expected, given
            ),
            Error::Exit => fmt.write_str("exit"),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::symbol::make_symbol;

    #[test]
    fn diagnostic_kinds() {
        assert_eq!(Error::Syntax("unexpected )".into()).kind(), "SyntaxError");
        assert_eq!(
            Error::UnboundVariable(make_symbol("z")).kind(),
            "UnboundVariableError"
        );
        assert_eq!(Error::Definition("bad".into()).kind(), "DefinitionError");
    }

    #[test]
    fn messages() {
        assert_eq!(
            Error::UnboundVariable(make_symbol("z")).to_string(),
            "z is not defined"
        );
        let arity = Error::Arity {
            name: "f".into(),
            expected: "1".into(),
            given: 2,
        };
        assert_eq!(arity.to_string(), "f expected 1 argument(s), got 2");
    }
}
