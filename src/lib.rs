//! A small Scheme-flavoured Lisp interpreter
#[macro_use]
extern crate gc;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

#[macro_use]
mod helpers;

mod error;
pub mod eval;
pub mod interpret;
pub mod lexer;
mod number;
pub mod printer;
pub mod reader;
pub mod symbol;

pub use crate::error::{Error, Result};
pub use crate::eval::{default_env, evaluate, Environment, GcShared, Value};
pub use crate::interpret::{interpret, load, repl, run_file};
pub use crate::lexer::{InPort, LineSource};
pub use crate::number::Complex;
pub use crate::printer::represent;
pub use crate::reader::parse;
pub use crate::symbol::{make_symbol, Symbol};
