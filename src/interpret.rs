//! Sessions: read a form, evaluate it, print the result, repeat
use fallible_iterator::FallibleIterator;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::eval::{capture_display, evaluate, Environment, GcShared, Value};
use crate::lexer::{InPort, LineSource};
use crate::printer::represent;
use crate::reader::{parse, Datums};

/// Runs every form of `port` in `environment`.
///
/// Results other than unspecified ones are written to `out` when `echo`
/// is set, after anything the form itself passed to `display`. Errors
/// never end the session: each one is written to `out` as
/// `Kind: message` and reading resumes right after the offending token.
/// Only `(exit)`, the end of the input or a failing input source stop it.
pub fn repl<S, W>(
    port: &mut InPort<S>,
    environment: &GcShared<Environment>,
    out: &mut W,
    echo: bool,
) -> Result<()>
where
    S: LineSource,
    W: Write,
{
    loop {
        let result = match parse(port) {
            Ok(Some(form)) => {
                let (result, displayed) = capture_display(|| evaluate(&form, environment));
                out.write_all(displayed.as_bytes())?;
                result
            }
            Ok(None) => return Ok(()),
            Err(e) => Err(e),
        };

        match result {
            Ok(ref value) if value.is_unspecified() => {}
            Ok(value) => {
                if echo {
                    writeln!(out, "{}", represent(&value))?;
                }
            }
            Err(Error::Exit) => {
                debug!("exit requested");
                return Ok(());
            }
            Err(e) => {
                debug!("form failed: {:?}", e);
                writeln!(out, "{}: {}", e.kind(), e)?;
                if let Error::Io(_) = e {
                    return Ok(());
                }
            }
        }

        out.flush()?;
    }
}

/// Evaluates all of `source`, returning the value of the last form.
///
/// Unlike `repl`, the first error is returned and the remaining forms
/// are not evaluated.
pub fn interpret(source: &str, environment: &GcShared<Environment>) -> Result<Value> {
    let mut port = InPort::from_text(source);
    let mut datums = Datums::new(&mut port);
    let mut value = Value::Unspecified;

    while let Some(datum) = datums.next()? {
        value = evaluate(&datum, environment)?;
    }

    Ok(value)
}

/// Runs a source file quietly: only errors are written to `out`.
pub fn load<P: AsRef<Path>, W: Write>(
    path: P,
    environment: &GcShared<Environment>,
    out: &mut W,
) -> Result<()> {
    let file = File::open(path)?;
    repl(&mut InPort::from_reader(BufReader::new(file)), environment, out, false)
}

/// Runs a source file, writing each result to `out`.
pub fn run_file<P: AsRef<Path>, W: Write>(
    path: P,
    environment: &GcShared<Environment>,
    out: &mut W,
) -> Result<()> {
    let file = File::open(path)?;
    repl(&mut InPort::from_reader(BufReader::new(file)), environment, out, true)
}

#[cfg(test)]
#[path = "interpret_test.rs"]
mod test;
