//! Evaluation of S-expressions
//!
//! The evaluator is a plain recursive walk over `Value`s: symbols are
//! looked up, lists are either special forms or applications, everything
//! else evaluates to itself. The host stack is the call stack, so a
//! runaway recursion ends in a stack overflow rather than an `Error`.
use ::gc::Gc;

pub use self::gc::{shared, GcShared};
pub use self::stdlib::capture_display;
pub use self::value::{Arity, Closure, Environment, Primitive, PrimitiveFn, Value};
use crate::error::{Error, Result};
use crate::printer::represent;

mod environment;
mod forms;
mod gc;
mod keywords;
mod stdlib;
mod value;


/// Evaluates `expression` in `environment`.
pub fn evaluate(expression: &Value, environment: &GcShared<Environment>) -> Result<Value> {
    trace!("evaluate: {}", represent(expression));

    match *expression {
        Value::Symbol(ref name) => environment.borrow().lookup(name),
        Value::List(ref list) => {
            let (head, operands) = match list.split_first() {
                Some(split) => split,
                None => return syntax_err!("cannot evaluate an empty combination"),
            };

            if let Value::Symbol(ref keyword) = *head {
                if let Some(form) = forms::special_form(keyword) {
                    return form(operands, environment);
                }
            }

            let procedure = evaluate(head, environment)?;
            let arguments = operands
                .iter()
                .map(|operand| evaluate(operand, environment))
                .collect::<Result<Vec<_>>>()?;

            apply(&procedure, arguments)
        }
        ref literal => Ok(literal.clone()),
    }
}

/// Calls `procedure` with already evaluated `arguments`.
pub fn apply(procedure: &Value, arguments: Vec<Value>) -> Result<Value> {
    match *procedure {
        Value::Primitive(ref primitive) => primitive.call(arguments),
        Value::Closure(ref closure) => apply_closure(closure, arguments),
        ref other => runtime_err!("{} is not callable", represent(other)),
    }
}

fn apply_closure(closure: &Gc<Closure>, arguments: Vec<Value>) -> Result<Value> {
    if closure.params.len() != arguments.len() {
        return Err(Error::Arity {
            name: closure.name.clone(),
            expected: closure.params.len().to_string(),
            given: arguments.len(),
        });
    }

    debug!("applying {} to {} argument(s)", closure.name, arguments.len());

    let mut frame = Environment::new_child(&closure.environment);
    for (param, argument) in closure.params.iter().zip(arguments.into_iter()) {
        frame.define(param.clone(), argument);
    }

    evaluate_body(&closure.body, &shared(frame))
}

/// Evaluates each expression in turn, yielding the last value.
pub fn evaluate_body(body: &[Value], environment: &GcShared<Environment>) -> Result<Value> {
    let mut result = Value::Unspecified;
    for expression in body {
        result = evaluate(expression, environment)?;
    }
    Ok(result)
}

/// A fresh root environment holding the standard procedures.
pub fn default_env() -> GcShared<Environment> {
    let mut env = Environment::default();
    stdlib::install(&mut env);
    shared(env)
}

/// A root environment with no bindings at all.
pub fn null_env() -> GcShared<Environment> {
    shared(Environment::default())
}
