//! Special forms, dispatched by keyword
use ::gc::Gc;
use std::collections::HashMap;

use super::gc::GcShared;
use super::keywords::*;
use super::value::{Closure, Environment, Value};
use super::evaluate;
use crate::error::{Error, Result};
use crate::printer::represent;
use crate::symbol::{make_symbol, Symbol};

pub type SpecialForm = fn(&[Value], &GcShared<Environment>) -> Result<Value>;

lazy_static! {
    static ref SPECIAL_FORMS: HashMap<Symbol, SpecialForm> = {
        let table: &[(&str, SpecialForm)] = &[
            (QUOTE, eval_quote),
            (COND, eval_cond),
            (IF, eval_if),
            (DEFINE, eval_define),
            (SET_BANG, eval_set),
            (LAMBDA, eval_lambda),
            (DEFINE_MACRO, unsupported),
            (QUASIQUOTE, unsupported),
            (UNQUOTE, unsupported),
            (UNQUOTE_SPLICING, unsupported),
        ];

        table
            .iter()
            .map(|&(keyword, form)| (make_symbol(keyword), form))
            .collect()
    };
}

/// The handler for `keyword`, if it names a special form.
pub fn special_form(keyword: &Symbol) -> Option<SpecialForm> {
    SPECIAL_FORMS.get(keyword).cloned()
}

fn eval_quote(operands: &[Value], _: &GcShared<Environment>) -> Result<Value> {
    match operands {
        [datum] => Ok(datum.clone()),
        _ => syntax_err!("quote expects exactly one operand, got {}", operands.len()),
    }
}

// (if test consequent [alternate])
fn eval_if(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value> {
    let (test, consequent, alternate) = match operands {
        [test, consequent] => (test, consequent, None),
        [test, consequent, alternate] => (test, consequent, Some(alternate)),
        _ => return syntax_err!("if expects 2 or 3 operands, got {}", operands.len()),
    };

    let test_value: bool = (&evaluate(test, environment)?).into();

    if test_value {
        evaluate(consequent, environment)
    } else {
        match alternate {
            Some(alternate) => evaluate(alternate, environment),
            None => Ok(Value::Unspecified),
        }
    }
}

fn eval_cond(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value> {
    let expansion = cond_to_if(operands)?;
    evaluate(&expansion, environment)
}

/// Folds `cond` clauses right-to-left into nested `if`s.
pub fn cond_to_if(clauses: &[Value]) -> Result<Value> {
    if clauses.is_empty() {
        return syntax_err!("empty cond");
    }

    let else_keyword = make_symbol(ELSE);
    let if_keyword = Value::Symbol(make_symbol(IF));
    let last = clauses.len() - 1;
    let mut expansion: Option<Value> = None;

    for (index, clause) in clauses.iter().enumerate().rev() {
        let (test, consequence) = match clause.as_list() {
            Some([test, consequence]) => (test, consequence),
            _ => return syntax_err!("malformed cond clause {}", represent(clause)),
        };

        if test.as_symbol() == Some(&else_keyword) {
            if index != last {
                return syntax_err!("else clause isn't last");
            }
            expansion = Some(consequence.clone());
            continue;
        }

        let mut branch = vec![if_keyword.clone(), test.clone(), consequence.clone()];
        if let Some(rest) = expansion.take() {
            branch.push(rest);
        }
        expansion = Some(Value::list(branch));
    }

    // clauses is non-empty
    Ok(expansion.unwrap_or(Value::Unspecified))
}

// (define name expr) | (define (name param...) body...)
fn eval_define(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value> {
    let (target, rest) = match operands.split_first() {
        Some(split) => split,
        None => return definition_err!("define needs a target"),
    };

    match *target {
        Value::Symbol(ref name) => {
            let expression = match rest {
                [expression] => expression,
                [] => return definition_err!("no value given for {}", name),
                _ => return definition_err!("too many operands in definition of {}", name),
            };
            let value = evaluate(expression, environment)?;
            debug!("define {}", name);
            environment.borrow_mut().define(name.clone(), value);
            Ok(Value::Unspecified)
        }
        Value::List(ref signature) => {
            let (name, params) = match signature.split_first() {
                Some((&Value::Symbol(ref name), params)) => (name, params),
                _ => return definition_err!("can't define {}", represent(target)),
            };
            let params = match parameters(params) {
                Some(params) => params,
                None => return definition_err!("bad parameter list in definition of {}", name),
            };
            if rest.is_empty() {
                return definition_err!("procedure {} has an empty body", name);
            }

            debug!("define procedure {}", name);
            let closure = Value::Closure(Gc::new(Closure {
                name: name.to_string(),
                params,
                body: rest.to_vec(),
                environment: environment.clone(),
            }));
            environment.borrow_mut().define(name.clone(), closure);
            Ok(Value::Unspecified)
        }
        _ => definition_err!("can't define {}", represent(target)),
    }
}

fn eval_set(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value> {
    let (name, expression) = match operands {
        [Value::Symbol(name), expression] => (name, expression),
        _ => return syntax_err!("set! expects a symbol and an expression"),
    };

    let value = evaluate(expression, environment)?;
    environment.borrow_mut().set(name, value)?;
    Ok(Value::Unspecified)
}

// (lambda (param...) body...)
fn eval_lambda(operands: &[Value], environment: &GcShared<Environment>) -> Result<Value> {
    let (params, body) = match operands.split_first() {
        Some(split) => split,
        None => return syntax_err!("lambda needs a parameter list"),
    };

    let params = match params.as_list().and_then(parameters) {
        Some(params) => params,
        None => return syntax_err!("lambda parameters must be a list of symbols"),
    };

    if body.is_empty() {
        return syntax_err!("lambda has an empty body");
    }

    Ok(Value::Closure(Gc::new(Closure {
        name: LAMBDA.to_owned(),
        params,
        body: body.to_vec(),
        environment: environment.clone(),
    })))
}

fn unsupported(_: &[Value], _: &GcShared<Environment>) -> Result<Value> {
    Err(Error::Syntax("unsupported special form".to_owned()))
}

fn parameters(list: &[Value]) -> Option<Vec<Symbol>> {
    list.iter().map(|param| param.as_symbol().cloned()).collect()
}
