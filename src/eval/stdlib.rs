use std::cell::RefCell;
use std::cmp::Ordering;
use std::f64::consts;

use super::value::{Arity, Environment, Primitive, PrimitiveFn, Value};
use super::apply;
use crate::error::{Error, Result};
use crate::number::Number;
use crate::printer::{display, represent};
use crate::symbol::make_symbol;

pub(super) static STDLIB: &[(&str, PrimitiveFn, Arity)] = &[
    // arithmetic
    ("+", add, Arity::AtLeast(0)),
    ("-", sub, Arity::AtLeast(1)),
    ("*", mul, Arity::AtLeast(0)),
    ("/", div, Arity::AtLeast(1)),
    ("%", modulo, Arity::Exact(2)),
    (">", gt, Arity::AtLeast(2)),
    ("<", lt, Arity::AtLeast(2)),
    (">=", ge, Arity::AtLeast(2)),
    ("<=", le, Arity::AtLeast(2)),
    ("=", num_eq, Arity::AtLeast(2)),
    ("abs", abs, Arity::Exact(1)),
    ("max", max, Arity::AtLeast(1)),
    ("min", min, Arity::AtLeast(1)),
    ("round", round, Arity::Between(1, 2)),
    ("number?", is_number, Arity::Exact(1)),
    // math
    ("sqrt", sqrt, Arity::Exact(1)),
    ("exp", exp, Arity::Exact(1)),
    ("log", log, Arity::Between(1, 2)),
    ("log10", log10, Arity::Exact(1)),
    ("log2", log2, Arity::Exact(1)),
    ("sin", sin, Arity::Exact(1)),
    ("cos", cos, Arity::Exact(1)),
    ("tan", tan, Arity::Exact(1)),
    ("asin", asin, Arity::Exact(1)),
    ("acos", acos, Arity::Exact(1)),
    ("atan", atan, Arity::Exact(1)),
    ("atan2", atan2, Arity::Exact(2)),
    ("pow", pow, Arity::Exact(2)),
    ("hypot", hypot, Arity::AtLeast(0)),
    ("floor", floor, Arity::Exact(1)),
    ("ceil", ceil, Arity::Exact(1)),
    ("trunc", trunc, Arity::Exact(1)),
    ("fabs", fabs, Arity::Exact(1)),
    ("degrees", degrees, Arity::Exact(1)),
    ("radians", radians, Arity::Exact(1)),
    ("factorial", factorial, Arity::Exact(1)),
    ("gcd", gcd, Arity::AtLeast(0)),
    ("isnan", isnan, Arity::Exact(1)),
    ("isinf", isinf, Arity::Exact(1)),
    // lists
    ("list", list, Arity::AtLeast(0)),
    ("list?", is_list, Arity::Exact(1)),
    ("null?", is_null, Arity::Exact(1)),
    ("car", car, Arity::Exact(1)),
    ("cdr", cdr, Arity::Exact(1)),
    ("cons", cons, Arity::Exact(2)),
    ("append", append, Arity::AtLeast(0)),
    ("length", length, Arity::Exact(1)),
    ("map", map, Arity::AtLeast(2)),
    ("apply", apply_procedure, Arity::AtLeast(2)),
    // predicates
    ("eq?", is_eq, Arity::Exact(2)),
    ("equal?", is_equal, Arity::Exact(2)),
    ("not", not, Arity::Exact(1)),
    ("boolean?", is_boolean, Arity::Exact(1)),
    ("symbol?", is_symbol, Arity::Exact(1)),
    ("string?", is_string, Arity::Exact(1)),
    ("procedure?", is_procedure, Arity::Exact(1)),
    // misc
    ("begin", begin, Arity::AtLeast(0)),
    ("display", display_value, Arity::Exact(1)),
    ("exit", exit, Arity::Exact(0)),
];

static CONSTANTS: &[(&str, f64)] = &[
    ("pi", consts::PI),
    ("e", consts::E),
    ("tau", consts::TAU),
    ("inf", f64::INFINITY),
    ("nan", f64::NAN),
];

pub(super) fn install(env: &mut Environment) {
    for &(name, fun, arity) in STDLIB.iter() {
        env.define(
            make_symbol(name),
            Value::Primitive(Primitive { name, fun, arity }),
        );
    }

    for &(name, value) in CONSTANTS.iter() {
        env.define(make_symbol(name), Value::Float(value));
    }
}

//
// Argument coercions
//

fn number(value: &Value) -> Result<Number> {
    match value.number() {
        Some(n) => Ok(n),
        None => runtime_err!("expected a number, got {}", represent(value)),
    }
}

fn real(value: &Value) -> Result<f64> {
    match *value {
        Value::Integer(n) => Ok(n as f64),
        Value::Float(f) => Ok(f),
        _ => runtime_err!("expected a real number, got {}", represent(value)),
    }
}

fn integer(value: &Value) -> Result<i64> {
    match *value {
        Value::Integer(n) => Ok(n),
        Value::Float(f) if f.fract() == 0.0 => float_to_integer(f),
        _ => runtime_err!("expected an integer, got {}", represent(value)),
    }
}

fn list_operand<'a>(value: &'a Value, procedure: &str) -> Result<&'a [Value]> {
    match value.as_list() {
        Some(list) => Ok(list),
        None => runtime_err!("{} expects a list, got {}", procedure, represent(value)),
    }
}

fn float_to_integer(f: f64) -> Result<Value> {
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(Value::Integer(f as i64))
    } else {
        runtime_err!("cannot convert {} to an integer", f)
    }
}

fn domain_error() -> Result<Value> {
    runtime_err!("math domain error")
}

//
// Arithmetic
//

fn fold(args: &[Value], init: Number, op: fn(Number, Number) -> Result<Number>) -> Result<Value> {
    let mut acc = init;
    for arg in args {
        acc = op(acc, number(arg)?)?;
    }
    Ok(acc.into())
}

fn add(args: Vec<Value>) -> Result<Value> {
    fold(&args, Number::Integer(0), Number::add)
}

fn mul(args: Vec<Value>) -> Result<Value> {
    fold(&args, Number::Integer(1), Number::mul)
}

fn sub(args: Vec<Value>) -> Result<Value> {
    let first = number(&args[0])?;
    if args.len() == 1 {
        return Ok(first.neg()?.into());
    }
    fold(&args[1..], first, Number::sub)
}

fn div(args: Vec<Value>) -> Result<Value> {
    let first = number(&args[0])?;
    if args.len() == 1 {
        return Ok(Number::Integer(1).div(first)?.into());
    }
    fold(&args[1..], first, Number::div)
}

fn modulo(args: Vec<Value>) -> Result<Value> {
    Ok(number(&args[0])?.rem(number(&args[1])?)?.into())
}

// Unordered pairs (nan) never satisfy the relation
fn compare_chain(args: &[Value], accept: fn(Ordering) -> bool) -> Result<Value> {
    let numbers = args.iter().map(number).collect::<Result<Vec<_>>>()?;
    for pair in numbers.windows(2) {
        if !pair[0].compare(pair[1])?.map_or(false, accept) {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

fn gt(args: Vec<Value>) -> Result<Value> {
    compare_chain(&args, |o| o == Ordering::Greater)
}

fn lt(args: Vec<Value>) -> Result<Value> {
    compare_chain(&args, |o| o == Ordering::Less)
}

fn ge(args: Vec<Value>) -> Result<Value> {
    compare_chain(&args, |o| o != Ordering::Less)
}

fn le(args: Vec<Value>) -> Result<Value> {
    compare_chain(&args, |o| o != Ordering::Greater)
}

fn num_eq(args: Vec<Value>) -> Result<Value> {
    let numbers = args.iter().map(number).collect::<Result<Vec<_>>>()?;
    Ok(numbers.windows(2).all(|pair| pair[0].num_eq(pair[1])).into())
}

fn abs(args: Vec<Value>) -> Result<Value> {
    match args[0] {
        Value::Integer(n) => match n.checked_abs() {
            Some(n) => Ok(Value::Integer(n)),
            None => runtime_err!("integer overflow"),
        },
        Value::Float(f) => Ok(Value::Float(f.abs())),
        Value::Complex(c) => Ok(Value::Float(c.norm())),
        ref other => runtime_err!("expected a number, got {}", represent(other)),
    }
}

fn extremum(args: Vec<Value>, wanted: Ordering) -> Result<Value> {
    let mut best = 0;
    for index in 1..args.len() {
        if number(&args[index])?.compare(number(&args[best])?)? == Some(wanted) {
            best = index;
        }
    }
    // a lone argument still has to be a number
    number(&args[best])?;
    Ok(args.into_iter().nth(best).unwrap_or(Value::Unspecified))
}

fn max(args: Vec<Value>) -> Result<Value> {
    extremum(args, Ordering::Greater)
}

fn min(args: Vec<Value>) -> Result<Value> {
    extremum(args, Ordering::Less)
}

// Past this many digits a scale of 10^digits is no longer finite
const MAX_ROUND_DIGITS: i64 = 308;

// Ties go to the even neighbour
fn round(args: Vec<Value>) -> Result<Value> {
    if args.len() == 2 {
        let x = real(&args[0])?;
        let digits = integer(&args[1])?;
        if digits > MAX_ROUND_DIGITS || !x.is_finite() {
            return Ok(Value::Float(x));
        }
        if digits < -MAX_ROUND_DIGITS {
            return Ok(Value::Float(0.0 * x.signum()));
        }
        let scale = 10f64.powi(digits as i32);
        return Ok(Value::Float((x * scale).round_ties_even() / scale));
    }
    match args[0] {
        Value::Integer(n) => Ok(Value::Integer(n)),
        ref other => float_to_integer(real(other)?.round_ties_even()),
    }
}

fn is_number(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_number().into())
}

//
// Math
//

macro_rules! float_fn {
    ($name:ident, $f:expr) => (
        fn $name(args: Vec<Value>) -> Result<Value> {
            let x = real(&args[0])?;
            Ok(Value::Float($f(x)))
        }
    );
    ($name:ident, $f:expr, domain $ok:expr) => (
        fn $name(args: Vec<Value>) -> Result<Value> {
            let x = real(&args[0])?;
            if !$ok(x) {
                return domain_error();
            }
            Ok(Value::Float($f(x)))
        }
    );
}

float_fn!(exp, f64::exp);
float_fn!(sin, f64::sin);
float_fn!(cos, f64::cos);
float_fn!(tan, f64::tan);
float_fn!(atan, f64::atan);
float_fn!(fabs, f64::abs);
float_fn!(degrees, f64::to_degrees);
float_fn!(radians, f64::to_radians);
float_fn!(sqrt, f64::sqrt, domain |x: f64| x >= 0.0);
float_fn!(log10, f64::log10, domain |x: f64| x > 0.0);
float_fn!(log2, f64::log2, domain |x: f64| x > 0.0);
float_fn!(asin, f64::asin, domain |x: f64| x.abs() <= 1.0);
float_fn!(acos, f64::acos, domain |x: f64| x.abs() <= 1.0);

fn log(args: Vec<Value>) -> Result<Value> {
    let x = real(&args[0])?;
    if x <= 0.0 {
        return domain_error();
    }
    if args.len() == 1 {
        return Ok(Value::Float(x.ln()));
    }
    let base = real(&args[1])?;
    if base <= 0.0 || base == 1.0 {
        return domain_error();
    }
    Ok(Value::Float(x.ln() / base.ln()))
}

fn atan2(args: Vec<Value>) -> Result<Value> {
    Ok(Value::Float(real(&args[0])?.atan2(real(&args[1])?)))
}

fn pow(args: Vec<Value>) -> Result<Value> {
    let (base, exponent) = (real(&args[0])?, real(&args[1])?);
    if base < 0.0 && exponent.fract() != 0.0 {
        return domain_error();
    }
    Ok(Value::Float(base.powf(exponent)))
}

fn hypot(args: Vec<Value>) -> Result<Value> {
    let mut sum = 0.0;
    for arg in &args {
        let x = real(arg)?;
        sum += x * x;
    }
    Ok(Value::Float(sum.sqrt()))
}

fn integral(args: &[Value], f: fn(f64) -> f64) -> Result<Value> {
    match args[0] {
        Value::Integer(n) => Ok(Value::Integer(n)),
        ref other => float_to_integer(f(real(other)?)),
    }
}

fn floor(args: Vec<Value>) -> Result<Value> {
    integral(&args, f64::floor)
}

fn ceil(args: Vec<Value>) -> Result<Value> {
    integral(&args, f64::ceil)
}

fn trunc(args: Vec<Value>) -> Result<Value> {
    integral(&args, f64::trunc)
}

fn factorial(args: Vec<Value>) -> Result<Value> {
    let n = integer(&args[0])?;
    if n < 0 {
        return runtime_err!("factorial() not defined for negative values");
    }
    let mut acc: i64 = 1;
    for k in 2..=n {
        acc = match acc.checked_mul(k) {
            Some(acc) => acc,
            None => return runtime_err!("integer overflow"),
        };
    }
    Ok(Value::Integer(acc))
}

fn gcd(args: Vec<Value>) -> Result<Value> {
    let mut acc: i64 = 0;
    for arg in &args {
        let mut b = integer(arg)?.checked_abs().ok_or_else(|| Error::Runtime("integer overflow".into()))?;
        let mut a = acc;
        while b != 0 {
            let r = a % b;
            a = b;
            b = r;
        }
        acc = a;
    }
    Ok(Value::Integer(acc))
}

fn isnan(args: Vec<Value>) -> Result<Value> {
    Ok(real(&args[0])?.is_nan().into())
}

fn isinf(args: Vec<Value>) -> Result<Value> {
    Ok(real(&args[0])?.is_infinite().into())
}

//
// Lists
//

fn list(args: Vec<Value>) -> Result<Value> {
    Ok(Value::list(args))
}

fn is_list(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_list().into())
}

fn is_null(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_null().into())
}

fn car(args: Vec<Value>) -> Result<Value> {
    match list_operand(&args[0], "car")?.first() {
        Some(first) => Ok(first.clone()),
        None => runtime_err!("car of empty list"),
    }
}

fn cdr(args: Vec<Value>) -> Result<Value> {
    match list_operand(&args[0], "cdr")?.split_first() {
        Some((_, rest)) => Ok(Value::list(rest.to_vec())),
        None => runtime_err!("cdr of empty list"),
    }
}

fn cons(args: Vec<Value>) -> Result<Value> {
    let tail = list_operand(&args[1], "cons")?;
    let mut list = Vec::with_capacity(tail.len() + 1);
    list.push(args[0].clone());
    list.extend_from_slice(tail);
    Ok(Value::list(list))
}

fn append(args: Vec<Value>) -> Result<Value> {
    let mut result = vec![];
    for arg in &args {
        result.extend_from_slice(list_operand(arg, "append")?);
    }
    Ok(Value::list(result))
}

fn length(args: Vec<Value>) -> Result<Value> {
    let len = match args[0] {
        Value::List(ref list) => list.len(),
        Value::String(ref s) => s.chars().count(),
        ref other => return runtime_err!("object {} has no length", represent(other)),
    };
    Ok(Value::Integer(len as i64))
}

// (map proc list...) stops at the shortest list
fn map(args: Vec<Value>) -> Result<Value> {
    let procedure = &args[0];
    let lists = args[1..]
        .iter()
        .map(|arg| list_operand(arg, "map"))
        .collect::<Result<Vec<_>>>()?;
    let len = lists.iter().map(|l| l.len()).min().unwrap_or(0);

    let mut result = Vec::with_capacity(len);
    for i in 0..len {
        let arguments = lists.iter().map(|l| l[i].clone()).collect();
        result.push(apply(procedure, arguments)?);
    }
    Ok(Value::list(result))
}

// (apply proc arg... list)
fn apply_procedure(mut args: Vec<Value>) -> Result<Value> {
    let procedure = args.remove(0);
    let spread = match args.pop() {
        Some(last) => list_operand(&last, "apply")?.to_vec(),
        None => vec![],
    };
    args.extend(spread);
    apply(&procedure, args)
}

//
// Predicates
//

fn is_eq(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_identical(&args[1]).into())
}

fn is_equal(args: Vec<Value>) -> Result<Value> {
    Ok((args[0] == args[1]).into())
}

fn not(args: Vec<Value>) -> Result<Value> {
    let truthy: bool = (&args[0]).into();
    Ok((!truthy).into())
}

fn is_boolean(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_boolean().into())
}

fn is_symbol(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_symbol().into())
}

fn is_string(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_string().into())
}

fn is_procedure(args: Vec<Value>) -> Result<Value> {
    Ok(args[0].is_procedure().into())
}

//
// Misc
//

fn begin(args: Vec<Value>) -> Result<Value> {
    Ok(args.into_iter().last().unwrap_or(Value::Unspecified))
}

thread_local! {
    // Set while a session collects what `display` writes
    static CAPTURED: RefCell<Option<String>> = RefCell::new(None);
}

/// Runs `f`, collecting the text `display` writes meanwhile instead of
/// sending it to stdout.
pub fn capture_display<T, F: FnOnce() -> T>(f: F) -> (T, String) {
    let previous = CAPTURED.with(|captured| captured.replace(Some(String::new())));
    let result = f();
    let written = CAPTURED.with(|captured| captured.replace(previous));
    (result, written.unwrap_or_default())
}

fn display_value(args: Vec<Value>) -> Result<Value> {
    let line = format!("{}\n", display(&args[0]));
    let captured = CAPTURED.with(|captured| match *captured.borrow_mut() {
        Some(ref mut buffer) => {
            buffer.push_str(&line);
            true
        }
        None => false,
    });
    if !captured {
        print!("{}", line);
    }
    Ok(Value::Unspecified)
}

fn exit(_: Vec<Value>) -> Result<Value> {
    Err(Error::Exit)
}
