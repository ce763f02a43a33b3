//! Numbers: literal parsing, arithmetic with promotion and printing
use gc::{Finalize, Trace};
use std::cmp::Ordering;
use std::fmt;

use crate::error::Result;

/// A complex number with `f64` components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Complex {
        Complex { re, im }
    }

    pub fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }
}

impl Finalize for Complex {}
unsafe impl Trace for Complex {
    unsafe_empty_trace!();
}

/// The numeric slice of the value model, used by the primitives.
///
/// Binary operations promote integer → float → complex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Complex(Complex),
}

impl Number {
    fn to_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Float(f) => f,
            Number::Complex(c) => c.re,
        }
    }

    fn to_complex(self) -> Complex {
        match self {
            Number::Complex(c) => c,
            n => Complex::new(n.to_f64(), 0.0),
        }
    }

    fn rank(self) -> u8 {
        match self {
            Number::Integer(_) => 0,
            Number::Float(_) => 1,
            Number::Complex(_) => 2,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Integer(n) => n == 0,
            Number::Float(f) => f == 0.0,
            Number::Complex(c) => c.re == 0.0 && c.im == 0.0,
        }
    }

    pub fn add(self, other: Number) -> Result<Number> {
        match promote(self, other) {
            (Number::Integer(a), Number::Integer(b)) => checked(a.checked_add(b)),
            (Number::Float(a), Number::Float(b)) => Ok(Number::Float(a + b)),
            (a, b) => {
                let (a, b) = (a.to_complex(), b.to_complex());
                Ok(Number::Complex(Complex::new(a.re + b.re, a.im + b.im)))
            }
        }
    }

    pub fn sub(self, other: Number) -> Result<Number> {
        match promote(self, other) {
            (Number::Integer(a), Number::Integer(b)) => checked(a.checked_sub(b)),
            (Number::Float(a), Number::Float(b)) => Ok(Number::Float(a - b)),
            (a, b) => {
                let (a, b) = (a.to_complex(), b.to_complex());
                Ok(Number::Complex(Complex::new(a.re - b.re, a.im - b.im)))
            }
        }
    }

    pub fn mul(self, other: Number) -> Result<Number> {
        match promote(self, other) {
            (Number::Integer(a), Number::Integer(b)) => checked(a.checked_mul(b)),
            (Number::Float(a), Number::Float(b)) => Ok(Number::Float(a * b)),
            (a, b) => {
                let (a, b) = (a.to_complex(), b.to_complex());
                Ok(Number::Complex(Complex::new(
                    a.re * b.re - a.im * b.im,
                    a.re * b.im + a.im * b.re,
                )))
            }
        }
    }

    /// True division: never yields an integer.
    pub fn div(self, other: Number) -> Result<Number> {
        if other.is_zero() {
            return runtime_err!("division by zero");
        }
        match promote(self, other) {
            (Number::Complex(_), _) | (_, Number::Complex(_)) => {
                let (a, b) = (self.to_complex(), other.to_complex());
                let denom = b.re * b.re + b.im * b.im;
                Ok(Number::Complex(Complex::new(
                    (a.re * b.re + a.im * b.im) / denom,
                    (a.im * b.re - a.re * b.im) / denom,
                )))
            }
            (a, b) => Ok(Number::Float(a.to_f64() / b.to_f64())),
        }
    }

    /// Modulo with the sign of the divisor.
    pub fn rem(self, other: Number) -> Result<Number> {
        if other.is_zero() {
            return runtime_err!("modulo by zero");
        }
        match promote(self, other) {
            (Number::Integer(a), Number::Integer(b)) => {
                let r = a.wrapping_rem(b);
                if r != 0 && ((r < 0) != (b < 0)) {
                    Ok(Number::Integer(r + b))
                } else {
                    Ok(Number::Integer(r))
                }
            }
            (Number::Float(a), Number::Float(b)) => {
                let r = a % b;
                if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                    Ok(Number::Float(r + b))
                } else {
                    Ok(Number::Float(r))
                }
            }
            _ => runtime_err!("can't take modulo of complex number"),
        }
    }

    pub fn neg(self) -> Result<Number> {
        Number::Integer(0).sub(self)
    }

    /// Ordering of real numbers, `None` when a nan is involved. Complex
    /// operands are an error.
    pub fn compare(self, other: Number) -> Result<Option<Ordering>> {
        match promote(self, other) {
            (Number::Integer(a), Number::Integer(b)) => Ok(Some(a.cmp(&b))),
            (Number::Float(a), Number::Float(b)) => Ok(a.partial_cmp(&b)),
            _ => runtime_err!("no ordering relation is defined for complex numbers"),
        }
    }

    pub fn num_eq(self, other: Number) -> bool {
        match promote(self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (a, b) => a.to_complex() == b.to_complex(),
        }
    }
}

fn promote(a: Number, b: Number) -> (Number, Number) {
    let rank = a.rank().max(b.rank());
    (lift(a, rank), lift(b, rank))
}

fn lift(n: Number, rank: u8) -> Number {
    match (n, rank) {
        (n, r) if n.rank() == r => n,
        (n, 1) => Number::Float(n.to_f64()),
        (n, _) => Number::Complex(n.to_complex()),
    }
}

fn checked(n: Option<i64>) -> Result<Number> {
    match n {
        Some(n) => Ok(Number::Integer(n)),
        None => runtime_err!("integer overflow"),
    }
}

//
// Literal parsing
//

fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

fn is_decimal(text: &str) -> bool {
    let body = text.trim_start_matches(|c| c == '+' || c == '-');
    body.len() + 1 >= text.len()
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-')
}

pub fn parse_integer(text: &str) -> Option<i64> {
    if !has_digit(text) {
        return None;
    }
    text.parse().ok()
}

pub fn parse_float(text: &str) -> Option<f64> {
    if !has_digit(text) || !is_decimal(text) {
        return None;
    }
    text.parse().ok()
}

/// `N/D`, both plain digit runs. `Some(Err)` for a zero denominator.
pub fn parse_fraction(text: &str) -> Option<Result<f64>> {
    let mut parts = text.splitn(2, '/');
    let (num, den) = (parts.next()?, parts.next()?);
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !digits(num) || !digits(den) {
        return None;
    }
    let (num, den): (f64, f64) = (num.parse().ok()?, den.parse().ok()?);
    if den == 0.0 {
        return Some(syntax_err!("zero denominator in {}", text));
    }
    Some(Ok(num / den))
}

/// `<imag>i` or `<real>(+|-)<imag>i`
pub fn parse_complex(text: &str) -> Option<Complex> {
    if !has_digit(text) || !text.ends_with('i') {
        return None;
    }
    let body = &text[..text.len() - 1];

    // the imaginary part starts at the last sign that isn't leading and
    // isn't an exponent sign
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| (bytes[i] == b'+' || bytes[i] == b'-') && bytes[i - 1] != b'e' && bytes[i - 1] != b'E');

    let (re, im) = match split {
        Some(i) => (parse_component(&body[..i])?, &body[i..]),
        None => (0.0, body),
    };

    let im = match im {
        "" | "+" => 1.0,
        "-" => -1.0,
        im => parse_component(im)?,
    };

    Some(Complex::new(re, im))
}

fn parse_component(text: &str) -> Option<f64> {
    parse_integer(text)
        .map(|n| n as f64)
        .or_else(|| parse_float(text))
}

//
// Printing
//

/// Shortest representation that still reads back as a float:
/// `1.0`, `0.5`, `1e+20`, `1.5e-05`, `inf`, `nan`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_owned();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let magnitude = f.abs();
    if magnitude != 0.0 && (magnitude >= 1e16 || magnitude < 1e-4) {
        return format_exponent(f);
    }

    let text = format!("{}", f);
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

fn format_exponent(f: f64) -> String {
    let text = format!("{:e}", f);
    let (mantissa, exponent) = match text.find('e') {
        Some(i) => (&text[..i], &text[i + 1..]),
        None => return text,
    };
    let (sign, digits) = if exponent.starts_with('-') {
        ('-', &exponent[1..])
    } else {
        ('+', exponent)
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

fn format_component(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{}", f as i64)
    } else {
        format_float(f)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let im = format_component(self.im.abs());
        let sign = if self.im.is_sign_negative() { "-" } else { "+" };

        if self.re == 0.0 && self.re.is_sign_positive() {
            if sign == "-" {
                write!(f, "-{}i", im)
            } else {
                write!(f, "{}i", im)
            }
        } else {
            write!(f, "({}{}{}i)", format_component(self.re), sign, im)
        }
    }
}
