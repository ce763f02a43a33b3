//! Rendering values back into text
use std::fmt;

use crate::eval::Value;
use crate::number::format_float;

/// The readable form of `value`: `#t`, `42`, `"hi"`, `(1 (2 3))`...
///
/// Strings are wrapped in double quotes as they are, so a string holding
/// a `"` does not read back as the same string. The unspecified value is
/// empty on its own and `#<unspecified>` inside a list.
pub fn represent(value: &Value) -> String {
    match *value {
        Value::Unspecified => String::new(),
        Value::Boolean(b) => if b { "#t" } else { "#f" }.to_owned(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => format_float(f),
        Value::Complex(c) => c.to_string(),
        Value::String(ref s) => format!("\"{}\"", s),
        Value::Symbol(ref s) => s.to_string(),
        Value::List(ref list) => {
            let items: Vec<String> = list.iter().map(represent_item).collect();
            format!("({})", items.join(" "))
        }
        Value::Primitive(ref primitive) => format!("#<primitive: {}>", primitive.name),
        Value::Closure(ref closure) => format!("#<procedure: {}>", closure.name),
    }
}

fn represent_item(value: &Value) -> String {
    match *value {
        Value::Unspecified => "#<unspecified>".to_owned(),
        ref other => represent(other),
    }
}

/// Like `represent`, but a top-level string is written without quotes.
pub fn display(value: &Value) -> String {
    match *value {
        Value::String(ref s) => s.clone(),
        ref other => represent(other),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&represent(self))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::number::Complex;

    #[test]
    fn atoms() {
        assert_eq!(represent(&Value::Boolean(true)), "#t");
        assert_eq!(represent(&Value::Boolean(false)), "#f");
        assert_eq!(represent(&Value::Integer(-42)), "-42");
        assert_eq!(represent(&Value::Float(2.0)), "2.0");
        assert_eq!(represent(&Value::Float(3.5)), "3.5");
        assert_eq!(represent(&Value::string("hi")), "\"hi\"");
        assert_eq!(represent(&Value::symbol("foo")), "foo");
        assert_eq!(represent(&Value::Unspecified), "");
    }

    #[test]
    fn complex() {
        assert_eq!(represent(&Value::Complex(Complex::new(1.0, 2.0))), "(1+2i)");
        assert_eq!(represent(&Value::Complex(Complex::new(0.0, 3.0))), "3i");
    }

    #[test]
    fn lists() {
        let nested = Value::list(vec![
            Value::Integer(1),
            Value::list(vec![Value::symbol("a"), Value::string("b")]),
            Value::list(vec![]),
        ]);
        assert_eq!(represent(&nested), "(1 (a \"b\") ())");
    }

    #[test]
    fn unspecified_inside_a_list() {
        let list = Value::list(vec![Value::Unspecified, Value::Integer(2)]);
        assert_eq!(represent(&list), "(#<unspecified> 2)");
        assert_eq!(represent(&Value::list(vec![list])), "((#<unspecified> 2))");
    }

    #[test]
    fn no_reescaping() {
        assert_eq!(represent(&Value::string("say \"hi\"")), "\"say \"hi\"\"");
        assert_eq!(display(&Value::string("say \"hi\"")), "say \"hi\"");
    }

    #[test]
    fn display_nested_strings_keep_quotes() {
        let list = Value::list(vec![Value::string("a")]);
        assert_eq!(display(&list), "(\"a\")");
        assert_eq!(list.to_string(), "(\"a\")");
    }
}
