use crate::error::Result;
use crate::eval::Value;
use crate::lexer::{next_token, InPort, LineSource, Token};
use crate::number::{parse_complex, parse_float, parse_fraction, parse_integer};
use crate::symbol::make_symbol;

/// Reads one complete form from `port`; `None` at end of input.
pub fn parse_datum<S: LineSource>(port: &mut InPort<S>) -> Result<Option<Value>> {
    match next_token(port)? {
        None => Ok(None),
        Some(token) => read_ahead(token, port).map(Some),
    }
}

fn read_ahead<S: LineSource>(token: Token, port: &mut InPort<S>) -> Result<Value> {
    match token {
        Token::Open => parse_list_datum(port),
        Token::Close => syntax_err!("unexpected )"),
        Token::Abbreviation(kind) => match parse_datum(port)? {
            Some(datum) => Ok(Value::list(vec![
                Value::Symbol(make_symbol(kind.keyword())),
                datum,
            ])),
            None => syntax_err!("unexpected EOF after {}", kind.keyword()),
        },
        Token::String(s) => Ok(Value::String(s)),
        Token::Atom(text) => atom(&text),
    }
}

// Assumes the opening parenthesis has been consumed
fn parse_list_datum<S: LineSource>(port: &mut InPort<S>) -> Result<Value> {
    let mut datums = vec![];

    loop {
        match next_token(port)? {
            Some(Token::Close) => return Ok(Value::list(datums)),
            Some(token) => datums.push(read_ahead(token, port)?),
            None => return syntax_err!("unexpected EOF in list"),
        }
    }
}

/// Turns the text of a non-string token into a boolean, number or symbol.
pub fn atom(text: &str) -> Result<Value> {
    match text {
        "#t" => return Ok(Value::Boolean(true)),
        "#f" => return Ok(Value::Boolean(false)),
        _ => {}
    }

    if let Some(fraction) = parse_fraction(text) {
        return fraction.map(Value::Float);
    }
    if let Some(n) = parse_integer(text) {
        return Ok(Value::Integer(n));
    }
    if let Some(f) = parse_float(text) {
        return Ok(Value::Float(f));
    }
    if let Some(c) = parse_complex(text) {
        return Ok(Value::Complex(c));
    }

    Ok(Value::Symbol(make_symbol(text)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::number::Complex;

    fn read(code: &str) -> Result<Option<Value>> {
        parse_datum(&mut InPort::from_text(code))
    }

    fn sym(s: &str) -> Value {
        Value::symbol(s)
    }

    #[test]
    fn boolean_datum_test() {
        assert_eq!(read("#f"), ok_some!(Value::Boolean(false)));
        assert_eq!(read("#t"), ok_some!(Value::Boolean(true)));
    }

    #[test]
    fn number_datum_test() {
        assert_eq!(read("42"), ok_some!(Value::Integer(42)));
        assert_eq!(read("-3.5"), ok_some!(Value::Float(-3.5)));
        assert_eq!(read("1/4"), ok_some!(Value::Float(0.25)));
        assert_eq!(read("1+2i"), ok_some!(Value::Complex(Complex::new(1.0, 2.0))));
        assert_eq!(
            read("99999999999999999999"),
            ok_some!(Value::Float(1e20))
        );
    }

    #[test]
    fn symbol_datum_test() {
        match read("set!") {
            Ok(Some(Value::Symbol(s))) => assert_eq!(s, make_symbol("set!")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(read("i").unwrap().unwrap().is_symbol());
        assert!(read("nan").unwrap().unwrap().is_symbol());
        assert!(read("-").unwrap().unwrap().is_symbol());
    }

    #[test]
    fn string_datum_test() {
        assert_eq!(read("\"hi there\""), ok_some!(Value::string("hi there")));
    }

    #[test]
    fn list_test() {
        let expected = Value::list(vec![sym("+"), Value::Integer(1), Value::list(vec![])]);
        assert_eq!(read("(+ 1 ())"), ok_some!(expected));
    }

    #[test]
    fn multiline_list_test() {
        let expected = Value::list(vec![sym("f"), Value::Integer(1), Value::Integer(2)]);
        assert_eq!(read("(f 1 ; one\n 2)"), ok_some!(expected));
    }

    #[test]
    fn abbreviation_test() {
        let expected = Value::list(vec![
            sym("quote"),
            Value::list(vec![sym("foo"), sym("bar")]),
        ]);
        assert_eq!(read("'(foo bar)"), ok_some!(expected));

        let expected = Value::list(vec![sym("unquote-splicing"), sym("x")]);
        assert_eq!(read(",@x"), ok_some!(expected));
    }

    #[test]
    fn empty_input_test() {
        assert_eq!(read(""), Ok(None));
        assert_eq!(read("  ; just a comment\n"), Ok(None));
    }

    #[test]
    fn unexpected_close_test() {
        assert_eq!(read(")"), Err(Error::Syntax("unexpected )".to_owned())));
    }

    #[test]
    fn incomplete_list_test() {
        assert_eq!(
            read("(foo (bar"),
            Err(Error::Syntax("unexpected EOF in list".to_owned()))
        );
    }

    #[test]
    fn incomplete_abbreviation_test() {
        assert!(read("'").is_err());
        assert!(read("'(").is_err());
    }

    #[test]
    fn one_form_at_a_time() {
        let mut port = InPort::from_text("1 (2)\n3");
        assert_eq!(parse_datum(&mut port), ok_some!(Value::Integer(1)));
        assert_eq!(
            parse_datum(&mut port),
            ok_some!(Value::list(vec![Value::Integer(2)]))
        );
        assert_eq!(parse_datum(&mut port), ok_some!(Value::Integer(3)));
        assert_eq!(parse_datum(&mut port), Ok(None));
    }
}
