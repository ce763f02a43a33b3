use super::*;
use crate::error::Error;
use crate::lexer::port::InPort;
use crate::lexer::Tokens;
use fallible_iterator::FallibleIterator;

fn atom(s: &str) -> Token {
    Token::Atom(s.to_string())
}

fn assert_next(code: &str, token: Token) {
    let result = next_token(&mut InPort::from_text(code))
        .expect("valid token")
        .expect("non-empty");
    assert_eq!(result, token);
}

fn assert_tokens(code: &str, tokens: Vec<Token>) {
    let mut port = InPort::from_text(code);
    let result: Vec<Token> = Tokens::new(&mut port).collect().expect("valid tokens");
    assert_eq!(result, tokens);
}

#[test]
fn whitespace_test() {
    assert_next(" (", Token::Open);
    assert_next("\n\t (", Token::Open);
}

#[test]
fn clopen_test() {
    assert_next("(asdd", Token::Open);
    assert_next(")#12", Token::Close);
}

#[test]
fn empty_test() {
    assert_tokens("", vec![]);
    assert_tokens("   \n\n  ", vec![]);
}

#[test]
fn comment_test() {
    assert_tokens("; nothing here", vec![]);
    assert_tokens("a ; (b c)\nd", vec![atom("a"), atom("d")]);
    assert_tokens("x;y", vec![atom("x")]);
}

#[test]
fn abbreviations_test() {
    assert_next("'a", Token::Abbreviation(AbbreviationKind::Quote));
    assert_next("`a", Token::Abbreviation(AbbreviationKind::Quasiquote));
    assert_next(",a", Token::Abbreviation(AbbreviationKind::Comma));
    assert_next(",@a", Token::Abbreviation(AbbreviationKind::CommaAt));
}

#[test]
fn strings_test() {
    assert_next("\"asdf\"", Token::String("asdf".to_string()));
    assert_next("\"foo\\\"#bar\"", Token::String("foo\"#bar".to_string()));
    assert_next("\"foo bar\"", Token::String("foo bar".to_string()));
    assert_next("\"a\\\\b\"", Token::String("a\\b".to_string()));
    assert_next("\"a\\nb\"", Token::String("a\nb".to_string()));
    assert_next("\"(; not a comment)\"", Token::String("(; not a comment)".to_string()));
}

#[test]
fn unterminated_string_test() {
    match next_token(&mut InPort::from_text("\"foo\nbar\"")) {
        Err(Error::Syntax(_)) => {}
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn atoms_test() {
    assert_next("42)", atom("42"));
    assert_next("-1.5e3 x", atom("-1.5e3"));
    assert_next("1+2i", atom("1+2i"));
    assert_next("set!", atom("set!"));
    assert_next("#t)", atom("#t"));
    assert_next("a'b", atom("a"));
}

#[test]
fn list_test() {
    assert_tokens(
        "(define (f x) (+ x 1))",
        vec![
            Token::Open,
            atom("define"),
            Token::Open,
            atom("f"),
            atom("x"),
            Token::Close,
            Token::Open,
            atom("+"),
            atom("x"),
            atom("1"),
            Token::Close,
            Token::Close,
        ],
    );
}

#[test]
fn multiline_test() {
    assert_tokens(
        "(list\n  \"a\"\n  'b)",
        vec![
            Token::Open,
            atom("list"),
            Token::String("a".to_string()),
            Token::Abbreviation(AbbreviationKind::Quote),
            atom("b"),
            Token::Close,
        ],
    );
}
