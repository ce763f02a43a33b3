use std::env::temp_dir;
use std::fs;
use std::path::PathBuf;

use super::{interpret, load, repl, run_file};
use crate::error::Error;
use crate::eval::{default_env, Value};
use crate::lexer::InPort;

fn session(code: &str) -> String {
    let mut out = vec![];
    repl(&mut InPort::from_text(code), &default_env(), &mut out, true).expect("session ran");
    String::from_utf8(out).expect("utf-8 output")
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = temp_dir().join(format!("lispy-{}-{}.scm", name, std::process::id()));
    fs::write(&path, contents).expect("scratch file written");
    path
}

#[test]
fn echoes_values() {
    assert_eq!(session("(+ 1 2)\n'(a \"b\")\n"), "3\n(a \"b\")\n");
}

#[test]
fn definitions_print_nothing() {
    assert_eq!(session("(define x 3)\nx\n"), "3\n");
}

#[test]
fn errors_do_not_end_the_session() {
    let out = session("(car '())\nz\n(+ 1 1)\n");
    assert_eq!(
        out,
        "RuntimeError: car of empty list\nUnboundVariableError: z is not defined\n2\n"
    );
}

#[test]
fn arity_diagnostic() {
    let out = session("(define (f a b) a)\n(f 1)\n");
    assert_eq!(out, "ArityError: f expected 2 argument(s), got 1\n");
}

#[test]
fn syntax_diagnostic() {
    assert_eq!(session(")\n1\n"), "SyntaxError: unexpected )\n1\n");
    assert_eq!(session("(1 2"), "SyntaxError: unexpected EOF in list\n");
}

#[test]
fn reading_resumes_after_a_syntax_error() {
    assert_eq!(session(") 1\n"), "SyntaxError: unexpected )\n1\n");
    assert_eq!(
        session(") (define x 5)\nx\n"),
        "SyntaxError: unexpected )\n5\n"
    );
}

#[test]
fn display_goes_to_the_session_output() {
    assert_eq!(
        session("(display \"hi\")\n(begin (display '(1 \"a\")) 2)\n"),
        "hi\n(1 \"a\")\n2\n"
    );
}

#[test]
fn display_before_an_error() {
    assert_eq!(
        session("(begin (display 1) (car '()))\n"),
        "1\nRuntimeError: car of empty list\n"
    );
}

#[test]
fn unspecified_inside_a_result() {
    assert_eq!(session("(list (if #f 1) 2)\n"), "(#<unspecified> 2)\n");
}

#[test]
fn forms_span_lines() {
    assert_eq!(session("(+ 1\n   2\n)\n"), "3\n");
}

#[test]
fn several_forms_per_line() {
    assert_eq!(session("1 2 3\n"), "1\n2\n3\n");
}

#[test]
fn exit_ends_the_session() {
    assert_eq!(session("1\n(exit)\n2\n"), "1\n");
}

#[test]
fn environment_outlives_a_session() {
    let env = default_env();
    let mut out = vec![];
    repl(&mut InPort::from_text("(define y 7)"), &env, &mut out, true).expect("session ran");
    assert_eq!(interpret("(* y 2)", &env), Ok(Value::Integer(14)));
}

#[test]
fn quiet_session_still_reports_errors() {
    let mut out = vec![];
    let code = "(define x 1)\nx\n(car x)\n";
    repl(&mut InPort::from_text(code), &default_env(), &mut out, false).expect("session ran");
    assert_eq!(
        String::from_utf8(out).expect("utf-8 output"),
        "RuntimeError: car expects a list, got 1\n"
    );
}

#[test]
fn interpret_stops_at_first_error() {
    let env = default_env();
    assert_eq!(
        interpret("(define a 1) (car '()) (define a 2)", &env),
        Err(Error::Runtime("car of empty list".to_owned()))
    );
    assert_eq!(interpret("a", &env), Ok(Value::Integer(1)));
}

#[test]
fn load_defines_quietly() {
    let path = scratch_file("load", "(define (sq x) (* x x))\n(sq 3)\n(display \"loaded\")\n");
    let env = default_env();
    let mut out = vec![];

    load(&path, &env, &mut out).expect("file loaded");
    fs::remove_file(&path).ok();

    assert_eq!(String::from_utf8(out).expect("utf-8 output"), "loaded\n");
    assert_eq!(interpret("(sq 5)", &env), Ok(Value::Integer(25)));
}

#[test]
fn run_file_echoes() {
    let path = scratch_file("run", "(define (sq x) (* x x))\n(sq 3)\n(sq 1.5)\n");
    let mut out = vec![];

    run_file(&path, &default_env(), &mut out).expect("file ran");
    fs::remove_file(&path).ok();

    assert_eq!(String::from_utf8(out).expect("utf-8 output"), "9\n2.25\n");
}

#[test]
fn missing_file() {
    let mut out = vec![];
    let result = load("/nonexistent/lispy/file.scm", &default_env(), &mut out);
    match result {
        Err(e @ Error::Io(_)) => assert_eq!(e.kind(), "IOError"),
        other => panic!("unexpected {:?}", other),
    }
}
