/**
    Tokenizer

    Tokens are pulled lazily from an input port which keeps one line of
    text buffered, refilling it from its source when it runs dry. A
    token never spans lines, strings included.

    Every character that is not a delimiter (whitespace, parentheses,
    quote prefixes, double quotes or `;`) extends the current atom, so
    numbers and symbols come out as the same kind of token and are told
    apart by the reader.
*/
use super::port::{InPort, LineSource};
use crate::error::Result;

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

/// A lexeme
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Open,
    Close,
    Abbreviation(AbbreviationKind),
    /// A string literal, already unescaped
    String(String),
    /// Anything else: numbers, booleans, symbols
    Atom(String),
}

/// The quote-family prefixes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbbreviationKind {
    Quote,
    Quasiquote,
    Comma,
    CommaAt,
}

impl AbbreviationKind {
    /// The symbol the prefixed form is wrapped in.
    pub fn keyword(self) -> &'static str {
        match self {
            AbbreviationKind::Quote => "quote",
            AbbreviationKind::Quasiquote => "quasiquote",
            AbbreviationKind::Comma => "unquote",
            AbbreviationKind::CommaAt => "unquote-splicing",
        }
    }
}

/// The next token of `port`, or `None` at end of input.
pub fn next_token<S: LineSource>(port: &mut InPort<S>) -> Result<Option<Token>> {
    loop {
        while port.line.peek(0).map_or(false, char::is_whitespace) {
            port.line.advance(1);
        }

        if port.line.is_exhausted() {
            if port.refill()? {
                continue;
            }
            return Ok(None);
        }

        let stream = &mut port.line;

        match (stream.peek(0), stream.peek(1)) {
            (Some(';'), _) => {
                stream.clear();
            }
            (Some('('), _) => tok_ret!(Token::Open; advance stream; 1),
            (Some(')'), _) => tok_ret!(Token::Close; advance stream; 1),
            (Some('\''), _) => {
                tok_ret!(Token::Abbreviation(AbbreviationKind::Quote); advance stream; 1)
            }
            (Some('`'), _) => {
                tok_ret!(Token::Abbreviation(AbbreviationKind::Quasiquote); advance stream; 1)
            }
            (Some(','), Some('@')) => {
                tok_ret!(Token::Abbreviation(AbbreviationKind::CommaAt); advance stream; 2)
            }
            (Some(','), _) => {
                tok_ret!(Token::Abbreviation(AbbreviationKind::Comma); advance stream; 1)
            }
            (Some('"'), _) => {
                stream.advance(1);
                return read_string(stream).map(|s| Some(Token::String(s)));
            }
            _ => {
                let mut atom = String::new();
                while !is_delimiter!(stream.peek(0)) {
                    if let Some(c) = stream.next() {
                        atom.push(c);
                    }
                }
                return ok_some!(Token::Atom(atom));
            }
        }
    }
}

// Assumes the opening quote has been consumed
fn read_string(stream: &mut super::chars::Chars) -> Result<String> {
    let mut string_buf = String::new();

    loop {
        match stream.next() {
            Some('"') => return Ok(string_buf),
            Some('\\') => match stream.next() {
                Some('n') => string_buf.push('\n'),
                Some('t') => string_buf.push('\t'),
                Some(c) => string_buf.push(c),
                None => return syntax_err!("unterminated string"),
            },
            Some(c) => string_buf.push(c),
            None => return syntax_err!("unterminated string"),
        }
    }
}
