pub const IF: &'static str = "if";
pub const ELSE: &'static str = "else";
pub const SET_BANG: &'static str = "set!";
pub const COND: &'static str = "cond";
pub const QUOTE: &'static str = "quote";
pub const DEFINE: &'static str = "define";
pub const LAMBDA: &'static str = "lambda";
pub const UNQUOTE: &'static str = "unquote";
pub const QUASIQUOTE: &'static str = "quasiquote";
pub const DEFINE_MACRO: &'static str = "define-macro";
pub const UNQUOTE_SPLICING: &'static str = "unquote-splicing";
