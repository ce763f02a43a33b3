//
// Macros
//
macro_rules! ok_some {
    ($x:expr) => (Ok(Some($x)))
}

macro_rules! syntax_err {
    ($($arg:tt)*) => (Err($crate::Error::Syntax(format!($($arg)*))))
}

macro_rules! runtime_err {
    ($($arg:tt)*) => (Err($crate::Error::Runtime(format!($($arg)*))))
}

macro_rules! definition_err {
    ($($arg:tt)*) => (Err($crate::Error::Definition(format!($($arg)*))))
}
