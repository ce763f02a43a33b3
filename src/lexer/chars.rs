/// The line currently being tokenized
#[derive(Debug, Default)]
pub struct Chars {
    vec: Vec<char>,
    index: usize,
}

impl Iterator for Chars {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let r = self.peek(0);
        if r.is_some() {
            self.index += 1;
        }
        r
    }
}

impl Chars {
    pub fn peek(&self, i: usize) -> Option<char> {
        self.vec.get(self.index + i).cloned()
    }

    pub fn advance(&mut self, n: usize) {
        self.index = (self.index + n).min(self.vec.len());
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.vec.len()
    }

    /// Drops whatever is left of the line.
    pub fn clear(&mut self) {
        self.index = self.vec.len();
    }

    /// The unread part of the line.
    pub fn rest(&self) -> String {
        self.vec[self.index..].iter().collect()
    }

    pub fn from_str(s: &str) -> Chars {
        Chars {
            vec: s.chars().collect(),
            index: 0,
        }
    }
}

macro_rules! is_delimiter {
    ($x:expr) => (
        match $x {
            None => true,
            Some(y) => y.is_whitespace()
                || y == '(' || y == ')' || y == '\'' || y == '"'
                || y == '`' || y == ',' || y == ';',
        }
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn peek_and_advance() {
        let mut chars = Chars::from_str("(ab");
        assert_eq!(chars.peek(0), Some('('));
        assert_eq!(chars.peek(2), Some('b'));
        chars.advance(1);
        assert_eq!(chars.next(), Some('a'));
        assert_eq!(chars.rest(), "b");
        chars.advance(10);
        assert!(chars.is_exhausted());
        assert_eq!(chars.next(), None);
    }

    #[test]
    fn delimiters() {
        assert!(is_delimiter!(None));
        assert!(is_delimiter!(Some(' ')));
        assert!(is_delimiter!(Some(';')));
        assert!(is_delimiter!(Some(',')));
        assert!(!is_delimiter!(Some('a')));
        assert!(!is_delimiter!(Some('#')));
    }
}
