use crate::parsing::chars::is_space_or_tab;

/// A cursor for byte-by-byte inline scanning.
///
/// All syntax the inline parser looks for is ASCII, so stepping by bytes
/// only ever stops on character boundaries at the positions that matter.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + ahead).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().as_bytes().starts_with(pat)
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// The input between two byte indices.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.s.get(start..end).unwrap_or("")
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes `b` if it is next.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `pred` holds; returns how many.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.i;
        while self.peek().is_some_and(&pred) {
            self.i += 1;
        }
        self.i - start
    }

    /// Skips spaces and tabs, at most one line ending, then spaces and tabs
    /// again. Returns false if a second line ending follows.
    pub fn skip_spnl(&mut self) -> bool {
        self.eat_while(is_space_or_tab);
        if self.eat(b'\n') {
            self.eat_while(is_space_or_tab);
        }
        self.peek() != Some(b'\n')
    }

    /// Skips trailing spaces and tabs and a line ending (or end of input).
    /// Leaves the cursor untouched and returns false if anything else follows.
    pub fn skip_line_end(&mut self) -> bool {
        let save = self.i;
        self.eat_while(is_space_or_tab);
        if self.eof() || self.eat(b'\n') {
            true
        } else {
            self.i = save;
            false
        }
    }

    /// The character ending just before byte index `at`.
    pub fn char_before(&self, at: usize) -> Option<char> {
        self.s.get(..at)?.chars().next_back()
    }

    /// The character starting at byte index `at`.
    pub fn char_at(&self, at: usize) -> Option<char> {
        self.s.get(at..)?.chars().next()
    }
}
