use std::collections::VecDeque;
use std::io::{self, BufRead};

/// A logical source line with its line ending removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
}

/// Splits a byte stream into logical lines.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line. NUL characters are
/// replaced with U+FFFD. A final line without a terminator is still yielded;
/// an empty stream yields nothing.
pub struct LineReader<R> {
    inner: R,
    pending: VecDeque<String>,
    buf: Vec<u8>,
    number: usize,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: VecDeque::new(),
            buf: Vec::new(),
            number: 0,
            done: false,
        }
    }

    /// Reads the next logical line, or `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<Line>> {
        while self.pending.is_empty() {
            if self.done {
                return Ok(None);
            }
            self.fill()?;
        }
        Ok(self.pending.pop_front().map(|text| {
            self.number += 1;
            Line {
                number: self.number,
                text,
            }
        }))
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.number
    }

    fn fill(&mut self) -> io::Result<()> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            self.done = true;
            return Ok(());
        }
        let mut raw = self.buf.as_slice();
        if let Some(stripped) = raw.strip_suffix(b"\n") {
            raw = stripped;
        }
        if let Some(stripped) = raw.strip_suffix(b"\r") {
            raw = stripped;
        }
        let text = String::from_utf8_lossy(raw);
        // Any carriage return left is a bare line ending of its own.
        for part in text.split('\r') {
            self.pending.push_back(normalize_nul(part));
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

fn normalize_nul(s: &str) -> String {
    if s.contains('\0') {
        s.replace('\0', "\u{FFFD}")
    } else {
        s.to_owned()
    }
}
