use std::collections::HashMap;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: no other inline parsing occurs inside them, and
/// they bind tighter than emphasis or links.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Normalizes raw span content: line endings become spaces, and one
    /// space is stripped from each end when both ends have one and the
    /// content is not all spaces.
    pub fn normalize(raw: &str) -> String {
        let content = raw.replace('\n', " ");
        let bytes = content.as_bytes();
        if bytes.len() >= 2
            && bytes[0] == b' '
            && bytes[bytes.len() - 1] == b' '
            && bytes.iter().any(|&b| b != b' ')
        {
            content[1..content.len() - 1].to_owned()
        } else {
            content
        }
    }
}

/// Remembers where backtick runs were seen so that a long line of unmatched
/// openers is scanned only once.
#[derive(Debug, Default)]
pub struct BacktickIndex {
    /// Start of the last run seen for each length.
    last_run: HashMap<usize, usize>,
    /// The whole subject has been scanned without finding a closer.
    exhausted: bool,
}

impl BacktickIndex {
    /// Finds the closing run of exactly `len` backticks at or after `from`.
    /// Returns the byte range of the closer.
    pub fn find_closer(&mut self, subject: &str, from: usize, len: usize) -> Option<(usize, usize)> {
        if self.exhausted && self.last_run.get(&len).is_none_or(|&at| at < from) {
            return None;
        }
        let bytes = subject.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            if bytes[i] != CodeSpan::TICK {
                i += 1;
                continue;
            }
            let start = i;
            while i < bytes.len() && bytes[i] == CodeSpan::TICK {
                i += 1;
            }
            self.last_run.insert(i - start, start);
            if i - start == len {
                return Some((start, i));
            }
        }
        self.exhausted = true;
        None
    }
}
