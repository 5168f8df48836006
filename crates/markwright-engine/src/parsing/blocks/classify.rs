use crate::parsing::chars::is_space_or_tab;

/// Indentation (in columns) at which a line becomes indented code.
pub const CODE_INDENT: usize = 4;

const TAB_STOP: usize = 4;

/// Scanning state for the line currently being incorporated.
///
/// Offsets are byte positions into `text`; columns are virtual positions with
/// tabs expanded to the next multiple of four. A tab may be only partially
/// consumed when a container prefix needs fewer columns than the tab spans.
#[derive(Debug, Clone, Default)]
pub struct LineScan {
    pub text: String,
    pub offset: usize,
    pub column: usize,
    pub next_nonspace: usize,
    pub next_nonspace_column: usize,
    /// Columns of whitespace between `column` and `next_nonspace_column`.
    pub indent: usize,
    pub indented: bool,
    pub blank: bool,
    pub partially_consumed_tab: bool,
}

impl LineScan {
    /// Starts scanning a fresh line.
    pub fn reset(&mut self, text: String) {
        self.text = text;
        self.offset = 0;
        self.column = 0;
        self.next_nonspace = 0;
        self.next_nonspace_column = 0;
        self.indent = 0;
        self.indented = false;
        self.blank = false;
        self.partially_consumed_tab = false;
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Locates the next non-whitespace byte at or after `offset` and derives
    /// the indentation facts from it.
    pub fn find_next_nonspace(&mut self) {
        let bytes = self.text.as_bytes();
        let mut i = self.offset;
        let mut cols = self.column;
        while let Some(&b) = bytes.get(i) {
            match b {
                b' ' => cols += 1,
                b'\t' => cols += TAB_STOP - cols % TAB_STOP,
                _ => break,
            }
            i += 1;
        }
        self.blank = i >= bytes.len();
        self.next_nonspace = i;
        self.next_nonspace_column = cols;
        self.indent = cols - self.column;
        self.indented = self.indent >= CODE_INDENT;
    }

    pub fn advance_next_nonspace(&mut self) {
        self.offset = self.next_nonspace;
        self.column = self.next_nonspace_column;
        self.partially_consumed_tab = false;
    }

    /// Advances by `count` characters, or by `count` columns when `columns`
    /// is set (splitting a tab if needed).
    pub fn advance_offset(&mut self, mut count: usize, columns: bool) {
        let bytes = self.text.as_bytes();
        while count > 0 {
            let Some(&b) = bytes.get(self.offset) else {
                break;
            };
            if b == b'\t' {
                let chars_to_tab = TAB_STOP - self.column % TAB_STOP;
                if columns {
                    self.partially_consumed_tab = chars_to_tab > count;
                    let advance = chars_to_tab.min(count);
                    self.column += advance;
                    if !self.partially_consumed_tab {
                        self.offset += 1;
                    }
                    count -= advance;
                } else {
                    self.partially_consumed_tab = false;
                    self.column += chars_to_tab;
                    self.offset += 1;
                    count -= 1;
                }
            } else {
                self.partially_consumed_tab = false;
                let width = self.text[self.offset..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.offset += width;
                // Columns only matter within indentation, so any
                // non-tab character counts as one.
                self.column += 1;
                count -= 1;
            }
        }
    }

    /// Skips to the end of the line.
    pub fn advance_to_end(&mut self) {
        self.offset = self.text.len();
        self.partially_consumed_tab = false;
    }

    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.offset).copied()
    }

    pub fn peek_nonspace(&self) -> Option<u8> {
        self.text.as_bytes().get(self.next_nonspace).copied()
    }

    pub fn rest(&self) -> &str {
        self.text.get(self.offset..).unwrap_or("")
    }

    /// The line from its first non-whitespace character on.
    pub fn rest_from_nonspace(&self) -> &str {
        self.text.get(self.next_nonspace..).unwrap_or("")
    }

    /// Consumes one optional space or tab (as one column) after a marker.
    pub fn skip_optional_space(&mut self) {
        if self.peek().is_some_and(is_space_or_tab) {
            self.advance_offset(1, true);
        }
    }
}
