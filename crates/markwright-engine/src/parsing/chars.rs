//! Character classification shared by the block and inline parsers.

/// ASCII punctuation characters that a backslash may escape.
pub fn is_escapable(b: u8) -> bool {
    b.is_ascii_punctuation()
}

pub fn is_ascii_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

pub fn is_space_or_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Whitespace as used by flanking rules: Unicode whitespace, plus the start
/// and end of the subject which callers represent as `'\n'`.
pub fn is_unicode_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// ASCII punctuation, or any non-ASCII character that is neither
/// alphanumeric, whitespace nor a control character.
pub fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_punctuation()
    } else {
        !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control()
    }
}

/// Whitespace allowed in link labels and between link parts.
pub fn is_line_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
