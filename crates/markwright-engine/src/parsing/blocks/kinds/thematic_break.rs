use crate::parsing::chars::is_space_or_tab;

pub struct ThematicBreak;

impl ThematicBreak {
    pub const MIN_MARKERS: usize = 3;

    /// Three or more matching `*`, `-` or `_`, optionally separated by
    /// spaces or tabs, and nothing else.
    pub fn matches(s: &str) -> bool {
        let Some(&marker) = s.as_bytes().first() else {
            return false;
        };
        if !matches!(marker, b'*' | b'-' | b'_') {
            return false;
        }
        let mut count = 0;
        for b in s.bytes() {
            if b == marker {
                count += 1;
            } else if !is_space_or_tab(b) {
                return false;
            }
        }
        count >= Self::MIN_MARKERS
    }
}
