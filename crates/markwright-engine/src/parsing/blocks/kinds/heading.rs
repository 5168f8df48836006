use crate::parsing::chars::is_space_or_tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingData {
    /// 1 to 6.
    pub level: u8,
    /// Underlined with `=` or `-` rather than opened with `#`.
    pub setext: bool,
}

/// An ATX heading opener: level and the number of bytes of marker (plus
/// following whitespace) to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtxOpen {
    pub level: u8,
    pub marker_len: usize,
}

pub struct Heading;

impl Heading {
    pub const ATX_CHAR: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    pub fn atx_open(s: &str) -> Option<AtxOpen> {
        let bytes = s.as_bytes();
        let hashes = bytes.iter().take_while(|&&b| b == Self::ATX_CHAR).count();
        if hashes == 0 || hashes > Self::MAX_LEVEL {
            return None;
        }
        let spaces = bytes[hashes..]
            .iter()
            .take_while(|&&b| is_space_or_tab(b))
            .count();
        if spaces == 0 && hashes < bytes.len() {
            return None;
        }
        Some(AtxOpen {
            level: hashes as u8,
            marker_len: hashes + spaces,
        })
    }

    /// Removes an optional closing `#` sequence from ATX heading content.
    pub fn strip_closing_sequence(content: &str) -> &str {
        let trimmed = content.trim_matches(|c| c == ' ' || c == '\t');
        if trimmed.bytes().all(|b| b == Self::ATX_CHAR) {
            return "";
        }
        let end_trimmed = content.trim_end_matches([' ', '\t']);
        let without_hashes = end_trimmed.trim_end_matches('#');
        if without_hashes.len() < end_trimmed.len()
            && without_hashes.ends_with([' ', '\t'])
        {
            without_hashes.trim_end_matches([' ', '\t'])
        } else {
            content
        }
    }

    /// Level of a setext underline (`=` is 1, `-` is 2).
    pub fn setext_level(s: &str) -> Option<u8> {
        let level = match s.as_bytes().first()? {
            b'=' => 1,
            b'-' => 2,
            _ => return None,
        };
        let c = s.as_bytes()[0];
        let run = s.bytes().take_while(|&b| b == c).count();
        s.as_bytes()[run..]
            .iter()
            .all(|&b| is_space_or_tab(b))
            .then_some(level)
    }
}
