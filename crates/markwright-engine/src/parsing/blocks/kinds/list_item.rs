use crate::parsing::blocks::classify::{CODE_INDENT, LineScan};
use crate::parsing::chars::is_space_or_tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    /// Bullet character: `-`, `+` or `*`.
    Bullet(u8),
    /// Start number and delimiter (`.` or `)`).
    Ordered { start: u32, delimiter: u8 },
}

/// Marker metadata shared by a list and its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListData {
    pub list_type: ListType,
    /// Meaningful on lists only; computed on finalization.
    pub tight: bool,
    /// Columns of indentation before the marker.
    pub marker_offset: usize,
    /// Columns from the marker start to the item content.
    pub padding: usize,
}

impl ListData {
    /// Items belong to the same list when their marker type and bullet or
    /// delimiter character agree.
    pub fn same_list(&self, other: &ListData) -> bool {
        match (self.list_type, other.list_type) {
            (ListType::Bullet(a), ListType::Bullet(b)) => a == b,
            (ListType::Ordered { delimiter: a, .. }, ListType::Ordered { delimiter: b, .. }) => {
                a == b
            }
            _ => false,
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self.list_type, ListType::Ordered { .. })
    }

    pub fn start(&self) -> Option<u32> {
        match self.list_type {
            ListType::Ordered { start, .. } => Some(start),
            ListType::Bullet(_) => None,
        }
    }
}

pub struct ListItem;

impl ListItem {
    pub const MAX_ORDINAL_DIGITS: usize = 9;
    /// More columns than this after the marker make the content indented
    /// code, so the padding falls back to one space.
    const MAX_MARKER_GAP: usize = 4;

    /// Parses a list marker at the line's next non-whitespace position and,
    /// on success, consumes the marker and its padding.
    ///
    /// When the item would interrupt a paragraph it must not start blank,
    /// and an ordered item must start at 1.
    pub fn parse_marker(line: &mut LineScan, interrupts_paragraph: bool) -> Option<ListData> {
        if line.indent >= CODE_INDENT {
            return None;
        }
        let marker_offset = line.indent;
        let rest = line.rest_from_nonspace().as_bytes();
        let (list_type, marker_len) = match *rest.first()? {
            b @ (b'*' | b'+' | b'-') => (ListType::Bullet(b), 1),
            b'0'..=b'9' => {
                let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
                if digits > Self::MAX_ORDINAL_DIGITS {
                    return None;
                }
                let delimiter = *rest.get(digits)?;
                if delimiter != b'.' && delimiter != b')' {
                    return None;
                }
                let start = std::str::from_utf8(&rest[..digits])
                    .ok()?
                    .parse::<u32>()
                    .ok()?;
                if interrupts_paragraph && start != 1 {
                    return None;
                }
                (ListType::Ordered { start, delimiter }, digits + 1)
            }
            _ => return None,
        };

        match rest.get(marker_len) {
            None => {}
            Some(&b) if is_space_or_tab(b) => {}
            Some(_) => return None,
        }
        if interrupts_paragraph && rest[marker_len..].iter().all(|&b| is_space_or_tab(b)) {
            return None;
        }

        line.advance_next_nonspace();
        line.advance_offset(marker_len, true);
        let spaces_start_column = line.column;
        let spaces_start_offset = line.offset;
        loop {
            line.advance_offset(1, true);
            let more = line.column - spaces_start_column <= Self::MAX_MARKER_GAP
                && line.peek().is_some_and(is_space_or_tab);
            if !more {
                break;
            }
        }
        let blank_item = line.peek().is_none();
        let spaces_after_marker = line.column - spaces_start_column;
        let padding = if spaces_after_marker > Self::MAX_MARKER_GAP
            || spaces_after_marker < 1
            || blank_item
        {
            line.column = spaces_start_column;
            line.offset = spaces_start_offset;
            line.partially_consumed_tab = false;
            line.skip_optional_space();
            marker_len + 1
        } else {
            marker_len + spaces_after_marker
        };

        Some(ListData {
            list_type,
            tight: true,
            marker_offset,
            padding,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn scan(text: &str) -> LineScan {
        let mut line = LineScan::default();
        line.reset(text.to_owned());
        line.find_next_nonspace();
        line
    }

    #[rstest]
    #[case("- foo", ListType::Bullet(b'-'), 2, "foo")]
    #[case("*   foo", ListType::Bullet(b'*'), 4, "foo")]
    #[case("1. foo", ListType::Ordered { start: 1, delimiter: b'.' }, 3, "foo")]
    #[case("10) foo", ListType::Ordered { start: 10, delimiter: b')' }, 4, "foo")]
    #[case("-      code", ListType::Bullet(b'-'), 2, "     code")]
    #[case("-", ListType::Bullet(b'-'), 2, "")]
    fn parses_markers(
        #[case] text: &str,
        #[case] list_type: ListType,
        #[case] padding: usize,
        #[case] rest: &str,
    ) {
        let mut line = scan(text);
        let data = ListItem::parse_marker(&mut line, false).unwrap();
        assert_eq!(data.list_type, list_type);
        assert_eq!(data.padding, padding);
        assert_eq!(line.rest(), rest);
    }

    #[rstest]
    #[case("-foo")]
    #[case("1234567890. too long")]
    #[case("1: nope")]
    #[case("    - indented")]
    #[case("+")]
    fn rejects_non_markers(#[case] text: &str) {
        let mut line = scan(text);
        if text == "+" {
            assert!(ListItem::parse_marker(&mut line, true).is_none());
        } else {
            assert!(ListItem::parse_marker(&mut line, false).is_none());
        }
    }

    #[test]
    fn interrupting_ordered_items_must_start_at_one() {
        assert!(ListItem::parse_marker(&mut scan("2. two"), true).is_none());
        assert!(ListItem::parse_marker(&mut scan("1. one"), true).is_some());
        assert!(ListItem::parse_marker(&mut scan("2. two"), false).is_some());
    }

    #[test]
    fn records_marker_offset() {
        let data = ListItem::parse_marker(&mut scan("  - foo"), false).unwrap();
        assert_eq!(data.marker_offset, 2);
        assert_eq!(data.padding, 2);
    }

    #[test]
    fn list_compatibility() {
        let item = |text: &str| ListItem::parse_marker(&mut scan(text), false).unwrap();
        assert!(item("- a").same_list(&item("- b")));
        assert!(!item("- a").same_list(&item("+ b")));
        assert!(item("1. a").same_list(&item("7. b")));
        assert!(!item("1. a").same_list(&item("1) b")));
        assert!(!item("1. a").same_list(&item("- b")));
    }
}
