use crate::parsing::chars::is_escapable;
use crate::parsing::refmap::{LinkReference, normalize_label};

use super::arena::{NodeId, NodeValue};
use super::cursor::Cursor;
use super::kinds::unescape_string;
use super::parser::Subject;

/// Longest label content allowed between the brackets.
const MAX_LABEL_CHARS: usize = 999;

/// Deepest parenthesis nesting accepted in a bare destination.
const MAX_PAREN_DEPTH: usize = 32;

/// An open `[` or `![` waiting for its `]`.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    /// Text node holding the bracket itself.
    pub node: NodeId,
    /// Byte index just past the opening bracket.
    pub index: usize,
    pub image: bool,
    /// Another bracket was opened after this one.
    pub bracket_after: bool,
    /// Delimiter stack size when the bracket was pushed.
    pub delimiter_bottom: usize,
}

/// A link reference definition recognized at the start of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinition {
    pub label: String,
    pub reference: LinkReference,
    /// Bytes consumed, including the trailing line ending.
    pub consumed: usize,
}

/// Length of a link label (`[...]`, brackets included) at the cursor.
pub fn scan_link_label(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let mut chars = 0;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b']' => return Some(i + 1),
            b'[' => return None,
            b'\\' => {
                i += 1;
                if let Some(c) = s.get(i..).and_then(|rest| rest.chars().next()) {
                    i += c.len_utf8();
                }
            }
            _ => {
                let width = s[i..].chars().next().map_or(1, char::len_utf8);
                i += width;
            }
        }
        chars += 1;
        if chars > MAX_LABEL_CHARS {
            return None;
        }
    }
    None
}

/// Parses a link destination at the cursor, returning it unescaped.
///
/// Either `<...>` without line endings or unescaped angle brackets, or a run
/// without spaces or control characters whose parentheses balance.
pub fn scan_destination(cur: &mut Cursor<'_>) -> Option<String> {
    let start = cur.pos();
    if cur.eat(b'<') {
        loop {
            let Some(b) = cur.peek() else {
                cur.i = start;
                return None;
            };
            match b {
                b'>' => {
                    let raw = cur.slice(start + 1, cur.pos());
                    cur.bump();
                    return Some(unescape_string(raw).into_owned());
                }
                b'<' | b'\n' => {
                    cur.i = start;
                    return None;
                }
                b'\\' if cur.peek_at(1).is_some_and(is_escapable) => cur.bump_n(2),
                _ => cur.bump_n(1),
            }
        }
    }

    let mut depth = 0usize;
    while let Some(b) = cur.peek() {
        match b {
            b'\\' if cur.peek_at(1).is_some_and(is_escapable) => cur.bump_n(2),
            b'(' => {
                depth += 1;
                if depth > MAX_PAREN_DEPTH {
                    cur.i = start;
                    return None;
                }
                cur.bump();
            }
            b')' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                cur.bump();
            }
            b if b <= b' ' || b == 0x7f => break,
            _ => {
                cur.bump();
            }
        }
    }
    if depth != 0 || (cur.pos() == start && cur.peek() != Some(b')')) {
        cur.i = start;
        return None;
    }
    Some(unescape_string(cur.slice(start, cur.pos())).into_owned())
}

/// Parses a link title in `"..."`, `'...'` or `(...)` form, returning it
/// unescaped. Leaves the cursor untouched on failure.
pub fn scan_title(cur: &mut Cursor<'_>) -> Option<String> {
    let start = cur.pos();
    let close = match cur.peek()? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    cur.bump();
    loop {
        let Some(b) = cur.peek() else {
            cur.i = start;
            return None;
        };
        if b == close {
            let raw = cur.slice(start + 1, cur.pos());
            cur.bump();
            return Some(unescape_string(raw).into_owned());
        }
        match b {
            b'\\' if cur.peek_at(1).is_some_and(is_escapable) => cur.bump_n(2),
            b'(' if close == b')' => {
                cur.i = start;
                return None;
            }
            _ => cur.bump_n(1),
        }
    }
}

/// Recognizes `[label]: destination "title"` at the start of `s`.
pub fn scan_reference_definition(s: &str) -> Option<ReferenceDefinition> {
    let mut cur = Cursor::new(s);
    let label_len = scan_link_label(s)?;
    let label = normalize_label(&s[..label_len]);
    if label.is_empty() {
        return None;
    }
    cur.bump_n(label_len);
    if !cur.eat(b':') {
        return None;
    }
    cur.skip_spnl();
    let destination = scan_destination(&mut cur)?;

    let before_title = cur.pos();
    cur.skip_spnl();
    let mut title = None;
    if cur.pos() != before_title {
        title = scan_title(&mut cur);
    }
    if title.is_none() {
        cur.i = before_title;
    }
    if !cur.skip_line_end() {
        // A title that is not followed by the end of its line is not part of
        // the definition; the definition may still end after the destination.
        if title.is_none() {
            return None;
        }
        cur.i = before_title;
        if !cur.skip_line_end() {
            return None;
        }
        title = None;
    }

    Some(ReferenceDefinition {
        label,
        reference: LinkReference {
            destination,
            title: title.unwrap_or_default(),
        },
        consumed: cur.pos(),
    })
}

impl Subject<'_> {
    pub(super) fn push_bracket(&mut self, node: NodeId, index: usize, image: bool) {
        if let Some(last) = self.brackets.last_mut() {
            last.bracket_after = true;
        }
        self.brackets.push(Bracket {
            node,
            index,
            image,
            bracket_after: false,
            delimiter_bottom: self.delimiters.len(),
        });
    }

    /// Pops the top bracket, keeping the link bottom within the stack.
    fn pop_bracket(&mut self) {
        self.brackets.pop();
        self.link_bottom = self.link_bottom.min(self.brackets.len());
    }

    /// Handles `]`: resolves the nearest bracket into a link or image, or
    /// leaves both brackets as literal text.
    pub(super) fn handle_close_bracket(&mut self) {
        self.cur.bump();
        let after_bracket = self.cur.pos();

        let Some(opener) = self.brackets.last().copied() else {
            self.append_text("]");
            return;
        };
        // Links may not contain links: `[` openers below a resolved link are
        // inert.
        if !opener.image && self.brackets.len() - 1 < self.link_bottom {
            self.pop_bracket();
            self.append_text("]");
            return;
        }

        let mut resolved = None;
        if self.cur.eat(b'(') {
            resolved = self.scan_inline_link();
            if resolved.is_none() {
                self.cur.i = after_bracket;
            }
        }
        if resolved.is_none() {
            let label_start = self.cur.pos();
            let label_len = scan_link_label(self.cur.rest()).unwrap_or(0);
            let label = if label_len > 2 {
                Some(self.cur.slice(label_start, label_start + label_len))
            } else if !opener.bracket_after {
                // Collapsed `[]` or shortcut: the bracket text is the label.
                Some(self.cur.slice(opener.index, after_bracket - 1))
            } else {
                None
            };
            if label_len > 0 {
                self.cur.bump_n(label_len);
            }
            resolved = label
                .and_then(|label| self.refmap.get(label))
                .map(|r| (r.destination.clone(), r.title.clone()));
        }

        let Some((destination, title)) = resolved else {
            self.pop_bracket();
            self.cur.i = after_bracket;
            self.append_text("]");
            return;
        };

        let value = if opener.image {
            NodeValue::Image { destination, title }
        } else {
            NodeValue::Link { destination, title }
        };
        let link = self.arena.alloc(value);
        self.arena.move_siblings_after(opener.node, None, link);
        let root = self.arena.root();
        self.arena.append_child(root, link);
        self.delimiters
            .process_emphasis(&mut self.arena, opener.delimiter_bottom);
        self.pop_bracket();
        self.arena.detach(opener.node);

        if !opener.image {
            self.link_bottom = self.brackets.len();
        }
    }

    /// Parses `(destination "title")` after the `(` has been consumed.
    fn scan_inline_link(&mut self) -> Option<(String, String)> {
        self.cur.skip_spnl();
        let destination = scan_destination(&mut self.cur)?;
        let before_title = self.cur.pos();
        self.cur.skip_spnl();
        let title = if self.cur.pos() != before_title {
            scan_title(&mut self.cur).unwrap_or_default()
        } else {
            String::new()
        };
        self.cur.skip_spnl();
        self.cur.eat(b')').then_some((destination, title))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("[foo]", Some(5))]
    #[case("[foo\\]bar] x", Some(10))]
    #[case("[]", Some(2))]
    #[case("[a[b]", None)]
    #[case("[unclosed", None)]
    #[case("no", None)]
    fn scans_labels(#[case] s: &str, #[case] expected: Option<usize>) {
        assert_eq!(scan_link_label(s), expected);
    }

    #[test]
    fn label_length_is_bounded() {
        let long = format!("[{}]", "a".repeat(1000));
        assert_eq!(scan_link_label(&long), None);
        let ok = format!("[{}]", "a".repeat(999));
        assert_eq!(scan_link_label(&ok), Some(1001));
    }

    #[rstest]
    #[case("/url rest", Some("/url"), " rest")]
    #[case("<my url>)", Some("my url"), ")")]
    #[case("foo(and(bar)))", Some("foo(and(bar))"), ")")]
    #[case("foo(bar", None, "foo(bar")]
    #[case("<foo\nbar>", None, "<foo\nbar>")]
    #[case(")", Some(""), ")")]
    #[case(r"foo\)\:", Some("foo):"), "")]
    #[case("", None, "")]
    fn scans_destinations(#[case] s: &str, #[case] expected: Option<&str>, #[case] rest: &str) {
        let mut cur = Cursor::new(s);
        assert_eq!(scan_destination(&mut cur).as_deref(), expected);
        assert_eq!(cur.rest(), rest);
    }

    #[rstest]
    #[case("\"title\" x", Some("title"))]
    #[case("'it''", Some("it"))]
    #[case("(paren)", Some("paren"))]
    #[case("(a(b)", None)]
    #[case(r#""esc\"aped""#, Some("esc\"aped"))]
    #[case("\"unterminated", None)]
    fn scans_titles(#[case] s: &str, #[case] expected: Option<&str>) {
        let mut cur = Cursor::new(s);
        assert_eq!(scan_title(&mut cur).as_deref(), expected);
    }

    #[test]
    fn paren_nesting_is_bounded() {
        let deep = format!("{}{}", "(".repeat(32), ")".repeat(32));
        let mut cur = Cursor::new(&deep);
        assert_eq!(scan_destination(&mut cur).as_deref(), Some(deep.as_str()));

        let too_deep = format!("{}{}", "(".repeat(33), ")".repeat(33));
        let mut cur = Cursor::new(&too_deep);
        assert_eq!(scan_destination(&mut cur), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn reference_definition_with_title() {
        let def = scan_reference_definition("[Foo]: /url \"the title\"\nrest").unwrap();
        assert_eq!(def.label, "FOO");
        assert_eq!(def.reference.destination, "/url");
        assert_eq!(def.reference.title, "the title");
        assert_eq!(def.consumed, 24);
    }

    #[test]
    fn reference_definition_spanning_lines() {
        let def = scan_reference_definition("[foo]:\n/url\n'title'\n").unwrap();
        assert_eq!(def.reference.destination, "/url");
        assert_eq!(def.reference.title, "title");
    }

    #[test]
    fn title_followed_by_text_falls_back_to_destination_only() {
        let input = "[foo]: /url\n\"title\" ok\n";
        let def = scan_reference_definition(input).unwrap();
        assert_eq!(def.reference.title, "");
        assert_eq!(&input[def.consumed..], "\"title\" ok\n");
    }

    #[rstest]
    #[case("[foo]: /url \"title\" ok")]
    #[case("[foo]:")]
    #[case("[]: /url")]
    #[case("[foo] /url")]
    fn rejects_malformed_definitions(#[case] s: &str) {
        assert_eq!(scan_reference_definition(s), None);
    }
}
