use crate::parsing::chars::{is_escapable, is_punctuation, is_unicode_whitespace};
use crate::parsing::refmap::ReferenceMap;

use super::{
    arena::{Arena, NodeId, NodeValue},
    cursor::Cursor,
    delimiters::DelimiterStack,
    kinds::{Autolink, BacktickIndex, CodeSpan, Entity, RawHtml},
    links::Bracket,
    types::Inline,
};

/// Bytes that may start an inline construct; everything else is plain text.
fn is_special(b: u8) -> bool {
    matches!(
        b,
        b'\n' | b'\\' | CodeSpan::TICK | b'*' | b'_' | b'[' | b']' | b'!' | b'<' | Entity::OPEN
    )
}

/// Whitespace trimmed from both ends of a leaf block's text.
fn is_subject_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

/// Parses the text of one leaf block into inline nodes.
///
/// Code spans, autolinks and raw HTML are recognized as the cursor reaches
/// them and bind tighter than emphasis or links. Emphasis and links are
/// resolved afterwards from the delimiter and bracket stacks.
pub fn parse_inline(text: &str, refmap: &ReferenceMap) -> Vec<Inline> {
    let mut subject = Subject::new(text.trim_matches(is_subject_whitespace), refmap);
    while !subject.cur.eof() {
        subject.parse_next();
    }
    subject.delimiters.process_emphasis(&mut subject.arena, 0);
    subject.arena.into_inlines()
}

/// Working state while resolving one leaf block.
pub(crate) struct Subject<'a> {
    pub(super) cur: Cursor<'a>,
    pub(super) refmap: &'a ReferenceMap,
    pub(super) arena: Arena,
    pub(super) delimiters: DelimiterStack,
    pub(super) brackets: Vec<Bracket>,
    /// Brackets below this index are `[` openers disabled by a resolved link.
    pub(super) link_bottom: usize,
    backticks: BacktickIndex,
    raw_html: RawHtml,
}

impl<'a> Subject<'a> {
    fn new(text: &'a str, refmap: &'a ReferenceMap) -> Self {
        Self {
            cur: Cursor::new(text),
            refmap,
            arena: Arena::new(),
            delimiters: DelimiterStack::default(),
            brackets: Vec::new(),
            link_bottom: 0,
            backticks: BacktickIndex::default(),
            raw_html: RawHtml::default(),
        }
    }

    fn append(&mut self, value: NodeValue) -> NodeId {
        let node = self.arena.alloc(value);
        let root = self.arena.root();
        self.arena.append_child(root, node);
        node
    }

    pub(super) fn append_text(&mut self, text: &str) -> NodeId {
        self.append(NodeValue::Text(text.to_owned()))
    }

    /// Consumes one construct, or one run of plain text, at the cursor.
    fn parse_next(&mut self) {
        let Some(b) = self.cur.peek() else {
            return;
        };
        match b {
            b'\n' => self.handle_newline(),
            b'\\' => self.handle_backslash(),
            CodeSpan::TICK => self.handle_backticks(),
            b'*' | b'_' => self.handle_delimiter_run(b),
            b'[' => {
                self.cur.bump();
                let node = self.append_text("[");
                self.push_bracket(node, self.cur.pos(), false);
            }
            b'!' => {
                self.cur.bump();
                if self.cur.eat(b'[') {
                    let node = self.append_text("![");
                    self.push_bracket(node, self.cur.pos(), true);
                } else {
                    self.append_text("!");
                }
            }
            b']' => self.handle_close_bracket(),
            b'<' => self.handle_left_angle(),
            Entity::OPEN => self.handle_entity(),
            _ => {
                let start = self.cur.pos();
                self.cur.eat_while(|b| !is_special(b));
                let text = self.cur.slice(start, self.cur.pos());
                self.append_text(text);
            }
        }
    }

    /// A line ending is a hard break when the preceding text ends in two or
    /// more spaces; trailing spaces before it are dropped either way.
    fn handle_newline(&mut self) {
        self.cur.bump();
        let mut hard = false;
        if let Some(last) = self.arena.last_child(self.arena.root())
            && let NodeValue::Text(text) = self.arena.value_mut(last)
            && text.ends_with(' ')
        {
            let trimmed = text.trim_end_matches(' ').len();
            hard = text.len() - trimmed >= 2;
            text.truncate(trimmed);
        }
        self.append(if hard {
            NodeValue::HardBreak
        } else {
            NodeValue::SoftBreak
        });
        self.cur.eat_while(|b| b == b' ');
    }

    fn handle_backslash(&mut self) {
        self.cur.bump();
        match self.cur.peek() {
            Some(b'\n') => {
                self.cur.bump();
                self.append(NodeValue::HardBreak);
                self.cur.eat_while(|b| b == b' ');
            }
            Some(b) if is_escapable(b) => {
                self.cur.bump();
                let start = self.cur.pos() - 1;
                let escaped = self.cur.slice(start, start + 1);
                self.append_text(escaped);
            }
            _ => {
                self.append_text("\\");
            }
        }
    }

    /// A backtick run opens a code span only if a run of the same length
    /// follows; otherwise the run is literal text.
    fn handle_backticks(&mut self) {
        let start = self.cur.pos();
        let len = self.cur.eat_while(|b| b == CodeSpan::TICK);
        let after_open = self.cur.pos();
        match self.backticks.find_closer(self.cur.s, after_open, len) {
            Some((close_start, close_end)) => {
                let raw = self.cur.slice(after_open, close_start);
                self.append(NodeValue::Code(CodeSpan::normalize(raw)));
                self.cur.i = close_end;
            }
            None => {
                let ticks = self.cur.slice(start, after_open);
                self.append_text(ticks);
            }
        }
    }

    /// Scans a run of `*` or `_`, classifies it by its flanking and pushes it
    /// on the delimiter stack if it can open or close.
    fn handle_delimiter_run(&mut self, ch: u8) {
        let start = self.cur.pos();
        let len = self.cur.eat_while(|b| b == ch);
        let end = self.cur.pos();

        let before = self.cur.char_before(start).unwrap_or('\n');
        let after = self.cur.char_at(end).unwrap_or('\n');
        let before_space = is_unicode_whitespace(before);
        let before_punct = is_punctuation(before);
        let after_space = is_unicode_whitespace(after);
        let after_punct = is_punctuation(after);

        let left_flanking = !after_space && (!after_punct || before_space || before_punct);
        let right_flanking = !before_space && (!before_punct || after_space || after_punct);
        let (can_open, can_close) = if ch == b'_' {
            (
                left_flanking && (!right_flanking || before_punct),
                right_flanking && (!left_flanking || after_punct),
            )
        } else {
            (left_flanking, right_flanking)
        };

        let run = self.cur.slice(start, end);
        let node = self.append_text(run);
        if can_open || can_close {
            self.delimiters.push(node, ch, len, can_open, can_close);
        }
    }

    fn handle_left_angle(&mut self) {
        if let Some(m) = Autolink::scan(self.cur.rest()) {
            self.cur.bump_n(m.len);
            self.append(NodeValue::Autolink {
                destination: m.destination,
                email: m.email,
            });
        } else if let Some(len) = self.raw_html.scan(self.cur.rest()) {
            let start = self.cur.pos();
            self.cur.bump_n(len);
            let html = self.cur.slice(start, start + len).to_owned();
            self.append(NodeValue::RawHtml(html));
        } else {
            self.cur.bump();
            self.append_text("<");
        }
    }

    fn handle_entity(&mut self) {
        match Entity::scan(self.cur.rest()) {
            Some((len, decoded)) => {
                let start = self.cur.pos();
                self.cur.bump_n(len);
                let source = self.cur.slice(start, start + len).to_owned();
                self.append(NodeValue::Entity { source, decoded });
            }
            None => {
                self.cur.bump();
                self.append_text("&");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::parsing::refmap::LinkReference;

    fn parse(s: &str) -> Vec<Inline> {
        parse_inline(s, &ReferenceMap::default())
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_owned())
    }

    #[test]
    fn plain_text_is_one_node() {
        assert_eq!(parse("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(parse("  hi \n"), vec![text("hi")]);
        assert_eq!(parse(""), vec![]);
        assert_eq!(parse("   "), vec![]);
    }

    #[test]
    fn soft_and_hard_breaks() {
        assert_eq!(
            parse("a\nb  \nc\\\nd"),
            vec![
                text("a"),
                Inline::SoftBreak,
                text("b"),
                Inline::HardBreak,
                text("c"),
                Inline::HardBreak,
                text("d"),
            ]
        );
    }

    #[test]
    fn single_trailing_space_is_dropped_before_soft_break() {
        assert_eq!(parse("a \nb"), vec![text("a"), Inline::SoftBreak, text("b")]);
    }

    #[rstest]
    #[case(r"\*x\*", "*x*")]
    #[case(r"\a", r"\a")]
    #[case("a\\", "a\\")]
    fn backslash_escapes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse(input), vec![text(expected)]);
    }

    #[test]
    fn code_span_binds_tighter_than_emphasis() {
        assert_eq!(
            parse("*a `b* c`"),
            vec![text("*a "), Inline::Code("b* c".into())]
        );
    }

    #[test]
    fn unmatched_backticks_are_literal() {
        assert_eq!(parse("```foo``"), vec![text("```foo``")]);
    }

    #[test]
    fn nested_emphasis_and_strong() {
        assert_eq!(
            parse("*foo**bar**baz*"),
            vec![Inline::Emphasis(vec![
                text("foo"),
                Inline::Strong(vec![text("bar")]),
                text("baz"),
            ])]
        );
    }

    #[test]
    fn triple_run_nests_strong_in_emphasis() {
        assert_eq!(
            parse("***x***"),
            vec![Inline::Emphasis(vec![Inline::Strong(vec![text("x")])])]
        );
    }

    #[rstest]
    #[case("foo_bar_", "foo_bar_")]
    #[case("a * b *", "a * b *")]
    #[case("**foo*", "*")]
    fn intraword_and_spaced_runs_stay_literal(#[case] input: &str, #[case] first: &str) {
        let parsed = parse(input);
        match &parsed[0] {
            Inline::Text(t) => assert!(t.starts_with(first)),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn underscore_between_punctuation_opens() {
        assert_eq!(
            parse("(_foo_)"),
            vec![text("("), Inline::Emphasis(vec![text("foo")]), text(")")]
        );
    }

    #[test]
    fn inline_link_with_title() {
        assert_eq!(
            parse("[a *b*](/url \"t\")"),
            vec![Inline::Link {
                destination: "/url".into(),
                title: "t".into(),
                children: vec![text("a "), Inline::Emphasis(vec![text("b")])],
            }]
        );
    }

    #[test]
    fn reference_links_resolve_through_the_map() {
        let mut refmap = ReferenceMap::default();
        refmap.insert(
            "Foo",
            LinkReference {
                destination: "/f".into(),
                title: String::new(),
            },
        );
        let link = |children| Inline::Link {
            destination: "/f".into(),
            title: String::new(),
            children,
        };
        assert_eq!(parse_inline("[foo]", &refmap), vec![link(vec![text("foo")])]);
        assert_eq!(parse_inline("[FOO][]", &refmap), vec![link(vec![text("FOO")])]);
        assert_eq!(parse_inline("[x][ foo ]", &refmap), vec![link(vec![text("x")])]);
        assert_eq!(parse_inline("[bar]", &refmap), vec![text("[bar]")]);
    }

    #[test]
    fn links_do_not_nest() {
        assert_eq!(
            parse("[a [b](/inner) c](/outer)"),
            vec![
                text("[a "),
                Inline::Link {
                    destination: "/inner".into(),
                    title: String::new(),
                    children: vec![text("b")],
                },
                text(" c](/outer)"),
            ]
        );
    }

    #[test]
    fn brackets_after_a_disabled_opener_link_again() {
        let link = |dest: &str, label: &str| Inline::Link {
            destination: dest.into(),
            title: String::new(),
            children: vec![text(label)],
        };
        assert_eq!(
            parse("[a [b](/i) c] [d](/e)"),
            vec![text("[a "), link("/i", "b"), text(" c] "), link("/e", "d")]
        );
    }

    #[test]
    fn images_may_contain_links() {
        assert_eq!(
            parse("![[a](/b)](/c.png)"),
            vec![Inline::Image {
                destination: "/c.png".into(),
                title: String::new(),
                children: vec![Inline::Link {
                    destination: "/b".into(),
                    title: String::new(),
                    children: vec![text("a")],
                }],
            }]
        );
    }

    #[test]
    fn failed_link_leaves_emphasis_eligible() {
        assert_eq!(
            parse("*[foo*]"),
            vec![Inline::Emphasis(vec![text("[foo")]), text("]")]
        );
    }

    #[test]
    fn autolinks_raw_html_and_entities() {
        assert_eq!(
            parse("<http://a.b> <b>x</b> &amp; &bogus;"),
            vec![
                Inline::Autolink {
                    destination: "http://a.b".into(),
                    email: false,
                },
                text(" "),
                Inline::RawHtml("<b>".into()),
                text("x"),
                Inline::RawHtml("</b>".into()),
                text(" "),
                Inline::Entity {
                    source: "&amp;".into(),
                    decoded: "&".into(),
                },
                text(" &bogus;"),
            ]
        );
    }

    #[test]
    fn lone_angle_and_bang_are_text() {
        assert_eq!(parse("a < b ! c"), vec![text("a < b ! c")]);
    }
}
