use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::inline::kinds::raw_html::{close_tag_pattern, open_tag_pattern};

/// One of the seven HTML block start conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlBlockKind(pub u8);

impl HtmlBlockKind {
    /// Kind 7 (any complete tag on its own line) cannot interrupt a paragraph.
    pub fn can_interrupt_paragraph(self) -> bool {
        self.0 != 7
    }

    /// Kinds 6 and 7 end at a blank line; the rest end at their terminator.
    pub fn ends_at_blank_line(self) -> bool {
        self.0 >= 6
    }

    /// Whether `line` contains the terminator of kinds 1 to 5.
    pub fn closes(self, line: &str) -> bool {
        let index = usize::from(self.0).wrapping_sub(1);
        closers().get(index).is_some_and(|re| re.is_match(line))
    }
}

const BLOCK_TAGS: &str = "address|article|aside|base|basefont|blockquote|body|caption|center|col|colgroup|dd|details|dialog|dir|div|dl|dt|fieldset|figcaption|figure|footer|form|frame|frameset|h[123456]|head|header|hr|html|iframe|legend|li|link|main|menu|menuitem|nav|noframes|ol|optgroup|option|p|param|search|section|summary|table|tbody|td|tfoot|th|thead|title|tr|track|ul";

static OPENERS: OnceLock<Vec<Regex>> = OnceLock::new();
static CLOSERS: OnceLock<Vec<Regex>> = OnceLock::new();

fn openers() -> &'static [Regex] {
    OPENERS.get_or_init(|| {
        [
            r"(?i)^<(?:script|pre|textarea|style)(?:[ \t]|>|$)".to_owned(),
            r"^<!--".to_owned(),
            r"^<[?]".to_owned(),
            r"^<![A-Za-z]".to_owned(),
            r"^<!\[CDATA\[".to_owned(),
            format!(r"(?i)^</?(?:{BLOCK_TAGS})(?:[ \t]|/?>|$)"),
            format!(r"(?i)^(?:{}|{})[ \t]*$", open_tag_pattern(), close_tag_pattern()),
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid HTML block start regex"))
        .collect()
    })
}

fn closers() -> &'static [Regex] {
    CLOSERS.get_or_init(|| {
        [
            r"(?i)</(?:script|pre|textarea|style)>",
            r"-->",
            r"\?>",
            r">",
            r"\]\]>",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("Invalid HTML block end regex"))
        .collect()
    })
}

pub struct HtmlBlock;

impl HtmlBlock {
    pub const OPEN: u8 = b'<';

    /// Recognizes an HTML block start condition at the start of `s`.
    pub fn start(s: &str, interrupts_paragraph: bool) -> Option<HtmlBlockKind> {
        if !s.starts_with(Self::OPEN as char) {
            return None;
        }
        openers()
            .iter()
            .position(|re| re.is_match(s))
            .map(|i| HtmlBlockKind(i as u8 + 1))
            .filter(|kind| !interrupts_paragraph || kind.can_interrupt_paragraph())
    }

    /// Drops trailing line breaks (and the spaces on the lines they end).
    pub fn trim_trailing_newlines(content: &mut String) {
        loop {
            let without_spaces = content.trim_end_matches(' ').len();
            if content[..without_spaces].ends_with('\n') {
                content.truncate(without_spaces - 1);
            } else {
                break;
            }
        }
    }
}
