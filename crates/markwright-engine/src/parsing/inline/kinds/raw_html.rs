use std::sync::OnceLock;

use regex::Regex;

const TAG_NAME: &str = "[A-Za-z][A-Za-z0-9-]*";
const ATTRIBUTE_NAME: &str = "[a-zA-Z_:][a-zA-Z0-9:._-]*";
const ATTRIBUTE_VALUE: &str = r#"(?:[^"'=<>`\x00-\x20]+|'[^']*'|"[^"]*")"#;
/// Whitespace allowed inside tags: ASCII spaces, tabs and line endings only.
const WS: &str = r"[ \t\n]";

/// An open tag: name, attributes, optional self-closing slash.
pub fn open_tag_pattern() -> String {
    format!(r"<{TAG_NAME}(?:{WS}+{ATTRIBUTE_NAME}(?:{WS}*={WS}*{ATTRIBUTE_VALUE})?)*{WS}*/?>")
}

pub fn close_tag_pattern() -> String {
    format!(r"</{TAG_NAME}{WS}*>")
}

static HTML_TAG_REGEX: OnceLock<Regex> = OnceLock::new();

/// Constructs that run until a fixed terminator: comments, processing
/// instructions, CDATA sections and declarations.
const TERMINATED: [(&str, &str); 4] = [("<!--", "-->"), ("<?", "?>"), ("<![CDATA[", "]]>"), ("<!", ">")];

fn terminated(s: &str) -> Option<usize> {
    TERMINATED.iter().position(|(open, _)| {
        s.starts_with(open)
            && (*open != "<!" || s.as_bytes().get(2).is_some_and(u8::is_ascii_alphabetic))
    })
}

/// Inline HTML: tags, comments, processing instructions, declarations and
/// CDATA sections, passed through verbatim.
///
/// A scanner is used on successively shorter suffixes of one subject. Once a
/// terminator is missing from the rest of the subject it is not searched for
/// again.
#[derive(Debug, Default)]
pub struct RawHtml {
    missing: [bool; TERMINATED.len()],
}

impl RawHtml {
    /// Byte length of the raw HTML construct at the start of `s`.
    pub fn scan(&mut self, s: &str) -> Option<usize> {
        let Some(kind) = terminated(s) else {
            return Self::tag(s);
        };
        let (open, close) = TERMINATED[kind];
        let body = &s[open.len()..];
        if kind == 0 {
            if body.starts_with('>') {
                return Some(open.len() + 1);
            }
            if body.starts_with("->") {
                return Some(open.len() + 2);
            }
        }
        if self.missing[kind] {
            return None;
        }
        match body.find(close) {
            Some(at) => Some(open.len() + at + close.len()),
            None => {
                self.missing[kind] = true;
                None
            }
        }
    }

    fn tag(s: &str) -> Option<usize> {
        let re = HTML_TAG_REGEX.get_or_init(|| {
            let pattern = format!("^(?:{}|{})", open_tag_pattern(), close_tag_pattern());
            Regex::new(&pattern).expect("Invalid inline HTML regex")
        });
        re.find(s).map(|m| m.end())
    }
}
