/// A resolved inline node.
///
/// Text nodes are never empty and never adjacent to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// Code span content, already normalized.
    Code(String),
    SoftBreak,
    HardBreak,
    RawHtml(String),
    /// A character reference and the text it decodes to.
    Entity { source: String, decoded: String },
    /// `<scheme:...>` or `<user@host>`; `destination` is the text between
    /// the angle brackets.
    Autolink { destination: String, email: bool },
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Link {
        destination: String,
        title: String,
        children: Vec<Inline>,
    },
    Image {
        destination: String,
        title: String,
        children: Vec<Inline>,
    },
}

impl Inline {
    pub fn name(&self) -> &'static str {
        match self {
            Inline::Text(_) => "text",
            Inline::Code(_) => "code",
            Inline::SoftBreak => "softbreak",
            Inline::HardBreak => "linebreak",
            Inline::RawHtml(_) => "html_inline",
            Inline::Entity { .. } => "entity",
            Inline::Autolink { .. } => "autolink",
            Inline::Emphasis(_) => "emph",
            Inline::Strong(_) => "strong",
            Inline::Link { .. } => "link",
            Inline::Image { .. } => "image",
        }
    }

    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Link { children, .. }
            | Inline::Image { children, .. } => children,
            _ => &[],
        }
    }

    /// Appends the plain-text rendering of this node (as used for image
    /// `alt` attributes) to `out`.
    pub fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(text) | Inline::Code(text) | Inline::RawHtml(text) => out.push_str(text),
            Inline::Entity { decoded, .. } => out.push_str(decoded),
            Inline::Autolink { destination, .. } => out.push_str(destination),
            Inline::SoftBreak | Inline::HardBreak => out.push('\n'),
            _ => {
                for child in self.children() {
                    child.push_plain_text(out);
                }
            }
        }
    }
}

/// Plain text of a sequence of inlines.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        inline.push_plain_text(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_flattens_markup() {
        let inlines = vec![
            Inline::Text("foo ".into()),
            Inline::Emphasis(vec![Inline::Text("bar".into())]),
            Inline::Entity {
                source: "&amp;".into(),
                decoded: "&".into(),
            },
            Inline::RawHtml("<b>".into()),
            Inline::Code("x".into()),
        ];
        assert_eq!(plain_text(&inlines), "foo bar&<b>x");
    }
}
