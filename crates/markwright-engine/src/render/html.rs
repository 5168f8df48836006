use std::fmt::Write;

use crate::parsing::Document;
use crate::parsing::blocks::{Block, BlockId, BlockKind};
use crate::parsing::inline::{Inline, plain_text};
use crate::settings::Settings;

use super::RenderFault;
use super::escape::{escape_href, escape_html};

type Result<T = ()> = std::result::Result<T, RenderFault>;

/// Writes a document as an HTML fragment.
///
/// Every block-level tag starts on a fresh line; nothing else adds
/// whitespace.
pub struct HtmlRenderer<'a, W> {
    doc: &'a Document,
    settings: &'a Settings,
    out: &'a mut W,
    /// Last character written, `'\n'` before any output.
    last: char,
}

impl<'a, W: Write> HtmlRenderer<'a, W> {
    pub fn new(doc: &'a Document, settings: &'a Settings, out: &'a mut W) -> Self {
        Self {
            doc,
            settings,
            out,
            last: '\n',
        }
    }

    pub(crate) fn render(mut self) -> Result {
        let root = self.doc.root();
        self.children(root)
    }

    fn lit(&mut self, s: &str) -> Result {
        if let Some(c) = s.chars().next_back() {
            self.out.write_str(s)?;
            self.last = c;
        }
        Ok(())
    }

    fn text(&mut self, s: &str) -> Result {
        self.lit(&escape_html(s))
    }

    /// Starts a new line unless one was just started.
    fn cr(&mut self) -> Result {
        if self.last != '\n' {
            self.lit("\n")?;
        }
        Ok(())
    }

    /// Opens `<name ...>` with the block's source position when enabled.
    fn open_tag(&mut self, name: &str, block: &Block, extra: &[(&str, String)]) -> Result {
        self.lit("<")?;
        self.lit(name)?;
        for (key, value) in extra {
            self.lit(&format!(" {key}=\"{value}\""))?;
        }
        if self.settings.source_positions {
            self.lit(&format!(" data-sourcepos=\"{}\"", block.pos))?;
        }
        self.lit(">")
    }

    fn children(&mut self, id: BlockId) -> Result {
        let doc = self.doc;
        for &child in doc.children(id)? {
            self.block(child)?;
        }
        Ok(())
    }

    fn in_tight_list(&self, id: BlockId) -> bool {
        let grandparent = self
            .doc
            .parent(id)
            .and_then(|parent| self.doc.parent(parent))
            .and_then(|gp| self.doc.kind(gp));
        matches!(grandparent, Ok(BlockKind::List(data)) if data.tight)
    }

    fn block(&mut self, id: BlockId) -> Result {
        let (doc, settings) = (self.doc, self.settings);
        let block = doc.block(id)?;
        if let Some(hooks) = &settings.hooks
            && let Some(html) = hooks.block(block)
        {
            self.cr()?;
            self.lit(&html)?;
            return self.cr();
        }

        match &block.kind {
            BlockKind::Document => self.children(id),
            BlockKind::Paragraph => {
                if self.in_tight_list(id) {
                    return self.inlines(&block.inlines);
                }
                self.cr()?;
                self.open_tag("p", block, &[])?;
                self.inlines(&block.inlines)?;
                self.lit("</p>")?;
                self.cr()
            }
            BlockKind::Heading(data) => {
                let tag = format!("h{}", data.level);
                self.cr()?;
                self.open_tag(&tag, block, &[])?;
                self.inlines(&block.inlines)?;
                self.lit(&format!("</{tag}>"))?;
                self.cr()
            }
            BlockKind::FencedCode(_) | BlockKind::IndentedCode => {
                let language = match &block.kind {
                    BlockKind::FencedCode(data) => data.info.split_whitespace().next(),
                    _ => None,
                };
                self.cr()?;
                self.open_tag("pre", block, &[])?;
                match language {
                    Some(lang) => self.lit(&format!(
                        "<code class=\"language-{}\">",
                        escape_html(lang)
                    ))?,
                    None => self.lit("<code>")?,
                }
                self.text(&block.content)?;
                self.lit("</code></pre>")?;
                self.cr()
            }
            BlockKind::ThematicBreak => {
                self.cr()?;
                self.lit("<hr")?;
                if self.settings.source_positions {
                    self.lit(&format!(" data-sourcepos=\"{}\"", block.pos))?;
                }
                self.lit(" />")?;
                self.cr()
            }
            BlockKind::BlockQuote => {
                self.cr()?;
                self.open_tag("blockquote", block, &[])?;
                self.cr()?;
                self.children(id)?;
                self.cr()?;
                self.lit("</blockquote>")?;
                self.cr()
            }
            BlockKind::List(data) => {
                let (tag, attrs) = match data.start() {
                    Some(start) if start != 1 => ("ol", vec![("start", start.to_string())]),
                    Some(_) => ("ol", vec![]),
                    None => ("ul", vec![]),
                };
                self.cr()?;
                self.open_tag(tag, block, &attrs)?;
                self.cr()?;
                self.children(id)?;
                self.cr()?;
                self.lit(&format!("</{tag}>"))?;
                self.cr()
            }
            BlockKind::ListItem(_) => {
                self.open_tag("li", block, &[])?;
                self.children(id)?;
                self.lit("</li>")?;
                self.cr()
            }
            BlockKind::HtmlBlock(_) => {
                self.cr()?;
                self.lit(&block.content)?;
                self.cr()
            }
            BlockKind::ReferenceDefinition => Ok(()),
        }
    }

    fn inlines(&mut self, inlines: &[Inline]) -> Result {
        for inline in inlines {
            self.inline(inline)?;
        }
        Ok(())
    }

    fn inline(&mut self, inline: &Inline) -> Result {
        let settings = self.settings;
        if let Some(hooks) = &settings.hooks
            && let Some(html) = hooks.inline(inline)
        {
            return self.lit(&html);
        }

        match inline {
            Inline::Text(text) => self.text(text),
            Inline::Entity { decoded, .. } => self.text(decoded),
            Inline::SoftBreak => self.lit(&settings.soft_break),
            Inline::HardBreak => {
                self.lit("<br />")?;
                self.cr()
            }
            Inline::Code(code) => {
                self.lit("<code>")?;
                self.text(code)?;
                self.lit("</code>")
            }
            Inline::RawHtml(html) => self.lit(html),
            Inline::Emphasis(children) => {
                self.lit("<em>")?;
                self.inlines(children)?;
                self.lit("</em>")
            }
            Inline::Strong(children) => {
                self.lit("<strong>")?;
                self.inlines(children)?;
                self.lit("</strong>")
            }
            Inline::Autolink { destination, email } => {
                let href = if *email {
                    escape_href(&format!("mailto:{destination}"))
                } else {
                    escape_href(destination)
                };
                self.lit(&format!("<a href=\"{href}\">"))?;
                self.text(destination)?;
                self.lit("</a>")
            }
            Inline::Link {
                destination,
                title,
                children,
            } => {
                self.lit(&format!("<a href=\"{}\"", escape_href(destination)))?;
                if !title.is_empty() {
                    self.lit(&format!(" title=\"{}\"", escape_html(title)))?;
                }
                self.lit(">")?;
                self.inlines(children)?;
                self.lit("</a>")
            }
            Inline::Image {
                destination,
                title,
                children,
            } => {
                self.lit(&format!(
                    "<img src=\"{}\" alt=\"{}\"",
                    escape_href(destination),
                    escape_html(&plain_text(children))
                ))?;
                if !title.is_empty() {
                    self.lit(&format!(" title=\"{}\"", escape_html(title)))?;
                }
                self.lit(" />")
            }
        }
    }
}
