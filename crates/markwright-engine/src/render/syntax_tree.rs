use std::fmt::Write;

use crate::parsing::Document;
use crate::parsing::blocks::kinds::{FenceKind, ListType};
use crate::parsing::blocks::{Block, BlockId, BlockKind};
use crate::parsing::inline::Inline;
use crate::settings::Settings;

use super::RenderFault;

type Result<T = ()> = std::result::Result<T, RenderFault>;

const INDENT: &str = "  ";

/// Writes the parsed tree one node per line, indented two spaces per level.
///
/// Literal content is printed with `{:?}` so that whitespace and line
/// endings stay visible; nothing is HTML-escaped.
pub struct TreeRenderer<'a, W> {
    doc: &'a Document,
    settings: &'a Settings,
    out: &'a mut W,
}

impl<'a, W: Write> TreeRenderer<'a, W> {
    pub fn new(doc: &'a Document, settings: &'a Settings, out: &'a mut W) -> Self {
        Self { doc, settings, out }
    }

    pub(crate) fn render(mut self) -> Result {
        let root = self.doc.root();
        self.block(root, 0)
    }

    fn line_start(&mut self, depth: usize, name: &str) -> Result {
        for _ in 0..depth {
            self.out.write_str(INDENT)?;
        }
        self.out.write_str(name)?;
        Ok(())
    }

    fn block(&mut self, id: BlockId, depth: usize) -> Result {
        let doc = self.doc;
        let block = doc.block(id)?;
        self.line_start(depth, block.kind.name())?;
        if self.settings.source_positions {
            write!(self.out, " ({})", block.pos)?;
        }
        self.block_attributes(block)?;
        self.out.write_char('\n')?;

        for inline in &block.inlines {
            self.inline(inline, depth + 1)?;
        }
        for &child in &block.children {
            self.block(child, depth + 1)?;
        }
        Ok(())
    }

    fn block_attributes(&mut self, block: &Block) -> Result {
        match &block.kind {
            BlockKind::List(data) => {
                match data.list_type {
                    ListType::Bullet(ch) => write!(self.out, " type=bullet bullet_char={}", ch as char)?,
                    ListType::Ordered { start, delimiter } => write!(
                        self.out,
                        " type=ordered start={start} delimiter={}",
                        delimiter as char
                    )?,
                }
                write!(self.out, " tight={}", data.tight)?;
            }
            BlockKind::Heading(data) => {
                write!(self.out, " level={}", data.level)?;
                if data.setext {
                    self.out.write_str(" setext")?;
                }
            }
            BlockKind::FencedCode(data) => {
                let fence = match data.kind {
                    FenceKind::Backticks => "backticks",
                    FenceKind::Tildes => "tildes",
                };
                write!(self.out, " fenced={fence} info={:?} {:?}", data.info, block.content)?;
            }
            BlockKind::IndentedCode | BlockKind::HtmlBlock(_) | BlockKind::ReferenceDefinition => {
                write!(self.out, " {:?}", block.content)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn inline(&mut self, inline: &Inline, depth: usize) -> Result {
        self.line_start(depth, inline.name())?;
        match inline {
            Inline::Text(text) | Inline::Code(text) | Inline::RawHtml(text) => {
                write!(self.out, " {text:?}")?;
            }
            Inline::Entity { source, decoded } => write!(self.out, " {source:?} -> {decoded:?}")?,
            Inline::Autolink { destination, email } => {
                write!(self.out, " destination={destination:?}")?;
                if *email {
                    self.out.write_str(" email")?;
                }
            }
            Inline::Link {
                destination, title, ..
            }
            | Inline::Image {
                destination, title, ..
            } => {
                write!(self.out, " destination={destination:?}")?;
                if !title.is_empty() {
                    write!(self.out, " title={title:?}")?;
                }
            }
            Inline::SoftBreak | Inline::HardBreak | Inline::Emphasis(_) | Inline::Strong(_) => {}
        }
        self.out.write_char('\n')?;
        for child in inline.children() {
            self.inline(child, depth + 1)?;
        }
        Ok(())
    }
}
