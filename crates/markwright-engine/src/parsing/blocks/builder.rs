use log::trace;

use crate::error::TreeError;
use crate::parsing::document::Document;
use crate::parsing::inline::kinds::entity::unescape_string;
use crate::parsing::refmap::ReferenceMap;

use super::classify::LineScan;
use super::containers::Continuation;
use super::kinds::{HtmlBlock, IndentedCode, Paragraph};
use super::open::{BlockStart, maybe_special};
use super::types::{Block, BlockId, BlockKind};

/// Incremental block structure parser.
///
/// Lines are fed one at a time through [`incorporate_line`]; each line
/// first descends the chain of open blocks checking continuation, then
/// opens new blocks, then hands whatever text remains to the innermost
/// block. [`finish`] closes everything still open.
///
/// [`incorporate_line`]: BlockParser::incorporate_line
/// [`finish`]: BlockParser::finish
pub struct BlockParser {
    pub(super) doc: Document,
    pub(super) references: ReferenceMap,
    /// Innermost open block.
    pub(super) tip: BlockId,
    /// Tip as it was before the current line.
    pub(super) old_tip: BlockId,
    pub(super) last_matched_container: BlockId,
    /// No unmatched blocks are waiting to be closed on this line.
    pub(super) all_closed: bool,
    pub(super) line: LineScan,
    pub(super) line_number: usize,
    pub(super) last_line_length: usize,
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockParser {
    pub fn new() -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            doc,
            references: ReferenceMap::default(),
            tip: root,
            old_tip: root,
            last_matched_container: root,
            all_closed: true,
            line: LineScan::default(),
            line_number: 0,
            last_line_length: 0,
        }
    }

    /// The tree built so far.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn tip(&self) -> BlockId {
        self.tip
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Adds one logical line (without its line ending) to the tree.
    pub fn incorporate_line(&mut self, text: &str) -> Result<(), TreeError> {
        self.line_number += 1;
        self.line.reset(text.to_owned());
        self.old_tip = self.tip;

        let mut container = self.doc.root();
        while let Some(last) = self.doc.last_child(container)? {
            if !self.doc.block(last)?.open {
                break;
            }
            container = last;
            self.line.find_next_nonspace();
            match self.continues(container)? {
                Continuation::Matched => {}
                Continuation::NotMatched => {
                    container = self.doc.parent(container)?;
                    break;
                }
                Continuation::LineConsumed => {
                    self.last_line_length = self.line.text.chars().count();
                    return Ok(());
                }
            }
        }

        self.all_closed = container == self.old_tip;
        self.last_matched_container = container;

        let mut matched_leaf = {
            let kind = self.doc.kind(container)?;
            !matches!(kind, BlockKind::Paragraph) && kind.accepts_lines()
        };
        while !matched_leaf {
            self.line.find_next_nonspace();
            if !self.line.indented && !self.line.peek_nonspace().is_some_and(maybe_special) {
                self.line.advance_next_nonspace();
                break;
            }
            match self.try_block_starts(container)? {
                BlockStart::Container => container = self.tip,
                BlockStart::Leaf => {
                    container = self.tip;
                    matched_leaf = true;
                }
                BlockStart::Unmatched => {
                    self.line.advance_next_nonspace();
                    break;
                }
            }
        }

        if !self.all_closed
            && !self.line.blank
            && matches!(self.doc.kind(self.tip)?, BlockKind::Paragraph)
        {
            // Lazy continuation: the paragraph stays open even though its
            // containers did not match.
            self.add_line()?;
        } else {
            self.close_unmatched_blocks()?;
            let kind = self.doc.kind(container)?.clone();
            if kind.accepts_lines() {
                self.add_line()?;
                if let BlockKind::HtmlBlock(html) = kind
                    && !html.ends_at_blank_line()
                    && html.closes(self.line.rest())
                {
                    self.last_line_length = self.line.text.chars().count();
                    self.finalize(container, self.line_number)?;
                }
            } else if self.line.offset < self.line.len() && !self.line.blank {
                self.add_child(BlockKind::Paragraph, self.line.offset)?;
                self.line.advance_next_nonspace();
                self.add_line()?;
            }
        }
        self.last_line_length = self.line.text.chars().count();
        Ok(())
    }

    /// Closes every open block and returns the finished document.
    pub fn finish(mut self) -> Result<Document, TreeError> {
        let root = self.doc.root();
        loop {
            let tip = self.tip;
            self.finalize(tip, self.line_number)?;
            if tip == root {
                break;
            }
        }
        self.doc.references = self.references;
        Ok(self.doc)
    }

    /// Closes the blocks left unmatched by the current line, innermost first.
    pub(super) fn close_unmatched_blocks(&mut self) -> Result<(), TreeError> {
        if self.all_closed {
            return Ok(());
        }
        while self.old_tip != self.last_matched_container {
            let parent = self.doc.parent(self.old_tip)?;
            self.finalize(self.old_tip, self.line_number.saturating_sub(1))?;
            self.old_tip = parent;
        }
        self.all_closed = true;
        Ok(())
    }

    /// Opens a block of `kind` under the innermost block able to hold it,
    /// closing tips that cannot.
    pub(super) fn add_child(&mut self, kind: BlockKind, offset: usize) -> Result<BlockId, TreeError> {
        let root = self.doc.root();
        while !self.doc.kind(self.tip)?.can_contain(&kind) {
            if self.tip == root {
                return Err(TreeError::NoContainer(kind.name()));
            }
            self.finalize(self.tip, self.line_number.saturating_sub(1))?;
        }
        trace!("open {} at {}:{}", kind.name(), self.line_number, offset + 1);
        let block = Block::new(kind, self.line_number, offset + 1);
        let id = self.doc.append_child(self.tip, block)?;
        self.tip = id;
        Ok(id)
    }

    /// Appends the rest of the current line to the tip's content.
    pub(super) fn add_line(&mut self) -> Result<(), TreeError> {
        let mut padding = 0;
        if self.line.partially_consumed_tab {
            // Skip the tab and keep the columns it still spans.
            self.line.offset += 1;
            padding = 4 - self.line.column % 4;
        }
        let rest = self.line.text.get(self.line.offset..).unwrap_or("");
        let content = &mut self.doc.block_mut(self.tip)?.content;
        content.extend(std::iter::repeat_n(' ', padding));
        content.push_str(rest);
        content.push('\n');
        Ok(())
    }

    /// Closes `id`, fixes up its content, and makes its parent the tip.
    pub(super) fn finalize(&mut self, id: BlockId, line_number: usize) -> Result<(), TreeError> {
        let end_column = self.last_line_length;
        let block = self.doc.block_mut(id)?;
        if !block.open {
            return Err(TreeError::AlreadyFinalized(id));
        }
        block.open = false;
        block.pos.end_line = line_number;
        block.pos.end_column = end_column;
        let parent = block.parent;

        self.finalize_content(id)?;
        trace!("close {} {} at line {}", self.doc.kind(id)?.name(), id, line_number);
        self.tip = parent.unwrap_or(id);
        Ok(())
    }

    fn finalize_content(&mut self, id: BlockId) -> Result<(), TreeError> {
        let kind = self.doc.kind(id)?.clone();
        match kind {
            BlockKind::Paragraph => {
                let block = self.doc.block_mut(id)?;
                let consumed =
                    Paragraph::take_reference_definitions(&block.content, &mut self.references);
                let definitions: String = block.content.drain(..consumed).collect();
                if block.content.trim_matches(|c: char| c.is_ascii_whitespace()).is_empty() {
                    block.kind = BlockKind::ReferenceDefinition;
                    block.content = definitions;
                }
            }
            BlockKind::FencedCode(mut data) => {
                let block = self.doc.block_mut(id)?;
                let (info, literal) = match block.content.split_once('\n') {
                    Some((first, rest)) => (first.to_owned(), rest.to_owned()),
                    None => (std::mem::take(&mut block.content), String::new()),
                };
                data.info = unescape_string(info.trim()).into_owned();
                block.kind = BlockKind::FencedCode(data);
                block.content = literal;
            }
            BlockKind::IndentedCode => {
                IndentedCode::strip_trailing_blank_lines(&mut self.doc.block_mut(id)?.content);
            }
            BlockKind::HtmlBlock(_) => {
                HtmlBlock::trim_trailing_newlines(&mut self.doc.block_mut(id)?.content);
            }
            BlockKind::ListItem(data) => {
                let end = match self.doc.last_child(id)? {
                    Some(last) => {
                        let pos = self.doc.block(last)?.pos;
                        (pos.end_line, pos.end_column)
                    }
                    None => {
                        let start_line = self.doc.block(id)?.pos.start_line;
                        (start_line, data.marker_offset + data.padding)
                    }
                };
                let pos = &mut self.doc.block_mut(id)?.pos;
                (pos.end_line, pos.end_column) = end;
            }
            BlockKind::List(mut data) => {
                data.tight = self.list_is_tight(id)?;
                let last_end = match self.doc.last_child(id)? {
                    Some(last) => Some(self.doc.block(last)?.pos),
                    None => None,
                };
                let block = self.doc.block_mut(id)?;
                block.kind = BlockKind::List(data);
                if let Some(last) = last_end {
                    block.pos.end_line = last.end_line;
                    block.pos.end_column = last.end_column;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// A list is loose when an item, or a block inside an item, is followed
    /// by a sibling that does not start on the very next line.
    fn list_is_tight(&self, list: BlockId) -> Result<bool, TreeError> {
        let items = self.doc.children(list)?;
        for (i, &item) in items.iter().enumerate() {
            if let Some(&next) = items.get(i + 1)
                && self.gap_between(item, next)?
            {
                return Ok(false);
            }
            let children = self.doc.children(item)?;
            for (j, &child) in children.iter().enumerate() {
                if let Some(&next) = children.get(j + 1)
                    && self.gap_between(child, next)?
                {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn gap_between(&self, block: BlockId, next: BlockId) -> Result<bool, TreeError> {
        let end = self.doc.block(block)?.pos.end_line;
        let start = self.doc.block(next)?.pos.start_line;
        Ok(start != end + 1)
    }
}
