use crate::error::TreeError;
use crate::parsing::MAX_NESTING;

use super::builder::BlockParser;
use super::kinds::{
    BlockQuote, CodeFence, FenceData, Heading, HeadingData, HtmlBlock, ListItem, Paragraph,
    ThematicBreak,
};
use super::classify::CODE_INDENT;
use super::types::{BlockId, BlockKind};

/// Result of trying to open a new block on the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStart {
    Unmatched,
    /// A container was opened; keep looking for more starts inside it.
    Container,
    /// A leaf was opened; the rest of the line belongs to it.
    Leaf,
}

type StartFn = fn(&mut BlockParser, BlockId) -> Result<BlockStart, TreeError>;

/// Block starts in priority order.
const BLOCK_STARTS: [StartFn; 8] = [
    BlockParser::start_block_quote,
    BlockParser::start_atx_heading,
    BlockParser::start_fenced_code,
    BlockParser::start_html_block,
    BlockParser::start_setext_heading,
    BlockParser::start_thematic_break,
    BlockParser::start_list_item,
    BlockParser::start_indented_code,
];

/// Whether a line's first non-whitespace byte could begin any block other
/// than a paragraph.
pub fn maybe_special(b: u8) -> bool {
    matches!(
        b,
        b'#' | b'`' | b'~' | b'*' | b'+' | b'_' | b'=' | b'<' | b'>' | b'-' | b'0'..=b'9'
    )
}

impl BlockParser {
    /// Tries every block start against the current line, inside `container`.
    pub(super) fn try_block_starts(&mut self, container: BlockId) -> Result<BlockStart, TreeError> {
        for start in BLOCK_STARTS {
            match start(self, container)? {
                BlockStart::Unmatched => continue,
                opened => return Ok(opened),
            }
        }
        Ok(BlockStart::Unmatched)
    }

    /// Opening `added` more containers under `container` would nest too deep.
    fn nesting_exhausted(&self, container: BlockId, added: usize) -> bool {
        self.doc.depth(container) + added > MAX_NESTING
    }

    fn start_block_quote(&mut self, container: BlockId) -> Result<BlockStart, TreeError> {
        if !BlockQuote::has_marker(&self.line) || self.nesting_exhausted(container, 1) {
            return Ok(BlockStart::Unmatched);
        }
        BlockQuote::consume_marker(&mut self.line);
        self.close_unmatched_blocks()?;
        self.add_child(BlockKind::BlockQuote, self.line.next_nonspace)?;
        Ok(BlockStart::Container)
    }

    fn start_atx_heading(&mut self, _container: BlockId) -> Result<BlockStart, TreeError> {
        if self.line.indented {
            return Ok(BlockStart::Unmatched);
        }
        let Some(open) = Heading::atx_open(self.line.rest_from_nonspace()) else {
            return Ok(BlockStart::Unmatched);
        };
        self.line.advance_next_nonspace();
        self.line.advance_offset(open.marker_len, false);
        self.close_unmatched_blocks()?;
        let content = Heading::strip_closing_sequence(self.line.rest()).to_owned();
        let kind = BlockKind::Heading(HeadingData {
            level: open.level,
            setext: false,
        });
        let id = self.add_child(kind, self.line.next_nonspace)?;
        self.doc.block_mut(id)?.content = content;
        self.line.advance_to_end();
        Ok(BlockStart::Leaf)
    }

    fn start_fenced_code(&mut self, _container: BlockId) -> Result<BlockStart, TreeError> {
        if self.line.indented {
            return Ok(BlockStart::Unmatched);
        }
        let Some(open) = CodeFence::open(self.line.rest_from_nonspace()) else {
            return Ok(BlockStart::Unmatched);
        };
        self.close_unmatched_blocks()?;
        let data = FenceData {
            kind: open.kind,
            length: open.length,
            offset: self.line.indent,
            info: String::new(),
        };
        self.add_child(BlockKind::FencedCode(data), self.line.next_nonspace)?;
        self.line.advance_next_nonspace();
        self.line.advance_offset(open.length, false);
        Ok(BlockStart::Leaf)
    }

    fn start_html_block(&mut self, container: BlockId) -> Result<BlockStart, TreeError> {
        if self.line.indented || self.line.peek_nonspace() != Some(HtmlBlock::OPEN) {
            return Ok(BlockStart::Unmatched);
        }
        // A lazy paragraph continuation counts as interrupting too.
        let interrupts_paragraph = matches!(self.doc.kind(container)?, BlockKind::Paragraph)
            || (!self.all_closed
                && !self.line.blank
                && matches!(self.doc.kind(self.tip)?, BlockKind::Paragraph));
        let Some(kind) = HtmlBlock::start(self.line.rest_from_nonspace(), interrupts_paragraph)
        else {
            return Ok(BlockStart::Unmatched);
        };
        self.close_unmatched_blocks()?;
        // Indentation stays part of the block's content.
        self.add_child(BlockKind::HtmlBlock(kind), self.line.offset)?;
        Ok(BlockStart::Leaf)
    }

    fn start_setext_heading(&mut self, container: BlockId) -> Result<BlockStart, TreeError> {
        if self.line.indented || !matches!(self.doc.kind(container)?, BlockKind::Paragraph) {
            return Ok(BlockStart::Unmatched);
        }
        let Some(level) = Heading::setext_level(self.line.rest_from_nonspace()) else {
            return Ok(BlockStart::Unmatched);
        };
        self.close_unmatched_blocks()?;
        let block = self.doc.block_mut(container)?;
        // Definitions at the start of the paragraph are not heading text.
        let consumed = Paragraph::take_reference_definitions(&block.content, &mut self.references);
        block.content.drain(..consumed);
        if block.content.is_empty() {
            return Ok(BlockStart::Unmatched);
        }
        block.kind = BlockKind::Heading(HeadingData {
            level,
            setext: true,
        });
        self.line.advance_to_end();
        Ok(BlockStart::Leaf)
    }

    fn start_thematic_break(&mut self, _container: BlockId) -> Result<BlockStart, TreeError> {
        if self.line.indented || !ThematicBreak::matches(self.line.rest_from_nonspace()) {
            return Ok(BlockStart::Unmatched);
        }
        self.close_unmatched_blocks()?;
        self.add_child(BlockKind::ThematicBreak, self.line.next_nonspace)?;
        self.line.advance_to_end();
        Ok(BlockStart::Leaf)
    }

    fn start_list_item(&mut self, container: BlockId) -> Result<BlockStart, TreeError> {
        let container_kind = self.doc.kind(container)?;
        if self.line.indented && !matches!(container_kind, BlockKind::List(_)) {
            return Ok(BlockStart::Unmatched);
        }
        let interrupts_paragraph = matches!(container_kind, BlockKind::Paragraph);
        // A new list and its first item.
        if self.nesting_exhausted(container, 2) {
            return Ok(BlockStart::Unmatched);
        }
        let Some(data) = ListItem::parse_marker(&mut self.line, interrupts_paragraph) else {
            return Ok(BlockStart::Unmatched);
        };
        self.close_unmatched_blocks()?;
        let continues_list = match self.doc.kind(self.tip)? {
            BlockKind::List(open) => open.same_list(&data),
            _ => false,
        };
        if !continues_list {
            self.add_child(BlockKind::List(data.clone()), self.line.next_nonspace)?;
        }
        self.add_child(BlockKind::ListItem(data), self.line.next_nonspace)?;
        Ok(BlockStart::Container)
    }

    fn start_indented_code(&mut self, _container: BlockId) -> Result<BlockStart, TreeError> {
        if !self.line.indented
            || self.line.blank
            || matches!(self.doc.kind(self.tip)?, BlockKind::Paragraph)
        {
            return Ok(BlockStart::Unmatched);
        }
        self.line.advance_offset(CODE_INDENT, true);
        self.close_unmatched_blocks()?;
        self.add_child(BlockKind::IndentedCode, self.line.offset)?;
        Ok(BlockStart::Leaf)
    }
}
