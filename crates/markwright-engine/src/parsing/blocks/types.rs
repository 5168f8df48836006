use std::fmt;

use crate::parsing::inline::Inline;

use super::kinds::{FenceData, HeadingData, HtmlBlockKind, ListData};

/// Handle of a block inside a [`Document`](crate::parsing::Document) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source range of a block. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourcePos {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Document,
    BlockQuote,
    List(ListData),
    ListItem(ListData),
    Paragraph,
    Heading(HeadingData),
    FencedCode(FenceData),
    IndentedCode,
    ThematicBreak,
    HtmlBlock(HtmlBlockKind),
    /// A paragraph that held nothing but link reference definitions.
    ReferenceDefinition,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Document => "document",
            BlockKind::BlockQuote => "block_quote",
            BlockKind::List(_) => "list",
            BlockKind::ListItem(_) => "list_item",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading(_) => "heading",
            BlockKind::FencedCode(_) | BlockKind::IndentedCode => "code_block",
            BlockKind::ThematicBreak => "thematic_break",
            BlockKind::HtmlBlock(_) => "html_block",
            BlockKind::ReferenceDefinition => "reference_definition",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BlockKind::Document | BlockKind::BlockQuote | BlockKind::List(_) | BlockKind::ListItem(_)
        )
    }

    pub fn can_contain(&self, child: &BlockKind) -> bool {
        match self {
            BlockKind::Document | BlockKind::BlockQuote | BlockKind::ListItem(_) => {
                !matches!(child, BlockKind::ListItem(_))
            }
            BlockKind::List(_) => matches!(child, BlockKind::ListItem(_)),
            _ => false,
        }
    }

    /// Whether unmatched line remainders are appended to this block's content.
    pub fn accepts_lines(&self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph
                | BlockKind::FencedCode(_)
                | BlockKind::IndentedCode
                | BlockKind::HtmlBlock(_)
        )
    }

    /// Leaves whose content goes through inline resolution.
    pub fn has_inlines(&self) -> bool {
        matches!(self, BlockKind::Paragraph | BlockKind::Heading(_))
    }
}

/// A node of the block tree.
#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub parent: Option<BlockId>,
    pub children: Vec<BlockId>,
    /// Still accepting lines. Cleared exactly once by finalization.
    pub open: bool,
    /// Raw text while open; trimmed literal content once finalized.
    pub content: String,
    /// Resolved inline content of paragraphs and headings.
    pub inlines: Vec<Inline>,
    pub pos: SourcePos,
}

impl Block {
    pub fn new(kind: BlockKind, start_line: usize, start_column: usize) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            open: true,
            content: String::new(),
            inlines: Vec::new(),
            pos: SourcePos {
                start_line,
                start_column,
                end_line: start_line,
                end_column: 0,
            },
        }
    }
}
