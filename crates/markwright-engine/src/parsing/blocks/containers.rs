use crate::error::TreeError;
use crate::parsing::chars::is_space_or_tab;

use super::builder::BlockParser;
use super::classify::CODE_INDENT;
use super::kinds::{BlockQuote, CodeFence};
use super::types::{BlockId, BlockKind};

/// Outcome of matching an open block against the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The block continues; its prefix has been consumed.
    Matched,
    /// The block does not continue on this line.
    NotMatched,
    /// The line was fully handled (a closing code fence).
    LineConsumed,
}

impl BlockParser {
    /// Applies the continuation rule of the open block `id` to the current
    /// line, consuming its prefix when it matches.
    pub(super) fn continues(&mut self, id: BlockId) -> Result<Continuation, TreeError> {
        let kind = self.doc.kind(id)?.clone();
        let line = &mut self.line;
        let outcome = match kind {
            BlockKind::Document | BlockKind::List(_) => Continuation::Matched,
            BlockKind::BlockQuote => {
                if BlockQuote::has_marker(line) {
                    BlockQuote::consume_marker(line);
                    Continuation::Matched
                } else {
                    Continuation::NotMatched
                }
            }
            BlockKind::ListItem(data) => {
                let content_indent = data.marker_offset + data.padding;
                if line.blank {
                    if self.doc.children(id)?.is_empty() {
                        // An item can begin with at most one blank line.
                        Continuation::NotMatched
                    } else {
                        line.advance_next_nonspace();
                        Continuation::Matched
                    }
                } else if line.indent >= content_indent {
                    line.advance_offset(content_indent, true);
                    Continuation::Matched
                } else {
                    Continuation::NotMatched
                }
            }
            BlockKind::FencedCode(fence) => {
                if line.indent < CODE_INDENT && CodeFence::closes(line.rest_from_nonspace(), &fence)
                {
                    self.last_line_length = line.text.chars().count();
                    self.finalize(id, self.line_number)?;
                    Continuation::LineConsumed
                } else {
                    let mut strip = fence.offset;
                    while strip > 0 && line.peek().is_some_and(is_space_or_tab) {
                        line.advance_offset(1, true);
                        strip -= 1;
                    }
                    Continuation::Matched
                }
            }
            BlockKind::IndentedCode => {
                if line.indent >= CODE_INDENT {
                    line.advance_offset(CODE_INDENT, true);
                    Continuation::Matched
                } else if line.blank {
                    line.advance_next_nonspace();
                    Continuation::Matched
                } else {
                    Continuation::NotMatched
                }
            }
            BlockKind::HtmlBlock(html) => {
                if line.blank && html.ends_at_blank_line() {
                    Continuation::NotMatched
                } else {
                    Continuation::Matched
                }
            }
            BlockKind::Paragraph => {
                if line.blank {
                    Continuation::NotMatched
                } else {
                    Continuation::Matched
                }
            }
            BlockKind::Heading(_)
            | BlockKind::ThematicBreak
            | BlockKind::ReferenceDefinition => Continuation::NotMatched,
        };
        Ok(outcome)
    }
}
