//! # Parsing
//!
//! The first two stages of a conversion.
//!
//! - [`parse_blocks`] reads normalized lines through a [`reader::LineReader`]
//!   and feeds them to the [`blocks::BlockParser`], producing a finalized
//!   [`Document`] together with its link reference map.
//! - [`parse_inlines`] then resolves the text of every paragraph and heading
//!   into inline nodes, in place.
//!
//! Staging is strict: inline parsing never starts before every block is
//! finalized, so forward references resolve.

pub mod blocks;
pub mod chars;
pub mod document;
pub mod inline;
pub mod reader;
pub mod refmap;
pub mod snapshot;

#[cfg(test)]
mod tests;

use std::io::BufRead;

use log::debug;

use crate::error::{Error, NodeRef, Result, Stage, TreeError};

use blocks::{BlockId, BlockKind, BlockParser};
pub use document::Document;
use reader::LineReader;
pub use refmap::{LinkReference, ReferenceMap};

/// Deepest nesting of container blocks, and separately of inline wrappers,
/// kept in a parsed tree. Markup nested deeper stays as plain content.
pub const MAX_NESTING: usize = 128;

/// Stage 1: builds the block tree from `reader`.
///
/// I/O failures pass through unchanged. A broken tree invariant is reported
/// with the line being processed and the block it was detected on.
pub fn parse_blocks<R: BufRead>(reader: R) -> Result<Document> {
    let mut parser = BlockParser::new();
    for line in LineReader::new(reader) {
        let line = line?;
        parser.incorporate_line(&line.text).map_err(|e| {
            Error::conversion(
                Stage::Blocks,
                format!("An error occurred while parsing line {}", line.number),
            )
            .with_node(e.block().map(NodeRef::Block))
            .with_line(line.number)
            .with_source(e)
        })?;
    }

    let lines = parser.line_number();
    let doc = parser.finish().map_err(|e| {
        Error::conversion(
            Stage::Blocks,
            "An error occurred while finalizing open containers.",
        )
        .with_node(e.block().map(NodeRef::Block))
        .with_line(lines)
        .with_source(e)
    })?;
    debug!(
        "parsed {lines} lines into {} blocks with {} link references",
        doc.len(),
        doc.references.len()
    );
    Ok(doc)
}

/// Stage 2: resolves the inline content of every paragraph and heading.
pub fn parse_inlines(doc: &mut Document) -> Result<()> {
    let root = doc.root();
    let root_kind = doc
        .kind(root)
        .map_err(|e| inline_error(root, e))?
        .name();
    if root_kind != BlockKind::Document.name() {
        return Err(inline_error(root, TreeError::NotDocument(root_kind)));
    }

    let leaves: Vec<BlockId> = doc
        .descendants(root)
        .filter(|&id| doc.kind(id).is_ok_and(BlockKind::has_inlines))
        .collect();
    let references = std::mem::take(&mut doc.references);
    let result: Result<()> = leaves.iter().try_for_each(|&id| {
        let block = doc.block_mut(id).map_err(|e| inline_error(id, e))?;
        block.inlines = inline::parse_inline(&block.content, &references);
        Ok(())
    });
    doc.references = references;
    result?;

    debug!("resolved inline content of {} leaf blocks", leaves.len());
    Ok(())
}

fn inline_error(leaf: BlockId, source: TreeError) -> Error {
    Error::conversion(
        Stage::Inlines,
        format!("An error occurred during {}", Stage::Inlines),
    )
    .with_node(Some(NodeRef::Inline { leaf }))
    .with_source(source)
}
