use crate::error::TreeError;

use super::blocks::{Block, BlockId, BlockKind};
use super::refmap::ReferenceMap;

/// Arena holding the block tree of one converted document.
///
/// Block 0 is always the root. Blocks are never removed, so a [`BlockId`]
/// handed out by this arena stays valid for its lifetime.
#[derive(Debug, Clone)]
pub struct Document {
    blocks: Vec<Block>,
    /// Link reference definitions collected while parsing blocks.
    pub references: ReferenceMap,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_root(Block::new(BlockKind::Document, 1, 1))
    }

    /// Builds an arena around an arbitrary root block.
    pub fn with_root(root: Block) -> Self {
        Self {
            blocks: vec![root],
            references: ReferenceMap::default(),
        }
    }

    pub fn root(&self) -> BlockId {
        BlockId(0)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.len() <= 1
    }

    pub fn block(&self, id: BlockId) -> Result<&Block, TreeError> {
        self.blocks.get(id.0).ok_or(TreeError::Dangling(id))
    }

    pub fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, TreeError> {
        self.blocks.get_mut(id.0).ok_or(TreeError::Dangling(id))
    }

    pub fn kind(&self, id: BlockId) -> Result<&BlockKind, TreeError> {
        self.block(id).map(|b| &b.kind)
    }

    pub fn parent(&self, id: BlockId) -> Result<BlockId, TreeError> {
        self.block(id)?.parent.ok_or(TreeError::Orphan(id))
    }

    pub fn children(&self, id: BlockId) -> Result<&[BlockId], TreeError> {
        self.block(id).map(|b| b.children.as_slice())
    }

    pub fn last_child(&self, id: BlockId) -> Result<Option<BlockId>, TreeError> {
        self.block(id).map(|b| b.children.last().copied())
    }

    /// Adds `block` as the last child of `parent` and returns its handle.
    pub fn append_child(&mut self, parent: BlockId, mut block: Block) -> Result<BlockId, TreeError> {
        let id = BlockId(self.blocks.len());
        block.parent = Some(parent);
        self.block_mut(parent)?.children.push(id);
        self.blocks.push(block);
        Ok(id)
    }

    /// Number of ancestors above `id`.
    pub fn depth(&self, id: BlockId) -> usize {
        let mut depth = 0;
        let mut cursor = self.block(id).ok().and_then(|b| b.parent);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.block(parent).ok().and_then(|b| b.parent);
        }
        depth
    }

    /// Pre-order traversal of `id` and everything below it.
    pub fn descendants(&self, id: BlockId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<BlockId>,
}

impl Iterator for Descendants<'_> {
    type Item = BlockId;

    fn next(&mut self) -> Option<BlockId> {
        let id = self.stack.pop()?;
        if let Ok(children) = self.doc.children(id) {
            self.stack.extend(children.iter().rev());
        }
        Some(id)
    }
}
