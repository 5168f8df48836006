use std::fmt;

use crate::parsing::blocks::BlockId;

/// Pipeline stage that raised a [`Error::Conversion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Stage 1: line incorporation and block finalization.
    Blocks,
    /// Stage 2: inline resolution of leaf blocks.
    Inlines,
    /// Stage 3: serialization of the finished tree.
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Blocks => "block parsing",
            Stage::Inlines => "inline parsing",
            Stage::Render => "rendering",
        })
    }
}

/// The tree node a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Block(BlockId),
    /// Inline content of the given leaf block.
    Inline { leaf: BlockId },
}

/// Violations of the block tree's structural invariants.
///
/// These never come from malformed input; they indicate a corrupt tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("block handle {0} does not exist")]
    Dangling(BlockId),
    #[error("block {0} has no parent")]
    Orphan(BlockId),
    #[error("block {0} was already finalized")]
    AlreadyFinalized(BlockId),
    #[error("no open block can contain a {0}")]
    NoContainer(&'static str),
    #[error("expected a document root, found a {0}")]
    NotDocument(&'static str),
}

impl TreeError {
    /// The block the violation was detected on, when there is one.
    pub fn block(&self) -> Option<BlockId> {
        match self {
            TreeError::Dangling(id) | TreeError::Orphan(id) | TreeError::AlreadyFinalized(id) => {
                Some(*id)
            }
            TreeError::NoContainer(_) | TreeError::NotDocument(_) => None,
        }
    }
}

/// The single failure type of every conversion entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading the source or writing the output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A stage failed for a reason other than I/O.
    #[error("{message}")]
    Conversion {
        stage: Stage,
        message: String,
        node: Option<NodeRef>,
        line: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    pub(crate) fn conversion(stage: Stage, message: impl Into<String>) -> Self {
        Error::Conversion {
            stage,
            message: message.into(),
            node: None,
            line: None,
            source: None,
        }
    }

    pub(crate) fn with_node(mut self, node: Option<NodeRef>) -> Self {
        if let Error::Conversion { node: slot, .. } = &mut self {
            *slot = node;
        }
        self
    }

    pub(crate) fn with_line(mut self, line: usize) -> Self {
        if let Error::Conversion { line: slot, .. } = &mut self {
            *slot = Some(line);
        }
        self
    }

    pub(crate) fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        if let Error::Conversion { source: slot, .. } = &mut self {
            *slot = Some(Box::new(source));
        }
        self
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Conversion { stage, .. } => Some(*stage),
            Error::Io(_) => None,
        }
    }

    pub fn node(&self) -> Option<NodeRef> {
        match self {
            Error::Conversion { node, .. } => *node,
            Error::Io(_) => None,
        }
    }

    /// Source line being processed when block parsing failed.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Conversion { line, .. } => *line,
            Error::Io(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn conversion_error_carries_context() {
        let err = Error::conversion(Stage::Blocks, "An error occurred while parsing line 3")
            .with_node(Some(NodeRef::Block(BlockId(2))))
            .with_line(3)
            .with_source(TreeError::Orphan(BlockId(2)));

        assert_eq!(err.to_string(), "An error occurred while parsing line 3");
        assert_eq!(err.stage(), Some(Stage::Blocks));
        assert_eq!(err.node(), Some(NodeRef::Block(BlockId(2))));
        assert_eq!(err.line(), Some(3));
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("block #2 has no parent")
        );
    }

    #[test]
    fn io_errors_pass_through_unchanged() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = Error::from(io);
        assert!(matches!(&err, Error::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe));
        assert_eq!(err.to_string(), "pipe closed");
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn tree_error_reports_its_block() {
        assert_eq!(TreeError::Dangling(BlockId(7)).block(), Some(BlockId(7)));
        assert_eq!(TreeError::NoContainer("list item").block(), None);
    }
}
