//! # Rendering
//!
//! The last stage of a conversion: walks a fully parsed [`Document`] and
//! writes it to a [`fmt::Write`] sink, either as HTML ([`html`]) or as an
//! indented debug tree ([`syntax_tree`]), as chosen by
//! [`Settings::output_format`].

pub mod escape;
pub mod html;
pub mod syntax_tree;

use std::fmt;

use log::debug;

use crate::error::{Error, NodeRef, Result, Stage, TreeError};
use crate::parsing::Document;
use crate::parsing::blocks::BlockKind;
use crate::settings::{OutputFormat, Settings};

/// Why a renderer stopped.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RenderFault {
    #[error("the output sink rejected a write")]
    Sink(#[from] fmt::Error),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Stage 3: serializes `doc` into `out`.
///
/// Rendering never mutates the tree, so rendering the same document twice
/// yields the same output.
pub fn render<W: fmt::Write>(doc: &Document, settings: &Settings, out: &mut W) -> Result<()> {
    let root = doc.root();
    let kind = doc.kind(root).map_err(|e| render_error(e.into()))?;
    if *kind != BlockKind::Document {
        return Err(render_error(TreeError::NotDocument(kind.name()).into()));
    }

    match settings.output_format {
        OutputFormat::Html => html::HtmlRenderer::new(doc, settings, out).render(),
        OutputFormat::SyntaxTree => syntax_tree::TreeRenderer::new(doc, settings, out).render(),
    }
    .map_err(render_error)?;
    debug!("rendered {} blocks as {}", doc.len(), settings.output_format);
    Ok(())
}

fn render_error(fault: RenderFault) -> Error {
    let node = match &fault {
        RenderFault::Tree(e) => e.block().map(NodeRef::Block),
        RenderFault::Sink(_) => None,
    };
    Error::conversion(Stage::Render, format!("An error occurred during {}", Stage::Render))
        .with_node(node)
        .with_source(fault)
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::parsing::blocks::Block;

    /// A sink that refuses every write.
    struct Closed;

    impl fmt::Write for Closed {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn one_paragraph() -> Document {
        let mut doc = crate::parsing::parse_blocks("hi\n".as_bytes()).unwrap();
        crate::parsing::parse_inlines(&mut doc).unwrap();
        doc
    }

    #[test]
    fn sink_failures_are_render_errors() {
        let err = render(&one_paragraph(), &Settings::default(), &mut Closed).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Render));
        assert_eq!(err.to_string(), "An error occurred during rendering");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("the output sink rejected a write")
        );
    }

    #[test]
    fn non_document_root_is_rejected() {
        let doc = Document::with_root(Block::new(BlockKind::Paragraph, 1, 1));
        let mut out = String::new();
        let err = render(&doc, &Settings::default(), &mut out).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Render));
        assert!(out.is_empty());
    }

    #[test]
    fn rendering_twice_is_identical() {
        let doc = one_paragraph();
        let mut first = String::new();
        let mut second = String::new();
        render(&doc, &Settings::default(), &mut first).unwrap();
        render(&doc, &Settings::default(), &mut second).unwrap();
        assert_eq!(first, "<p>hi</p>\n");
        assert_eq!(first, second);
    }
}
