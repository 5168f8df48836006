//! Integration tests for the parsing stages.
//!
//! Every parsed document is run through the structural invariant checker
//! before its shape is asserted.

use pretty_assertions::assert_eq;

use crate::error::{NodeRef, Stage};
use crate::parsing::blocks::{Block, BlockKind};
use crate::parsing::inline::Inline;
use crate::parsing::{Document, parse_blocks, parse_inlines, snapshot};

fn parse(md: &str) -> Document {
    let mut doc = parse_blocks(md.as_bytes()).unwrap();
    parse_inlines(&mut doc).unwrap();
    snapshot::invariants(&doc);
    doc
}

fn kinds(doc: &Document) -> Vec<&'static str> {
    doc.descendants(doc.root())
        .map(|id| doc.kind(id).unwrap().name())
        .collect()
}

fn inlines_of<'a>(doc: &'a Document, name: &str) -> &'a [Inline] {
    doc.descendants(doc.root())
        .map(|id| doc.block(id).unwrap())
        .find(|b| b.kind.name() == name)
        .map(|b| b.inlines.as_slice())
        .unwrap_or_default()
}

/// Link references defined after their use still resolve.
#[test]
fn forward_references_resolve() {
    let doc = parse("[a]\n\n[a]: /url \"t\"\n");
    assert_eq!(kinds(&doc), ["document", "paragraph", "reference_definition"]);
    assert_eq!(
        inlines_of(&doc, "paragraph"),
        [Inline::Link {
            destination: "/url".into(),
            title: "t".into(),
            children: vec![Inline::Text("a".into())],
        }]
    );
}

/// Lazy continuation keeps a paragraph inside its block quote.
#[test]
fn lazy_continuation_stays_in_quote() {
    let doc = parse("> foo\nbar\n");
    assert_eq!(kinds(&doc), ["document", "block_quote", "paragraph"]);
    assert_eq!(
        inlines_of(&doc, "paragraph"),
        [
            Inline::Text("foo".into()),
            Inline::SoftBreak,
            Inline::Text("bar".into()),
        ]
    );
}

/// Code spans are raw zones: emphasis cannot close inside them.
#[test]
fn code_spans_suppress_emphasis() {
    let doc = parse("*a `b* c`\n");
    assert_eq!(
        inlines_of(&doc, "paragraph"),
        [Inline::Text("*a ".into()), Inline::Code("b* c".into())]
    );
}

/// Headings resolve inline content like paragraphs do.
#[test]
fn heading_inlines() {
    let doc = parse("## a **b**\n");
    assert_eq!(
        inlines_of(&doc, "heading"),
        [
            Inline::Text("a ".into()),
            Inline::Strong(vec![Inline::Text("b".into())]),
        ]
    );
}

/// Code blocks keep their literal text and get no inlines.
#[test]
fn code_blocks_have_no_inlines() {
    let doc = parse("```\n*x*\n```\n");
    let code = doc
        .descendants(doc.root())
        .map(|id| doc.block(id).unwrap())
        .find(|b| b.kind.name() == "code_block")
        .unwrap();
    assert_eq!(code.content, "*x*\n");
    assert!(code.inlines.is_empty());
}

/// Unclosed constructs become plain text.
#[test]
fn unclosed_constructs_become_text() {
    let doc = parse("[unclosed and `also unclosed *too\n");
    assert_eq!(
        inlines_of(&doc, "paragraph"),
        [Inline::Text("[unclosed and `also unclosed *too".into())]
    );
}

/// An empty document has only its root.
#[test]
fn empty_document() {
    let doc = parse("");
    assert_eq!(kinds(&doc), ["document"]);
}

/// Blank lines don't produce blocks.
#[test]
fn blank_lines_only() {
    let doc = parse("\n  \n\t\n");
    assert_eq!(kinds(&doc), ["document"]);
}

#[test]
fn references_survive_inline_parsing() {
    let doc = parse("[x]: /a\n[y]: /b\n");
    assert_eq!(doc.references.len(), 2);
    assert_eq!(doc.references.get("Y").unwrap().destination, "/b");
}

#[test]
fn inline_stage_rejects_non_document_root() {
    let mut doc = Document::with_root(Block::new(BlockKind::Paragraph, 1, 1));
    let err = parse_inlines(&mut doc).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Inlines));
    assert_eq!(
        err.node(),
        Some(NodeRef::Inline {
            leaf: doc.root()
        })
    );
}

#[test]
fn io_failure_passes_through_block_stage() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk gone"))
        }
    }
    let err = parse_blocks(std::io::BufReader::new(Broken)).unwrap_err();
    assert!(matches!(err, crate::Error::Io(_)));
    assert_eq!(err.to_string(), "disk gone");
}
