use crate::parsing::blocks::BlockKind;
use crate::parsing::document::Document;
use crate::parsing::inline::Inline;

/// Validates parser output invariants.
///
/// Asserts that:
/// - The root is a document block without a parent
/// - Every child names its parent as the block that lists it
/// - Every block has been finalized
/// - Children appear in source order
/// - No inline sequence holds empty text or two adjacent text nodes
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(doc: &Document) {
    let root = doc.root();
    let root_block = doc.block(root).expect("document has a root block");
    assert_eq!(
        root_block.kind,
        BlockKind::Document,
        "root is not a document block"
    );
    assert_eq!(root_block.parent, None, "root block has a parent");

    for id in doc.descendants(root) {
        let block = doc
            .block(id)
            .unwrap_or_else(|e| panic!("unreachable block in tree: {e}"));
        assert!(!block.open, "block {id} ({}) was never finalized", block.kind.name());

        let mut previous_line = 0;
        for &child in &block.children {
            let child_block = doc
                .block(child)
                .unwrap_or_else(|e| panic!("child of {id} is dangling: {e}"));
            assert_eq!(
                child_block.parent,
                Some(id),
                "block {child} is listed under {id} but names {:?} as parent",
                child_block.parent
            );
            assert!(
                child_block.pos.start_line >= previous_line,
                "block {child} starts on line {} before its previous sibling (line {previous_line})",
                child_block.pos.start_line
            );
            previous_line = child_block.pos.start_line;
        }

        check_inlines(&block.inlines, id);
    }
}

fn check_inlines(inlines: &[Inline], owner: impl std::fmt::Display + Copy) {
    let mut previous_was_text = false;
    for inline in inlines {
        if let Inline::Text(text) = inline {
            assert!(!text.is_empty(), "empty text node in {owner}");
            assert!(!previous_was_text, "adjacent text nodes in {owner}");
            previous_was_text = true;
        } else {
            previous_was_text = false;
        }
        check_inlines(inline.children(), owner);
    }
}
