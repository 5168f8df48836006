use crate::parsing::inline::links::scan_reference_definition;
use crate::parsing::refmap::ReferenceMap;

/// Paragraphs have no delimiters: they are the default leaf block when no
/// other opener matches. Their content may begin with link reference
/// definitions.
pub struct Paragraph;

impl Paragraph {
    /// Moves leading link reference definitions out of `content` and into
    /// `refs`. Returns the byte length of the definitions consumed.
    pub fn take_reference_definitions(content: &str, refs: &mut ReferenceMap) -> usize {
        let mut consumed = 0;
        while content[consumed..].starts_with('[') {
            let Some(def) = scan_reference_definition(&content[consumed..]) else {
                break;
            };
            log::trace!("reference definition [{}] -> {}", def.label, def.reference.destination);
            refs.insert(&def.label, def.reference);
            consumed += def.consumed;
        }
        consumed
    }
}
