use crate::parsing::blocks::classify::{CODE_INDENT, LineScan};

/// Block quote syntax: `>` with up to three columns of indentation, followed
/// by one optional space.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: u8 = b'>';

    /// Whether the scanned line carries a block quote marker at its next
    /// non-whitespace position.
    pub fn has_marker(line: &LineScan) -> bool {
        line.indent < CODE_INDENT && line.peek_nonspace() == Some(Self::PREFIX)
    }

    /// Consumes the marker and the optional space after it.
    pub fn consume_marker(line: &mut LineScan) {
        line.advance_next_nonspace();
        line.advance_offset(1, false);
        line.skip_optional_space();
    }
}
