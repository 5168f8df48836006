//! # Block Parsing
//!
//! Line-by-line construction of the block tree.
//!
//! ## Per-line phases
//!
//! 1. **Continuation** (`containers`): descend the chain of open blocks,
//!    consuming each one's prefix (`>`, list item indentation, code
//!    indentation) until one fails to match.
//! 2. **Block starts** (`open`): try the openers in fixed priority order
//!    (block quote, ATX heading, fence, HTML, setext underline, thematic
//!    break, list item, indented code) at the point where matching stopped.
//! 3. **Text** (`builder`): the rest of the line goes to the innermost block,
//!    as a lazy paragraph continuation, or into a new paragraph.
//!
//! ## Modules
//!
//! - **`types`**: `Block`, `BlockKind`, `BlockId`, `SourcePos`
//! - **`kinds`**: syntax owned by each block kind (markers, fences, list markers)
//! - **`classify`**: `LineScan`, the column-aware cursor over the current line
//! - **`containers`**: continuation rules
//! - **`open`**: block start rules
//! - **`builder`**: `BlockParser`, which ties the phases together and
//!   finalizes blocks as they close
//!
//! ## Key Invariants
//!
//! - Every block but the root has exactly one parent and appears once in
//!   its parent's children, in source order.
//! - A block is finalized exactly once; finalizing closes children first.
//! - Fenced code, indented code and HTML blocks take their lines verbatim.

pub mod builder;
pub mod classify;
pub mod containers;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockParser;
pub use classify::LineScan;
pub use types::{Block, BlockId, BlockKind, SourcePos};
