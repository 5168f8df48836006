//! # Inline Parsing
//!
//! Resolves the text of one finalized leaf block (paragraph or heading) into
//! a tree of [`Inline`] nodes.
//!
//! ## Architecture
//!
//! Inline parsing only starts once every block is finalized, so that link
//! references defined anywhere in the document resolve.
//!
//! A single left-to-right pass over the text appends working nodes to an
//! [`arena::Arena`]:
//! - Code spans, autolinks, raw HTML and entities are recognized on the spot
//!   and bind tighter than anything else
//! - Runs of `*` and `_` become text nodes recorded on the delimiter stack
//! - `[` and `![` become text nodes recorded on the bracket stack; each `]`
//!   resolves the nearest bracket into a link or image, or leaves it literal
//!
//! Emphasis is resolved inside each link as it closes, and once more over the
//! whole block at the end. The arena is then converted into owned nodes.
//!
//! ## Modules
//!
//! - **`types`**: the resolved [`Inline`] enum
//! - **`kinds`**: constructs with their own syntax (code spans, entities,
//!   autolinks, raw HTML)
//! - **`cursor`**: byte [`cursor::Cursor`] over the block text
//! - **`arena`**: the doubly linked working tree
//! - **`delimiters`**: the delimiter stack and emphasis resolution
//! - **`links`**: brackets, destinations, titles and reference definitions
//! - **`parser`**: [`parse_inline`], the main entry point

pub mod arena;
pub mod cursor;
pub mod delimiters;
pub mod kinds;
pub mod links;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::{Inline, plain_text};
