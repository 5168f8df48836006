//! Block kinds that own their syntax: each module knows its markers and
//! how to recognize them on a scanned line. The block parser dispatches to
//! these and never hardcodes delimiters itself.

pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod html_block;
pub mod indented_code;
pub mod list_item;
pub mod paragraph;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceData, FenceKind, FenceOpen};
pub use heading::{AtxOpen, Heading, HeadingData};
pub use html_block::{HtmlBlock, HtmlBlockKind};
pub use indented_code::IndentedCode;
pub use list_item::{ListData, ListItem, ListType};
pub use paragraph::Paragraph;
pub use thematic_break::ThematicBreak;
