//! # Inline Kinds
//!
//! Inline constructs that own their syntax: each module knows its delimiters
//! and how to recognize the construct at the cursor. The parser calls these;
//! it never hardcodes their patterns.
//!
//! - **`CodeSpan`**: backtick runs, a raw zone that suppresses other parsing
//! - **`Entity`**: character references, plus `unescape_string`
//! - **`Autolink`**: `<scheme:...>` and `<user@host>`
//! - **`RawHtml`**: inline tags, comments, declarations and CDATA

pub mod autolink;
pub mod code_span;
pub mod entity;
pub mod raw_html;

pub use autolink::{Autolink, AutolinkMatch};
pub use code_span::{BacktickIndex, CodeSpan};
pub use entity::{Entity, unescape_string};
pub use raw_html::RawHtml;
