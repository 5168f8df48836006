//! CommonMark to HTML conversion.
//!
//! A conversion runs in three strict stages:
//!
//! 1. [`parse_blocks`] builds the block tree line by line and collects link
//!    reference definitions.
//! 2. [`parse_inlines`] resolves the text of every paragraph and heading.
//! 3. [`render`] writes the tree as HTML or as a debug syntax tree.
//!
//! [`convert`] and [`convert_str`] run all three.

pub mod convert;
pub mod error;
pub mod parsing;
pub mod render;
pub mod settings;

pub use convert::{convert, convert_str};
pub use error::{Error, NodeRef, Result, Stage, TreeError};
pub use parsing::blocks::{Block, BlockId, BlockKind, SourcePos};
pub use parsing::inline::Inline;
pub use parsing::{Document, LinkReference, ReferenceMap, parse_blocks, parse_inlines};
pub use render::render;
pub use settings::{OutputFormat, RenderHooks, Settings};
