//! # Snapshot Testing Support
//!
//! Utilities for testing the parser through tree dumps and invariant checks.
//!
//! Tree dumps themselves come from the syntax tree renderer
//! ([`crate::render::syntax_tree`]); tests compare them against `insta`
//! inline snapshots. [`invariants`] checks the structural guarantees every
//! parsed [`Document`](crate::parsing::Document) must uphold.

pub mod invariants;

pub use invariants::check as invariants;
