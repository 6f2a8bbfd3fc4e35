//! # Frame Model
//!
//! The data model of the frame knowledge base: named class and instance
//! frames linked by superclass/subclass edges, each carrying slots with
//! value lists and descriptive facets.
//!
//! This crate only holds data and the small mutators that keep a single
//! frame consistent. Cross-frame invariants (symmetric links, inheritance)
//! are maintained by the knowledge base in `frame_engine`.

pub mod frame;
pub mod slot;

pub use frame::*;
pub use slot::*;
