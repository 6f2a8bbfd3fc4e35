//! Knowledge Base module - the frame graph and its invariant maintenance.
//!
//! The knowledge base consists of:
//! - **Frame tables**: disjoint class and instance tables keyed by name
//! - **Outcomes**: why a mutation did or did not apply
//! - **Hooks**: post-mutation side effects keyed on (frame predicate, slot)

mod graph;
mod hooks;
mod outcome;

pub use graph::*;
pub use hooks::*;
pub use outcome::*;
