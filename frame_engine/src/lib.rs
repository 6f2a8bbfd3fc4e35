//! # Frame Engine
//!
//! A frame-based knowledge base driven by a small TELL/ASK command language.
//! Frames live in disjoint class and instance tables, linked by symmetric
//! superclass/subclass edges, and carry named slots with values and facets.
//!
//! ## Core Components
//!
//! - **knowledge_base**: Frame tables, link maintenance, slot inheritance and hooks
//! - **command**: Lexer, parser and interpreter for TELL/ASK statements
//! - **config**: TOML-backed knowledge base settings
//!
//! ## Example
//!
//! ```
//! use frame_engine::{interpret, KnowledgeBase};
//!
//! let mut kb = KnowledgeBase::new();
//! let responses = interpret(&mut kb, "TELL ADD CLASS Dog {Animal} ASK Dog SUPERS").unwrap();
//! assert_eq!(responses[1].to_string(), "{ANIMAL}");
//! ```

pub mod command;
pub mod config;
pub mod knowledge_base;

pub use command::*;
pub use config::*;
pub use knowledge_base::*;

pub use frame_model;
