//! Command language module - TELL/ASK text in, knowledge base effects out.
//!
//! - **lexer**: case-folding tokenizer with line/column spans
//! - **parser**: recursive-descent parser producing [`Statement`]s
//! - **interpreter**: runs statements against a [`KnowledgeBase`](crate::KnowledgeBase)
//! - **answer**: what each statement reports back

mod answer;
mod ast;
mod error;
mod interpreter;
mod lexer;
mod parser;

pub use answer::*;
pub use ast::*;
pub use error::*;
pub use interpreter::*;
pub use lexer::*;
pub use parser::*;
