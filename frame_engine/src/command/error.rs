//! Syntax-tier error types.
//!
//! Lexing and parsing failures are hard errors: a batch containing one
//! malformed statement is rejected before any statement runs.

use thiserror::Error;

use super::lexer::{Span, Token};

/// A lexical error with location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    #[error("unterminated string literal starting at {span}")]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } | LexError::UnterminatedString { span } => *span,
        }
    }
}

/// A parse error carrying the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: Token },

    #[error("unexpected end of input at {span}, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },
}

impl ParseError {
    pub fn unexpected_token(expected: impl Into<String>, found: Token) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { found, .. } => found.span,
            ParseError::UnexpectedEof { span, .. } => *span,
        }
    }
}

/// Result type for lexing operations.
pub type LexResult<T> = Result<T, LexError>;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
