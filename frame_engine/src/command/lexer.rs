//! Lexer (tokenizer) for the TELL/ASK command language.
//!
//! Input is upper-cased before scanning, so keywords and literals are
//! case-insensitive. Tokens are produced one at a time on demand.

use super::error::{LexError, LexResult};

/// Source location for error reporting.
///
/// `start` and `end` are byte offsets into the upper-cased source, which can
/// differ from the original text when case folding changes a character's
/// length (`ß` folds to `SS`). `line` and `column` count characters of the
/// upper-cased source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Statement verbs
    Tell,
    Ask,
    View,
    Add,
    Delete,
    Update,

    // Structural keywords
    Class,
    Instance,
    Name,
    Type,
    To,
    Super,
    Slot,
    Facet,
    AddValue,
    DeleteValue,

    // Query keywords
    Kb,
    Supers,
    Subs,
    Slots,
    TypeOf,
    SubbedBy,

    // Symbols
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;

    /// Bare or quoted literal.
    Str(String),
}

impl TokenKind {
    /// Look up a reserved word. `word` must already be upper case.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "TELL" => TokenKind::Tell,
            "ASK" => TokenKind::Ask,
            "VIEW" => TokenKind::View,
            "ADD" => TokenKind::Add,
            "DELETE" => TokenKind::Delete,
            "UPDATE" => TokenKind::Update,
            "CLASS" => TokenKind::Class,
            "INSTANCE" => TokenKind::Instance,
            "NAME" => TokenKind::Name,
            "TYPE" => TokenKind::Type,
            "TO" => TokenKind::To,
            "SUPER" => TokenKind::Super,
            "SLOT" => TokenKind::Slot,
            "FACET" => TokenKind::Facet,
            "ADD_VALUE" => TokenKind::AddValue,
            "DELETE_VALUE" => TokenKind::DeleteValue,
            "KB" => TokenKind::Kb,
            "SUPERS" => TokenKind::Supers,
            "SUBS" => TokenKind::Subs,
            "SLOTS" => TokenKind::Slots,
            "TYPEOF" => TokenKind::TypeOf,
            "SUBBEDBY" => TokenKind::SubbedBy,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &str {
        match self {
            TokenKind::Tell => "TELL",
            TokenKind::Ask => "ASK",
            TokenKind::View => "VIEW",
            TokenKind::Add => "ADD",
            TokenKind::Delete => "DELETE",
            TokenKind::Update => "UPDATE",
            TokenKind::Class => "CLASS",
            TokenKind::Instance => "INSTANCE",
            TokenKind::Name => "NAME",
            TokenKind::Type => "TYPE",
            TokenKind::To => "TO",
            TokenKind::Super => "SUPER",
            TokenKind::Slot => "SLOT",
            TokenKind::Facet => "FACET",
            TokenKind::AddValue => "ADD_VALUE",
            TokenKind::DeleteValue => "DELETE_VALUE",
            TokenKind::Kb => "KB",
            TokenKind::Supers => "SUPERS",
            TokenKind::Subs => "SUBS",
            TokenKind::Slots => "SLOTS",
            TokenKind::TypeOf => "TYPEOF",
            TokenKind::SubbedBy => "SUBBEDBY",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Str(value) => value,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Str(value) => write!(f, "literal \"{}\"", value),
            other => write!(f, "'{}'", other.name()),
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

/// Lexer state.
///
/// Forward-only: once a token is produced it cannot be re-read. Scanning the
/// same text again takes a fresh lexer.
pub struct Lexer {
    source: String,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            source: input.to_uppercase(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> LexResult<Option<Token>> {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(None);
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '"' => self.scan_quoted(start, start_line, start_col)?,
            c if is_literal_char(c) => self.scan_bare(start),
            _ => {
                let span = self.span_from(start, start_line, start_col);
                self.pos = self.source.len();
                return Err(LexError::UnexpectedChar { ch: c, span });
            }
        };

        Ok(Some(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        )))
    }

    /// The current end-of-input position, for error reporting.
    pub fn eof_span(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    fn scan_bare(&mut self, start: usize) -> TokenKind {
        while self.peek_char().is_some_and(is_literal_char) {
            self.next_char();
        }
        let word = &self.source[start..self.pos];
        TokenKind::keyword(word).unwrap_or_else(|| TokenKind::Str(word.to_string()))
    }

    /// Quoted literals are never keywords and may hold any character but `"`.
    fn scan_quoted(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> LexResult<TokenKind> {
        let content_start = self.pos;
        loop {
            match self.next_char() {
                Some('"') => {
                    let value = &self.source[content_start..self.pos - 1];
                    return Ok(TokenKind::Str(value.to_string()));
                }
                Some(_) => {}
                None => {
                    return Err(LexError::UnterminatedString {
                        span: self.span_from(start, start_line, start_col),
                    });
                }
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn is_literal_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
