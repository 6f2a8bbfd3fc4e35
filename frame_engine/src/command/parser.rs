//! Recursive-descent parser for the command language.
//!
//! The parser pulls tokens from the lexer with one token of lookahead.
//! There is no recovery: the first error aborts the whole parse.

use frame_model::{Facet, FrameType};

use super::ast::*;
use super::error::{ParseError, ParseResult};
use super::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    lexer: Lexer,
    lookahead: Option<Token>,
}

impl Parser {
    /// Create a new parser over source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(input);
        let lookahead = lexer.next_token()?;
        Ok(Self { lexer, lookahead })
    }

    /// Parse every statement in the input.
    pub fn parse_program(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon)? {}
            let Some(token) = self.lookahead.clone() else {
                break;
            };
            let statement = match token.kind {
                TokenKind::Tell => self.parse_tell()?,
                TokenKind::Ask => self.parse_ask()?,
                TokenKind::View => self.parse_view()?,
                _ => return Err(ParseError::unexpected_token("TELL or ASK", token)),
            };
            statements.push(statement);
        }
        Ok(statements)
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    fn advance(&mut self) -> ParseResult<Option<Token>> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.lookahead, next))
    }

    fn check(&self, kind: &TokenKind) -> bool {
        matches!(&self.lookahead, Some(token) if token.kind == *kind)
    }

    fn peek_is_literal(&self) -> bool {
        matches!(&self.lookahead, Some(Token { kind: TokenKind::Str(_), .. }))
    }

    /// Consume the lookahead if it is `kind`.
    fn eat(&mut self, kind: &TokenKind) -> ParseResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match &self.lookahead {
            Some(token) => ParseError::unexpected_token(expected, token.clone()),
            None => ParseError::unexpected_eof(expected, self.lexer.eof_span()),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.eat(&kind)? {
            Ok(())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    fn expect_literal(&mut self, expected: &str) -> ParseResult<String> {
        match self.lookahead.take() {
            Some(Token {
                kind: TokenKind::Str(value),
                ..
            }) => {
                self.lookahead = self.lexer.next_token()?;
                Ok(value)
            }
            other => {
                self.lookahead = other;
                Err(self.unexpected(expected))
            }
        }
    }

    fn expect_name(&mut self) -> ParseResult<String> {
        self.expect_literal("name")
    }

    fn expect_frame_type(&mut self) -> ParseResult<FrameType> {
        if self.eat(&TokenKind::Class)? {
            Ok(FrameType::Class)
        } else if self.eat(&TokenKind::Instance)? {
            Ok(FrameType::Instance)
        } else {
            Err(self.unexpected("CLASS or INSTANCE"))
        }
    }

    /// Parse `open element, element, ... close`. Empty lists are allowed,
    /// a trailing comma is not.
    fn list<T>(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        mut element: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        self.expect(open)?;
        let mut items = Vec::new();
        if self.eat(&close)? {
            return Ok(items);
        }
        loop {
            items.push(element(&mut *self)?);
            if self.eat(&close)? {
                return Ok(items);
            }
            self.expect(TokenKind::Comma)?;
        }
    }
}

// ==================== TELL ====================

impl Parser {
    fn parse_tell(&mut self) -> ParseResult<Statement> {
        self.expect(TokenKind::Tell)?;

        let tell = if self.eat(&TokenKind::Add)? {
            TellStmt::AddFrame(self.parse_add_frame()?)
        } else if self.eat(&TokenKind::Delete)? {
            TellStmt::DeleteFrame {
                name: self.expect_name()?,
            }
        } else if self.eat(&TokenKind::Update)? {
            let name = self.expect_name()?;
            let update = self.parse_frame_update()?;
            TellStmt::UpdateFrame { name, update }
        } else {
            return Err(self.unexpected("ADD, DELETE or UPDATE"));
        };

        Ok(Statement::Tell(tell))
    }

    fn parse_add_frame(&mut self) -> ParseResult<AddFrameStmt> {
        let frame_type = self.expect_frame_type()?;
        let name = self.expect_name()?;

        let superclasses = if self.check(&TokenKind::LBrace) {
            self.list(TokenKind::LBrace, TokenKind::RBrace, Self::expect_name)?
        } else {
            Vec::new()
        };

        let slots = if self.check(&TokenKind::LBracket) {
            self.list(TokenKind::LBracket, TokenKind::RBracket, Self::parse_slot_decl)?
        } else {
            Vec::new()
        };

        Ok(AddFrameStmt {
            frame_type,
            name,
            superclasses,
            slots,
        })
    }

    /// `name [: [value]] [{facet, ...}]`
    fn parse_slot_decl(&mut self) -> ParseResult<SlotDecl> {
        let name = self.expect_name()?;

        let value = if self.eat(&TokenKind::Colon)? && self.peek_is_literal() {
            Some(self.expect_literal("value")?)
        } else {
            None
        };

        let facets = if self.check(&TokenKind::LBrace) {
            self.list(TokenKind::LBrace, TokenKind::RBrace, Self::parse_facet_decl)?
        } else {
            Vec::new()
        };

        Ok(SlotDecl {
            name,
            value,
            facets,
        })
    }

    /// `NAME` or `NAME(arg, ...)`
    fn parse_facet_decl(&mut self) -> ParseResult<FacetDecl> {
        let facet = Facet::from_name(&self.expect_literal("facet")?);
        let args = if self.check(&TokenKind::LParen) {
            self.list(TokenKind::LParen, TokenKind::RParen, |parser| {
                parser.expect_literal("facet argument")
            })?
        } else {
            Vec::new()
        };
        Ok(FacetDecl { facet, args })
    }

    fn parse_frame_update(&mut self) -> ParseResult<FrameUpdate> {
        if self.eat(&TokenKind::Name)? {
            self.expect(TokenKind::To)?;
            return Ok(FrameUpdate::Rename {
                new_name: self.expect_name()?,
            });
        }

        if self.eat(&TokenKind::Type)? {
            self.expect(TokenKind::To)?;
            return Ok(FrameUpdate::Retype {
                frame_type: self.expect_frame_type()?,
            });
        }

        if self.eat(&TokenKind::Add)? {
            return if self.eat(&TokenKind::Super)? {
                Ok(FrameUpdate::AddSuper {
                    name: self.expect_name()?,
                })
            } else if self.eat(&TokenKind::Slot)? {
                Ok(FrameUpdate::AddSlot(self.parse_slot_decl()?))
            } else {
                Err(self.unexpected("SUPER or SLOT"))
            };
        }

        if self.eat(&TokenKind::Delete)? {
            return if self.eat(&TokenKind::Super)? {
                Ok(FrameUpdate::DeleteSuper {
                    name: self.expect_name()?,
                })
            } else if self.eat(&TokenKind::Slot)? {
                Ok(FrameUpdate::DeleteSlot {
                    name: self.expect_name()?,
                })
            } else {
                Err(self.unexpected("SUPER or SLOT"))
            };
        }

        if self.eat(&TokenKind::Update)? {
            self.expect(TokenKind::Slot)?;
            let slot = self.expect_name()?;
            let edit = self.parse_slot_edit()?;
            return Ok(FrameUpdate::Slot { slot, edit });
        }

        Err(self.unexpected("NAME, TYPE, ADD, DELETE or UPDATE"))
    }

    fn parse_slot_edit(&mut self) -> ParseResult<SlotEdit> {
        if self.eat(&TokenKind::Colon)? {
            return Ok(SlotEdit::SetValue(self.expect_literal("value")?));
        }

        if self.eat(&TokenKind::Add)? {
            self.expect(TokenKind::Facet)?;
            return Ok(SlotEdit::AddFacet(self.parse_facet_decl()?));
        }

        if self.eat(&TokenKind::Delete)? {
            self.expect(TokenKind::Facet)?;
            return Ok(SlotEdit::DeleteFacet(self.parse_facet_decl()?.facet));
        }

        if self.eat(&TokenKind::AddValue)? {
            return Ok(SlotEdit::AddValue(self.expect_literal("value")?));
        }

        if self.eat(&TokenKind::DeleteValue)? {
            return Ok(SlotEdit::DeleteValue(self.expect_literal("value")?));
        }

        Err(self.unexpected("':', ADD FACET, DELETE FACET, ADD_VALUE or DELETE_VALUE"))
    }
}

// ==================== ASK ====================

impl Parser {
    fn parse_ask(&mut self) -> ParseResult<Statement> {
        self.expect(TokenKind::Ask)?;

        if self.eat(&TokenKind::Kb)? {
            return Ok(Statement::Ask(AskStmt::Kb));
        }

        let name = self.expect_name()?;
        let query = self.parse_frame_query()?;
        Ok(Statement::Ask(AskStmt::Frame { name, query }))
    }

    /// `VIEW` alone dumps the knowledge base; `VIEW name` describes a frame.
    fn parse_view(&mut self) -> ParseResult<Statement> {
        self.expect(TokenKind::View)?;

        let ask = if self.peek_is_literal() {
            AskStmt::Frame {
                name: self.expect_name()?,
                query: FrameQuery::Describe,
            }
        } else {
            AskStmt::Kb
        };
        Ok(Statement::Ask(ask))
    }

    fn parse_frame_query(&mut self) -> ParseResult<FrameQuery> {
        let Some(token) = self.lookahead.clone() else {
            return Ok(FrameQuery::Describe);
        };

        let query = match token.kind {
            TokenKind::Supers => FrameQuery::Supers,
            TokenKind::Subs => FrameQuery::Subs,
            TokenKind::Slots => FrameQuery::Slots,
            TokenKind::Type => FrameQuery::Type,
            TokenKind::TypeOf => {
                self.advance()?;
                return Ok(FrameQuery::TypeOf(self.expect_name()?));
            }
            TokenKind::Slot => {
                self.advance()?;
                return Ok(FrameQuery::Slot(self.expect_name()?));
            }
            TokenKind::SubbedBy => {
                self.advance()?;
                return Ok(FrameQuery::SubbedBy(self.expect_name()?));
            }
            _ => return Ok(FrameQuery::Describe),
        };

        self.advance()?;
        Ok(query)
    }
}

// ==================== PUBLIC API ====================

/// Parse a whole batch of statements from source text.
pub fn parse(input: &str) -> ParseResult<Vec<Statement>> {
    Parser::new(input)?.parse_program()
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::error::LexError;

    fn parse_one(input: &str) -> Statement {
        let mut statements = parse(input).unwrap();
        assert_eq!(statements.len(), 1, "expected one statement in {input:?}");
        statements.remove(0)
    }

    fn update(input: &str) -> FrameUpdate {
        match parse_one(input) {
            Statement::Tell(TellStmt::UpdateFrame { update, .. }) => update,
            other => panic!("Expected update statement, got {other:?}"),
        }
    }

    fn query(input: &str) -> FrameQuery {
        match parse_one(input) {
            Statement::Ask(AskStmt::Frame { query, .. }) => query,
            other => panic!("Expected frame query, got {other:?}"),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    // ==================== TELL ADD ====================

    #[test]
    fn test_parse_add_bare_frame() {
        let stmt = parse_one("TELL ADD CLASS Animal");

        assert_eq!(
            stmt,
            Statement::Tell(TellStmt::AddFrame(AddFrameStmt {
                frame_type: FrameType::Class,
                name: "ANIMAL".to_string(),
                superclasses: Vec::new(),
                slots: Vec::new(),
            }))
        );
    }

    #[test]
    fn test_parse_add_with_supers_and_slots() {
        let stmt = parse_one(
            "TELL ADD INSTANCE Dog {Mammal, Pet} [Legs: 4 {NUMBER}, Toys: Ball {MULTIVALUED(), UNIT(count)}, Owner:]",
        );

        let Statement::Tell(TellStmt::AddFrame(add)) = stmt else {
            panic!("Expected add frame");
        };
        assert_eq!(add.frame_type, FrameType::Instance);
        assert_eq!(add.superclasses, strings(&["MAMMAL", "PET"]));
        assert_eq!(add.slots.len(), 3);

        assert_eq!(add.slots[0].name, "LEGS");
        assert_eq!(add.slots[0].value.as_deref(), Some("4"));
        assert_eq!(add.slots[0].facets[0].facet, Facet::Number);

        assert_eq!(add.slots[1].facets[0].facet, Facet::Multivalued);
        assert_eq!(add.slots[1].facets[1].facet, Facet::Other("UNIT".to_string()));
        assert_eq!(add.slots[1].facets[1].args, strings(&["COUNT"]));

        assert_eq!(add.slots[2].value, None);
    }

    #[test]
    fn test_parse_add_slots_without_supers() {
        let Statement::Tell(TellStmt::AddFrame(add)) = parse_one("TELL ADD CLASS Animal [Legs:4]")
        else {
            panic!("Expected add frame");
        };
        assert!(add.superclasses.is_empty());
        assert_eq!(add.slots.len(), 1);
    }

    #[test]
    fn test_parse_add_empty_lists() {
        let Statement::Tell(TellStmt::AddFrame(add)) = parse_one("TELL ADD CLASS Animal {} []")
        else {
            panic!("Expected add frame");
        };
        assert!(add.superclasses.is_empty());
        assert!(add.slots.is_empty());
    }

    #[test]
    fn test_parse_quoted_names() {
        let Statement::Tell(TellStmt::AddFrame(add)) =
            parse_one(r#"TELL ADD CLASS "type" [Motto: "live, laugh"]"#)
        else {
            panic!("Expected add frame");
        };
        assert_eq!(add.name, "TYPE");
        assert_eq!(add.slots[0].value.as_deref(), Some("LIVE, LAUGH"));
    }

    // ==================== TELL DELETE / UPDATE ====================

    #[test]
    fn test_parse_delete() {
        assert_eq!(
            parse_one("tell delete dog"),
            Statement::Tell(TellStmt::DeleteFrame {
                name: "DOG".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rename_and_retype() {
        assert_eq!(
            update("TELL UPDATE Dog NAME TO Hound"),
            FrameUpdate::Rename {
                new_name: "HOUND".to_string()
            }
        );
        assert_eq!(
            update("TELL UPDATE Dog TYPE TO INSTANCE"),
            FrameUpdate::Retype {
                frame_type: FrameType::Instance
            }
        );
    }

    #[test]
    fn test_parse_super_edits() {
        assert_eq!(
            update("TELL UPDATE Dog ADD SUPER Pet"),
            FrameUpdate::AddSuper {
                name: "PET".to_string()
            }
        );
        assert_eq!(
            update("TELL UPDATE Dog DELETE SUPER Pet"),
            FrameUpdate::DeleteSuper {
                name: "PET".to_string()
            }
        );
    }

    #[test]
    fn test_parse_slot_edits() {
        let FrameUpdate::AddSlot(decl) = update("TELL UPDATE Dog ADD SLOT Age: 3 {NUMBER}") else {
            panic!("Expected add slot");
        };
        assert_eq!(decl.name, "AGE");
        assert_eq!(decl.value.as_deref(), Some("3"));

        let FrameUpdate::AddSlot(decl) = update("TELL UPDATE Dog ADD SLOT Age") else {
            panic!("Expected add slot");
        };
        assert_eq!(decl.value, None);

        assert_eq!(
            update("TELL UPDATE Dog DELETE SLOT Age"),
            FrameUpdate::DeleteSlot {
                name: "AGE".to_string()
            }
        );
    }

    #[test]
    fn test_parse_nested_slot_edits() {
        let slot_edit = |input: &str| match update(input) {
            FrameUpdate::Slot { slot, edit } => {
                assert_eq!(slot, "AGE");
                edit
            }
            other => panic!("Expected slot edit, got {other:?}"),
        };

        assert_eq!(
            slot_edit("TELL UPDATE Dog UPDATE SLOT Age :5"),
            SlotEdit::SetValue("5".to_string())
        );
        assert_eq!(
            slot_edit("TELL UPDATE Dog UPDATE SLOT Age ADD FACET NUMBER"),
            SlotEdit::AddFacet(FacetDecl {
                facet: Facet::Number,
                args: Vec::new()
            })
        );
        assert_eq!(
            slot_edit("TELL UPDATE Dog UPDATE SLOT Age DELETE FACET number()"),
            SlotEdit::DeleteFacet(Facet::Number)
        );
        assert_eq!(
            slot_edit("TELL UPDATE Dog UPDATE SLOT Age ADD_VALUE 6"),
            SlotEdit::AddValue("6".to_string())
        );
        assert_eq!(
            slot_edit("TELL UPDATE Dog UPDATE SLOT Age DELETE_VALUE 6"),
            SlotEdit::DeleteValue("6".to_string())
        );
    }

    // ==================== ASK ====================

    #[test]
    fn test_parse_ask_kb() {
        assert_eq!(parse_one("ASK KB"), Statement::Ask(AskStmt::Kb));
        assert_eq!(parse_one("VIEW"), Statement::Ask(AskStmt::Kb));
    }

    #[test]
    fn test_parse_ask_queries() {
        assert_eq!(query("ASK Dog"), FrameQuery::Describe);
        assert_eq!(query("VIEW Dog"), FrameQuery::Describe);
        assert_eq!(query("ASK Dog SUPERS"), FrameQuery::Supers);
        assert_eq!(query("ASK Dog SUBS"), FrameQuery::Subs);
        assert_eq!(query("ASK Dog SLOTS"), FrameQuery::Slots);
        assert_eq!(query("ASK Dog TYPE"), FrameQuery::Type);
        assert_eq!(query("ASK Dog TYPEOF Animal"), FrameQuery::TypeOf("ANIMAL".to_string()));
        assert_eq!(query("ASK Dog SLOT Legs"), FrameQuery::Slot("LEGS".to_string()));
        assert_eq!(query("ASK Dog SUBBEDBY Puppy"), FrameQuery::SubbedBy("PUPPY".to_string()));
    }

    // ==================== PROGRAMS ====================

    #[test]
    fn test_parse_program_sequence() {
        let statements = parse(
            "TELL ADD CLASS Animal []; TELL ADD CLASS Mammal {Animal};\n\
             TELL ADD INSTANCE Dog {Mammal} [Legs:4] ASK Dog SUPERS ASK KB",
        )
        .unwrap();

        assert_eq!(statements.len(), 5);
        assert!(matches!(statements[3], Statement::Ask(AskStmt::Frame { .. })));
        assert_eq!(statements[4], Statement::Ask(AskStmt::Kb));
    }

    #[test]
    fn test_parse_empty_program() {
        assert!(parse("  ;; ").unwrap().is_empty());
    }

    // ==================== ERRORS ====================

    #[test]
    fn test_error_unexpected_token() {
        let err = parse("TELL ADD THING Dog").unwrap_err();

        match err {
            ParseError::UnexpectedToken { expected, found } => {
                assert_eq!(expected, "CLASS or INSTANCE");
                assert_eq!(found.kind, TokenKind::Str("THING".to_string()));
                assert_eq!(found.span.column, 10);
            }
            other => panic!("Expected unexpected token, got {other:?}"),
        }
    }

    #[test]
    fn test_error_premature_end() {
        let err = parse("TELL UPDATE Dog NAME TO").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { ref expected, .. } if expected == "name"));
    }

    #[test]
    fn test_error_unclosed_list() {
        let err = parse("TELL ADD CLASS Dog {Animal").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_error_trailing_comma() {
        let err = parse("TELL ADD CLASS Dog {Animal,}").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, ref found } if expected == "name" && found.kind == TokenKind::RBrace
        ));

        assert!(parse("TELL ADD CLASS Dog [Legs: 4,]").is_err());
        assert!(parse("TELL ADD CLASS Dog [Legs {NUMBER(1,)}]").is_err());
    }

    #[test]
    fn test_error_statement_must_start_with_verb() {
        let err = parse("Dog SUPERS").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == "TELL or ASK"));
    }

    #[test]
    fn test_error_malformed_statement_aborts_batch() {
        let err = parse("ASK KB TELL ADD CLASS Dog ASK Dog NAME").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_lex_errors_surface_through_parser() {
        let err = parse("TELL ADD CLASS Dog-House").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Lex(LexError::UnexpectedChar { ch: '-', .. })
        ));

        let err = parse("ASK \"Dog").unwrap_err();
        assert!(matches!(err, ParseError::Lex(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn test_error_display_mentions_location() {
        let err = parse("TELL ADD THING Dog").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected CLASS or INSTANCE, found literal \"THING\" at line 1, column 10"
        );
    }
}
