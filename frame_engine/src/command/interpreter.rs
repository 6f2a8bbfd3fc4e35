//! Tree-walking interpreter.
//!
//! A batch is parsed in full before anything runs, so a syntax error leaves
//! the knowledge base untouched. Statements then run in order, each one
//! seeing the state left by the one before.

use frame_model::Frame;

use super::answer::{Answer, Response};
use super::ast::*;
use super::error::ParseResult;
use super::parser::parse;
use crate::knowledge_base::{KnowledgeBase, Outcome};

/// Parse `source` and run every statement against `kb`.
pub fn interpret(kb: &mut KnowledgeBase, source: &str) -> ParseResult<Vec<Response>> {
    let statements = parse(source)?;
    Ok(statements
        .iter()
        .map(|statement| execute(kb, statement))
        .collect())
}

/// Run one parsed statement.
pub fn execute(kb: &mut KnowledgeBase, statement: &Statement) -> Response {
    match statement {
        Statement::Tell(tell) => {
            let outcome = execute_tell(kb, tell);
            tracing::debug!(?tell, %outcome, "tell executed");
            Response::Told(outcome)
        }
        Statement::Ask(ask) => {
            let answer = execute_ask(kb, ask);
            tracing::debug!(?ask, found = answer.is_found(), "ask executed");
            Response::Answer(answer)
        }
    }
}

fn execute_tell(kb: &mut KnowledgeBase, tell: &TellStmt) -> Outcome {
    match tell {
        TellStmt::AddFrame(add) => {
            let frame = add.slots.iter().fold(
                Frame::new(add.frame_type, add.name.clone())
                    .with_superclasses(add.superclasses.iter().cloned()),
                |frame, decl| frame.with_slot(decl.name.clone(), decl.to_slot()),
            );
            kb.add_frame(frame)
        }
        TellStmt::DeleteFrame { name } => kb.delete_frame(name),
        TellStmt::UpdateFrame { name, update } => execute_update(kb, name, update),
    }
}

fn execute_update(kb: &mut KnowledgeBase, name: &str, update: &FrameUpdate) -> Outcome {
    match update {
        FrameUpdate::Rename { new_name } => kb.update_name(name, new_name),
        FrameUpdate::Retype { frame_type } => kb.update_type(name, *frame_type),
        FrameUpdate::AddSuper { name: parent } => kb.add_superclass(name, parent),
        FrameUpdate::DeleteSuper { name: parent } => kb.remove_superclass(name, parent),
        FrameUpdate::AddSlot(decl) => kb.add_slot(name, &decl.name, decl.to_slot()),
        FrameUpdate::DeleteSlot { name: slot } => kb.delete_slot(name, slot),
        FrameUpdate::Slot { slot, edit } => match edit {
            SlotEdit::SetValue(value) => kb.update_slot(name, slot, value),
            SlotEdit::AddFacet(decl) => kb.add_facet(name, slot, decl.facet.clone()),
            SlotEdit::DeleteFacet(facet) => kb.delete_facet(name, slot, facet),
            SlotEdit::AddValue(value) => kb.add_value(name, slot, value),
            SlotEdit::DeleteValue(value) => kb.delete_value(name, slot, value),
        },
    }
}

fn execute_ask(kb: &KnowledgeBase, ask: &AskStmt) -> Answer {
    let (name, query) = match ask {
        AskStmt::Kb => {
            return Answer::Kb {
                classes: kb.class_frames().cloned().collect(),
                instances: kb.instance_frames().cloned().collect(),
            };
        }
        AskStmt::Frame { name, query } => (name, query),
    };

    let Some(frame) = kb.get_frame(name) else {
        return Answer::NotFound;
    };

    match query {
        FrameQuery::Describe => Answer::Frame(frame.clone()),
        FrameQuery::Supers => Answer::Supers(frame.superclasses.clone()),
        FrameQuery::Subs => Answer::Subs(frame.subclasses.clone()),
        FrameQuery::Slots => Answer::Slots(frame.slots.clone()),
        FrameQuery::Type => Answer::Type(frame.frame_type),
        FrameQuery::TypeOf(other) => Answer::TypeOf(frame.type_of(other)),
        FrameQuery::Slot(slot) => match frame.slot(slot) {
            Some(slot) => Answer::Slot(slot.clone()),
            None => Answer::NoSuchSlot,
        },
        FrameQuery::SubbedBy(other) => Answer::SubbedBy(frame.subclasses.contains(other)),
    }
}
