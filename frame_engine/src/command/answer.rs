//! Results of interpreted statements.

use frame_model::{Frame, FrameType, Slot};
use std::collections::{BTreeMap, BTreeSet};

use crate::knowledge_base::Outcome;

/// What a single statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A TELL statement and the outcome of its knowledge base call.
    Told(Outcome),
    /// An ASK statement and its answer.
    Answer(Answer),
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Told(outcome) => write!(f, "{}", outcome),
            Response::Answer(answer) => write!(f, "{}", answer),
        }
    }
}

/// The answer to an ASK statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// The named frame does not exist.
    NotFound,
    /// The frame exists but has no such slot.
    NoSuchSlot,
    Kb {
        classes: Vec<Frame>,
        instances: Vec<Frame>,
    },
    Frame(Frame),
    Supers(BTreeSet<String>),
    Subs(BTreeSet<String>),
    Slots(BTreeMap<String, Slot>),
    Type(FrameType),
    TypeOf(bool),
    Slot(Slot),
    SubbedBy(bool),
}

impl Answer {
    pub fn is_found(&self) -> bool {
        !matches!(self, Answer::NotFound | Answer::NoSuchSlot)
    }
}

fn write_names(f: &mut std::fmt::Formatter<'_>, names: &BTreeSet<String>) -> std::fmt::Result {
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    write!(f, "{{{}}}", names.join(", "))
}

fn write_bool(f: &mut std::fmt::Formatter<'_>, value: bool) -> std::fmt::Result {
    f.write_str(if value { "TRUE" } else { "FALSE" })
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::NotFound => f.write_str("NOT FOUND"),
            Answer::NoSuchSlot => f.write_str("NOT A SLOT"),
            Answer::Kb { classes, instances } => {
                writeln!(f, "CLASSES ({})", classes.len())?;
                for frame in classes {
                    writeln!(f, "  {}", frame)?;
                }
                write!(f, "INSTANCES ({})", instances.len())?;
                for frame in instances {
                    write!(f, "\n  {}", frame)?;
                }
                Ok(())
            }
            Answer::Frame(frame) => write!(f, "{}", frame),
            Answer::Supers(names) | Answer::Subs(names) => write_names(f, names),
            Answer::Slots(slots) => {
                let slots: Vec<String> = slots
                    .iter()
                    .map(|(name, slot)| format!("{}: {}", name, slot))
                    .collect();
                write!(f, "{{{}}}", slots.join(", "))
            }
            Answer::Type(frame_type) => write!(f, "{}", frame_type),
            Answer::TypeOf(value) | Answer::SubbedBy(value) => write_bool(f, *value),
            Answer::Slot(slot) => write!(f, "{}", slot),
        }
    }
}
