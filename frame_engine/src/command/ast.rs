//! Abstract Syntax Tree types for the command language.

use frame_model::{Facet, FrameType, Slot};

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Tell(TellStmt),
    Ask(AskStmt),
}

// ==================== TELL ====================

/// Mutating statements.
#[derive(Debug, Clone, PartialEq)]
pub enum TellStmt {
    /// TELL ADD (CLASS|INSTANCE) name [{supers}] [[slots]]
    AddFrame(AddFrameStmt),
    /// TELL DELETE name
    DeleteFrame { name: String },
    /// TELL UPDATE name ...
    UpdateFrame { name: String, update: FrameUpdate },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddFrameStmt {
    pub frame_type: FrameType,
    pub name: String,
    pub superclasses: Vec<String>,
    pub slots: Vec<SlotDecl>,
}

/// A slot as written in source: `name: value {facet(args), ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDecl {
    pub name: String,
    pub value: Option<String>,
    pub facets: Vec<FacetDecl>,
}

impl SlotDecl {
    /// Build the stored slot. Facet arguments are not kept.
    pub fn to_slot(&self) -> Slot {
        let slot = match &self.value {
            Some(value) => Slot::with_value(value.clone()),
            None => Slot::new(),
        };
        slot.with_facets(self.facets.iter().map(|decl| decl.facet.clone()))
    }
}

/// A facet as written in source: `NAME` or `NAME(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetDecl {
    pub facet: Facet,
    pub args: Vec<String>,
}

/// The edit a TELL UPDATE statement applies to one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameUpdate {
    Rename { new_name: String },
    Retype { frame_type: FrameType },
    AddSuper { name: String },
    DeleteSuper { name: String },
    AddSlot(SlotDecl),
    DeleteSlot { name: String },
    Slot { slot: String, edit: SlotEdit },
}

/// Nested edit under `UPDATE SLOT name`.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEdit {
    /// `: value` replaces the primary value.
    SetValue(String),
    AddFacet(FacetDecl),
    DeleteFacet(Facet),
    AddValue(String),
    DeleteValue(String),
}

// ==================== ASK ====================

/// Read-only statements.
#[derive(Debug, Clone, PartialEq)]
pub enum AskStmt {
    /// ASK KB
    Kb,
    /// ASK name [query]
    Frame { name: String, query: FrameQuery },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameQuery {
    /// No query keyword: describe the whole frame.
    Describe,
    Supers,
    Subs,
    Slots,
    Type,
    TypeOf(String),
    Slot(String),
    SubbedBy(String),
}
