//! The frame node itself.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{FrameId, FrameType};
use crate::slot::{Facet, Slot};

/// A named class or instance node in the knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub name: String,
    pub frame_type: FrameType,

    /// Frames this frame directly specializes.
    pub superclasses: BTreeSet<String>,

    /// Frames directly specializing this one. Always empty for instances.
    pub subclasses: BTreeSet<String>,

    pub slots: BTreeMap<String, Slot>,
}

impl Frame {
    /// Create a new frame with no links and no slots.
    pub fn new(frame_type: FrameType, name: impl Into<String>) -> Self {
        Self {
            id: FrameId::new(),
            name: name.into(),
            frame_type,
            superclasses: BTreeSet::new(),
            subclasses: BTreeSet::new(),
            slots: BTreeMap::new(),
        }
    }

    /// Create a new class frame.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(FrameType::Class, name)
    }

    /// Create a new instance frame.
    pub fn instance(name: impl Into<String>) -> Self {
        Self::new(FrameType::Instance, name)
    }

    /// Add a superclass name.
    pub fn with_superclass(mut self, name: impl Into<String>) -> Self {
        self.superclasses.insert(name.into());
        self
    }

    /// Add multiple superclass names.
    pub fn with_superclasses<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.superclasses.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a slot, replacing any slot of the same name.
    pub fn with_slot(mut self, name: impl Into<String>, slot: Slot) -> Self {
        self.slots.insert(name.into(), slot);
        self
    }

    pub fn is_instance(&self) -> bool {
        self.frame_type == FrameType::Instance
    }

    /// Shallow typing: true when `name` is this frame or a direct superclass.
    pub fn type_of(&self, name: &str) -> bool {
        self.name == name || self.superclasses.contains(name)
    }

    pub fn add_superclass(&mut self, name: &str) -> bool {
        self.superclasses.insert(name.to_string())
    }

    pub fn remove_superclass(&mut self, name: &str) -> bool {
        self.superclasses.remove(name)
    }

    /// Fails for instances: nothing may specialize an instance.
    pub fn add_subclass(&mut self, name: &str) -> bool {
        if self.is_instance() {
            return false;
        }
        self.subclasses.insert(name.to_string())
    }

    pub fn remove_subclass(&mut self, name: &str) -> bool {
        if self.is_instance() {
            return false;
        }
        self.subclasses.remove(name)
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// Insert a slot only if no slot of that name exists.
    pub fn add_slot(&mut self, name: &str, slot: Slot) -> bool {
        if self.has_slot(name) {
            return false;
        }
        self.slots.insert(name.to_string(), slot);
        true
    }

    /// Scalar overwrite.
    ///
    /// Creates a single-valued slot without facets when absent, otherwise
    /// replaces the primary value and keeps the rest of the list.
    pub fn update_slot(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.slots.get_mut(name) {
            Some(slot) => slot.set_primary(value),
            None => {
                self.slots.insert(name.to_string(), Slot::with_value(value));
            }
        }
        true
    }

    /// Append a value. Does not check the `MULTIVALUED` facet.
    pub fn add_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.slots.get_mut(name) {
            Some(slot) => {
                slot.values.push(value.into());
                true
            }
            None => false,
        }
    }

    pub fn delete_value(&mut self, name: &str, value: &str) -> bool {
        self.slots
            .get_mut(name)
            .is_some_and(|slot| slot.remove_value(value))
    }

    pub fn add_facet(&mut self, name: &str, facet: Facet) -> bool {
        self.slots
            .get_mut(name)
            .is_some_and(|slot| slot.facets.insert(facet))
    }

    pub fn delete_facet(&mut self, name: &str, facet: &Facet) -> bool {
        self.slots
            .get_mut(name)
            .is_some_and(|slot| slot.facets.remove(facet))
    }

    pub fn remove_slot(&mut self, name: &str) -> Option<Slot> {
        self.slots.remove(name)
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");
        let slots: Vec<String> = self
            .slots
            .iter()
            .map(|(name, slot)| format!("{}: {}", name, slot))
            .collect();
        write!(
            f,
            "{} FRAME (name={}, superclasses={{{}}}, subclasses={{{}}}, slots={{{}}})",
            self.frame_type,
            self.name,
            join(&self.superclasses),
            join(&self.subclasses),
            slots.join(", ")
        )
    }
}
