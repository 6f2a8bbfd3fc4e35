//! Slot definitions - named attribute holders on frames.

mod facet;

pub use facet::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A slot holds an ordered value list plus a set of facets.
///
/// Without the `MULTIVALUED` facet only the first (primary) value is
/// significant. Facets are descriptive; nothing here enforces them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slot {
    pub values: Vec<String>,
    pub facets: BTreeSet<Facet>,
}

impl Slot {
    /// Create an empty slot with no values and no facets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-valued slot.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            values: vec![value.into()],
            facets: BTreeSet::new(),
        }
    }

    /// Add a facet to this slot.
    pub fn with_facet(mut self, facet: Facet) -> Self {
        self.facets.insert(facet);
        self
    }

    /// Add multiple facets to this slot.
    pub fn with_facets(mut self, facets: impl IntoIterator<Item = Facet>) -> Self {
        self.facets.extend(facets);
        self
    }

    /// The primary value, if any.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn has_facet(&self, facet: &Facet) -> bool {
        self.facets.contains(facet)
    }

    pub fn is_multivalued(&self) -> bool {
        self.has_facet(&Facet::Multivalued)
    }

    /// Replace the primary value, or set it when the list is empty.
    pub fn set_primary(&mut self, value: impl Into<String>) {
        match self.values.first_mut() {
            Some(primary) => *primary = value.into(),
            None => self.values.push(value.into()),
        }
    }

    /// Remove one occurrence of `value`. Returns false when absent.
    pub fn remove_value(&mut self, value: &str) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let facets: Vec<&str> = self.facets.iter().map(Facet::name).collect();
        if self.is_multivalued() {
            write!(f, "(value=[{}], ", self.values.join(", "))?;
        } else {
            write!(f, "(value={}, ", self.value().unwrap_or("NONE"))?;
        }
        write!(f, "facets=[{}])", facets.join(", "))
    }
}
