//! Facet definitions - tags describing how slot values are read.

use serde::{Deserialize, Serialize};

/// A descriptive tag on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facet {
    /// Values are numeric literals.
    Number,
    /// Every entry in the value list is significant.
    Multivalued,
    /// The slot is a relation whose inverse should be kept consistent.
    Symmetric,
    /// Facet name the engine does not interpret.
    Other(String),
}

impl Facet {
    /// Resolve a facet from its name, ignoring case.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "NUMBER" => Facet::Number,
            "MULTIVALUED" => Facet::Multivalued,
            "SYMMETRIC" => Facet::Symmetric,
            other => Facet::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Facet::Number => "NUMBER",
            Facet::Multivalued => "MULTIVALUED",
            Facet::Symmetric => "SYMMETRIC",
            Facet::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
