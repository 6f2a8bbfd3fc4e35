//! Frame definitions for the knowledge graph.

mod definition;

pub use definition::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a frame, kept across renames and retyping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub Uuid);

impl FrameId {
    /// Create a new random frame ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a frame ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty frame ID (useful for defaults).
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a frame is a category or a concrete member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    Class,
    Instance,
}

impl FrameType {
    /// Keyword form used by the command language.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameType::Class => "CLASS",
            FrameType::Instance => "INSTANCE",
        }
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_ids_are_unique() {
        assert_ne!(FrameId::new(), FrameId::new());
        assert_eq!(FrameId::nil(), FrameId::from_uuid(Uuid::nil()));
    }

    #[test]
    fn test_frame_type_display() {
        assert_eq!(FrameType::Class.to_string(), "CLASS");
        assert_eq!(FrameType::Instance.to_string(), "INSTANCE");
    }
}
