//! Mutation outcomes.
//!
//! Knowledge base edits never fail with an error. Each one reports an
//! `Outcome`; only `Applied` means the graph changed.

use serde::{Deserialize, Serialize};

/// Result of a single knowledge base mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Applied,
    /// Frame, link, slot or facet is already present.
    AlreadyExists,
    FrameNotFound,
    SlotNotFound,
    /// The link, value or facet to remove is not there.
    NotPresent,
    /// The edit would make something specialize an instance.
    InstanceSpecialization,
    /// A frame cannot be its own superclass or subclass.
    SelfLink,
}

impl Outcome {
    /// Boolean form of the outcome.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    /// Whether the target frame or slot was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::FrameNotFound | Outcome::SlotNotFound)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Applied => "OK",
            Outcome::AlreadyExists => "ALREADY EXISTS",
            Outcome::FrameNotFound => "NOT FOUND",
            Outcome::SlotNotFound => "NOT A SLOT",
            Outcome::NotPresent => "NOT PRESENT",
            Outcome::InstanceSpecialization => "INSTANCES CANNOT BE SPECIALIZED",
            Outcome::SelfLink => "A FRAME CANNOT LINK TO ITSELF",
        }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> bool {
        outcome.is_applied()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_contract() {
        assert!(Outcome::Applied.is_applied());
        assert!(!Outcome::AlreadyExists.is_applied());
        assert!(!bool::from(Outcome::NotPresent));
    }

    #[test]
    fn test_not_found() {
        assert!(Outcome::FrameNotFound.is_not_found());
        assert!(Outcome::SlotNotFound.is_not_found());
        assert!(!Outcome::InstanceSpecialization.is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::Applied.to_string(), "OK");
        assert_eq!(Outcome::SelfLink.to_string(), "A FRAME CANNOT LINK TO ITSELF");
    }
}
