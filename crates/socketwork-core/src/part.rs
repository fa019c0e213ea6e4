//! Part metadata: categories, mount sides and descriptors.
//!
//! A [`PartDescriptor`] is authored once on a [`PartPrototype`] and never
//! changes afterwards. The attachment coordinator reads it to decide which
//! sockets a part may occupy.
//!
//! # Side matching
//!
//! [`MountSide::Any`] is a symmetric wildcard: it matches every side and
//! every side matches it. Otherwise sides must be equal.
//!
//! ```
//! use socketwork_core::part::MountSide;
//!
//! assert!(MountSide::Left.matches(MountSide::Left));
//! assert!(MountSide::Any.matches(MountSide::Back));
//! assert!(MountSide::Front.matches(MountSide::Any));
//! assert!(!MountSide::Left.matches(MountSide::Right));
//! ```

use std::fmt;

use scenegraph::Transform;
use serde::{Deserialize, Serialize};

/// Category tag for a part.
///
/// The named variants cover the stock parts; [`PartCategory::Custom`] keeps
/// the set open for content that ships later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartCategory {
    /// Grasping appendage
    Claw,
    /// Rigid offensive protrusion
    Spike,
    /// Steering or propulsion fin
    Fin,
    /// Any category not listed above
    Custom(String),
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Claw => write!(f, "Claw"),
            Self::Spike => write!(f, "Spike"),
            Self::Fin => write!(f, "Fin"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// Side affinity of a socket or a part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MountSide {
    /// Wildcard; compatible with every side
    #[default]
    Any,
    /// Left flank
    Left,
    /// Right flank
    Right,
    /// Front
    Front,
    /// Back
    Back,
}

impl MountSide {
    /// All sides, wildcard first.
    pub const ALL: [Self; 5] = [Self::Any, Self::Left, Self::Right, Self::Front, Self::Back];

    /// Returns true if the two sides are compatible.
    ///
    /// This is the only matching predicate used for attachment. It is
    /// symmetric: `a.matches(b) == b.matches(a)`.
    #[must_use]
    pub fn matches(self, other: Self) -> bool {
        self == other || self == Self::Any || other == Self::Any
    }
}

impl fmt::Display for MountSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
            Self::Front => write!(f, "Front"),
            Self::Back => write!(f, "Back"),
        }
    }
}

/// Static metadata describing what a part is and where it mounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartDescriptor {
    category: PartCategory,
    required_side: MountSide,
}

impl PartDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(category: PartCategory, required_side: MountSide) -> Self {
        Self {
            category,
            required_side,
        }
    }

    /// Returns the part's category.
    #[must_use]
    pub const fn category(&self) -> &PartCategory {
        &self.category
    }

    /// Returns the side the part must mount on.
    #[must_use]
    pub const fn required_side(&self) -> MountSide {
        self.required_side
    }
}

/// Authored template that attachment instantiates.
///
/// `local` is the prototype's own authored pose. Instantiation applies it,
/// but mounting resets the instance to zero offset under its socket, so it
/// never affects where an attached part ends up.
///
/// # Example
///
/// ```
/// use socketwork_core::part::{MountSide, PartCategory, PartDescriptor, PartPrototype};
///
/// let claw = PartPrototype::new(
///     "left_claw",
///     PartDescriptor::new(PartCategory::Claw, MountSide::Left),
/// );
/// assert_eq!(claw.descriptor().unwrap().required_side(), MountSide::Left);
///
/// let prop = PartPrototype::without_descriptor("loose_prop");
/// assert!(prop.descriptor().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartPrototype {
    name: String,
    #[serde(default)]
    descriptor: Option<PartDescriptor>,
    #[serde(default)]
    local: Transform,
}

impl PartPrototype {
    /// Creates a prototype carrying a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, descriptor: PartDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor: Some(descriptor),
            local: Transform::IDENTITY,
        }
    }

    /// Creates a prototype with no descriptor.
    #[must_use]
    pub fn without_descriptor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: None,
            local: Transform::IDENTITY,
        }
    }

    /// Sets the authored local pose.
    #[must_use]
    pub fn with_local(mut self, local: Transform) -> Self {
        self.local = local;
        self
    }

    /// Returns the prototype name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the descriptor, if authored.
    #[must_use]
    pub const fn descriptor(&self) -> Option<&PartDescriptor> {
        self.descriptor.as_ref()
    }

    /// Returns the authored local pose.
    #[must_use]
    pub const fn local(&self) -> &Transform {
        &self.local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_everything_both_ways() {
        for side in MountSide::ALL {
            assert!(MountSide::Any.matches(side), "Any vs {side}");
            assert!(side.matches(MountSide::Any), "{side} vs Any");
            assert!(side.matches(side));
        }
    }

    #[test]
    fn distinct_concrete_sides_do_not_match() {
        let concrete = [MountSide::Left, MountSide::Right, MountSide::Front, MountSide::Back];
        for a in concrete {
            for b in concrete {
                assert_eq!(a.matches(b), a == b, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn default_side_is_any() {
        assert_eq!(MountSide::default(), MountSide::Any);
    }

    #[test]
    fn category_display() {
        assert_eq!(PartCategory::Claw.to_string(), "Claw");
        assert_eq!(PartCategory::Custom("Horn".into()).to_string(), "Horn");
    }

    #[test]
    fn prototype_deserializes_without_optional_fields() {
        let proto: PartPrototype = serde_json::from_str(r#"{ "name": "bare" }"#).unwrap();
        assert_eq!(proto.name(), "bare");
        assert!(proto.descriptor().is_none());
        assert_eq!(*proto.local(), Transform::IDENTITY);
    }

    #[test]
    fn prototype_deserializes_descriptor() {
        let json = r#"{
            "name": "tail_fin",
            "descriptor": { "category": "Fin", "required_side": "Back" }
        }"#;
        let proto: PartPrototype = serde_json::from_str(json).unwrap();
        let descriptor = proto.descriptor().unwrap();
        assert_eq!(descriptor.category(), &PartCategory::Fin);
        assert_eq!(descriptor.required_side(), MountSide::Back);
    }

    #[test]
    fn custom_category_deserializes() {
        let json = r#"{ "category": { "Custom": "Horn" }, "required_side": "Front" }"#;
        let descriptor: PartDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.category(), &PartCategory::Custom("Horn".into()));
    }
}
