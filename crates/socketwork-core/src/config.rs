//! Authored configuration: socket layouts and part catalogs.
//!
//! Both are plain serde structs read from JSON at setup time and treated as
//! read-only afterwards. Validation happens on load so the registry and
//! coordinator never see a malformed layout.

use std::collections::HashSet;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::part::{MountSide, PartPrototype};

/// One authored socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketSpec {
    /// Unique name within the assembly.
    pub name: String,
    /// Side affinity.
    #[serde(default)]
    pub side: MountSide,
    /// Offset in the owner's local frame.
    #[serde(default)]
    pub translation: Vec3,
    /// Orientation in the owner's local frame.
    #[serde(default)]
    pub rotation: Quat,
}

impl SocketSpec {
    /// Creates a socket spec at the owner's origin.
    #[must_use]
    pub fn new(name: impl Into<String>, side: MountSide) -> Self {
        Self {
            name: name.into(),
            side,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    /// Sets the local offset.
    #[must_use]
    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }
}

/// Socket layout for one assembly, in authoring order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    sockets: Vec<SocketSpec>,
}

impl AssemblyConfig {
    /// Creates a validated config from socket specs.
    ///
    /// # Errors
    ///
    /// See [`AssemblyConfig::validate`].
    pub fn new(sockets: Vec<SocketSpec>) -> Result<Self, ConfigError> {
        let config = Self { sockets };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a config from JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed input, otherwise see
    /// [`AssemblyConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that socket names are unique, poses are finite and rotations
    /// are unit quaternions.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateSocket`], [`ConfigError::NonFiniteTransform`]
    /// or [`ConfigError::NonUnitRotation`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for spec in &self.sockets {
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateSocket(spec.name.clone()));
            }
            if !spec.translation.is_finite() || !spec.rotation.is_finite() {
                return Err(ConfigError::NonFiniteTransform(spec.name.clone()));
            }
            if !spec.rotation.is_normalized() {
                return Err(ConfigError::NonUnitRotation(spec.name.clone()));
            }
        }
        Ok(())
    }

    /// Socket specs in authoring order.
    #[must_use]
    pub fn sockets(&self) -> &[SocketSpec] {
        &self.sockets
    }
}

/// Named set of part prototypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartCatalog {
    parts: Vec<PartPrototype>,
}

impl PartCatalog {
    /// Creates a validated catalog.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicatePart`] if two prototypes share a name.
    pub fn new(parts: Vec<PartPrototype>) -> Result<Self, ConfigError> {
        let catalog = Self { parts };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] or [`ConfigError::DuplicatePart`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for part in &self.parts {
            if !seen.insert(part.name()) {
                return Err(ConfigError::DuplicatePart(part.name().to_owned()));
            }
        }
        Ok(())
    }

    /// Looks up a prototype by name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownPart`] if no prototype has that name.
    pub fn get(&self, name: &str) -> Result<&PartPrototype, ConfigError> {
        self.parts
            .iter()
            .find(|part| part.name() == name)
            .ok_or_else(|| ConfigError::UnknownPart(name.to_owned()))
    }

    /// Prototypes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &PartPrototype> + '_ {
        self.parts.iter()
    }

    /// Number of prototypes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
