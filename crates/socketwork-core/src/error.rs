//! Error types for attachment and configuration.

use scenegraph::SceneError;
use thiserror::Error;

use crate::part::MountSide;

/// Errors returned by the [`AttachmentCoordinator`](crate::AttachmentCoordinator).
///
/// None of these are fatal: the coordinator is left exactly as it was before
/// the failing call and remains usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The prototype carries no [`PartDescriptor`](crate::PartDescriptor).
    #[error("part prototype `{prototype}` has no part descriptor")]
    MissingDescriptor {
        /// Name of the offending prototype.
        prototype: String,
    },
    /// Every socket compatible with the requested side is occupied (or none exist).
    #[error("no free socket compatible with side {side}")]
    NoCompatibleSocket {
        /// Side the part requires.
        side: MountSide,
    },
    /// Index-based access past the end of the registry.
    #[error("socket index {index} out of range (registry has {len} sockets)")]
    InvalidSocketIndex {
        /// Requested index.
        index: usize,
        /// Number of sockets in the registry.
        len: usize,
    },
    /// Index-based attach of a part whose required side the socket cannot take.
    #[error("socket {index} has side {socket}, part requires {required}")]
    IncompatibleSide {
        /// Requested index.
        index: usize,
        /// Side of the socket at `index`.
        socket: MountSide,
        /// Side the part requires.
        required: MountSide,
    },
    /// The hosting scene rejected an instantiation or parenting step.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors raised while loading or validating authored configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid JSON for the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two sockets share a name.
    #[error("duplicate socket name `{0}`")]
    DuplicateSocket(String),
    /// A socket pose contains NaN or infinity.
    #[error("socket `{0}` has a non-finite transform")]
    NonFiniteTransform(String),
    /// A socket rotation is not a unit quaternion.
    #[error("socket `{0}` rotation is not a unit quaternion")]
    NonUnitRotation(String),
    /// Two catalog entries share a name.
    #[error("duplicate part name `{0}`")]
    DuplicatePart(String),
    /// Catalog lookup by a name that is not present.
    #[error("unknown part `{0}`")]
    UnknownPart(String),
}
