// ---------------------------------------------------------------------------
// RegistryError: configuration errors caught when the registry is loaded
// ---------------------------------------------------------------------------

use std::fmt;

use crate::building::Facing;

/// Errors raised while loading or validating the building registry.
///
/// Every variant is a configuration error: the registry is rejected as a whole
/// before any geometry is built from it.
#[derive(Debug)]
pub enum RegistryError {
    /// The registry file could not be read.
    Io(std::io::Error),
    /// The registry file is not a valid descriptor list (includes unknown facings).
    Parse(String),
    /// Two descriptors share an id.
    DuplicateId(String),
    /// A position component is NaN or infinite.
    NonFinitePosition { id: String, position: [f32; 3] },
    /// A scale component is zero, negative or not finite.
    NonPositiveScale { id: String, scale: [f32; 3] },
    /// The entrance offset pushes the marker past the end of its wall.
    EntranceOutsideWall {
        id: String,
        facing: Facing,
        lateral_offset: f32,
        half_span: f32,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Io(e) => write!(f, "I/O error: {e}"),
            RegistryError::Parse(msg) => write!(f, "Registry parse error: {msg}"),
            RegistryError::DuplicateId(id) => write!(f, "Duplicate building id '{id}'"),
            RegistryError::NonFinitePosition { id, position } => write!(
                f,
                "Building '{id}' has non-finite position [{}, {}, {}]",
                position[0], position[1], position[2]
            ),
            RegistryError::NonPositiveScale { id, scale } => write!(
                f,
                "Building '{id}' has non-positive scale [{}, {}, {}]",
                scale[0], scale[1], scale[2]
            ),
            RegistryError::EntranceOutsideWall {
                id,
                facing,
                lateral_offset,
                half_span,
            } => write!(
                f,
                "Building '{id}' entrance offset {lateral_offset} on the {facing:?} wall exceeds half span {half_span}"
            ),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(e: std::io::Error) -> Self {
        RegistryError::Io(e)
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(e: serde_json::Error) -> Self {
        RegistryError::Parse(e.to_string())
    }
}
