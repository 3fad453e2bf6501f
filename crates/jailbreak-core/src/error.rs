use crate::api::types::EntityId;
use crate::components::entity::EntityKind;

/// Errors that end the current session. The only recovery is a full reset.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    /// The registry has no player entity.
    #[error("no player entity in the registry")]
    MissingPlayer,

    /// The registry has no door entity.
    #[error("no door entity in the registry")]
    MissingDoor,

    /// An entity that must carry a physics body has none.
    #[error("entity {0:?} has no physics body")]
    MissingBody(EntityId),

    /// An entity's payload does not match the kind a system expected.
    #[error("entity {id:?} is a {found:?}, expected a {expected:?}")]
    KindMismatch {
        id: EntityId,
        expected: EntityKind,
        found: EntityKind,
    },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),
}

pub type SimResult<T> = Result<T, SimError>;
