use mw_core::{MwError, PersistError};

/// Alias for `Result<T, BridgeError>`.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors returned to bridge clients.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The request line was not valid JSON or lacked a `tool` field.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// No tool with this name is registered.
    #[error("unknown tool: \"{0}\"")]
    UnknownTool(String),

    /// The arguments did not match the tool's parameters.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A persistence tool was called but the bridge has no repository.
    #[error("no repository configured; start the bridge with a data directory")]
    NoRepository,

    /// The world store rejected the call.
    #[error(transparent)]
    World(#[from] MwError),

    /// The repository failed.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// A result could not be encoded as JSON.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl BridgeError {
    /// Stable snake_case error kind for the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "malformed_request",
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::NoRepository => "no_repository",
            Self::World(err) => err.kind(),
            Self::Persist(err) => err.kind(),
            Self::Encode(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use mw_core::{PoiId, WorldId};

    use super::*;

    #[test]
    fn kinds_pass_through_from_core() {
        let err = BridgeError::from(MwError::PoiNotFound(PoiId(2)));
        assert_eq!(err.kind(), "poi_not_found");
        assert_eq!(err.to_string(), "point of interest not found: poi_2");

        let err = BridgeError::from(PersistError::NotFound(WorldId::new()));
        assert_eq!(err.kind(), "world_not_saved");
        assert_eq!(BridgeError::UnknownTool("fly".into()).kind(), "unknown_tool");
    }
}
