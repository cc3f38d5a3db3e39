/// Core error type for the service shell (startup, config, adapters).
///
/// Per-request failures use [`ResolveError`] instead, so the HTTP layer can map
/// each outcome to exactly one status code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories reported by a lookup collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No entity of the requested kind is registered under the handle.
    #[error("username not occupied")]
    NotOccupied,

    /// The handle denotes something the lookup can't access as the requested kind.
    #[error("peer or channel invalid")]
    PeerOrChannelInvalid,

    #[error("{0}")]
    Other(String),
}

/// Outcome taxonomy of a single `/info` request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Username parameter is required")]
    InvalidInput,

    #[error("Username '@{handle}' does not exist")]
    NotFound { handle: String },

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    TransientFailure(String),

    #[error("Internal Server Error")]
    Internal(String),
}
