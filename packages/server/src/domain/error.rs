//! Domain error types.

use thiserror::Error;

/// Invalid client identity supplied at connection time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientIdError {
    #[error("client_id must not be empty")]
    Empty,

    #[error("client_id is too long ({0} characters)")]
    TooLong(usize),
}

/// Failure while registering a connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A live connection with the same id already exists.
    #[error("client '{0}' is already connected")]
    DuplicateClientId(String),
}

/// Failure while delivering a message to one specific connection.
///
/// Always connection-scoped: the affected connection is treated as closed,
/// other connections and the room state are unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push message to client '{0}'")]
    PushFailed(String),
}
