//! UseCase error types.

use thiserror::Error;

/// Failure while connecting a new client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// A live connection with the same id already exists.
    #[error("client '{0}' is already connected")]
    DuplicateClientId(String),

    /// The initial snapshot could not be delivered; the connection is
    /// treated as closed and has been removed from the registry.
    #[error("failed to deliver initial snapshot: {0}")]
    SnapshotDeliveryFailed(String),
}
