use thiserror::Error;

/// Errors that can occur in the AVR control engine
#[derive(Error, Debug)]
pub enum ControlError {
    /// Error building the property table
    #[error("Failed to build property table: {0}")]
    Table(#[from] avr_protocol::ProtocolError),

    /// Background worker is no longer running
    #[error("Connection worker has shut down")]
    WorkerDisconnected,

    /// Internal lock was poisoned by a panicking thread
    #[error("Internal synchronization error")]
    LockPoisoned,

    /// Property does not exist in the table
    #[error("Unknown property '{0}'")]
    UnknownProperty(String),
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;
