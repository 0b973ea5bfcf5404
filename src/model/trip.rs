use thiserror::Error;

/// Errors raised by the round-trip steps. Any of these aborts the remaining
/// sequence; artifacts created by earlier steps are left in place.
#[derive(Error, Debug, Clone)]
pub enum TripError {
    /// Credentials could not be resolved from the environment
    #[error("connection setup failed: {0}")]
    Connection(String),

    #[error("container creation failed: {0}")]
    ContainerCreation(String),

    /// Local filesystem read/write failure
    #[error("local file I/O failed: {0}")]
    LocalIo(String),

    #[error("blob upload failed: {0}")]
    Upload(String),

    #[error("blob listing failed: {0}")]
    List(String),

    #[error("blob download failed: {0}")]
    Download(String),
}

impl TripError {
    /// Stable label of the step that failed, for the exit report.
    pub fn step(&self) -> &'static str {
        match self {
            TripError::Connection(_) => "connect",
            TripError::ContainerCreation(_) => "create-container",
            TripError::LocalIo(_) => "local-io",
            TripError::Upload(_) => "upload",
            TripError::List(_) => "list",
            TripError::Download(_) => "download",
        }
    }
}

/// A blob surfaced by listing a container.
#[derive(Clone, Debug)]
pub struct BlobEntry {
    pub name: String,
    pub size: u64,
}
