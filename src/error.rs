use crate::probe::ProbeError;
use crate::text::EncodingError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The primary error type for the media-inspector crate.
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Source loading ---
    #[error("Failed to open file {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: ProbeError,
    },

    #[error("Failed to read media from memory: {0}")]
    OpenBuffer(#[source] ProbeError),

    #[error("Buffer is empty")]
    EmptyBuffer,

    #[error("A source is already open, close it first")]
    AlreadyLoaded,

    // --- Text boundary ---
    #[error("Text conversion failed: {0}")]
    Encoding(#[from] EncodingError),

    // --- Batch helpers ---
    #[error("Inspection did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Inspection task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
