//! File transport collaborator: whole-file reads and writes on a device.
//!
//! The settings file is small and always transferred in one piece, so the
//! trait deals in complete byte buffers.  A read that returns zero bytes is
//! treated by callers the same as a failed read.

use std::path::PathBuf;

use thiserror::Error;

pub mod host;
pub mod mock;

/// Error type for file transfers.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The path does not belong to any mounted device.
    #[error("no mounted device holds {0}")]
    NotMounted(String),

    /// The file does not exist.
    #[error("file not found: {0}")]
    NotFound(String),

    /// The device refused the transfer.
    #[error("I/O error on {path}: {reason}")]
    Device { path: String, reason: String },

    /// A host file system error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait abstracting file transfer to and from a storage device.
pub trait FileTransport: Send + Sync {
    /// Reads the whole file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>, TransportError>;

    /// Replaces the file at `path` with `bytes` and returns the number of
    /// bytes transferred.
    fn write(&self, path: &str, bytes: &[u8]) -> Result<usize, TransportError>;
}
