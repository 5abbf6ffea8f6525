//! Host-filesystem file transport.
//!
//! Resolves console paths through a [`HostDevices`] mount table and reads or
//! writes the resulting host file with `std::fs`.

use std::sync::Arc;

use super::{FileTransport, TransportError};
use crate::infrastructure::device::host::HostDevices;

/// A [`FileTransport`] that stores files on the host.
#[derive(Debug, Clone)]
pub struct HostFileTransport {
    devices: Arc<HostDevices>,
}

impl HostFileTransport {
    /// Creates a transport that shares `devices`' mount table.
    pub fn new(devices: Arc<HostDevices>) -> Self {
        Self { devices }
    }
}

impl FileTransport for HostFileTransport {
    fn read(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        let host = self
            .devices
            .resolve(path)
            .ok_or_else(|| TransportError::NotMounted(path.to_string()))?;
        match std::fs::read(&host) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TransportError::NotFound(path.to_string()))
            }
            Err(source) => Err(TransportError::Io { path: host, source }),
        }
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<usize, TransportError> {
        let host = self
            .devices
            .resolve(path)
            .ok_or_else(|| TransportError::NotMounted(path.to_string()))?;
        std::fs::write(&host, bytes).map_err(|source| TransportError::Io {
            path: host.clone(),
            source,
        })?;
        Ok(bytes.len())
    }
}
