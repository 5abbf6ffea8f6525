//! In-memory file transport for unit and integration testing.
//!
//! Files live in a map keyed by console path.  Tests can make individual
//! paths unreadable, make every write report zero bytes, and inspect the
//! order in which paths were read.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{FileTransport, TransportError};

/// A [`FileTransport`] backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryFileTransport {
    files: Mutex<HashMap<String, Vec<u8>>>,
    unreachable: Mutex<HashSet<String>>,
    zero_writes: Mutex<bool>,
    reads: Mutex<Vec<String>>,
    writes: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryFileTransport {
    /// Creates a transport holding no files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `bytes` at `path`, replacing any previous content.
    pub fn insert(&self, path: &str, bytes: impl Into<Vec<u8>>) -> &Self {
        lock(&self.files).insert(path.to_string(), bytes.into());
        self
    }

    /// Makes every later read or write of `path` fail with a device error.
    pub fn make_unreachable(&self, path: &str) -> &Self {
        lock(&self.unreachable).insert(path.to_string());
        self
    }

    /// When `enabled`, writes succeed but report zero bytes transferred.
    pub fn set_zero_writes(&self, enabled: bool) -> &Self {
        *lock(&self.zero_writes) = enabled;
        self
    }

    /// Current content of `path`.
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        lock(&self.files).get(path).cloned()
    }

    /// Paths passed to `read`, in call order.
    pub fn read_log(&self) -> Vec<String> {
        lock(&self.reads).clone()
    }

    /// Paths passed to `write`, in call order.
    pub fn write_log(&self) -> Vec<String> {
        lock(&self.writes).clone()
    }

    fn check_reachable(&self, path: &str) -> Result<(), TransportError> {
        if lock(&self.unreachable).contains(path) {
            return Err(TransportError::Device {
                path: path.to_string(),
                reason: "device not responding".to_string(),
            });
        }
        Ok(())
    }
}

impl FileTransport for MemoryFileTransport {
    fn read(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        lock(&self.reads).push(path.to_string());
        self.check_reachable(path)?;
        lock(&self.files)
            .get(path)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(path.to_string()))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<usize, TransportError> {
        lock(&self.writes).push(path.to_string());
        self.check_reachable(path)?;
        if *lock(&self.zero_writes) {
            return Ok(0);
        }
        lock(&self.files).insert(path.to_string(), bytes.to_vec());
        Ok(bytes.len())
    }
}
