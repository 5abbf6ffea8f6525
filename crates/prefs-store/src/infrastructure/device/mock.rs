//! In-memory device service for unit and integration testing.
//!
//! Lets tests decide which transports are mounted, pre-populate directories,
//! force directory creation to fail, and inspect the probe log afterwards.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use prefs_core::Transport;

use super::{DeviceError, DeviceService};

/// A [`DeviceService`] backed by in-memory sets.
#[derive(Default)]
pub struct MemoryDevices {
    mounted: Mutex<HashMap<Transport, String>>,
    dirs: Mutex<BTreeSet<String>>,
    failing: Mutex<HashSet<String>>,
    probes: Mutex<Vec<Transport>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn trim(path: &str) -> &str {
    path.trim_end_matches('/')
}

impl MemoryDevices {
    /// Creates a service with no device mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `transport` available under its standard prefix.
    pub fn mount(&self, transport: Transport) -> &Self {
        if let Some(prefix) = transport.device_prefix() {
            lock(&self.mounted).insert(transport, prefix.to_string());
        }
        self
    }

    /// Makes `transport` unavailable again.
    pub fn unmount(&self, transport: Transport) -> &Self {
        lock(&self.mounted).remove(&transport);
        self
    }

    /// Adds an existing directory.
    pub fn add_dir(&self, path: &str) -> &Self {
        lock(&self.dirs).insert(trim(path).to_string());
        self
    }

    /// Makes every later `create_dir(path)` fail.
    pub fn fail_create_dir(&self, path: &str) -> &Self {
        lock(&self.failing).insert(trim(path).to_string());
        self
    }

    /// Returns `true` if `path` exists as a directory.
    pub fn has_dir(&self, path: &str) -> bool {
        lock(&self.dirs).contains(trim(path))
    }

    /// Every directory, in sorted order.
    pub fn dirs(&self) -> Vec<String> {
        lock(&self.dirs).iter().cloned().collect()
    }

    /// Transports passed to `path_prefix`, in call order.
    pub fn probe_log(&self) -> Vec<Transport> {
        lock(&self.probes).clone()
    }

    fn is_mounted_path(&self, path: &str) -> bool {
        lock(&self.mounted)
            .values()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl DeviceService for MemoryDevices {
    fn path_prefix(&self, transport: Transport) -> Option<String> {
        lock(&self.probes).push(transport);
        lock(&self.mounted).get(&transport).cloned()
    }

    fn dir_exists(&self, path: &str) -> bool {
        self.has_dir(path)
    }

    fn create_dir(&self, path: &str) -> Result<(), DeviceError> {
        let path = trim(path);
        if !self.is_mounted_path(path) {
            return Err(DeviceError::NotMounted(path.to_string()));
        }
        if lock(&self.failing).contains(path) {
            return Err(DeviceError::CreateDir {
                path: path.to_string(),
                reason: "device is write-protected".to_string(),
            });
        }

        // Parents are created along with the leaf, down to the device root.
        let mut dirs = lock(&self.dirs);
        let mut end = path.len();
        loop {
            let current = &path[..end];
            if current.ends_with(':') || current.is_empty() {
                break;
            }
            dirs.insert(current.to_string());
            match current.rfind('/') {
                Some(slash) => end = slash,
                None => break,
            }
        }
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), DeviceError> {
        let (from, to) = (trim(from), trim(to));
        let mut dirs = lock(&self.dirs);
        if !dirs.contains(from) || dirs.contains(to) {
            return Err(DeviceError::Rename {
                from: from.to_string(),
                to: to.to_string(),
                reason: "source missing or target exists".to_string(),
            });
        }

        let nested = format!("{from}/");
        let moved: Vec<String> = dirs
            .iter()
            .filter(|d| d.as_str() == from || d.starts_with(&nested))
            .cloned()
            .collect();
        for old in moved {
            dirs.remove(&old);
            dirs.insert(format!("{to}{}", &old[from.len()..]));
        }
        Ok(())
    }
}
