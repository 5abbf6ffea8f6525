//! Host-filesystem device service.
//!
//! Maps console device prefixes onto directories of the development machine,
//! so that `sd:/apps/fceultrafx` can resolve to e.g.
//! `/home/me/console/sd/apps/fceultrafx`.  A transport counts as mounted when
//! a mount entry exists for it and its host directory is present.

use std::collections::HashMap;
use std::path::PathBuf;

use prefs_core::Transport;
use tracing::debug;

use super::{DeviceError, DeviceService};
use crate::infrastructure::storage::config::MountEntry;

/// A [`DeviceService`] backed by host directories.
#[derive(Debug, Clone, Default)]
pub struct HostDevices {
    mounts: HashMap<Transport, PathBuf>,
}

impl HostDevices {
    /// Creates a service with no device mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mount table from configuration entries.
    pub fn from_mounts(entries: &[MountEntry]) -> Self {
        entries.iter().fold(Self::new(), |devices, entry| {
            devices.with_mount(entry.transport, entry.host_path.clone())
        })
    }

    /// Serves `transport` from the host directory `root`.
    pub fn with_mount(mut self, transport: Transport, root: impl Into<PathBuf>) -> Self {
        self.mounts.insert(transport, root.into());
        self
    }

    /// Translates a console path into a host path, or `None` when no mounted
    /// device owns its prefix.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        self.mounts.iter().find_map(|(transport, root)| {
            let prefix = transport.device_prefix()?;
            let rest = path.strip_prefix(prefix)?;
            let mut host = root.clone();
            for component in rest.split('/').filter(|c| !c.is_empty()) {
                host.push(component);
            }
            Some(host)
        })
    }

    fn require(&self, path: &str) -> Result<PathBuf, DeviceError> {
        self.resolve(path)
            .ok_or_else(|| DeviceError::NotMounted(path.to_string()))
    }
}

impl DeviceService for HostDevices {
    fn path_prefix(&self, transport: Transport) -> Option<String> {
        let root = self.mounts.get(&transport)?;
        if !root.is_dir() {
            debug!(?transport, root = %root.display(), "mount root missing on host");
            return None;
        }
        transport.device_prefix().map(str::to_string)
    }

    fn dir_exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|host| host.is_dir())
    }

    fn create_dir(&self, path: &str) -> Result<(), DeviceError> {
        let host = self.require(path)?;
        std::fs::create_dir_all(&host).map_err(|e| DeviceError::CreateDir {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), DeviceError> {
        let rename_error = |reason: String| DeviceError::Rename {
            from: from.to_string(),
            to: to.to_string(),
            reason,
        };
        let host_from = self.require(from)?;
        let host_to = self.require(to)?;
        if host_to.exists() {
            return Err(rename_error("target exists".to_string()));
        }
        std::fs::rename(&host_from, &host_to).map_err(|e| rename_error(e.to_string()))
    }
}
