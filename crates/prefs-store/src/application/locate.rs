//! LocationResolver: decides which directory holds the settings file.
//!
//! Two branches:
//!
//! - **Known location.**  Once a load or save has succeeded, its directory is
//!   cached and reused for every later save in the run.  The directory the
//!   application was launched from counts as known too.
//! - **Probing.**  Otherwise the configured candidate roots are rendered into
//!   directories (`<prefix><parent><app folder>`) for devices that are
//!   currently available.  Loading tries them in order; saving picks one
//!   device and makes sure the folder exists there.
//!
//! The save branch never falls through to another device once it has picked
//! one: a folder that cannot be created fails the save.

use std::sync::Arc;

use prefs_core::domain::settings::PathCategory;
use prefs_core::{SettingsRecord, Transport};
use tracing::{debug, info};

use super::PrefsError;
use crate::infrastructure::device::DeviceService;
use crate::infrastructure::storage::config::{CandidateRoot, StorageConfig};

/// Subfolders that must exist next to a freshly created settings folder.
const REQUIRED_SUBFOLDERS: [PathCategory; 2] = [PathCategory::Roms, PathCategory::Saves];

/// Resolves the settings directory for loads and saves.
pub struct LocationResolver {
    devices: Arc<dyn DeviceService>,
    app_folder: String,
    candidates: Vec<CandidateRoot>,
    save_transports: Vec<Transport>,
    known: Option<String>,
    app_root: Option<String>,
}

impl LocationResolver {
    /// Creates a resolver with nothing known yet.
    pub fn new(devices: Arc<dyn DeviceService>, config: &StorageConfig) -> Self {
        Self {
            devices,
            app_folder: config.app_folder.clone(),
            candidates: config.candidate_roots(),
            save_transports: config.save_transport_order(),
            known: None,
            app_root: None,
        }
    }

    /// Sets the directory the application was launched from.
    pub fn set_app_root(&mut self, root: &str) {
        let root = root.trim_end_matches('/');
        if !root.is_empty() {
            self.app_root = Some(root.to_string());
        }
    }

    /// The cached settings directory, if one has been resolved.
    pub fn known_location(&self) -> Option<&str> {
        self.known.as_deref()
    }

    pub fn app_root(&self) -> Option<&str> {
        self.app_root.as_deref()
    }

    /// Caches `dir` after a successful load.  It also becomes the application
    /// root when none was reported.
    pub fn remember(&mut self, dir: &str) {
        if self.app_root.is_none() {
            self.app_root = Some(dir.to_string());
        }
        self.known = Some(dir.to_string());
    }

    /// Directories to try when loading, in priority order.
    ///
    /// The application root comes first, followed by every candidate whose
    /// device is available.  Unavailable devices are skipped.
    pub fn load_candidates(&self) -> Vec<String> {
        let mut dirs: Vec<String> = self.app_root.iter().cloned().collect();
        for candidate in &self.candidates {
            match self.devices.path_prefix(candidate.transport) {
                Some(prefix) => {
                    dirs.push(format!("{}{}{}", prefix, candidate.parent, self.app_folder));
                }
                None => debug!(transport = ?candidate.transport, "load candidate unavailable"),
            }
        }
        dirs
    }

    /// Directory to save into, creating it on a device when nothing is
    /// known yet.
    ///
    /// # Errors
    ///
    /// - [`PrefsError::NoSaveDevice`] if no device is available.
    /// - [`PrefsError::CreateDirectory`] if the folder or one of its required
    ///   subfolders cannot be created.
    pub fn save_location(&mut self, record: &SettingsRecord) -> Result<String, PrefsError> {
        if let Some(known) = &self.known {
            return Ok(known.clone());
        }
        if let Some(root) = &self.app_root {
            self.known = Some(root.clone());
            return Ok(root.clone());
        }

        let prefix = self.save_device(record).ok_or(PrefsError::NoSaveDevice)?;
        let dir = format!("{}{}", prefix, self.app_folder);

        self.ensure_dir(&dir)?;
        for category in REQUIRED_SUBFOLDERS {
            self.ensure_dir(&format!("{}/{}", dir, category.subfolder()))?;
        }

        info!(dir = %dir, "settings folder selected");
        self.known = Some(dir.clone());
        Ok(dir)
    }

    /// Prefix of the device to save to.  A concrete save method in the
    /// record is honoured; automatic takes the first available device.
    fn save_device(&self, record: &SettingsRecord) -> Option<String> {
        match record.save_transport() {
            Some(Transport::Auto) | None => self
                .save_transports
                .iter()
                .find_map(|transport| self.devices.path_prefix(*transport)),
            Some(transport) => self.devices.path_prefix(transport),
        }
    }

    fn ensure_dir(&self, path: &str) -> Result<(), PrefsError> {
        let created = self
            .devices
            .ensure_dir(path)
            .map_err(|source| PrefsError::CreateDirectory {
                path: path.to_string(),
                source,
            })?;
        if created {
            debug!(path, "created directory");
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
