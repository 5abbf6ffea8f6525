//! TOML-based configuration for the preferences store.
//!
//! The configuration says which console the store runs on, which folder
//! names it uses, and where it looks for the settings file.  Example:
//!
//! ```toml
//! platform = "wii"
//! app_folder = "fceultrafx"
//! file_name = "settings.xml"
//!
//! [[load_candidates]]
//! transport = "sd"
//! parent = "apps/"
//!
//! [[mounts]]
//! transport = "sd"
//! host_path = "/home/me/console/sd"
//! ```
//!
//! # Serde default values
//!
//! Every field is annotated with `#[serde(default = ...)]` (or plain
//! `#[serde(default)]`), so an empty file is a valid configuration and a file
//! written by an older release keeps working when new keys are added.
//! When `load_candidates` or `save_transports` are left empty, the standard
//! lists for `platform` are used.

use std::path::{Path, PathBuf};

use prefs_core::domain::settings::{DEFAULT_APP_FOLDER, LEGACY_APP_FOLDER};
use prefs_core::{EncodeOptions, Platform, Transport};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration of the preferences store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Console family; selects the standard candidate lists.
    #[serde(default = "default_platform")]
    pub platform: Platform,
    /// Written as the `app` attribute of the settings document.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Written as the `version` attribute; must have the `D.D.D` form.
    #[serde(default = "default_app_version")]
    pub app_version: String,
    /// Folder the application keeps its data in, relative to a device root.
    #[serde(default = "default_app_folder")]
    pub app_folder: String,
    /// Folder name used by older releases, migrated to `app_folder`.
    #[serde(default = "default_legacy_folder")]
    pub legacy_folder: String,
    /// Name of the settings file inside the application folder.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Largest settings document the save buffer can hold, in bytes.
    #[serde(default = "default_save_buffer_size")]
    pub save_buffer_size: usize,
    /// Ordered devices tried by automatic save; empty means the platform's
    /// standard list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub save_transports: Vec<Transport>,
    /// Ordered load locations; empty means the platform's standard list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_candidates: Vec<CandidateRoot>,
    /// Host directories standing in for console devices (host adapters only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mounts: Vec<MountEntry>,
}

/// One load location: `<device prefix><parent><app folder>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateRoot {
    pub transport: Transport,
    /// Path between the device root and the application folder, with a
    /// trailing slash (`"apps/"`), or empty.
    #[serde(default)]
    pub parent: String,
}

impl CandidateRoot {
    pub fn new(transport: Transport, parent: &str) -> Self {
        Self {
            transport,
            parent: parent.to_string(),
        }
    }
}

/// Maps a console device onto a host directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MountEntry {
    pub transport: Transport,
    pub host_path: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_platform() -> Platform {
    Platform::Wii
}
fn default_app_name() -> String {
    "FCE Ultra GX".to_string()
}
fn default_app_version() -> String {
    "3.5.3".to_string()
}
fn default_app_folder() -> String {
    DEFAULT_APP_FOLDER.to_string()
}
fn default_legacy_folder() -> String {
    LEGACY_APP_FOLDER.to_string()
}
fn default_file_name() -> String {
    "settings.xml".to_string()
}
fn default_save_buffer_size() -> usize {
    512 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            app_name: default_app_name(),
            app_version: default_app_version(),
            app_folder: default_app_folder(),
            legacy_folder: default_legacy_folder(),
            file_name: default_file_name(),
            save_buffer_size: default_save_buffer_size(),
            save_transports: Vec::new(),
            load_candidates: Vec::new(),
            mounts: Vec::new(),
        }
    }
}

impl StorageConfig {
    /// Default configuration for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The load locations in priority order.
    pub fn candidate_roots(&self) -> Vec<CandidateRoot> {
        if !self.load_candidates.is_empty() {
            return self.load_candidates.clone();
        }
        match self.platform {
            Platform::Wii => vec![
                CandidateRoot::new(Transport::Sd, "apps/"),
                CandidateRoot::new(Transport::Usb, "apps/"),
                CandidateRoot::new(Transport::Sd, ""),
                CandidateRoot::new(Transport::Usb, ""),
            ],
            Platform::GameCube => vec![
                CandidateRoot::new(Transport::SdSlotA, ""),
                CandidateRoot::new(Transport::SdSlotB, ""),
                CandidateRoot::new(Transport::SdPort2, ""),
            ],
        }
    }

    /// The devices automatic save tries, in order.
    pub fn save_transport_order(&self) -> Vec<Transport> {
        if !self.save_transports.is_empty() {
            return self.save_transports.clone();
        }
        match self.platform {
            Platform::Wii => vec![Transport::Sd, Transport::Usb],
            Platform::GameCube => vec![Transport::SdSlotA, Transport::SdSlotB, Transport::SdPort2],
        }
    }

    /// Codec options derived from this configuration.
    pub fn encode_options(&self) -> EncodeOptions<'_> {
        EncodeOptions {
            app_name: &self.app_name,
            app_version: &self.app_version,
            platform: self.platform,
            budget: self.save_buffer_size,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads a [`StorageConfig`] from `path`, returning the default configuration
/// if the file does not exist yet.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<StorageConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => StorageConfig::from_toml_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StorageConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &StorageConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
