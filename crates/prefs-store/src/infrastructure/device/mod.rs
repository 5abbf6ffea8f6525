//! Storage device collaborator: mount state, path prefixes, and directories.
//!
//! The console addresses every storage device through a path prefix such as
//! `sd:/` or `carda:/`.  A device can be absent (no card inserted, no USB
//! drive attached), in which case it has no prefix at all.  The application
//! layer only ever asks this trait; it never touches a filesystem directly.
//!
//! # Testability
//!
//! [`mock::MemoryDevices`] keeps mount state and directories in memory and
//! records which transports were probed, so tests can assert probe order.
//! [`host::HostDevices`] maps the console prefixes onto host directories.

use prefs_core::Transport;
use thiserror::Error;

pub mod host;
pub mod mock;

/// Error type for directory operations on a storage device.
#[derive(Debug, Error, PartialEq)]
pub enum DeviceError {
    /// The path does not start with the prefix of any mounted device.
    #[error("no mounted device holds {0}")]
    NotMounted(String),

    /// The directory could not be created.
    #[error("could not create directory {path}: {reason}")]
    CreateDir { path: String, reason: String },

    /// The directory could not be renamed.
    #[error("could not rename {from} to {to}: {reason}")]
    Rename {
        from: String,
        to: String,
        reason: String,
    },
}

/// Trait abstracting device mounting and directory primitives.
///
/// Paths are console-style strings: a device prefix followed by `/`-separated
/// components, e.g. `sd:/apps/fceultrafx`.
pub trait DeviceService: Send + Sync {
    /// Mounts `transport` if needed and returns its path prefix, or `None`
    /// when the device is unavailable.
    fn path_prefix(&self, transport: Transport) -> Option<String>;

    /// Returns `true` if `path` names an existing directory.
    fn dir_exists(&self, path: &str) -> bool;

    /// Creates the directory `path`, including missing parents.
    fn create_dir(&self, path: &str) -> Result<(), DeviceError>;

    /// Renames the directory `from` to `to` on the same device.
    fn rename(&self, from: &str, to: &str) -> Result<(), DeviceError>;

    /// Creates `path` unless it already exists.  Returns `true` when a
    /// directory was created.
    fn ensure_dir(&self, path: &str) -> Result<bool, DeviceError> {
        if self.dir_exists(path) {
            return Ok(false);
        }
        self.create_dir(path)?;
        Ok(true)
    }
}
