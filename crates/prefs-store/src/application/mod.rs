//! Application layer use cases for the preferences store.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the pure preferences model in
//! `prefs_core` and the storage adapters in `infrastructure`.  Use cases in
//! this layer:
//!
//! - **Orchestrate** the record, the validator and the codec to fulfil a goal
//!   such as "load the user's settings from whichever card is inserted".
//! - **Depend on abstractions** (the `DeviceService`, `FileTransport`,
//!   `Notifier` and `SessionHooks` traits) so tests can run without hardware.
//! - **Contain no direct file system access**.
//!
//! # Sub-modules
//!
//! - **`locate`** – Decides which directory holds the settings file, probing
//!   candidate devices and creating the save folder when needed.
//!
//! - **`persistence`** – The load/save controller: at most one real load per
//!   run, and a save operation that validates before it writes.
//!
//! - **`migrate`** – One-time fixups after the load attempt, upgrading the
//!   legacy folder name and legacy default paths.

pub mod locate;
pub mod migrate;
pub mod persistence;

use prefs_core::CodecError;
use thiserror::Error;

use crate::infrastructure::device::DeviceError;
use crate::infrastructure::transport::TransportError;

/// Error type for loading and saving preferences.
///
/// The public entry points collapse these into a success flag after logging;
/// the typed error is available from the `try_` variants.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// No storage device is available to save to.
    #[error("unable to locate a save device")]
    NoSaveDevice,

    /// The settings folder or one of its subfolders could not be created.
    #[error("unable to create directory {path}")]
    CreateDirectory {
        path: String,
        #[source]
        source: DeviceError,
    },

    /// The settings document could not be encoded or was rejected on decode.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The file transfer failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The settings file exists but holds no bytes.
    #[error("settings file {0} is empty")]
    EmptyFile(String),

    /// The settings file is larger than the save buffer, so it cannot be a
    /// document this application wrote.
    #[error("settings file {path} is {size} bytes, limit is {limit}")]
    FileTooLarge { path: String, size: usize, limit: usize },

    /// The write reported zero bytes transferred.
    #[error("no bytes were written to {0}")]
    EmptyWrite(String),
}
