//! prefs-store library entry point.
//!
//! Everything in `prefs-core` is pure; this crate is where the preferences
//! meet storage devices.  It finds the settings file, drives the codec, and
//! applies the one-time folder migration after start-up.
//!
//! # Layers (for beginners)
//!
//! - **`application`** – The use cases: [`application::locate`] decides where
//!   the settings file lives, [`application::persistence`] loads and saves it,
//!   and [`application::migrate`] upgrades legacy folder names.  These depend
//!   only on the traits defined in `infrastructure`, never on a concrete
//!   filesystem.
//!
//! - **`infrastructure`** – The traits plus their adapters: the host
//!   filesystem (for development machines and tools) and in-memory doubles
//!   (for tests).  The TOML configuration of the subsystem also lives here.
//!
//! A typical embedding builds one [`PreferencesController`] at start-up,
//! calls [`PreferencesController::load`] once, and calls
//! [`PreferencesController::save`] whenever the user commits a change.

pub mod application;
pub mod infrastructure;

pub use application::persistence::{LoadState, PreferencesController};
pub use application::PrefsError;
pub use infrastructure::storage::config::{load_config, save_config, ConfigError, StorageConfig};
