//! Infrastructure layer for the preferences store.
//!
//! Contains the collaborator traits the application layer is written
//! against, together with their adapters: host-filesystem implementations,
//! in-memory test doubles, and the TOML configuration file.
//!
//! **Dependency rule**: this layer may depend on `prefs_core`, but MUST NOT
//! import anything from `application`.

pub mod device;
pub mod storage;
pub mod transport;
pub mod ui;
