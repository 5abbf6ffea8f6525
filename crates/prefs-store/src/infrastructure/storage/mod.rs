//! Storage infrastructure: configuration of the preferences subsystem.
//!
//! The `config` sub-module reads and writes [`config::StorageConfig`], the
//! TOML file that says which platform the subsystem runs on, which folder
//! names it uses, and where it looks for the settings file.  Missing keys
//! fall back to defaults so a partial (or absent) file always works.

pub mod config;
