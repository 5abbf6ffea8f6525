//! # prefs-core
//!
//! Shared library for the console front-end's persistent preferences:
//! the settings record, the controller button-mapping table, the range
//! validator, and the XML preferences codec.
//!
//! This crate performs no I/O.  Reading and writing bytes, probing storage
//! devices, and running migrations live in `prefs-store`.
//!
//! # Architecture overview (for beginners)
//!
//! The front-end keeps every user tunable (folders, video tuning, audio,
//! emulation hacks, menu preferences, controller assignments) in a single
//! flat record.  That record is written to a small XML file on whatever
//! storage device happens to be present, and read back at the next start.
//!
//! - **`domain`** – The data itself.  [`SettingsRecord`] holds the scalar
//!   settings, [`ButtonMap`] the per-controller button assignments, and
//!   [`domain::validate`] repairs values that would crash the emulator core.
//!
//! - **`document`** – A minimal element tree plus an XML reader/writer.  The
//!   codec builds and inspects this tree; it never touches raw XML events.
//!
//! - **`codec`** – Converts the record to and from the XML document.  Encoding
//!   and decoding are both driven by one table of field descriptors so a
//!   setting cannot be written under one name and read back under another.

pub mod codec;
pub mod document;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `prefs_core::SettingsRecord` instead of `prefs_core::domain::settings::SettingsRecord`.
pub use codec::{decode, encode, is_supported_version, CodecError, DecodeSummary, EncodeOptions};
pub use domain::buttons::{ButtonMap, LogicalDevice, PhysicalController, BUTTON_SLOTS};
pub use domain::settings::{
    ControllerProfile, Language, Platform, PlatformDefaults, SettingsRecord, Transport,
    PATH_CAPACITY,
};
pub use domain::validate::sanitize;
