//! Domain entities for the preferences subsystem.
//!
//! This module contains pure data and rules with no infrastructure dependencies.
//!
//! # What lives here? (for beginners)
//!
//! - **`settings`** – The [`settings::SettingsRecord`]: every scalar tunable the
//!   front-end exposes, grouped the same way the on-disk document groups them
//!   (file, video, audio, emulation hacks, menu, controller).  Integer settings
//!   are kept as raw `i32` codes so that a value read from an old or damaged
//!   file can be held until the validator repairs it.
//!
//! - **`buttons`** – The [`buttons::ButtonMap`]: a fixed-size table of button
//!   assignments addressed by enumerated (logical device, physical controller)
//!   pairs, so an out-of-range index cannot be expressed.
//!
//! - **`validate`** – Range clamps for the settings that would crash the
//!   emulator core or the menu if left out of range.

pub mod buttons;
pub mod settings;
pub mod validate;
