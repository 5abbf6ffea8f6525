//! The settings record and the enumerations its integer codes stand for.
//!
//! The record is deliberately flat: one struct, scalar fields, no nesting.
//! Each field maps one-to-one onto a `<setting>` element of the preferences
//! document (see [`crate::codec::fields`]).

use serde::{Deserialize, Serialize};

/// Capacity in bytes of every path-bearing setting, including the terminator
/// reserved by the on-device string buffers.  Decoded paths are clamped to
/// `PATH_CAPACITY - 1` bytes.
pub const PATH_CAPACITY: usize = 1024;

/// Folder name the current release stores its data under.
pub const DEFAULT_APP_FOLDER: &str = "fceultrafx";

/// Folder name used by releases before the rename.
pub const LEGACY_APP_FOLDER: &str = "fceux";

// ── Platform ──────────────────────────────────────────────────────────────────

/// Target console family.  Decides candidate storage roots and which
/// platform-only settings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Wii,
    GameCube,
}

/// Values probed from the console's system configuration when defaults are
/// initialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDefaults {
    pub platform: Platform,
    /// `true` when the system menu is configured for 16:9 output.
    pub widescreen: bool,
    /// System menu language, when the platform reports one.
    pub system_language: Option<Language>,
}

impl Default for PlatformDefaults {
    fn default() -> Self {
        Self {
            platform: Platform::Wii,
            widescreen: false,
            system_language: None,
        }
    }
}

// ── Transport ─────────────────────────────────────────────────────────────────

/// A storage medium, identified by the code persisted in `LoadMethod` /
/// `SaveMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Transport {
    /// Pick the first available device.
    Auto = 0,
    Sd = 1,
    Usb = 2,
    Dvd = 3,
    Smb = 4,
    SdSlotA = 5,
    SdSlotB = 6,
    SdPort2 = 7,
}

impl Transport {
    /// Device path prefix used by the console's mount table (e.g. `sd:/`).
    ///
    /// `Auto` is not a device and has no prefix.
    pub fn device_prefix(self) -> Option<&'static str> {
        match self {
            Transport::Auto => None,
            Transport::Sd => Some("sd:/"),
            Transport::Usb => Some("usb:/"),
            Transport::Dvd => Some("dvd:/"),
            Transport::Smb => Some("smb:/"),
            Transport::SdSlotA => Some("carda:/"),
            Transport::SdSlotB => Some("cardb:/"),
            Transport::SdPort2 => Some("port2:/"),
        }
    }
}

impl TryFrom<i32> for Transport {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Transport::Auto),
            1 => Ok(Transport::Sd),
            2 => Ok(Transport::Usb),
            3 => Ok(Transport::Dvd),
            4 => Ok(Transport::Smb),
            5 => Ok(Transport::SdSlotA),
            6 => Ok(Transport::SdSlotB),
            7 => Ok(Transport::SdPort2),
            _ => Err(()),
        }
    }
}

// ── Language ──────────────────────────────────────────────────────────────────

/// Number of menu languages; valid `language` codes are `0..LANGUAGE_COUNT`.
pub const LANGUAGE_COUNT: i32 = 14;

/// Menu language, in system-menu code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Language {
    Japanese = 0,
    English = 1,
    German = 2,
    French = 3,
    Spanish = 4,
    Italian = 5,
    Dutch = 6,
    SimplifiedChinese = 7,
    TraditionalChinese = 8,
    Korean = 9,
    Portuguese = 10,
    BrazilianPortuguese = 11,
    Catalan = 12,
    Turkish = 13,
}

impl TryFrom<i32> for Language {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Language::Japanese),
            1 => Ok(Language::English),
            2 => Ok(Language::German),
            3 => Ok(Language::French),
            4 => Ok(Language::Spanish),
            5 => Ok(Language::Italian),
            6 => Ok(Language::Dutch),
            7 => Ok(Language::SimplifiedChinese),
            8 => Ok(Language::TraditionalChinese),
            9 => Ok(Language::Korean),
            10 => Ok(Language::Portuguese),
            11 => Ok(Language::BrazilianPortuguese),
            12 => Ok(Language::Catalan),
            13 => Ok(Language::Turkish),
            _ => Err(()),
        }
    }
}

// ── Controller profile ────────────────────────────────────────────────────────

/// Which NES input devices are plugged into the emulated console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ControllerProfile {
    /// One pad and the Zapper light gun.
    Zapper = 1,
    /// Two pads.
    Pad2 = 2,
    /// Four pads through the Four Score adapter.
    Pad4 = 3,
}

impl TryFrom<i32> for ControllerProfile {
    type Error = ();

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ControllerProfile::Zapper),
            2 => Ok(ControllerProfile::Pad2),
            3 => Ok(ControllerProfile::Pad4),
            _ => Err(()),
        }
    }
}

// ── Path categories ───────────────────────────────────────────────────────────

/// The six folder settings, by what they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCategory {
    Roms,
    Saves,
    Cheats,
    Screenshots,
    Covers,
    Artwork,
}

impl PathCategory {
    pub const ALL: [PathCategory; 6] = [
        PathCategory::Roms,
        PathCategory::Saves,
        PathCategory::Cheats,
        PathCategory::Screenshots,
        PathCategory::Covers,
        PathCategory::Artwork,
    ];

    /// Subfolder name under the application folder.
    pub fn subfolder(self) -> &'static str {
        match self {
            PathCategory::Roms => "roms",
            PathCategory::Saves => "saves",
            PathCategory::Cheats => "cheats",
            PathCategory::Screenshots => "screenshots",
            PathCategory::Covers => "covers",
            PathCategory::Artwork => "artwork",
        }
    }

    /// Default folder for this category under `app_folder`, e.g. `fceultrafx/roms`.
    pub fn default_folder(self, app_folder: &str) -> String {
        format!("{}/{}", app_folder, self.subfolder())
    }
}

// ── Settings record ───────────────────────────────────────────────────────────

/// Every persisted tunable of the front-end.
///
/// A freshly constructed record is immediately usable; loading only ever
/// overwrites fields that are present in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsRecord {
    // File
    pub auto_load: i32,
    pub auto_save: i32,
    /// [`Transport`] code for loading games.
    pub load_method: i32,
    /// [`Transport`] code for saving games and preferences.
    pub save_method: i32,
    pub load_folder: String,
    pub last_file_loaded: String,
    pub save_folder: String,
    pub cheat_folder: String,
    pub game_genie: i32,
    pub screenshots_folder: String,
    pub cover_folder: String,
    pub artwork_folder: String,

    // Video
    /// 0 = automatic detection.
    pub video_mode: i32,
    pub zoom_hor: f32,
    pub zoom_vert: f32,
    pub render: i32,
    pub bilinear: i32,
    pub aspect: i32,
    pub hide_overscan: i32,
    pub palette: i32,
    pub ntsc_color: i32,
    pub crosshair: i32,
    /// 0 = NTSC, 1 = PAL, 2 = automatic.
    pub region: i32,
    pub x_shift: i32,
    pub y_shift: i32,

    // Audio
    /// Percentage, 0..=150.
    pub sound_volume: i32,
    pub sound_quality: i32,
    pub low_pass: i32,
    pub swap_duty: i32,

    // Emulation hacks
    pub overclock: i32,
    pub no_sprite_limit: i32,

    // Menu
    pub wiimote_orientation: i32,
    pub exit_action: i32,
    pub music_volume: i32,
    pub sfx_volume: i32,
    /// [`Language`] code.
    pub language: i32,
    pub preview_image: i32,
    pub hide_ram_saving: i32,

    // Controller
    /// [`ControllerProfile`] code.
    pub controller: i32,
    pub fast_forward: i32,
    pub fast_forward_button: i32,
}

impl SettingsRecord {
    /// Builds the full default record with folder settings rooted at `app_folder`.
    pub fn new(app_folder: &str) -> Self {
        Self {
            auto_load: 1,
            auto_save: 1,
            load_method: Transport::Auto as i32,
            save_method: Transport::Auto as i32,
            load_folder: PathCategory::Roms.default_folder(app_folder),
            last_file_loaded: String::new(),
            save_folder: PathCategory::Saves.default_folder(app_folder),
            cheat_folder: PathCategory::Cheats.default_folder(app_folder),
            game_genie: 0,
            screenshots_folder: PathCategory::Screenshots.default_folder(app_folder),
            cover_folder: PathCategory::Covers.default_folder(app_folder),
            artwork_folder: PathCategory::Artwork.default_folder(app_folder),

            video_mode: 0,
            zoom_hor: 1.0,
            zoom_vert: 1.0,
            render: 0,
            bilinear: 0,
            aspect: 0,
            hide_overscan: 1,
            palette: 0,
            ntsc_color: 0,
            crosshair: 1,
            region: 2,
            x_shift: 0,
            y_shift: 0,

            sound_volume: 100,
            sound_quality: 0,
            low_pass: 0,
            swap_duty: 0,

            overclock: 0,
            no_sprite_limit: 0,

            wiimote_orientation: 0,
            exit_action: 0,
            music_volume: 80,
            sfx_volume: 20,
            language: Language::English as i32,
            preview_image: 0,
            hide_ram_saving: 0,

            controller: ControllerProfile::Pad2 as i32,
            fast_forward: 1,
            fast_forward_button: 0,
        }
    }

    /// Default record adjusted for what the console's system configuration reports.
    ///
    /// On the Wii the aspect ratio follows the system widescreen flag and the
    /// menu language follows the system language.  Traditional Chinese has no
    /// translation of its own and falls back to Simplified Chinese.
    pub fn with_platform(app_folder: &str, probe: &PlatformDefaults) -> Self {
        let mut record = Self::new(app_folder);
        if probe.platform == Platform::Wii {
            if probe.widescreen {
                record.aspect = 1;
            }
            if let Some(language) = probe.system_language {
                let language = match language {
                    Language::TraditionalChinese => Language::SimplifiedChinese,
                    other => other,
                };
                record.language = language as i32;
            }
        }
        record
    }

    /// Resets every field to its default, in place.
    pub fn reset(&mut self, app_folder: &str) {
        *self = Self::new(app_folder);
    }

    pub fn load_transport(&self) -> Option<Transport> {
        Transport::try_from(self.load_method).ok()
    }

    pub fn save_transport(&self) -> Option<Transport> {
        Transport::try_from(self.save_method).ok()
    }

    pub fn language(&self) -> Option<Language> {
        Language::try_from(self.language).ok()
    }

    pub fn controller_profile(&self) -> Option<ControllerProfile> {
        ControllerProfile::try_from(self.controller).ok()
    }

    /// Returns the folder setting for `category`.
    pub fn folder(&self, category: PathCategory) -> &str {
        match category {
            PathCategory::Roms => &self.load_folder,
            PathCategory::Saves => &self.save_folder,
            PathCategory::Cheats => &self.cheat_folder,
            PathCategory::Screenshots => &self.screenshots_folder,
            PathCategory::Covers => &self.cover_folder,
            PathCategory::Artwork => &self.artwork_folder,
        }
    }

    /// Mutable access to the folder setting for `category`.
    pub fn folder_mut(&mut self, category: PathCategory) -> &mut String {
        match category {
            PathCategory::Roms => &mut self.load_folder,
            PathCategory::Saves => &mut self.save_folder,
            PathCategory::Cheats => &mut self.cheat_folder,
            PathCategory::Screenshots => &mut self.screenshots_folder,
            PathCategory::Covers => &mut self.cover_folder,
            PathCategory::Artwork => &mut self.artwork_folder,
        }
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::new(DEFAULT_APP_FOLDER)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
