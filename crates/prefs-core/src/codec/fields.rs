//! Field descriptor tables shared by the encoder and the decoder.
//!
//! Every persisted setting is listed exactly once in [`SETTINGS`], with the
//! section it is written under, its name and description in the document,
//! and a typed accessor pair.  Controller mapping blocks are listed in
//! [`CONTROLLER_BLOCKS`].  Adding a setting means adding one row here.

use crate::domain::buttons::{LogicalDevice, PhysicalController};
use crate::domain::settings::{Platform, SettingsRecord};

/// Top-level groups of the preferences document, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    File,
    Video,
    Audio,
    EmulationHacks,
    Menu,
    Controller,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::File,
        Section::Video,
        Section::Audio,
        Section::EmulationHacks,
        Section::Menu,
        Section::Controller,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::File => "File",
            Section::Video => "Video",
            Section::Audio => "Audio",
            Section::EmulationHacks => "Emulation Hacks",
            Section::Menu => "Menu",
            Section::Controller => "Controller",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Section::File => "File Settings",
            Section::Video => "Video Settings",
            Section::Audio => "Audio Settings",
            Section::EmulationHacks => "Emulation Hacks Settings",
            Section::Menu => "Menu Settings",
            Section::Controller => "Controller Settings",
        }
    }
}

/// How a setting's value is read from and written to the record.
#[derive(Clone, Copy)]
pub enum FieldAccess {
    /// Written as base-10 text.
    Int {
        get: fn(&SettingsRecord) -> i32,
        set: fn(&mut SettingsRecord, i32),
    },
    /// Written with two decimals.
    Ratio {
        get: fn(&SettingsRecord) -> f32,
        set: fn(&mut SettingsRecord, f32),
    },
    /// Written verbatim; clamped to the path capacity on read.
    Path {
        get: fn(&SettingsRecord) -> &str,
        set: fn(&mut SettingsRecord, String),
    },
}

/// One `<setting>` element of the document.
#[derive(Clone, Copy)]
pub struct SettingField {
    pub section: Section,
    pub name: &'static str,
    pub description: &'static str,
    /// When set, the setting is only written for this platform.  It is read
    /// back on every platform.
    pub only_on: Option<Platform>,
    pub access: FieldAccess,
}

impl SettingField {
    /// Whether the encoder writes this setting for `platform`.
    pub fn written_on(&self, platform: Platform) -> bool {
        self.only_on.map_or(true, |only| only == platform)
    }
}

macro_rules! int_setting {
    ($section:ident, $name:literal, $desc:literal, $field:ident) => {
        int_setting!($section, $name, $desc, $field, None)
    };
    ($section:ident, $name:literal, $desc:literal, $field:ident, $only_on:expr) => {
        SettingField {
            section: Section::$section,
            name: $name,
            description: $desc,
            only_on: $only_on,
            access: FieldAccess::Int {
                get: |r| r.$field,
                set: |r, v| r.$field = v,
            },
        }
    };
}

macro_rules! ratio_setting {
    ($section:ident, $name:literal, $desc:literal, $field:ident) => {
        SettingField {
            section: Section::$section,
            name: $name,
            description: $desc,
            only_on: None,
            access: FieldAccess::Ratio {
                get: |r| r.$field,
                set: |r, v| r.$field = v,
            },
        }
    };
}

macro_rules! path_setting {
    ($section:ident, $name:literal, $desc:literal, $field:ident) => {
        SettingField {
            section: Section::$section,
            name: $name,
            description: $desc,
            only_on: None,
            access: FieldAccess::Path {
                get: |r| r.$field.as_str(),
                set: |r, v| r.$field = v,
            },
        }
    };
}

/// Every persisted scalar setting, in document order.
pub static SETTINGS: &[SettingField] = &[
    int_setting!(File, "AutoLoad", "Auto Load", auto_load),
    int_setting!(File, "AutoSave", "Auto Save", auto_save),
    int_setting!(File, "LoadMethod", "Load Method", load_method),
    int_setting!(File, "SaveMethod", "Save Method", save_method),
    path_setting!(File, "LoadFolder", "Load Folder", load_folder),
    path_setting!(File, "LastFileLoaded", "Last File Loaded", last_file_loaded),
    path_setting!(File, "SaveFolder", "Save Folder", save_folder),
    path_setting!(File, "CheatFolder", "Cheats Folder", cheat_folder),
    int_setting!(File, "gamegenie", "Game Genie", game_genie),
    path_setting!(File, "ScreenshotsFolder", "Screenshots Folder", screenshots_folder),
    path_setting!(File, "CoverFolder", "Covers Folder", cover_folder),
    path_setting!(File, "ArtworkFolder", "Artwork Folder", artwork_folder),
    int_setting!(Video, "videomode", "Video Mode", video_mode),
    ratio_setting!(Video, "zoomHor", "Horizontal Zoom Level", zoom_hor),
    ratio_setting!(Video, "zoomVert", "Vertical Zoom Level", zoom_vert),
    int_setting!(Video, "render", "Rendering", render),
    int_setting!(Video, "bilinear", "Bilinear Filtering", bilinear),
    int_setting!(Video, "aspect", "Aspect Ratio", aspect),
    int_setting!(Video, "hideoverscan", "Crop Overscan", hide_overscan),
    int_setting!(Video, "currpal", "Color Palette", palette),
    int_setting!(Video, "ntsccolor", "NTSC Color", ntsc_color),
    int_setting!(Video, "crosshair", "Show Crosshair", crosshair),
    int_setting!(Video, "region", "Region", region),
    int_setting!(Video, "xshift", "Horizontal Video Shift", x_shift),
    int_setting!(Video, "yshift", "Vertical Video Shift", y_shift),
    int_setting!(Audio, "soundvolume", "Sound Volume", sound_volume),
    int_setting!(Audio, "soundquality", "Sound Quality", sound_quality),
    int_setting!(Audio, "lowpass", "Low Pass Filter", low_pass),
    int_setting!(Audio, "swapduty", "Swap Duty Cycles", swap_duty),
    int_setting!(EmulationHacks, "overclock", "PPU Overclocking", overclock),
    int_setting!(EmulationHacks, "nospritelimit", "No Sprite Limit", no_sprite_limit),
    int_setting!(
        Menu,
        "WiimoteOrientation",
        "Wiimote Orientation",
        wiimote_orientation,
        Some(Platform::Wii)
    ),
    int_setting!(Menu, "ExitAction", "Exit Action", exit_action),
    int_setting!(Menu, "MusicVolume", "Music Volume", music_volume),
    int_setting!(Menu, "SFXVolume", "Sound Effects Volume", sfx_volume),
    int_setting!(Menu, "language", "Language", language),
    int_setting!(Menu, "PreviewImage", "Preview Image", preview_image),
    int_setting!(Menu, "HideRAMSaving", "Hide RAM Saving", hide_ram_saving),
    int_setting!(Controller, "Controller", "Controller", controller),
    int_setting!(Controller, "FastForward", "Fast Forward", fast_forward),
    int_setting!(Controller, "FastForwardButton", "Fast Forward Button", fast_forward_button),
];

/// One `<controller>` mapping block of the document.
#[derive(Debug, Clone, Copy)]
pub struct ControllerBlock {
    pub name: &'static str,
    pub description: &'static str,
    pub device: LogicalDevice,
    pub controller: PhysicalController,
}

/// The persisted mapping blocks, in document order.
pub static CONTROLLER_BLOCKS: [ControllerBlock; 8] = [
    ControllerBlock {
        name: "btnmap_pad_gcpad",
        description: "NES Pad - GameCube Controller",
        device: LogicalDevice::Pad,
        controller: PhysicalController::GameCubePad,
    },
    ControllerBlock {
        name: "btnmap_pad_wiimote",
        description: "NES Pad - Wiimote",
        device: LogicalDevice::Pad,
        controller: PhysicalController::Wiimote,
    },
    ControllerBlock {
        name: "btnmap_pad_classic",
        description: "NES Pad - Classic Controller",
        device: LogicalDevice::Pad,
        controller: PhysicalController::Classic,
    },
    ControllerBlock {
        name: "btnmap_pad_wupc",
        description: "NES Pad - Wii U Pro Controller",
        device: LogicalDevice::Pad,
        controller: PhysicalController::WiiUPro,
    },
    ControllerBlock {
        name: "btnmap_pad_wiidrc",
        description: "NES Pad - Wii U Gamepad",
        device: LogicalDevice::Pad,
        controller: PhysicalController::WiiUGamepad,
    },
    ControllerBlock {
        name: "btnmap_pad_nunchuk",
        description: "NES Pad - Nunchuk + Wiimote",
        device: LogicalDevice::Pad,
        controller: PhysicalController::Nunchuk,
    },
    ControllerBlock {
        name: "btnmap_zapper_gcpad",
        description: "Zapper - GameCube Controller",
        device: LogicalDevice::Zapper,
        controller: PhysicalController::GameCubePad,
    },
    ControllerBlock {
        name: "btnmap_zapper_wiimote",
        description: "Zapper - Wiimote",
        device: LogicalDevice::Zapper,
        controller: PhysicalController::Wiimote,
    },
];
