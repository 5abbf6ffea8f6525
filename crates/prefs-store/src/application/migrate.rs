//! One-time fixups run right after the load attempt.
//!
//! Releases before the folder rename kept everything under `fceux/`.  This
//! step moves that folder to the current name on the load device, rewrites
//! folder settings that still hold the old *default* paths, and makes sure
//! the media subfolders exist.  User-customised paths never match a legacy
//! default and are left alone.  It finishes by re-applying the video mode and
//! menu language, which depend on the freshly loaded values.

use prefs_core::domain::settings::PathCategory;
use prefs_core::{sanitize, Language, SettingsRecord, Transport};
use tracing::{debug, info, warn};

use crate::infrastructure::device::DeviceService;
use crate::infrastructure::ui::SessionHooks;

/// Folder settings whose legacy default is rewritten, in rewrite order.
const REWRITTEN_FOLDERS: [PathCategory; 6] = PathCategory::ALL;

/// Media folders recreated under the load device after migration.
const ENSURED_FOLDERS: [PathCategory; 4] = [
    PathCategory::Screenshots,
    PathCategory::Covers,
    PathCategory::Artwork,
    PathCategory::Cheats,
];

/// Collaborators and folder names the migration works with.
pub struct MigrationContext<'a> {
    pub devices: &'a dyn DeviceService,
    pub hooks: &'a dyn SessionHooks,
    pub app_folder: &'a str,
    pub legacy_folder: &'a str,
}

/// What the migration changed, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Fields repaired by the validator after a successful load.
    pub repaired: usize,
    /// `(from, to)` when the legacy folder was renamed.
    pub renamed: Option<(String, String)>,
    /// Folder settings rewritten from a legacy default.
    pub rewritten: Vec<PathCategory>,
    /// Directories created under the load device.
    pub created: Vec<String>,
    /// Video mode re-applied, if any.
    pub video_mode: Option<i32>,
}

/// Runs every fixup in order.  Failures are logged and never abort the step.
pub fn run(record: &mut SettingsRecord, loaded: bool, ctx: &MigrationContext<'_>) -> MigrationReport {
    let mut report = MigrationReport::default();

    if loaded {
        report.repaired = sanitize(record);
    }

    let load_prefix = removable_load_prefix(record, ctx.devices);
    if let Some(prefix) = &load_prefix {
        report.renamed = rename_legacy_folder(prefix, ctx);
    }

    for category in REWRITTEN_FOLDERS {
        let legacy = category.default_folder(ctx.legacy_folder);
        let field = record.folder_mut(category);
        if *field == legacy {
            *field = category.default_folder(ctx.app_folder);
            report.rewritten.push(category);
        }
    }

    if let Some(prefix) = &load_prefix {
        for category in ENSURED_FOLDERS {
            let dir = format!("{}{}", prefix, record.folder(category));
            match ctx.devices.ensure_dir(&dir) {
                Ok(true) => report.created.push(dir),
                Ok(false) => {}
                Err(e) => warn!(dir = %dir, error = %e, "could not create media folder"),
            }
        }
    }

    if record.video_mode > 0 {
        ctx.hooks.reset_video_mode(record.video_mode);
        report.video_mode = Some(record.video_mode);
    }

    ctx.hooks
        .apply_language(record.language().unwrap_or(Language::English));

    debug!(?report, "migration finished");
    report
}

/// Prefix of the load device when it is SD or USB and currently mounted.
fn removable_load_prefix(record: &SettingsRecord, devices: &dyn DeviceService) -> Option<String> {
    match record.load_transport() {
        Some(transport @ (Transport::Sd | Transport::Usb)) => devices.path_prefix(transport),
        _ => None,
    }
}

fn rename_legacy_folder(prefix: &str, ctx: &MigrationContext<'_>) -> Option<(String, String)> {
    let from = format!("{}{}", prefix, ctx.legacy_folder);
    if !ctx.devices.dir_exists(&from) {
        return None;
    }
    let to = format!("{}{}", prefix, ctx.app_folder);
    match ctx.devices.rename(&from, &to) {
        Ok(()) => {
            info!(from = %from, to = %to, "renamed legacy application folder");
            Some((from, to))
        }
        Err(e) => {
            warn!(error = %e, "could not rename legacy application folder");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
