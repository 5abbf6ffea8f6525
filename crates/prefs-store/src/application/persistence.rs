//! PreferencesController: loads and saves the settings record.
//!
//! # State machine
//!
//! ```text
//!   Unloaded ──load()──► Loaded      (a candidate decoded)
//!            └────────► LoadFailed  (every candidate skipped)
//! ```
//!
//! Only the first `load()` of a run probes anything.  Later calls return the
//! same answer straight away, so start-up code and menu code can both call it
//! without caring who went first.  `save()` is available in every state.
//!
//! # Architecture
//!
//! The controller owns the [`LocationResolver`] and the button table, and
//! holds every collaborator as an `Arc<dyn Trait>` injected at construction
//! time.  The settings record itself is owned by the caller and passed in by
//! mutable reference, which keeps a single writer at any moment.

use std::sync::Arc;

use prefs_core::{
    decode, encode, sanitize, ButtonMap, DecodeSummary, PlatformDefaults, SettingsRecord,
};
use tracing::{debug, info, warn};

use super::locate::LocationResolver;
use super::migrate::{self, MigrationContext, MigrationReport};
use super::PrefsError;
use crate::infrastructure::device::DeviceService;
use crate::infrastructure::storage::config::StorageConfig;
use crate::infrastructure::transport::FileTransport;
use crate::infrastructure::ui::{Notifier, SessionHooks};

/// Progress notice shown while a save is in flight.
const SAVING_MESSAGE: &str = "Saving preferences...";
/// Prompt shown after a successful, non-silent save.
const SAVED_MESSAGE: &str = "Preferences saved";

/// Outcome of the single load attempt of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// `load()` has not been called yet.
    #[default]
    Unloaded,
    /// A settings file was found and decoded.
    Loaded,
    /// Every candidate was unavailable, unreadable, or rejected.
    LoadFailed,
}

/// Loads and saves preferences through injected storage collaborators.
pub struct PreferencesController {
    config: StorageConfig,
    resolver: LocationResolver,
    devices: Arc<dyn DeviceService>,
    transport: Arc<dyn FileTransport>,
    notifier: Arc<dyn Notifier>,
    hooks: Arc<dyn SessionHooks>,
    buttons: ButtonMap,
    state: LoadState,
    migration: Option<MigrationReport>,
}

impl PreferencesController {
    /// Creates a controller in the `Unloaded` state with the stock button
    /// mapping.
    pub fn new(
        config: StorageConfig,
        devices: Arc<dyn DeviceService>,
        transport: Arc<dyn FileTransport>,
        notifier: Arc<dyn Notifier>,
        hooks: Arc<dyn SessionHooks>,
    ) -> Self {
        let resolver = LocationResolver::new(devices.clone(), &config);
        Self {
            config,
            resolver,
            devices,
            transport,
            notifier,
            hooks,
            buttons: ButtonMap::default(),
            state: LoadState::Unloaded,
            migration: None,
        }
    }

    /// Sets the directory the application was launched from.  It is tried
    /// first when loading and used directly when saving.
    pub fn with_app_root(mut self, root: &str) -> Self {
        self.resolver.set_app_root(root);
        self
    }

    /// Resets the button table to the stock mapping and returns a default
    /// record adjusted for what the console reports.
    pub fn initialise_defaults(&mut self, probe: &PlatformDefaults) -> SettingsRecord {
        self.buttons.reset();
        SettingsRecord::with_platform(&self.config.app_folder, probe)
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// The settings directory in use, once a load or save has resolved one.
    pub fn known_location(&self) -> Option<&str> {
        self.resolver.known_location()
    }

    pub fn buttons(&self) -> &ButtonMap {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut ButtonMap {
        &mut self.buttons
    }

    /// What the post-load migration changed, once `load()` has run.
    pub fn migration_report(&self) -> Option<&MigrationReport> {
        self.migration.as_ref()
    }

    // ── Load ──────────────────────────────────────────────────────────────────

    /// Loads preferences into `record` from the first candidate location
    /// holding a valid settings file.
    ///
    /// Only the first call probes; later calls return the first call's
    /// result without touching any device.  Fields absent from the file keep
    /// their current values.  The folder migration runs once after the
    /// attempt whether or not a file was found.
    pub fn load(&mut self, record: &mut SettingsRecord) -> bool {
        match self.state {
            LoadState::Loaded => return true,
            LoadState::LoadFailed => return false,
            LoadState::Unloaded => {}
        }

        let mut found = false;
        for dir in self.resolver.load_candidates() {
            let path = self.settings_path(&dir);
            match self.load_from(&path, record) {
                Ok(summary) => {
                    info!(
                        path = %path,
                        applied = summary.settings_applied,
                        missing = summary.settings_missing,
                        "preferences loaded"
                    );
                    self.resolver.remember(&dir);
                    found = true;
                    break;
                }
                Err(PrefsError::Codec(e)) => warn!(path = %path, error = %e, "settings file rejected"),
                Err(e) => debug!(path = %path, error = %e, "no usable settings file"),
            }
        }

        self.state = if found {
            LoadState::Loaded
        } else {
            info!("no preferences found, keeping defaults");
            LoadState::LoadFailed
        };

        let ctx = MigrationContext {
            devices: self.devices.as_ref(),
            hooks: self.hooks.as_ref(),
            app_folder: &self.config.app_folder,
            legacy_folder: &self.config.legacy_folder,
        };
        self.migration = Some(migrate::run(record, found, &ctx));

        found
    }

    fn load_from(
        &mut self,
        path: &str,
        record: &mut SettingsRecord,
    ) -> Result<DecodeSummary, PrefsError> {
        let bytes = self.transport.read(path)?;
        if bytes.is_empty() {
            return Err(PrefsError::EmptyFile(path.to_string()));
        }
        if bytes.len() > self.config.save_buffer_size {
            return Err(PrefsError::FileTooLarge {
                path: path.to_string(),
                size: bytes.len(),
                limit: self.config.save_buffer_size,
            });
        }
        Ok(decode(&bytes, record, &mut self.buttons)?)
    }

    // ── Save ──────────────────────────────────────────────────────────────────

    /// Validates `record` and writes it to the settings file.
    ///
    /// Returns `true` only when the write transferred at least one byte.
    /// `silent` suppresses the progress notice and the result prompts; it
    /// never changes the outcome.
    pub fn save(&mut self, record: &mut SettingsRecord, silent: bool) -> bool {
        match self.try_save(record, silent) {
            Ok(written) => {
                info!(bytes = written, "preferences saved");
                if !silent {
                    self.notifier.info_prompt(SAVED_MESSAGE);
                }
                true
            }
            Err(e) => {
                warn!(error = %e, "preferences not saved");
                if !silent {
                    self.notifier.error_prompt(&e.to_string());
                }
                false
            }
        }
    }

    /// [`save`](Self::save) without the result prompts, returning the typed
    /// error.  The progress notice is still shown unless `silent`, and is
    /// always cancelled once the write finishes.
    ///
    /// # Errors
    ///
    /// Returns the first [`PrefsError`] met while resolving the folder,
    /// encoding, or writing.  A zero-byte write is [`PrefsError::EmptyWrite`].
    pub fn try_save(&mut self, record: &mut SettingsRecord, silent: bool) -> Result<usize, PrefsError> {
        let repaired = sanitize(record);
        if repaired > 0 {
            debug!(repaired, "record repaired before save");
        }

        let dir = self.resolver.save_location(record)?;
        let path = self.settings_path(&dir);

        if !silent {
            self.notifier.show_action(SAVING_MESSAGE);
        }
        let result = self.write_record(&path, record);
        self.notifier.cancel_action();

        match result? {
            0 => Err(PrefsError::EmptyWrite(path)),
            written => Ok(written),
        }
    }

    fn write_record(&self, path: &str, record: &SettingsRecord) -> Result<usize, PrefsError> {
        let bytes = encode(record, &self.buttons, &self.config.encode_options())?;
        Ok(self.transport.write(path, &bytes)?)
    }

    fn settings_path(&self, dir: &str) -> String {
        format!("{}/{}", dir.trim_end_matches('/'), self.config.file_name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
