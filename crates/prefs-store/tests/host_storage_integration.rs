//! Integration tests against the host filesystem adapters.
//!
//! Console devices are mapped onto fresh temporary directories, so these
//! tests exercise `HostDevices` and `HostFileTransport` together with the
//! controller and the TOML configuration.

use std::path::PathBuf;
use std::sync::Arc;

use prefs_core::{SettingsRecord, Transport};
use prefs_store::infrastructure::device::host::HostDevices;
use prefs_store::infrastructure::transport::host::HostFileTransport;
use prefs_store::infrastructure::ui::{NoopSessionHooks, TracingNotifier};
use prefs_store::{load_config, save_config, PreferencesController, StorageConfig};
use uuid::Uuid;

/// A temporary console with an SD card mounted, removed on drop.
struct TempConsole {
    root: PathBuf,
}

impl TempConsole {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("prefs_host_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(root.join("sd")).unwrap();
        Self { root }
    }

    fn config(&self) -> StorageConfig {
        let toml = format!(
            "[[mounts]]\ntransport = \"sd\"\nhost_path = {:?}\n",
            self.root.join("sd").display().to_string()
        );
        StorageConfig::from_toml_str(&toml).expect("test config must parse")
    }

    fn controller(&self, config: StorageConfig) -> PreferencesController {
        let devices = Arc::new(HostDevices::from_mounts(&config.mounts));
        let transport = Arc::new(HostFileTransport::new(devices.clone()));
        PreferencesController::new(
            config,
            devices,
            transport,
            Arc::new(TracingNotifier),
            Arc::new(NoopSessionHooks),
        )
    }
}

impl Drop for TempConsole {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.root).ok();
    }
}

#[test]
fn test_save_creates_settings_file_on_host() {
    // Arrange
    let console = TempConsole::new();
    let mut prefs = console.controller(console.config());
    let mut record = SettingsRecord::default();

    // Act
    let saved = prefs.save(&mut record, true);

    // Assert
    assert!(saved);
    let file = console.root.join("sd").join("fceultrafx").join("settings.xml");
    let text = std::fs::read_to_string(&file).expect("settings file must exist");
    assert!(text.starts_with("<?xml version=\"1.0\"?>"));
    assert!(console.root.join("sd/fceultrafx/roms").is_dir());
    assert!(console.root.join("sd/fceultrafx/saves").is_dir());
}

#[test]
fn test_host_round_trip_across_runs() {
    // Arrange
    let console = TempConsole::new();
    let mut record = SettingsRecord::default();
    record.sfx_volume = 65;
    record.last_file_loaded = "Mega Man 2 (U).nes".to_string();
    assert!(console.controller(console.config()).save(&mut record, true));

    // Act
    let mut next_run = console.controller(console.config());
    let mut loaded = SettingsRecord::default();
    let found = next_run.load(&mut loaded);

    // Assert
    assert!(found);
    assert_eq!(loaded, record);
}

#[test]
fn test_legacy_folder_renamed_on_host() {
    // Arrange – data left behind by an old release
    let console = TempConsole::new();
    std::fs::create_dir_all(console.root.join("sd/fceux/saves")).unwrap();
    std::fs::write(console.root.join("sd/fceux/saves/game.sav"), b"save").unwrap();
    std::fs::create_dir_all(console.root.join("sd/apps/fceultrafx")).unwrap();
    std::fs::write(
        console.root.join("sd/apps/fceultrafx/settings.xml"),
        r#"<file app="FCE Ultra GX" version="3.4.0"><setting name="LoadMethod" value="1"/></file>"#,
    )
    .unwrap();
    let mut prefs = console.controller(console.config());

    // Act
    let found = prefs.load(&mut SettingsRecord::default());

    // Assert
    assert!(found);
    assert!(!console.root.join("sd/fceux").exists());
    assert!(console.root.join("sd/fceultrafx/saves/game.sav").is_file());
    assert!(console.root.join("sd/fceultrafx/screenshots").is_dir());
}

#[test]
fn test_storage_config_round_trips_through_file() {
    let console = TempConsole::new();
    let path = console.root.join("config").join("storage.toml");
    let mut config = console.config();
    config.save_transports = vec![Transport::Usb, Transport::Sd];

    save_config(&path, &config).expect("config must save");
    let loaded = load_config(&path).expect("config must load");

    assert_eq!(loaded, config);
}
