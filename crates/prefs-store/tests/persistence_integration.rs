//! Integration tests for the load/save pipeline.
//!
//! These tests exercise the application layer of prefs-store end-to-end:
//! `PreferencesController` + `LocationResolver` + migration, wired to the
//! in-memory device and transport doubles.

use std::sync::{Arc, Mutex};

use mockall::mock;
use prefs_core::{Language, Platform, SettingsRecord, Transport};
use prefs_store::infrastructure::device::mock::MemoryDevices;
use prefs_store::infrastructure::storage::config::{CandidateRoot, StorageConfig};
use prefs_store::infrastructure::transport::mock::MemoryFileTransport;
use prefs_store::infrastructure::ui::{NoopSessionHooks, Notifier, SessionHooks, TracingNotifier};
use prefs_store::{LoadState, PreferencesController};

mock! {
    Hooks {}
    impl SessionHooks for Hooks {
        fn reset_video_mode(&self, mode: i32);
        fn apply_language(&self, language: Language);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn document(version: &str, body: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<file app=\"FCE Ultra GX\" version=\"{version}\">\n{body}\n</file>"
    )
}

fn controller(
    config: StorageConfig,
    devices: &Arc<MemoryDevices>,
    transport: &Arc<MemoryFileTransport>,
) -> PreferencesController {
    PreferencesController::new(
        config,
        devices.clone(),
        transport.clone(),
        Arc::new(TracingNotifier),
        Arc::new(NoopSessionHooks),
    )
}

/// Records every notification so tests can assert on the sequence.
#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_action(&self, message: &str) {
        self.events.lock().unwrap().push(format!("show:{message}"));
    }
    fn cancel_action(&self) {
        self.events.lock().unwrap().push("cancel".to_string());
    }
    fn info_prompt(&self, message: &str) {
        self.events.lock().unwrap().push(format!("info:{message}"));
    }
    fn error_prompt(&self, message: &str) {
        self.events.lock().unwrap().push(format!("error:{message}"));
    }
}

// ── Load probing ──────────────────────────────────────────────────────────────

#[test]
fn test_load_probes_in_order_and_caches_third_location() {
    init_tracing();

    // Arrange – three candidates; the first two cannot be read
    let devices = Arc::new(MemoryDevices::new());
    devices.mount(Transport::Sd).mount(Transport::Usb);
    let transport = Arc::new(MemoryFileTransport::new());
    transport
        .make_unreachable("sd:/apps/fceultrafx/settings.xml")
        .make_unreachable("usb:/apps/fceultrafx/settings.xml")
        .insert(
            "sd:/fceultrafx/settings.xml",
            document("1.0.0", r#"<setting name="soundvolume" value="42"/>"#),
        );
    let mut config = StorageConfig::for_platform(Platform::Wii);
    config.load_candidates = vec![
        CandidateRoot::new(Transport::Sd, "apps/"),
        CandidateRoot::new(Transport::Usb, "apps/"),
        CandidateRoot::new(Transport::Sd, ""),
    ];
    let mut prefs = controller(config, &devices, &transport);
    let mut record = SettingsRecord::default();

    // Act
    let first = prefs.load(&mut record);

    // Assert
    assert!(first);
    assert_eq!(record.sound_volume, 42);
    assert_eq!(prefs.load_state(), LoadState::Loaded);
    assert_eq!(prefs.known_location(), Some("sd:/fceultrafx"));
    assert_eq!(
        transport.read_log(),
        vec![
            "sd:/apps/fceultrafx/settings.xml".to_string(),
            "usb:/apps/fceultrafx/settings.xml".to_string(),
            "sd:/fceultrafx/settings.xml".to_string(),
        ]
    );

    // Act – a second load in the same run
    let probes_before = devices.probe_log().len();
    record.sound_volume = 77;
    let second = prefs.load(&mut record);

    // Assert – same answer, nothing probed or read, record untouched
    assert!(second);
    assert_eq!(devices.probe_log().len(), probes_before);
    assert_eq!(transport.read_log().len(), 3);
    assert_eq!(record.sound_volume, 77);
}

#[test]
fn test_app_root_is_tried_before_device_candidates() {
    let devices = Arc::new(MemoryDevices::new());
    devices.mount(Transport::Sd);
    let transport = Arc::new(MemoryFileTransport::new());
    transport
        .insert("sd:/apps/custom/settings.xml", document("2.1.0", r#"<setting name="region" value="1"/>"#))
        .insert("sd:/apps/fceultrafx/settings.xml", document("2.1.0", r#"<setting name="region" value="0"/>"#));
    let mut prefs = controller(StorageConfig::default(), &devices, &transport)
        .with_app_root("sd:/apps/custom");
    let mut record = SettingsRecord::default();

    assert!(prefs.load(&mut record));

    assert_eq!(record.region, 1);
    assert_eq!(prefs.known_location(), Some("sd:/apps/custom"));
}

#[test]
fn test_gamecube_load_uses_card_slots() {
    let devices = Arc::new(MemoryDevices::new());
    devices.mount(Transport::SdSlotB);
    let transport = Arc::new(MemoryFileTransport::new());
    transport.insert(
        "cardb:/fceultrafx/settings.xml",
        document("3.5.3", r#"<setting name="WiimoteOrientation" value="1"/>"#),
    );
    let mut prefs = controller(StorageConfig::for_platform(Platform::GameCube), &devices, &transport);
    let mut record = SettingsRecord::default();

    assert!(prefs.load(&mut record));

    assert_eq!(prefs.known_location(), Some("cardb:/fceultrafx"));
    assert_eq!(
        devices.probe_log()[..3],
        [Transport::SdSlotA, Transport::SdSlotB, Transport::SdPort2]
    );
}

#[test]
fn test_failed_load_still_runs_language_hook_once() {
    // Arrange
    let devices = Arc::new(MemoryDevices::new());
    let transport = Arc::new(MemoryFileTransport::new());
    let mut hooks = MockHooks::new();
    hooks
        .expect_apply_language()
        .withf(|language| *language == Language::English)
        .times(1)
        .return_const(());
    let mut prefs = PreferencesController::new(
        StorageConfig::default(),
        devices,
        transport,
        Arc::new(TracingNotifier),
        Arc::new(hooks),
    );
    let mut record = SettingsRecord::default();

    // Act
    let first = prefs.load(&mut record);
    let second = prefs.load(&mut record);

    // Assert
    assert!(!first);
    assert!(!second);
    assert_eq!(prefs.load_state(), LoadState::LoadFailed);
}

// ── Save ──────────────────────────────────────────────────────────────────────

#[test]
fn test_first_save_creates_folder_then_reuses_it() {
    init_tracing();

    // Arrange
    let devices = Arc::new(MemoryDevices::new());
    devices.mount(Transport::Usb);
    let transport = Arc::new(MemoryFileTransport::new());
    let mut prefs = controller(StorageConfig::default(), &devices, &transport);
    let mut record = SettingsRecord::default();

    // Act
    assert!(prefs.save(&mut record, true));
    devices.mount(Transport::Sd);
    assert!(prefs.save(&mut record, true));

    // Assert
    assert!(devices.has_dir("usb:/fceultrafx/roms"));
    assert!(devices.has_dir("usb:/fceultrafx/saves"));
    assert_eq!(
        transport.write_log(),
        vec![
            "usb:/fceultrafx/settings.xml".to_string(),
            "usb:/fceultrafx/settings.xml".to_string(),
        ]
    );
}

#[test]
fn test_saved_preferences_load_in_next_run() {
    // Arrange – run one saves a customised record
    let devices = Arc::new(MemoryDevices::new());
    devices.mount(Transport::Sd);
    let transport = Arc::new(MemoryFileTransport::new());
    let mut record = SettingsRecord::default();
    record.load_folder = "roms & hacks/nes".to_string();
    record.zoom_vert = 1.25;
    record.controller = 3;
    assert!(controller(StorageConfig::default(), &devices, &transport).save(&mut record, true));

    // Act – run two starts from defaults
    let mut next_run = controller(StorageConfig::default(), &devices, &transport);
    let mut loaded = SettingsRecord::default();
    let found = next_run.load(&mut loaded);

    // Assert
    assert!(found);
    assert_eq!(loaded, record);
    assert_eq!(next_run.known_location(), Some("sd:/fceultrafx"));
}

#[test]
fn test_directory_failure_fails_save_and_reports_it() {
    // Arrange
    let devices = Arc::new(MemoryDevices::new());
    devices.mount(Transport::Sd).fail_create_dir("sd:/fceultrafx/roms");
    let transport = Arc::new(MemoryFileTransport::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut prefs = PreferencesController::new(
        StorageConfig::default(),
        devices,
        transport.clone(),
        notifier.clone(),
        Arc::new(NoopSessionHooks),
    );

    // Act
    let saved = prefs.save(&mut SettingsRecord::default(), false);

    // Assert
    assert!(!saved);
    assert!(transport.write_log().is_empty());
    assert_eq!(
        notifier.events(),
        vec!["error:unable to create directory sd:/fceultrafx/roms".to_string()]
    );
}

#[test]
fn test_successful_loud_save_notification_sequence() {
    let devices = Arc::new(MemoryDevices::new());
    devices.mount(Transport::Sd);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut prefs = PreferencesController::new(
        StorageConfig::default(),
        devices,
        Arc::new(MemoryFileTransport::new()),
        notifier.clone(),
        Arc::new(NoopSessionHooks),
    );

    assert!(prefs.save(&mut SettingsRecord::default(), false));

    assert_eq!(
        notifier.events(),
        vec![
            "show:Saving preferences...".to_string(),
            "cancel".to_string(),
            "info:Preferences saved".to_string(),
        ]
    );
}
