//! Integration tests for the prefs-core codec.
//!
//! These tests go through the public API only and exercise the record, the
//! validator, the button table and the codec together, the same way the
//! persistence layer uses them.

use prefs_core::{
    decode, encode, is_supported_version, sanitize, ButtonMap, CodecError, EncodeOptions,
    Language, LogicalDevice, PhysicalController, Platform, PlatformDefaults, SettingsRecord,
};

fn options(platform: Platform) -> EncodeOptions<'static> {
    EncodeOptions {
        app_name: "FCE Ultra GX",
        app_version: "3.5.3",
        platform,
        budget: 512 * 1024,
    }
}

/// Encodes `record` and decodes it into a fresh default record.
fn roundtrip(record: &SettingsRecord, buttons: &ButtonMap, platform: Platform) -> (SettingsRecord, ButtonMap) {
    let bytes = encode(record, buttons, &options(platform)).expect("encode must succeed");
    let mut decoded = SettingsRecord::default();
    let mut decoded_buttons = ButtonMap::default();
    decode(&bytes, &mut decoded, &mut decoded_buttons).expect("decode must succeed");
    (decoded, decoded_buttons)
}

#[test]
fn test_roundtrip_default_record_on_both_platforms() {
    for platform in [Platform::Wii, Platform::GameCube] {
        let (decoded, buttons) = roundtrip(&SettingsRecord::default(), &ButtonMap::default(), platform);
        assert_eq!(decoded, SettingsRecord::default());
        assert_eq!(buttons, ButtonMap::default());
    }
}

#[test]
fn test_roundtrip_platform_defaults() {
    // Arrange – a widescreen Wii set to Traditional Chinese
    let probe = PlatformDefaults {
        platform: Platform::Wii,
        widescreen: true,
        system_language: Some(Language::TraditionalChinese),
    };
    let record = SettingsRecord::with_platform("fceultrafx", &probe);

    // Act
    let (decoded, _) = roundtrip(&record, &ButtonMap::default(), Platform::Wii);

    // Assert
    assert_eq!(decoded.aspect, 1);
    assert_eq!(decoded.language(), Some(Language::SimplifiedChinese));
    assert_eq!(decoded, record);
}

#[test]
fn test_gamecube_document_keeps_prior_wiimote_orientation() {
    // Arrange
    let mut record = SettingsRecord::default();
    record.wiimote_orientation = 1;

    // Act – GameCube documents do not carry the setting at all
    let bytes = encode(&record, &ButtonMap::default(), &options(Platform::GameCube)).unwrap();
    let mut target = SettingsRecord::default();
    target.wiimote_orientation = 1;
    decode(&bytes, &mut target, &mut ButtonMap::default()).unwrap();

    // Assert
    assert_eq!(target.wiimote_orientation, 1);
}

#[test]
fn test_remapped_buttons_roundtrip() {
    let mut buttons = ButtonMap::unassigned();
    for (i, slot) in buttons
        .slots_mut(LogicalDevice::Zapper, PhysicalController::Wiimote)
        .iter_mut()
        .enumerate()
    {
        *slot = 1 << i;
    }

    let (_, decoded) = roundtrip(&SettingsRecord::default(), &buttons, Platform::Wii);

    assert_eq!(decoded, buttons);
}

#[test]
fn test_out_of_range_values_survive_decode_until_sanitized() {
    // Arrange – a hand-edited file with values the emulator cannot use
    let xml = br#"<?xml version="1.0"?>
<file app="FCE Ultra GX" version="3.5.3">
<section name="Video">
	<setting name="zoomHor" value="99.0"/>
	<setting name="videomode" value="42"/>
</section>
<section name="Menu">
	<setting name="SFXVolume" value="-5"/>
</section>
</file>"#;
    let mut record = SettingsRecord::default();

    // Act
    decode(xml, &mut record, &mut ButtonMap::default()).unwrap();
    let raw = record.clone();
    let repaired = sanitize(&mut record);

    // Assert
    assert_eq!(raw.zoom_hor, 99.0);
    assert_eq!(raw.video_mode, 42);
    assert_eq!(raw.sfx_volume, -5);
    assert_eq!(repaired, 3);
    assert_eq!(record.zoom_hor, 1.0);
    assert_eq!(record.video_mode, 0);
    assert_eq!(record.sfx_volume, 20);
}

#[test]
fn test_older_release_document_is_accepted() {
    let xml = br#"<file app="FCE Ultra GX" version="2.0.9"><section name="Audio"><setting name="soundvolume" value="120"/></section></file>"#;
    let mut record = SettingsRecord::default();

    decode(xml, &mut record, &mut ButtonMap::default()).unwrap();

    assert_eq!(record.sound_volume, 120);
}

#[test]
fn test_multi_digit_release_version_is_rejected() {
    let mut opts = options(Platform::Wii);
    opts.app_version = "3.10.0";
    let bytes = encode(&SettingsRecord::default(), &ButtonMap::default(), &opts).unwrap();

    let result = decode(&bytes, &mut SettingsRecord::default(), &mut ButtonMap::default());

    assert!(!is_supported_version("3.10.0"));
    assert_eq!(result, Err(CodecError::UnsupportedVersion("3.10.0".to_string())));
}

#[test]
fn test_deeply_nested_document_is_rejected_without_mutation() {
    // Arrange – valid markup, but nested far past anything the format uses
    let depth = 70_000;
    let xml = format!(
        r#"<file app="FCE Ultra GX" version="1.0.0">{}{}</file>"#,
        "<a>".repeat(depth),
        "</a>".repeat(depth)
    );
    let mut record = SettingsRecord::default();
    let mut buttons = ButtonMap::default();

    // Act
    let result = decode(xml.as_bytes(), &mut record, &mut buttons);

    // Assert
    assert!(matches!(result, Err(CodecError::Document(_))));
    assert_eq!(record, SettingsRecord::default());
    assert_eq!(buttons, ButtonMap::default());
}
