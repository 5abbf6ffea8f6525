//! Range repair for settings that would crash the emulator core or the menu.
//!
//! [`sanitize`] is run before every save and after every successful load, so
//! the record is never persisted or used with these fields out of range.
//! It only touches fields whose current value lies outside the documented
//! domain; every fallback lies inside that domain, which makes the operation
//! idempotent.

use std::ops::RangeInclusive;

use tracing::debug;

use super::settings::{ControllerProfile, Language, SettingsRecord, Transport, LANGUAGE_COUNT};

/// An integer field, its valid domain, and the value it is reset to.
struct IntRule {
    name: &'static str,
    field: fn(&mut SettingsRecord) -> &mut i32,
    valid: RangeInclusive<i32>,
    fallback: i32,
}

/// A ratio field that must lie strictly inside `(low, high)`.
struct RatioRule {
    name: &'static str,
    field: fn(&mut SettingsRecord) -> &mut f32,
    low: f32,
    high: f32,
    fallback: f32,
}

const INT_RULES: &[IntRule] = &[
    IntRule {
        name: "LoadMethod",
        field: |r| &mut r.load_method,
        valid: Transport::Auto as i32..=Transport::SdPort2 as i32,
        fallback: Transport::Auto as i32,
    },
    IntRule {
        name: "SaveMethod",
        field: |r| &mut r.save_method,
        valid: Transport::Auto as i32..=Transport::SdPort2 as i32,
        fallback: Transport::Auto as i32,
    },
    // Shifts are an open interval (-50, 50).
    IntRule {
        name: "xshift",
        field: |r| &mut r.x_shift,
        valid: -49..=49,
        fallback: 0,
    },
    IntRule {
        name: "yshift",
        field: |r| &mut r.y_shift,
        valid: -49..=49,
        fallback: 0,
    },
    IntRule {
        name: "MusicVolume",
        field: |r| &mut r.music_volume,
        valid: 0..=100,
        fallback: 80,
    },
    IntRule {
        name: "SFXVolume",
        field: |r| &mut r.sfx_volume,
        valid: 0..=100,
        fallback: 20,
    },
    IntRule {
        name: "language",
        field: |r| &mut r.language,
        valid: 0..=LANGUAGE_COUNT - 1,
        fallback: Language::English as i32,
    },
    IntRule {
        name: "Controller",
        field: |r| &mut r.controller,
        valid: ControllerProfile::Zapper as i32..=ControllerProfile::Pad4 as i32,
        fallback: ControllerProfile::Pad2 as i32,
    },
    IntRule {
        name: "soundvolume",
        field: |r| &mut r.sound_volume,
        valid: 0..=150,
        fallback: 100,
    },
    IntRule {
        name: "videomode",
        field: |r| &mut r.video_mode,
        valid: 0..=5,
        fallback: 0,
    },
    IntRule {
        name: "render",
        field: |r| &mut r.render,
        valid: 0..=1,
        fallback: 0,
    },
    IntRule {
        name: "region",
        field: |r| &mut r.region,
        valid: 0..=2,
        fallback: 2,
    },
];

const RATIO_RULES: &[RatioRule] = &[
    RatioRule {
        name: "zoomHor",
        field: |r| &mut r.zoom_hor,
        low: 0.5,
        high: 1.5,
        fallback: 1.0,
    },
    RatioRule {
        name: "zoomVert",
        field: |r| &mut r.zoom_vert,
        low: 0.5,
        high: 1.5,
        fallback: 1.0,
    },
];

/// Resets every out-of-range field of `record` to its documented default.
///
/// Returns the number of fields that were repaired.
pub fn sanitize(record: &mut SettingsRecord) -> usize {
    let mut repaired = 0;

    for rule in INT_RULES {
        let value = (rule.field)(record);
        if !rule.valid.contains(&*value) {
            debug!(
                setting = rule.name,
                value = *value,
                fallback = rule.fallback,
                "repairing out-of-range setting"
            );
            *value = rule.fallback;
            repaired += 1;
        }
    }

    for rule in RATIO_RULES {
        let value = (rule.field)(record);
        // Written as a negated containment so NaN is repaired too.
        if !(*value > rule.low && *value < rule.high) {
            debug!(
                setting = rule.name,
                value = *value,
                fallback = rule.fallback,
                "repairing out-of-range setting"
            );
            *value = rule.fallback;
            repaired += 1;
        }
    }

    repaired
}

// ── Tests ─────────────────────────────────────────────────────────────────────
