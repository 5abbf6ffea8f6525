//! XML codec for the preferences document.
//!
//! Document format:
//! ```text
//! <?xml version="1.0"?>
//! <file app="FCE Ultra GX" version="3.5.3">
//!
//! <section name="File" description="File Settings">
//! 	<setting name="AutoLoad" value="1" description="Auto Load"/>
//! 	...
//! </section>
//! ...
//! <section name="Controller" description="Controller Settings">
//! 	<setting name="Controller" value="2" description="Controller"/>
//! 	<controller name="btnmap_pad_gcpad" description="NES Pad - GameCube Controller">
//! 		<button number="0" assignment="256"/>
//! 		...
//! 	</controller>
//! </section>
//! </file>
//! ```
//! Whitespace is cosmetic.  Only the root `version` attribute can make a
//! whole document unacceptable; any individual setting or button may be
//! missing, in which case the record keeps the value it had before decoding.

pub mod fields;

use thiserror::Error;
use tracing::debug;

use crate::document::xml::{self, TagPosition};
use crate::document::{DocumentError, Element};
use crate::domain::buttons::{ButtonMap, BUTTON_SLOTS};
use crate::domain::settings::{Platform, SettingsRecord, PATH_CAPACITY};

use fields::{FieldAccess, Section, CONTROLLER_BLOCKS, SETTINGS};

/// Errors that can occur while encoding or decoding a preferences document.
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    /// The bytes are not a well-formed XML document, or the writer failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The document has no `file` element carrying a `version` attribute.
    #[error("document has no version attribute")]
    MissingVersion,

    /// The version attribute is not of the single-digit `D.D.D` form.
    #[error("unsupported document version: {0:?}")]
    UnsupportedVersion(String),

    /// The encoded document does not fit the caller's save buffer.
    #[error("encoded preferences need {needed} bytes, budget is {budget}")]
    BudgetExceeded { needed: usize, budget: usize },
}

/// Header values and limits for [`encode`].
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions<'a> {
    /// Written as the root `app` attribute.
    pub app_name: &'a str,
    /// Written as the root `version` attribute; must be `D.D.D` for the
    /// document to be accepted again by [`decode`].
    pub app_version: &'a str,
    /// Platform-only settings are written only for their platform.
    pub platform: Platform,
    /// Maximum encoded size in bytes.
    pub budget: usize,
}

/// What a successful [`decode`] applied, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub settings_applied: usize,
    pub settings_missing: usize,
    pub buttons_applied: usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes `record` and `buttons` into preferences document bytes.
///
/// # Errors
///
/// Returns [`CodecError::BudgetExceeded`] if the document is larger than
/// `options.budget`, or [`CodecError::Document`] if the writer fails.
pub fn encode(
    record: &SettingsRecord,
    buttons: &ButtonMap,
    options: &EncodeOptions<'_>,
) -> Result<Vec<u8>, CodecError> {
    let mut root = Element::new("file")
        .with_attr("app", options.app_name)
        .with_attr("version", options.app_version);

    for section in Section::ALL {
        let element = root.push(
            Element::new("section")
                .with_attr("name", section.name())
                .with_attr("description", section.description()),
        );

        for field in SETTINGS
            .iter()
            .filter(|f| f.section == section && f.written_on(options.platform))
        {
            element.push(
                Element::new("setting")
                    .with_attr("name", field.name)
                    .with_attr("value", format_value(field.access, record))
                    .with_attr("description", field.description),
            );
        }

        if section == Section::Controller {
            for block in &CONTROLLER_BLOCKS {
                let controller = element.push(
                    Element::new("controller")
                        .with_attr("name", block.name)
                        .with_attr("description", block.description),
                );
                for (number, code) in buttons.slots(block.device, block.controller).iter().enumerate() {
                    controller.push(
                        Element::new("button")
                            .with_attr("number", number.to_string())
                            .with_attr("assignment", code.to_string()),
                    );
                }
            }
        }
    }

    let bytes = xml::write(&root, layout)?;
    if bytes.len() > options.budget {
        return Err(CodecError::BudgetExceeded {
            needed: bytes.len(),
            budget: options.budget,
        });
    }
    Ok(bytes)
}

/// Decodes preferences document `bytes` into `record` and `buttons`.
///
/// On error nothing is modified.  On success, every setting and button
/// present with a parseable value is overwritten and everything else keeps
/// its prior value.
///
/// # Errors
///
/// - [`CodecError::Document`] if the bytes are not well-formed XML.
/// - [`CodecError::MissingVersion`] if no `file` element has a `version`.
/// - [`CodecError::UnsupportedVersion`] if the version is not `D.D.D`.
pub fn decode(
    bytes: &[u8],
    record: &mut SettingsRecord,
    buttons: &mut ButtonMap,
) -> Result<DecodeSummary, CodecError> {
    let root = xml::parse(bytes)?;

    let version = root
        .find("file", "version", None)
        .and_then(|file| file.attr("version"))
        .ok_or(CodecError::MissingVersion)?;
    if !is_supported_version(version) {
        return Err(CodecError::UnsupportedVersion(version.to_string()));
    }
    debug!(version, "preferences document version accepted");

    let mut summary = DecodeSummary::default();

    for field in SETTINGS {
        let raw = root
            .find("setting", "name", Some(field.name))
            .and_then(|setting| setting.attr("value"));
        let applied = match raw {
            Some(raw) => apply_value(field.access, raw, record),
            None => false,
        };
        if applied {
            summary.settings_applied += 1;
        } else {
            summary.settings_missing += 1;
        }
    }

    for block in &CONTROLLER_BLOCKS {
        let Some(controller) = root.find("controller", "name", Some(block.name)) else {
            continue;
        };
        let slots = buttons.slots_mut(block.device, block.controller);
        for (number, slot) in slots.iter_mut().enumerate().take(BUTTON_SLOTS) {
            let number = number.to_string();
            let code = controller
                .find("button", "number", Some(number.as_str()))
                .and_then(|button| button.attr("assignment"))
                .and_then(parse_assignment);
            if let Some(code) = code {
                *slot = code;
                summary.buttons_applied += 1;
            }
        }
    }

    debug!(
        applied = summary.settings_applied,
        missing = summary.settings_missing,
        buttons = summary.buttons_applied,
        "preferences document decoded"
    );
    Ok(summary)
}

/// Returns `true` for version strings of exactly the form `D.D.D`, where each
/// `D` is one ASCII digit and the major digit is at least 1.
///
/// ```rust
/// use prefs_core::is_supported_version;
///
/// assert!(is_supported_version("9.9.9"));
/// assert!(!is_supported_version("01.2.3"));
/// assert!(!is_supported_version("1.2"));
/// ```
pub fn is_supported_version(version: &str) -> bool {
    match version.as_bytes() {
        [major, b'.', minor, b'.', point] => {
            (b'1'..=b'9').contains(major) && minor.is_ascii_digit() && point.is_ascii_digit()
        }
        _ => false,
    }
}

// ── Value formatting ──────────────────────────────────────────────────────────

fn format_value(access: FieldAccess, record: &SettingsRecord) -> String {
    match access {
        FieldAccess::Int { get, .. } => get(record).to_string(),
        FieldAccess::Ratio { get, .. } => format!("{:.2}", get(record)),
        FieldAccess::Path { get, .. } => get(record).to_string(),
    }
}

/// Writes `raw` into the field if it parses.  Returns whether it did.
fn apply_value(access: FieldAccess, raw: &str, record: &mut SettingsRecord) -> bool {
    match access {
        FieldAccess::Int { set, .. } => match parse_int(raw) {
            Some(value) => {
                set(record, value);
                true
            }
            None => false,
        },
        FieldAccess::Ratio { set, .. } => match parse_ratio(raw) {
            Some(value) => {
                set(record, value);
                true
            }
            None => false,
        },
        FieldAccess::Path { set, .. } => {
            set(record, clamp_to_capacity(raw, PATH_CAPACITY - 1).to_string());
            true
        }
    }
}

/// Cosmetic whitespace for the preferences document.
fn layout(name: &str, position: TagPosition) -> Option<&'static str> {
    match (position, name) {
        (TagPosition::BeforeOpen, "file") => Some("\n"),
        (TagPosition::BeforeOpen, "section") => Some("\n\n"),
        (TagPosition::BeforeOpen, "setting" | "controller") => Some("\n\t"),
        (TagPosition::BeforeOpen, "button") => Some("\n\t\t"),
        (TagPosition::BeforeClose, "file" | "section") => Some("\n"),
        (TagPosition::BeforeClose, "controller") => Some("\n\t"),
        _ => None,
    }
}

// ── Lenient number parsing ────────────────────────────────────────────────────

/// Parses the leading integer of `raw` the way C's `atoi` reads it: leading
/// whitespace, an optional sign, then digits up to the first non-digit.
/// Returns `None` when no digit is present.  Saturates instead of overflowing.
fn parse_leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &digits[..digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_int(raw: &str) -> Option<i32> {
    parse_leading_integer(raw).map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Assignment codes are unsigned; negative text wraps as it would in C.
fn parse_assignment(raw: &str) -> Option<u32> {
    parse_leading_integer(raw).map(|v| v as u32)
}

/// Parses the leading decimal number of `raw` (`[-+]digits[.digits]`).
fn parse_ratio(raw: &str) -> Option<f32> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        } else if has_digits {
            end = frac_start;
        }
    }
    if !has_digits {
        return None;
    }
    s[..end].parse().ok()
}

/// Truncates `raw` to at most `max_bytes` bytes without splitting a character.
fn clamp_to_capacity(raw: &str, max_bytes: usize) -> &str {
    if raw.len() <= max_bytes {
        return raw;
    }
    let mut end = max_bytes;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
