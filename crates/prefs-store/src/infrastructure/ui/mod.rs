//! User-facing side effects: progress notices, prompts, and session hooks.
//!
//! The preferences store never draws anything itself.  It reports progress
//! and results through [`Notifier`] and asks the rest of the front-end to
//! re-apply video and language state through [`SessionHooks`].  Both are
//! injected as `Arc<dyn ...>` so the store works headless (tools, tests) as
//! well as inside the menu.

use prefs_core::Language;
use tracing::{debug, error, info};

/// Progress and result notifications shown to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Shows a progress notice that stays up until [`Notifier::cancel_action`].
    fn show_action(&self, message: &str);

    /// Removes the current progress notice, if any.
    fn cancel_action(&self);

    /// Shows an informational prompt.
    fn info_prompt(&self, message: &str);

    /// Shows an error prompt.
    fn error_prompt(&self, message: &str);
}

/// Front-end state that has to be re-applied once preferences are known.
#[cfg_attr(test, mockall::automock)]
pub trait SessionHooks: Send + Sync {
    /// Switches the video output to `mode` (1..=5; 0 means automatic and is
    /// never passed).
    fn reset_video_mode(&self, mode: i32);

    /// Reloads translated menu strings for `language`.
    fn apply_language(&self, language: Language);
}

// ── Headless implementations ──────────────────────────────────────────────────

/// A [`Notifier`] that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn show_action(&self, _message: &str) {}
    fn cancel_action(&self) {}
    fn info_prompt(&self, _message: &str) {}
    fn error_prompt(&self, _message: &str) {}
}

/// A [`Notifier`] that writes notifications to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_action(&self, message: &str) {
        debug!(message, "action started");
    }

    fn cancel_action(&self) {
        debug!("action finished");
    }

    fn info_prompt(&self, message: &str) {
        info!(message, "prompt");
    }

    fn error_prompt(&self, message: &str) {
        error!(message, "error prompt");
    }
}

/// [`SessionHooks`] that do nothing, for tools without a video or menu layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSessionHooks;

impl SessionHooks for NoopSessionHooks {
    fn reset_video_mode(&self, _mode: i32) {}
    fn apply_language(&self, _language: Language) {}
}
