//! Delimiter-driven BBCode auto-formatting.

use crate::models::{Format, Settings};
use anyhow::Result;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Destination for settings write-back.
///
/// The formatter hands over a complete [`Settings`] snapshot on every change;
/// implementations persist it as a whole.
pub trait SettingsBackend: Send + Sync {
    /// Persist the full settings object.
    fn save_settings(&self, settings: &Settings) -> Result<()>;

    /// Ask the platform for permission to show notifications.
    ///
    /// Called after a save whenever notifications are enabled.
    fn request_notification_permission(&self) -> Result<()>;
}

/// Handle to a settings write that may still be running.
///
/// Writes are fire-and-forget: callers are free to drop this. Tests and
/// shutdown paths can [`wait`](Self::wait) for completion instead.
#[derive(Debug)]
pub struct PendingWrite(Option<JoinHandle<()>>);

impl PendingWrite {
    /// A write that already finished on the calling thread.
    pub fn completed() -> Self {
        Self(None)
    }

    /// True if the write was handed to the tokio runtime.
    pub fn is_background(&self) -> bool {
        self.0.is_some()
    }

    /// Wait for the write to finish.
    pub async fn wait(self) {
        if let Some(handle) = self.0 {
            if let Err(e) = handle.await {
                tracing::warn!("Settings write task failed: {}", e);
            }
        }
    }
}

/// Applies the configured [`Format`] rules to chat messages.
///
/// Owns the active rule list, the global enable flag and the
/// conversation → colour override map. Changes to any of these are written
/// back through the [`SettingsBackend`] as a full settings snapshot, keeping
/// every unrelated field intact.
pub struct AutoFormatter {
    formats: Vec<Format>,
    apply: bool,
    overrides: IndexMap<String, String>,

    /// Snapshot the formatter was built from; updated and re-sent on every change
    settings: Settings,

    backend: Arc<dyn SettingsBackend>,
}

impl AutoFormatter {
    /// Build a formatter from loaded settings.
    pub fn new(settings: Settings, backend: Arc<dyn SettingsBackend>) -> Self {
        let overrides = settings.decode_overrides();

        tracing::debug!(
            "Auto-formatter created: {} rules, enabled={}, {} conversation overrides",
            settings.auto_formats.len(),
            settings.apply_auto_formats,
            overrides.len()
        );

        Self {
            formats: settings.auto_formats.clone(),
            apply: settings.apply_auto_formats,
            overrides,
            settings,
            backend,
        }
    }

    /// Active rules, in application order.
    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// True if messages are formatted at all.
    pub fn is_enabled(&self) -> bool {
        self.apply
    }

    /// The settings snapshot as it would be written back now.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Independent copy of the active rules for editing.
    pub fn deep_copy_formats(&self) -> Vec<Format> {
        self.formats.clone()
    }

    /// Apply every rule, in order, to `message`.
    ///
    /// When `conversation` has a colour override and a default quote rule
    /// exists, that rule is held back from the main pass and applied last
    /// with the override colour.
    pub fn apply_formats(&self, message: &str, conversation: Option<&str>) -> String {
        if !self.apply {
            return message.to_string();
        }

        let override_color = conversation.and_then(|id| self.get_conversation_override(id));
        let held_back = override_color
            .and_then(|_| self.formats.iter().position(Format::is_default_quote));

        let mut output = message.to_string();
        for (index, format) in self.formats.iter().enumerate() {
            if Some(index) == held_back {
                continue;
            }
            output = apply_format(&output, format);
        }

        if let (Some(index), Some(color)) = (held_back, override_color) {
            output = apply_format(&output, &self.formats[index].with_color(color));
        }

        output
    }

    pub fn get_conversation_override(&self, conversation: &str) -> Option<&str> {
        self.overrides.get(conversation).map(String::as_str)
    }

    pub fn conversation_overrides(&self) -> &IndexMap<String, String> {
        &self.overrides
    }

    /// Set the quote colour for one conversation and persist.
    pub fn add_conversation_override(&mut self, conversation: &str, color: &str) -> PendingWrite {
        self.overrides
            .insert(conversation.to_string(), color.to_string());
        tracing::info!("Conversation override set: {} -> {}", conversation, color);
        self.persist()
    }

    /// Drop the quote colour for one conversation and persist.
    pub fn remove_conversation_override(&mut self, conversation: &str) -> PendingWrite {
        if self.overrides.shift_remove(conversation).is_some() {
            tracing::info!("Conversation override removed: {}", conversation);
        } else {
            tracing::debug!("No conversation override to remove for {}", conversation);
        }
        self.persist()
    }

    /// Commit an edited rule list and persist.
    pub fn replace_formats(&mut self, formats: Vec<Format>) -> PendingWrite {
        tracing::info!("Auto-format rules replaced: {} rules", formats.len());
        self.formats = formats;
        self.persist()
    }

    /// Turn auto-formatting on or off and persist.
    pub fn set_enabled(&mut self, enabled: bool) -> PendingWrite {
        self.apply = enabled;
        self.persist()
    }

    /// Refresh the settings snapshot and hand it to the backend.
    ///
    /// Inside a tokio runtime the write runs on the blocking pool and the
    /// caller does not wait for it. Outside a runtime it runs inline.
    fn persist(&mut self) -> PendingWrite {
        self.settings.auto_formats = self.formats.clone();
        self.settings.apply_auto_formats = self.apply;
        self.settings.encode_overrides(&self.overrides);

        let snapshot = self.settings.clone();
        let backend = Arc::clone(&self.backend);
        let write = move || {
            if let Err(e) = backend.save_settings(&snapshot) {
                tracing::error!("Failed to save settings: {:#}", e);
            }
            if snapshot.notifications {
                if let Err(e) = backend.request_notification_permission() {
                    tracing::warn!("Notification permission request failed: {:#}", e);
                }
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => PendingWrite(Some(handle.spawn_blocking(write))),
            Err(_) => {
                write();
                PendingWrite::completed()
            }
        }
    }
}

/// Apply a single rule to `message` in one left-to-right pass.
///
/// Every start delimiter found gets the opening tags; the next end delimiter
/// after it gets the closing tags. A start without a matching end closes at
/// the end of the message and ends the pass. Rules with an empty delimiter
/// are skipped.
pub fn apply_format(message: &str, format: &Format) -> String {
    if !format.has_delimiters() {
        tracing::warn!(
            "Skipping auto-format rule '{}' ({}): empty delimiter",
            format.name,
            format.id
        );
        return message.to_string();
    }

    let start_tags = format.start_tags();
    let end_tags = format.end_tags();
    let start = format.start_tag.as_str();
    let end = format.end_tag.as_str();

    let mut message = message.to_string();
    let mut cursor = 0;

    while let Some(index) = find_from(&message, start, cursor) {
        let after = index + start.len();
        let opening = if !format.start_replace.is_empty() {
            if format.exclude_tags {
                [format.start_replace.as_str(), start_tags.as_str()].concat()
            } else {
                [start_tags.as_str(), format.start_replace.as_str()].concat()
            }
        } else if format.exclude_tags {
            [start, start_tags.as_str()].concat()
        } else {
            [start_tags.as_str(), start].concat()
        };
        message.replace_range(index..after, &opening);
        cursor = index + opening.len();

        let Some(index) = find_from(&message, end, cursor) else {
            message.push_str(&end_tags);
            break;
        };

        let after = index + end.len();
        let closing = if !format.end_replace.is_empty() {
            if format.exclude_tags {
                [end_tags.as_str(), format.end_replace.as_str()].concat()
            } else {
                [format.end_replace.as_str(), end_tags.as_str()].concat()
            }
        } else if format.exclude_tags {
            [end_tags.as_str(), end].concat()
        } else {
            [end, end_tags.as_str()].concat()
        };
        message.replace_range(index..after, &closing);
        cursor = index + closing.len();
    }

    message
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| i + from)
}
