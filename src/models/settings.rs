use crate::models::Format;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Client settings as persisted in `settings.yaml`.
///
/// Only the fields the formatter reads and writes are typed. Every other key
/// is captured in [`extra`](Self::extra) and written back untouched, so a
/// write-back from the formatter never drops settings owned by other parts
/// of the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "autoFormats", default)]
    pub auto_formats: Vec<Format>,

    #[serde(rename = "applyAutoFormats", default)]
    pub apply_auto_formats: bool,

    /// JSON object mapping conversation id to colour
    #[serde(rename = "conversationOverrides", default)]
    pub conversation_overrides: String,

    #[serde(default = "default_notifications")]
    pub notifications: bool,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml_ng::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_formats: Vec::new(),
            apply_auto_formats: false,
            conversation_overrides: String::new(),
            notifications: default_notifications(),
            extra: IndexMap::new(),
        }
    }
}

fn default_notifications() -> bool {
    true
}

impl Settings {
    /// Decode the conversation override blob.
    ///
    /// An empty string is an empty map. Malformed JSON is logged and also
    /// treated as empty.
    pub fn decode_overrides(&self) -> IndexMap<String, String> {
        if self.conversation_overrides.trim().is_empty() {
            return IndexMap::new();
        }

        match serde_json::from_str(&self.conversation_overrides) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Ignoring malformed conversation overrides: {}", e);
                IndexMap::new()
            }
        }
    }

    /// Replace the override blob with the JSON encoding of `overrides`.
    pub fn encode_overrides(&mut self, overrides: &IndexMap<String, String>) {
        match serde_json::to_string(overrides) {
            Ok(json) => self.conversation_overrides = json,
            Err(e) => tracing::error!("Failed to encode conversation overrides: {}", e),
        }
    }
}
