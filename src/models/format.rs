use crate::bbcode::Style;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default delimiter for both ends of a quote-style rule.
pub const DEFAULT_QUOTE: &str = "\"";

const ID_LENGTH: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A user-defined auto-format rule.
///
/// Maps a pair of plain-text delimiters to a BBCode tag sequence. The start
/// and end delimiters may be identical (quote style) or distinct (bracket
/// style). Rules are stored in [`Settings`](crate::models::Settings) and read
/// by [`AutoFormatter`](crate::services::AutoFormatter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Format {
    pub id: String,
    pub name: String,
    pub start_tag: String,
    pub end_tag: String,

    /// Replaces the start delimiter when non-empty
    pub start_replace: String,

    /// Replaces the end delimiter when non-empty
    pub end_replace: String,

    /// Place the tags inside the delimiters instead of around them
    pub exclude_tags: bool,

    pub bold: bool,
    pub italic: bool,

    /// Also read as `underscore`, the key older clients wrote
    #[serde(alias = "underscore")]
    pub underline: bool,

    /// Colour name for `[color=...]`, empty for none. Also read as `colour`.
    #[serde(alias = "colour")]
    pub color: String,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            id: generate_id(),
            name: "New Format".to_string(),
            start_tag: DEFAULT_QUOTE.to_string(),
            end_tag: DEFAULT_QUOTE.to_string(),
            start_replace: String::new(),
            end_replace: String::new(),
            exclude_tags: false,
            bold: false,
            italic: false,
            underline: false,
            color: String::new(),
        }
    }
}

impl Format {
    /// Create a rule with default settings and a fresh id.
    pub fn new() -> Self {
        Self::default()
    }

    /// True for the plain `"` ... `"` rule without replacements.
    ///
    /// Only this rule picks up per-conversation colour overrides.
    pub fn is_default_quote(&self) -> bool {
        self.start_tag == DEFAULT_QUOTE
            && self.end_tag == DEFAULT_QUOTE
            && self.start_replace.is_empty()
            && self.end_replace.is_empty()
    }

    /// Both delimiters are non-empty.
    pub fn has_delimiters(&self) -> bool {
        !self.start_tag.is_empty() && !self.end_tag.is_empty()
    }

    /// Styles enabled on this rule, in opening order.
    pub fn styles(&self) -> Vec<Style<'_>> {
        let mut styles = Vec::with_capacity(4);
        if self.bold {
            styles.push(Style::Bold);
        }
        if self.italic {
            styles.push(Style::Italic);
        }
        if self.underline {
            styles.push(Style::Underline);
        }
        if !self.color.is_empty() {
            styles.push(Style::Color(&self.color));
        }
        styles
    }

    /// Opening tag sequence: bold, italic, underline, colour.
    pub fn start_tags(&self) -> String {
        self.styles().iter().map(Style::open).collect()
    }

    /// Closing tag sequence in exact reverse order of [`start_tags`](Self::start_tags).
    pub fn end_tags(&self) -> String {
        self.styles().iter().rev().map(Style::close).collect()
    }

    /// Copy of this rule with a different colour, keeping the id.
    pub fn with_color(&self, color: &str) -> Self {
        Self {
            color: color.to_string(),
            ..self.clone()
        }
    }
}

/// Generate an opaque rule id: nine lowercase base-36 characters.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
