//! Job links in StatTrack stat sheets.
//!
//! The StatTrack bot posts stat sheets that start with
//! `[b]Level Drain Stat Sheet[/b]` followed by the character's level and job.
//! The job name is split out so the renderer can show it as a rich job view.

use crate::models::JobId;
use crate::services::GameData;
use regex::Regex;

/// Sender whose messages carry stat sheets.
pub const STAT_TRACK_SENDER: &str = "StatTrack";

/// Chat message categories, as far as enrichment cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Message,
    Ad,
    Action,
    Event,
}

/// A piece of a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSegment {
    /// BBCode text to render as-is
    Text(String),
    /// A job name that resolved against the job catalogue
    Job { id: JobId, text: String },
}

impl MessageSegment {
    /// The message text this segment covers.
    pub fn text(&self) -> &str {
        match self {
            MessageSegment::Text(text) | MessageSegment::Job { text, .. } => text,
        }
    }
}

/// Splits StatTrack stat sheets around the job name.
pub struct StatSheetMatcher {
    pattern: Regex,
}

impl StatSheetMatcher {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"(?is)(\[b\]level drain stat sheet\[/b\].*?\D*\d* )(?P<job>[^ ]*)(.*)",
            )
            .expect("Invalid stat sheet regex"),
        }
    }

    /// Split `text` into segments if it contains a stat sheet.
    ///
    /// Returns `None` when the text is not a stat sheet. Joining the segment
    /// texts gives back `text`; empty pieces are left out.
    pub fn segments(&self, text: &str, data: &GameData) -> Option<Vec<MessageSegment>> {
        let caps = self.pattern.captures(text)?;
        let mut segments = Vec::with_capacity(4);

        let lead = caps.get(0).map_or(0, |m| m.start());
        if lead > 0 {
            segments.push(MessageSegment::Text(text[..lead].to_string()));
        }

        for (index, group) in caps.iter().enumerate().skip(1) {
            let Some(group) = group else { continue };
            let value = group.as_str();
            if value.is_empty() {
                continue;
            }

            let job = (index == 2).then(|| data.jobs().get_job_id(value)).flatten();
            segments.push(match job {
                Some(id) => MessageSegment::Job {
                    id,
                    text: value.to_string(),
                },
                None => MessageSegment::Text(value.to_string()),
            });
        }

        Some(segments)
    }

    /// Segments for any chat message.
    ///
    /// Only ordinary messages from [`STAT_TRACK_SENDER`] are inspected;
    /// everything else comes back as a single text segment.
    pub fn enrich(&self, sender: &str, kind: MessageKind, text: &str, data: &GameData) -> Vec<MessageSegment> {
        if kind == MessageKind::Message && sender == STAT_TRACK_SENDER {
            if let Some(segments) = self.segments(text, data) {
                return segments;
            }
        }
        vec![MessageSegment::Text(text.to_string())]
    }
}

impl Default for StatSheetMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "[b]Level Drain Stat Sheet[/b]\nAlice, Level 12 Witch [i]Titles: none[/i]";

    #[test]
    fn test_stat_sheet_job_is_linked() {
        let data = GameData::load();
        let matcher = StatSheetMatcher::new();

        let segments = matcher.segments(SHEET, &data).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[0],
            MessageSegment::Text("[b]Level Drain Stat Sheet[/b]\nAlice, Level 12 ".to_string())
        );
        assert_eq!(
            segments[1],
            MessageSegment::Job {
                id: data.jobs().get_job_id("witch").unwrap(),
                text: "Witch".to_string(),
            }
        );
        assert_eq!(segments[2], MessageSegment::Text(" [i]Titles: none[/i]".to_string()));
    }

    #[test]
    fn test_text_before_sheet_is_kept() {
        let data = GameData::load();
        let matcher = StatSheetMatcher::new();
        let text = format!("Results: {}", SHEET);

        let segments = matcher.segments(&text, &data).unwrap();
        assert_eq!(segments[0], MessageSegment::Text("Results: ".to_string()));
        assert!(matches!(&segments[2], MessageSegment::Job { text, .. } if text == "Witch"));

        let rebuilt: String = segments.iter().map(MessageSegment::text).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_unknown_job_stays_text() {
        let data = GameData::load();
        let matcher = StatSheetMatcher::new();

        let segments = matcher
            .segments("[b]level drain stat sheet[/b] Bob, Level 3 Plumber", &data)
            .unwrap();
        assert!(segments.iter().all(|s| matches!(s, MessageSegment::Text(_))));
        assert_eq!(segments[1], MessageSegment::Text("Plumber".to_string()));
    }

    #[test]
    fn test_only_stat_track_messages_are_enriched() {
        let data = GameData::load();
        let matcher = StatSheetMatcher::new();

        let from_user = matcher.enrich("Alice", MessageKind::Message, SHEET, &data);
        assert_eq!(from_user, vec![MessageSegment::Text(SHEET.to_string())]);

        let as_ad = matcher.enrich(STAT_TRACK_SENDER, MessageKind::Ad, SHEET, &data);
        assert_eq!(as_ad.len(), 1);

        let enriched = matcher.enrich(STAT_TRACK_SENDER, MessageKind::Message, SHEET, &data);
        assert_eq!(enriched.len(), 3);
    }

    #[test]
    fn test_plain_bot_message_is_single_segment() {
        let data = GameData::load();
        let matcher = StatSheetMatcher::new();
        let segments = matcher.enrich(STAT_TRACK_SENDER, MessageKind::Message, "Tracking started.", &data);
        assert_eq!(segments, vec![MessageSegment::Text("Tracking started.".to_string())]);
    }
}
