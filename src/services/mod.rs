//! Services module - chat formatting and LevelDrain game data.
//!
//! Everything here is plain logic with explicit inputs: nothing reads global
//! state, and persistence goes through the [`SettingsBackend`] trait so the
//! formatter can be driven by the config layer, a test double or anything
//! else.
//!
//! # Components
//!
//! - [`AutoFormatter`]: applies delimiter-based [`Format`](crate::models::Format)
//!   rules to outgoing messages and keeps per-conversation quote colours.
//!   Every change is written back as a full settings snapshot.
//! - [`BuffRepository`] / [`JobRepository`]: symbol tables parsed from the
//!   BBCode catalogues, keyed by normalised name.
//! - [`GameData`]: both tables, built in dependency order and cross-linked
//!   through [`BuffId`](crate::models::BuffId) / [`JobId`](crate::models::JobId)
//!   indices.
//! - [`StatSheetMatcher`]: splits StatTrack stat sheets so the job name can be
//!   rendered as a link.
//! - [`PreviewLink`]: `buff://`, `job://` and `tag://` preview URLs.
//!
//! # Catalogue format
//!
//! Records are separated by blank lines and parsed one at a time. A bad record
//! is logged and collected in a [`ParseReport`]; it never stops the rest of
//! the catalogue from loading.

pub mod autoformat;
pub mod buffs;
pub mod corpus;
pub mod game_data;
pub mod jobs;
pub mod links;
pub mod stat_track;

pub use autoformat::{AutoFormatter, PendingWrite, SettingsBackend, apply_format};
pub use buffs::BuffRepository;
pub use corpus::{BUFF_CORPUS, JOB_CORPUS, ParseReport, Record, RecordError, split_records};
pub use game_data::GameData;
pub use jobs::JobRepository;
pub use links::{LinkError, PreviewLink, PreviewTarget};
pub use stat_track::{MessageKind, MessageSegment, STAT_TRACK_SENDER, StatSheetMatcher};
