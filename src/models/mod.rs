//! Data models for rpchat.
//!
//! - [`Format`]: a user-defined auto-format rule
//! - [`Settings`]: the persisted client settings the formatter reads and writes back
//! - [`Buff`] / [`Job`]: LevelDrain catalogue entries, linked through [`BuffId`] / [`JobId`]
//! - [`FunStat`]: a fun-stat line from a StatTrack stat sheet
//! - [`StatSheet`]: a character's full StatTrack sheet with its [`Stats`]
//!
//! Catalogue entities are owned by the repositories in [`crate::services`];
//! relations between them are plain indices, so nothing here holds a reference.

pub mod buff;
pub mod format;
pub mod fun_stat;
pub mod job;
pub mod settings;
pub mod stat_sheet;

pub use buff::{Buff, BuffId, Stat};
pub use format::Format;
pub use fun_stat::{FunStat, FunStatError};
pub use job::{Job, JobId};
pub use settings::Settings;
pub use stat_sheet::{StatSheet, StatValue, Stats, Tally};
