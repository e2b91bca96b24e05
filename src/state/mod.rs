// Chat session state
//
// ChatState owns the auto-formatter behind a RwLock, shares the read-only
// game data, and broadcasts change events to anything rendering the session.

use crate::metrics::Metrics;
use crate::models::{Buff, Format, Job};
use crate::services::{AutoFormatter, GameData, MessageKind, MessageSegment, PendingWrite, StatSheetMatcher};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when formatter state is modified
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Auto-formatting was switched on or off
    FormattingToggled { enabled: bool },

    /// The rule list was replaced
    FormatsReplaced { count: usize },

    /// A conversation got a quote colour
    OverrideAdded { conversation: String, color: String },

    /// A conversation's quote colour was dropped
    OverrideRemoved { conversation: String },
}

/// Thread-safe chat session state with event emission
///
/// Holds the [`AutoFormatter`] behind `Arc<RwLock<T>>`, the parsed
/// [`GameData`] behind `Arc`, and session [`Metrics`]. Mutations go through
/// the methods here so every change is persisted and announced as a
/// [`StateChange`].
///
/// Clones share the same formatter, data and channel.
#[derive(Clone)]
pub struct ChatState {
    formatter: Arc<RwLock<AutoFormatter>>,
    game_data: Arc<GameData>,
    stat_sheets: Arc<StatSheetMatcher>,
    metrics: Arc<Metrics>,

    /// Broadcast channel for state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl ChatState {
    /// Create a ChatState with a broadcast buffer of 100 events
    pub fn new(formatter: AutoFormatter, game_data: Arc<GameData>, metrics: Arc<Metrics>) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            formatter: Arc::new(RwLock::new(formatter)),
            game_data,
            stat_sheets: Arc::new(StatSheetMatcher::new()),
            metrics,
            state_tx,
        }
    }

    /// Execute a function with read access to the formatter
    ///
    /// # Example
    /// ```ignore
    /// let enabled = state.read(|formatter| formatter.is_enabled());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AutoFormatter) -> R,
    {
        let formatter = self.formatter.read().unwrap();
        f(&formatter)
    }

    /// Run a message through the active rules
    pub fn format_message(&self, message: &str, conversation: Option<&str>) -> String {
        let output = self.read(|formatter| formatter.apply_formats(message, conversation));
        self.metrics.record_message_formatted();
        output
    }

    /// Apply a mutation, count the write and emit `change`
    fn update<F>(&self, change: StateChange, update_fn: F) -> PendingWrite
    where
        F: FnOnce(&mut AutoFormatter) -> PendingWrite,
    {
        let pending = {
            let mut formatter = self.formatter.write().unwrap();
            update_fn(&mut formatter)
        };
        self.metrics.record_settings_write();

        // Ignore send errors - it's OK if no one is listening
        let _ = self.state_tx.send(change);
        pending
    }

    pub fn add_conversation_override(&self, conversation: &str, color: &str) -> PendingWrite {
        self.update(
            StateChange::OverrideAdded {
                conversation: conversation.to_string(),
                color: color.to_string(),
            },
            |formatter| formatter.add_conversation_override(conversation, color),
        )
    }

    pub fn remove_conversation_override(&self, conversation: &str) -> PendingWrite {
        self.update(
            StateChange::OverrideRemoved {
                conversation: conversation.to_string(),
            },
            |formatter| formatter.remove_conversation_override(conversation),
        )
    }

    pub fn set_formats(&self, formats: Vec<Format>) -> PendingWrite {
        self.update(
            StateChange::FormatsReplaced { count: formats.len() },
            |formatter| formatter.replace_formats(formats),
        )
    }

    pub fn set_formatting_enabled(&self, enabled: bool) -> PendingWrite {
        self.update(StateChange::FormattingToggled { enabled }, |formatter| {
            formatter.set_enabled(enabled)
        })
    }

    /// Subscribe to state change events
    ///
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    pub fn game_data(&self) -> &GameData {
        &self.game_data
    }

    pub fn lookup_job(&self, name: &str) -> Option<&Job> {
        let job = self.game_data.get_job(name);
        self.metrics.record_job_lookup(job.is_some());
        job
    }

    pub fn lookup_buff(&self, name: &str) -> Option<&Buff> {
        let buff = self.game_data.get_buff(name);
        self.metrics.record_buff_lookup(buff.is_some());
        buff
    }

    /// Split an incoming message for rendering, linking StatTrack job names
    pub fn enrich_message(&self, sender: &str, kind: MessageKind, text: &str) -> Vec<MessageSegment> {
        self.stat_sheets.enrich(sender, kind, text, &self.game_data)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
