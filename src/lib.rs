// rpchat - message auto-formatting and LevelDrain game data for a roleplay chat client
//
// This is the library crate containing the formatter, the catalogue parsers and
// the session state. The binary crate (main.rs) provides a command-line front end.

pub mod bbcode;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::Metrics;
pub use models::{Buff, Format, Job, Settings};
pub use services::{AutoFormatter, GameData, SettingsBackend};
pub use state::{ChatState, StateChange};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
