//! rpchat - command-line front end for the chat formatter and LevelDrain data.
//!
//! Loads `settings.yaml` from the config directory, builds the session state
//! and runs one subcommand:
//!
//! - `format`: run a message through the auto-format rules
//! - `override set|remove`: edit per-conversation quote colours
//! - `job` / `buff`: look up catalogue entries
//! - `link`: resolve a `buff://`, `job://` or `tag://` preview link
//! - `report`: catalogue sizes and rejected records
//!
//! Logs go to `<config-dir>/logs` with daily rotation; `--debug` also mirrors
//! them to stderr at debug level.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use rpchat::services::{PreviewLink, PreviewTarget};
use rpchat::{APP_NAME, AutoFormatter, Buff, ChatState, ConfigManager, GameData, Job, Metrics, VERSION};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rpchat")]
#[command(author, version, about = "Chat auto-formatting and LevelDrain lookups", long_about = None)]
struct Cli {
    /// Directory holding settings.yaml and logs
    #[arg(long, default_value = "rpchat Data")]
    config_dir: Utf8PathBuf,

    /// Debug-level logging, mirrored to stderr
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the auto-format rules to a message
    Format {
        message: String,

        /// Conversation the message is sent to
        #[arg(short, long)]
        conversation: Option<String>,
    },

    /// Manage per-conversation quote colours
    Override {
        #[command(subcommand)]
        action: OverrideAction,
    },

    /// Show a job
    Job { name: String },

    /// Show a buff
    Buff { name: String },

    /// Resolve a preview link
    Link { url: String },

    /// Summarise the loaded catalogues
    Report,
}

#[derive(Subcommand)]
enum OverrideAction {
    /// Set the quote colour for a conversation
    Set { conversation: String, color: String },

    /// Remove the quote colour for a conversation
    Remove { conversation: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let _guard = rpchat::logging::setup_logging(
        &config_manager.config_dir().join("logs"),
        "rpchat",
        cli.debug,
        cli.debug,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let settings = config_manager.load_settings()?;
    let formatter = AutoFormatter::new(settings, Arc::new(config_manager));
    let metrics = Arc::new(Metrics::new());
    let state = ChatState::new(formatter, Arc::new(GameData::load()), metrics.clone());

    let result = run(&state, cli.command).await;

    metrics.log_summary();
    result
}

async fn run(state: &ChatState, command: Commands) -> Result<()> {
    match command {
        Commands::Format { message, conversation } => {
            println!("{}", state.format_message(&message, conversation.as_deref()));
        }
        Commands::Override { action } => {
            // The write runs in the background; wait so it lands before exit
            let pending = match action {
                OverrideAction::Set { conversation, color } => {
                    state.add_conversation_override(&conversation, &color)
                }
                OverrideAction::Remove { conversation } => state.remove_conversation_override(&conversation),
            };
            pending.wait().await;
        }
        Commands::Job { name } => {
            let job = state
                .lookup_job(&name)
                .with_context(|| format!("Unknown job: {}", name))?;
            print_job(state.game_data(), job);
        }
        Commands::Buff { name } => {
            let buff = state
                .lookup_buff(&name)
                .with_context(|| format!("Unknown buff: {}", name))?;
            print_buff(state.game_data(), buff);
        }
        Commands::Link { url } => {
            let link: PreviewLink = url.parse()?;
            match link.resolve(state.game_data()) {
                Some(PreviewTarget::Buff(buff)) => print_buff(state.game_data(), buff),
                Some(PreviewTarget::Job(job)) => print_job(state.game_data(), job),
                Some(PreviewTarget::Tag(jobs)) => {
                    println!("Jobs tagged {}:", link.name());
                    for job in jobs {
                        println!("  {}", job.name);
                    }
                }
                None => anyhow::bail!("Nothing matches {}", link),
            }
        }
        Commands::Report => {
            let data = state.game_data();
            println!("Buffs: {} ({} rejected)", data.buffs().len(), data.buffs().report().failures.len());
            println!("Jobs:  {} ({} rejected)", data.jobs().len(), data.jobs().report().failures.len());
            for failure in data.failures() {
                println!("  {}", failure);
            }
        }
    }
    Ok(())
}

fn print_job(data: &GameData, job: &Job) {
    println!("{}  [{}]", job.name, job.tags.join(", "));
    println!("  {}", job.description);
    println!("  Scaling: {}", job.scaling);
    if let Some(innate) = data.innate_buff(job) {
        println!("  Innate: {}", innate.plain_name());
    }
    let granted: Vec<String> = data.granted_buffs(job).map(Buff::plain_name).collect();
    if !granted.is_empty() {
        println!("  Buffs: {}", granted.join(", "));
    }
    match (data.convert_target(job), job.converts.as_deref()) {
        (Some(target), _) => println!("  Converts to: {}", target.name),
        (None, Some(raw)) => println!("  Converts to: {} (unknown job)", raw),
        (None, None) => {}
    }
}

fn print_buff(data: &GameData, buff: &Buff) {
    println!("{} ({}, cost {})", buff.plain_name(), buff.stat(), buff.cost);
    println!("  {}", buff.description);
    let sources: Vec<&str> = data.source_jobs(buff).map(|job| job.name.as_str()).collect();
    if !sources.is_empty() {
        println!("  From: {}", sources.join(", "));
    }
}
