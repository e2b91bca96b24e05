use crate::models::Settings;
use crate::services::SettingsBackend;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the client settings inside the config directory.
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Loads and saves `settings.yaml` in a configuration directory.
///
/// This is the production [`SettingsBackend`]: the auto-formatter hands it a
/// full [`Settings`] snapshot after every change.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for `config_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            config_dir,
        })
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded Settings, or defaults if the file doesn't exist
    pub fn load_settings(&self) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(Settings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        // An empty file deserializes to unit, not a mapping
        if file_contents.trim().is_empty() {
            tracing::warn!("Settings file {} is empty, using defaults", self.settings_path);
            return Ok(Settings::default());
        }

        let settings: Settings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the settings file, replacing its previous contents.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

impl SettingsBackend for ConfigManager {
    fn save_settings(&self, settings: &Settings) -> Result<()> {
        ConfigManager::save_settings(self, settings)
    }

    /// A terminal has no notification prompt; the request is only logged.
    fn request_notification_permission(&self) -> Result<()> {
        tracing::info!("Notifications enabled; no permission prompt on this platform");
        Ok(())
    }
}
