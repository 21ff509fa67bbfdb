use crate::{AppConfig, ConfigError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const ORG: &str = "io";
const AUTHOR: &str = "ReplyStudio";
const APP: &str = "ReplyStudio";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    data_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(ORG, AUTHOR, APP).ok_or(ConfigError::MissingDirectories)?;
        Self::at(
            dirs.config_dir().join("config.toml"),
            dirs.data_dir().to_path_buf(),
        )
    }

    /// Construct against explicit paths (tests use a temp dir).
    pub fn at(config_path: PathBuf, data_dir: PathBuf) -> Result<Self, ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&data_dir)?;

        if !config_path.exists() {
            let initial = AppConfig::default();
            let content = toml::to_string_pretty(&initial)?;
            fs::write(&config_path, content)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        Ok(Self {
            config_path,
            data_dir,
        })
    }

    /// Load the config file, then let environment variables override the
    /// secret-bearing fields. The original tool was driven entirely by
    /// build-time env values; the env spelling keeps that workflow alive.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(&self.config_path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        apply_env_overrides(&mut config);
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn apply_env_overrides(config: &mut AppConfig) {
    for (var, slot) in [
        ("STUDIO_GEMINI_API_KEY", &mut config.gemini.api_key),
        ("STUDIO_AIRTABLE_API_KEY", &mut config.airtable.api_key),
        ("STUDIO_AIRTABLE_BASE_ID", &mut config.airtable.base_id),
        ("STUDIO_AIRTABLE_TABLE", &mut config.airtable.table_name),
        ("STUDIO_PASSPHRASE", &mut config.session.passphrase),
    ] {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                *slot = Some(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_default_config_on_first_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = ConfigManager::at(
            dir.path().join("config.toml"),
            dir.path().join("data"),
        )
        .expect("manager");

        let config = manager.load().expect("load");
        assert_eq!(config.gemini.flash_model, "gemini-2.5-flash");
        assert_eq!(config.gemini.thinking_budget, 32_768);
        assert!(config.session.ttl_hours.is_none());
    }

    #[test]
    fn round_trips_saved_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = ConfigManager::at(
            dir.path().join("config.toml"),
            dir.path().join("data"),
        )
        .expect("manager");

        let mut config = manager.load().expect("load");
        config.airtable.base_id = Some("appXYZ".to_string());
        config.ui.language = "en".to_string();
        manager.save(&config).expect("save");

        let reloaded = manager.load().expect("reload");
        assert_eq!(reloaded.airtable.base_id.as_deref(), Some("appXYZ"));
        assert_eq!(reloaded.ui.language, "en");
    }
}
