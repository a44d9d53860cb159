mod theme;

pub use theme::Theme;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories::BaseDirs;

use crate::error::{Result, VoteError};
use crate::pair::PairInput;

const CONFIG_DIR: &str = "pair-vote";
const MAIN_CONFIG_FILE: &str = "config.toml";
const THEME_FILE: &str = "theme.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub ballot: BallotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Ballot shown at startup. CLI flags take precedence over these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallotConfig {
    pub pair: Vec<String>,
    pub has_voted: Option<String>,
    pub winner: Option<String>,
}

impl Default for BallotConfig {
    fn default() -> Self {
        Self {
            pair: vec!["Trainspotting".to_string(), "28 Days Later".to_string()],
            has_voted: None,
            winner: None,
        }
    }
}

impl BallotConfig {
    /// The configured pair as a persistent collection, or none when the list is empty.
    pub fn pair_input(&self) -> Option<PairInput> {
        if self.pair.is_empty() {
            None
        } else {
            Some(PairInput::Shared(self.pair.iter().cloned().collect()))
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    theme: Theme,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self::with_dir(config_dir))
    }

    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let app_config = Self::load_app_config(&config_dir);
        let theme = Self::load_theme(&config_dir);

        Self {
            config_dir,
            app_config,
            theme,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn get_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| VoteError::Config("Could not determine config directory".to_string()))
    }

    fn load_app_config(config_dir: &Path) -> AppConfig {
        let path = config_dir.join(MAIN_CONFIG_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_theme(config_dir: &Path) -> Theme {
        let path = config_dir.join(THEME_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Option<T> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| VoteError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    /// Writes default `config.toml` and `theme.toml`, leaving existing files alone.
    pub fn write_default_configs(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| VoteError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&main_path, content)
                .map_err(|e| VoteError::Config(format!("Failed to write config: {}", e)))?;
        }

        let theme_path = self.config_dir.join(THEME_FILE);
        if !theme_path.exists() {
            let content = toml::to_string_pretty(&Theme::default())
                .map_err(|e| VoteError::Config(format!("Failed to serialize theme: {}", e)))?;
            std::fs::write(&theme_path, content)
                .map_err(|e| VoteError::Config(format!("Failed to write theme: {}", e)))?;
        }

        Ok(())
    }
}
