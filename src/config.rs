//! Configuration system for Plannr.
//!
//! Loaded from ~/.config/plannr/plannr.yml or .plannr.yml, with defaults for
//! everything so the tool works out of the box.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::Availability;
use crate::planner::OpenRouterConfig;

/// Default LLM model (provider/model format).
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:free";

/// Global configuration for Plannr.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// LLM generator settings.
    pub llm: LlmConfig,

    /// Storage settings.
    pub storage: StorageConfig,

    /// Default availability applied to new projects.
    pub availability: Availability,
}

impl GlobalConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .plannr.yml in current directory
    /// 3. ~/.config/plannr/plannr.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(".plannr.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .plannr.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .plannr.yml: {}", e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("plannr").join("plannr.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.llm.timeout_ms == 0 {
            eyre::bail!("llm.timeout-ms must be > 0");
        }
        if self.llm.max_tokens == 0 {
            eyre::bail!("llm.max-tokens must be > 0");
        }
        if self.availability.max_daily_utilization <= 0.0
            || self.availability.max_daily_utilization > 1.0
        {
            eyre::bail!("availability.max_daily_utilization must be in (0, 1]");
        }
        Ok(())
    }

    /// Directory holding project documents.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("plannr")
                .join("projects")
        })
    }

    /// Generator settings in the shape the OpenRouter client takes.
    pub fn generator_config(&self) -> OpenRouterConfig {
        OpenRouterConfig {
            model: self.llm.model.clone(),
            max_tokens: self.llm.max_tokens,
            timeout: Duration::from_millis(self.llm.timeout_ms),
        }
    }
}

/// LLM generator settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model in provider/model format.
    pub model: String,

    /// Timeout per generator call in milliseconds.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Max tokens per generator response.
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: 120_000,
            max_tokens: 8192,
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Project document directory; defaults to the platform data dir.
    pub dir: Option<PathBuf>,
}
