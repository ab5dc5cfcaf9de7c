//! ratiba configuration.
//!
//! Read from ~/.config/ratiba/config.toml, with `RATIBA_*` environment
//! variables taking precedence over the file.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::error::{RatibaError, RatibaResult};

static DEFAULT_TABLE: &str = "schedules";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
static ENV_PREFIX: &str = "RATIBA";

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Clone)]
pub struct RatibaConfig {
    /// Project URL, e.g. https://xyzcompany.supabase.co
    pub supabase_url: Option<String>,

    /// Public anon key sent as `apikey` and bearer token.
    pub supabase_anon_key: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RatibaConfig {
    pub fn config_path() -> RatibaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RatibaError::Config("Could not determine config directory".into()))?
            .join("ratiba");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (creating a commented-out one on first run) and
    /// overlay `RATIBA_*` environment variables.
    pub fn load() -> RatibaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::build(
            Config::builder()
                .add_source(File::from(config_path).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> RatibaResult<Self> {
        let mut config: RatibaConfig = builder
            .build()
            .map_err(|e| RatibaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RatibaError::Config(e.to_string()))?;

        if let Some(url) = config.supabase_url.as_mut() {
            let trimmed = url.trim_end_matches('/').len();
            url.truncate(trimmed);
        }

        Ok(config)
    }

    /// URL and key, or a config error naming what is missing.
    pub fn credentials(&self) -> RatibaResult<(&str, &str)> {
        let url = self
            .supabase_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("supabase_url", "RATIBA_SUPABASE_URL"))?;
        let key = self
            .supabase_anon_key
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("supabase_anon_key", "RATIBA_SUPABASE_ANON_KEY"))?;

        Ok((url, key))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RatibaResult<()> {
        let contents = format!(
            "\
# ratiba configuration

# Supabase project holding the schedules table:
# supabase_url = \"https://your-project.supabase.co\"
# supabase_anon_key = \"your-anon-key\"

# Table name:
# table = \"{}\"

# Request timeout in seconds:
# timeout_secs = {}
",
            DEFAULT_TABLE, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RatibaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RatibaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn missing(key: &str, env: &str) -> RatibaError {
    RatibaError::Config(format!(
        "{key} is not set. Add it to {} or set {env}",
        RatibaConfig::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the config file".to_string())
    ))
}
