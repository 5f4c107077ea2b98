use anyhow::Context;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "weddingsite.config.json";

/// Weddingsite configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `<owner>.json` document per owner
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Time of day the countdown targets (`HH:MM:SS`, local)
    #[serde(default = "default_ceremony_time")]
    pub ceremony_time: String,

    /// Countdown refresh period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_ceremony_time() -> String {
    "15:00:00".to_string()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn data_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }

    pub fn ceremony_time(&self) -> anyhow::Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.ceremony_time, "%H:%M:%S")
            .with_context(|| format!("Invalid ceremonyTime {:?}", self.ceremony_time))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ceremony_time: default_ceremony_time(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}
