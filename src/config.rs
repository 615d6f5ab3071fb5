use crate::domain::{LogFormat, LogLevel};
use crate::error::Error;
use crate::feed::config::{
    LIVE_ACTIVITY_CAPACITY, LIVE_ACTIVITY_MAX_INTERVAL_MS, LIVE_ACTIVITY_MIN_INTERVAL_MS,
    SILENT_WATCHER_CAPACITY, SILENT_WATCHER_INTERVAL_MS,
};
use crate::feed::{CandidatePool, EventFilter, SimulatorConfig};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub live_activity: FeedSettings,
    pub silent_watcher: FeedSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    pub enabled: bool,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    pub capacity: usize,
    pub seed: Option<u64>,
    /// Preload the feed with historical events
    pub backfill: bool,
    /// Filter label applied when rendering (`all`, a category, `high+`)
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self::builder()?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("WATCHTOWER").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Builder preloaded with every default value
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("live_activity.enabled", true)?
            .set_default("live_activity.min_interval_ms", LIVE_ACTIVITY_MIN_INTERVAL_MS)?
            .set_default("live_activity.max_interval_ms", LIVE_ACTIVITY_MAX_INTERVAL_MS)?
            .set_default("live_activity.capacity", LIVE_ACTIVITY_CAPACITY as u64)?
            .set_default("live_activity.backfill", false)?
            .set_default("live_activity.filter", "all")?
            .set_default("silent_watcher.enabled", true)?
            .set_default("silent_watcher.min_interval_ms", SILENT_WATCHER_INTERVAL_MS)?
            .set_default("silent_watcher.max_interval_ms", SILENT_WATCHER_INTERVAL_MS)?
            .set_default("silent_watcher.capacity", SILENT_WATCHER_CAPACITY as u64)?
            .set_default("silent_watcher.backfill", false)?
            .set_default("silent_watcher.filter", "all")?
            .set_default("logging.level", LogLevel::Info.as_str())?
            .set_default("logging.format", LogFormat::Pretty.as_str())
    }

    pub fn live_activity_config(&self) -> SimulatorConfig {
        self.live_activity
            .simulator_config(CandidatePool::live_activity())
    }

    pub fn silent_watcher_config(&self) -> SimulatorConfig {
        let config = self
            .silent_watcher
            .simulator_config(CandidatePool::silent_watcher());
        if self.silent_watcher.backfill {
            config.with_watcher_history()
        } else {
            config
        }
    }
}

impl FeedSettings {
    /// Simulator options for these settings; validation happens at start
    pub fn simulator_config(&self, pool: CandidatePool) -> SimulatorConfig {
        let config = SimulatorConfig::new(
            Duration::from_millis(self.min_interval_ms),
            Duration::from_millis(self.max_interval_ms),
            self.capacity,
            pool,
        );
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    pub fn event_filter(&self) -> crate::Result<EventFilter> {
        self.filter
            .parse::<EventFilter>()
            .map_err(|e| Error::invalid_config(format!("filter '{}': {e}", self.filter)))
    }
}
