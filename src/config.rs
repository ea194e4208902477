use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::engine::{EngineSettings, DEFAULT_CAPACITY, DEFAULT_ITERATION_FACTOR};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub grouping: GroupingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

/// Tee-group engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct GroupingSettings {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_iteration_factor")]
    pub iteration_factor: usize,
    /// Largest capacity a request may ask for
    #[serde(default = "default_max_capacity")]
    pub max_capacity: usize,
    /// Largest roster one run will group
    #[serde(default = "default_max_golfers")]
    pub max_golfers: usize,
}

impl Default for GroupingSettings {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            iteration_factor: default_iteration_factor(),
            max_capacity: default_max_capacity(),
            max_golfers: default_max_golfers(),
        }
    }
}

impl From<&GroupingSettings> for EngineSettings {
    fn from(settings: &GroupingSettings) -> Self {
        EngineSettings {
            capacity: settings.capacity,
            iteration_factor: settings.iteration_factor,
        }
    }
}

fn default_capacity() -> usize { DEFAULT_CAPACITY }
fn default_iteration_factor() -> usize { DEFAULT_ITERATION_FACTOR }
fn default_max_capacity() -> usize { 6 }
fn default_max_golfers() -> usize { 200 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TEESHEET_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TEESHEET__GROUPING__CAPACITY -> grouping.capacity
            .add_source(
                Environment::with_prefix("TEESHEET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TEESHEET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject grouping settings the engine would refuse at run time
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grouping = &self.grouping;
        if grouping.capacity < 1 {
            return Err(ConfigError::Message("grouping.capacity must be at least 1".to_string()));
        }
        if grouping.max_capacity < grouping.capacity {
            return Err(ConfigError::Message(format!(
                "grouping.max_capacity ({}) is below grouping.capacity ({})",
                grouping.max_capacity, grouping.capacity
            )));
        }
        if grouping.max_golfers < 1 {
            return Err(ConfigError::Message("grouping.max_golfers must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Well-known environment variables that take precedence over the files
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }

    builder.build()
}
