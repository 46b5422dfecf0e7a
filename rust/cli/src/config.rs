//! Configuration resolved from defaults, an optional TOML file and the
//! environment, in that order. Command-line flags override the result.

use std::fs;

use holdem_engine::table::{MAX_SEATS, TableConfig};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const SMALL_BLIND_ENV: &str = "HOLDEM_SMALL_BLIND";
pub const STARTING_STACK_ENV: &str = "HOLDEM_STARTING_STACK";
pub const SEATS_ENV: &str = "HOLDEM_SEATS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub seats: usize,
    pub seed: Option<u64>,
    pub max_invalid_actions: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_stack: 1500,
            small_blind: 50,
            seats: 3,
            seed: None,
            max_invalid_actions: 3,
        }
    }
}

impl Config {
    /// Table settings for a game seeded with `seed`.
    pub fn table_config(&self, seed: u64) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            max_invalid_actions: self.max_invalid_actions,
            seed: Some(seed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub seats: ValueSource,
    pub seed: ValueSource,
    pub max_invalid_actions: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            seats: ValueSource::Default,
            seed: ValueSource::Default,
            max_invalid_actions: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    max_invalid_actions: Option<u32>,
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Resolves configuration with `lookup` standing in for the environment.
pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = lookup(CONFIG_ENV).filter(|p| !p.is_empty()) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.max_invalid_actions {
            cfg.max_invalid_actions = v;
            sources.max_invalid_actions = ValueSource::File;
        }
    }

    if let Some(seed) = lookup(SEED_ENV).filter(|s| !s.is_empty()) {
        cfg.seed = Some(parse_env(SEED_ENV, &seed)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(sb) = lookup(SMALL_BLIND_ENV).filter(|s| !s.is_empty()) {
        cfg.small_blind = parse_env(SMALL_BLIND_ENV, &sb)?;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(stack) = lookup(STARTING_STACK_ENV).filter(|s| !s.is_empty()) {
        cfg.starting_stack = parse_env(STARTING_STACK_ENV, &stack)?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(seats) = lookup(SEATS_ENV).filter(|s| !s.is_empty()) {
        cfg.seats = parse_env(SEATS_ENV, &seats)?;
        sources.seats = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid value for {}: {:?}", key, value)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    cfg.table_config(0)
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if !(2..=MAX_SEATS).contains(&cfg.seats) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: seats must be between 2 and {}",
            MAX_SEATS
        )));
    }
    if u64::from(cfg.starting_stack) * cfg.seats as u64 > u64::from(u32::MAX) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: {} seats of {} chips exceed {} chips in total",
            cfg.seats,
            cfg.starting_stack,
            u32::MAX
        )));
    }
    Ok(())
}
