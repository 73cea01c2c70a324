use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Database file used when neither the environment nor the CLI names one.
pub const DEFAULT_DATABASE_PATH: &str = "wc.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: String,
    pub key_mode: KeyMode,
    pub player_mode: PlayerMode,
    pub assign_days: bool,
}

/// How get-or-create identifies an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KeyMode {
    /// Match on every seeded field; any change inserts a new row.
    Compound,
    /// Country by name, match by (a, b, when); changed fields are updated in place.
    Natural,
}

/// Whether the players file is written to the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerMode {
    /// Parse the file but write nothing.
    Skip,
    /// Get-or-create players and link them to their country.
    Load,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl FromStr for KeyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compound" => Ok(KeyMode::Compound),
            "natural" => Ok(KeyMode::Natural),
            other => Err(format!("must be compound or natural, got {}", other)),
        }
    }
}

impl FromStr for PlayerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(PlayerMode::Skip),
            "load" => Ok(PlayerMode::Load),
            other => Err(format!("must be skip or load, got {}", other)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            key_mode: KeyMode::Compound,
            player_mode: PlayerMode::Skip,
            assign_days: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_path = match env_map.get("WC_DATABASE_PATH").map(|s| s.trim()) {
            Some("") => {
                return Err(ConfigError::InvalidValue(
                    "WC_DATABASE_PATH".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            Some(path) => path.to_string(),
            None => DEFAULT_DATABASE_PATH.to_string(),
        };

        let key_mode = env_map
            .get("WC_KEY_MODE")
            .map(|s| s.as_str())
            .unwrap_or("compound")
            .parse::<KeyMode>()
            .map_err(|reason| ConfigError::InvalidValue("WC_KEY_MODE".to_string(), reason))?;

        let player_mode = env_map
            .get("WC_PLAYER_MODE")
            .map(|s| s.as_str())
            .unwrap_or("skip")
            .parse::<PlayerMode>()
            .map_err(|reason| ConfigError::InvalidValue("WC_PLAYER_MODE".to_string(), reason))?;

        let assign_days = parse_flag(&env_map, "WC_ASSIGN_DAYS")?;

        Ok(Config {
            database_path,
            key_mode,
            player_mode,
            assign_days,
        })
    }

    /// Apply command-line flags on top of the environment.
    ///
    /// `None` (or `false` for `assign_days`) keeps the current value.
    pub fn with_overrides(
        mut self,
        database_path: Option<String>,
        key_mode: Option<KeyMode>,
        player_mode: Option<PlayerMode>,
        assign_days: bool,
    ) -> Self {
        if let Some(path) = database_path {
            self.database_path = path;
        }
        if let Some(mode) = key_mode {
            self.key_mode = mode;
        }
        if let Some(mode) = player_mode {
            self.player_mode = mode;
        }
        self.assign_days |= assign_days;
        self
    }
}

fn parse_flag(env_map: &HashMap<String, String>, key: &str) -> Result<bool, ConfigError> {
    match env_map.get(key).map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue(
                key.to_string(),
                format!("must be a boolean, got {}", v),
            )),
        },
    }
}
