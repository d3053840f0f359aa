//! Configuration loading and typed config structures for the arena.
//!
//! The configuration lives in `arena-config.yaml` (or wherever
//! `ARENA_CONFIG` points). Every section and field is optional; a missing
//! file or an empty document yields the standard game.

use std::path::{Path, PathBuf};

use arena_agents::RulesConfig;
use serde::Deserialize;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "ARENA_CONFIG";

/// Config file read when `ARENA_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "arena-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `arena-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArenaConfig {
    /// Game setup.
    #[serde(default)]
    pub world: WorldConfig,

    /// Gameplay rules.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Behaviour of the headless player.
    #[serde(default)]
    pub autopilot: AutopilotConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where results are written.
    #[serde(default)]
    pub output: OutputConfig,
}

impl ArenaConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Path of the config file: `ARENA_CONFIG` if set, else the default.
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }
}

/// Game setup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Seed for every draw; a random seed is chosen when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of areas: 24, 48, or 72.
    #[serde(default = "default_map_size")]
    pub map_size: u32,

    /// Player plus NPC tributes.
    #[serde(default = "default_total_players")]
    pub total_players: u32,

    /// The player's district.
    #[serde(default = "default_player_district")]
    pub player_district: u8,

    /// Names drawn for the NPCs; `Tribute N` when empty.
    #[serde(default)]
    pub tribute_names: Vec<String>,

    /// Days the headless runner plays at most.
    #[serde(default = "default_days")]
    pub days: u32,
}

const fn default_map_size() -> u32 {
    24
}

const fn default_total_players() -> u32 {
    12
}

const fn default_player_district() -> u8 {
    12
}

const fn default_days() -> u32 {
    30
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            map_size: default_map_size(),
            total_players: default_total_players(),
            player_district: default_player_district(),
            tribute_names: Vec::new(),
            days: default_days(),
        }
    }
}

/// How the headless player picks its combat action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutopilotStyle {
    /// Defend every day and head back to the hub when tired.
    #[default]
    Cautious,
    /// Attack whoever shares the area.
    Aggressive,
    /// Never fight back.
    Idle,
}

/// Behaviour of the headless player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AutopilotConfig {
    /// Combat style.
    #[serde(default)]
    pub style: AutopilotStyle,

    /// Pick up ground items before acting.
    #[serde(default = "default_true")]
    pub collect: bool,

    /// Drink unknown flasks when hurt.
    #[serde(default)]
    pub drink_flasks: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            style: AutopilotStyle::default(),
            collect: true,
            drink_flasks: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (used when `RUST_LOG` is unset).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    String::from("info")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Where results are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Final save file; `arena_save_day{D}_seed{S}.json` when absent.
    #[serde(default)]
    pub save_path: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ArenaConfig::parse("").unwrap(), ArenaConfig::default());
        assert_eq!(ArenaConfig::parse("{}").unwrap(), ArenaConfig::default());
    }

    #[test]
    fn defaults_match_standard_game() {
        let c = ArenaConfig::default();
        assert_eq!(c.world.map_size, 24);
        assert_eq!(c.world.total_players, 12);
        assert_eq!(c.world.player_district, 12);
        assert!(c.world.seed.is_none());
        assert_eq!(c.logging.level, "info");
        assert_eq!(c.autopilot.style, AutopilotStyle::Cautious);
    }

    #[test]
    fn parses_nested_sections() {
        let yaml = r"
world:
  seed: 1234
  map_size: 48
  tribute_names: [Ash, Bram]
rules:
  npc_attack_chance: 0.9
  closures:
    interval: 3
autopilot:
  style: aggressive
logging:
  json: true
output:
  save_path: out/final.json
";
        let c = ArenaConfig::parse(yaml).unwrap();
        assert_eq!(c.world.seed, Some(1234));
        assert_eq!(c.world.map_size, 48);
        assert_eq!(c.world.tribute_names.len(), 2);
        assert_eq!(c.rules.npc_attack_chance, 0.9);
        assert_eq!(c.rules.closures.interval, 3);
        assert_eq!(c.rules.hub_stamina, 70);
        assert_eq!(c.autopilot.style, AutopilotStyle::Aggressive);
        assert!(c.logging.json);
        assert_eq!(c.output.save_path, Some(PathBuf::from("out/final.json")));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            ArenaConfig::parse("world: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn project_config_spells_out_the_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_PATH);
        if path.exists() {
            let config = ArenaConfig::from_file(&path);
            assert_eq!(config.unwrap(), ArenaConfig::default());
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ArenaConfig::from_file(Path::new("/nonexistent/arena.yaml"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }
}
