//! Engine configuration.
//!
//! `EngineConfig` holds every tunable the engine reads at search time. It
//! loads from JSON, with missing fields taking their defaults, and can be
//! adjusted one field at a time through protocol options.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::eval::EvalWeights;
use crate::rules::Variant;

/// Errors raised while loading or adjusting configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Search depth presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Plies searched at this level.
    pub const fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
        }
    }

    /// Parses a level name, case-insensitively.
    pub fn from_name(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default search depth for `go` without an explicit depth.
    pub depth: u32,
    pub variant: Variant,
    /// Worker threads for the root split.
    pub threads: usize,
    pub weights: EvalWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: Difficulty::Medium.depth(),
            variant: Variant::Classic,
            threads: 1,
            weights: EvalWeights::default(),
        }
    }
}

/// Option names accepted by `set_option`, with their protocol declarations.
pub const OPTION_DECLARATIONS: [&str; 5] = [
    "option name Depth type spin default 4 min 0 max 12",
    "option name Variant type combo default classic var classic var threeforone var stock",
    "option name Threads type spin default 1 min 1 max 64",
    "option name Difficulty type combo default medium var easy var medium var hard var expert",
    "option name StockWeight type spin default 10 min 0 max 1000",
];

impl EngineConfig {
    /// Applies a single named option. Names are matched case-insensitively.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.unwrap_or_default().to_string(),
        };
        let value = value.map(str::trim).ok_or_else(invalid)?;

        match name.to_ascii_lowercase().as_str() {
            "depth" => self.depth = value.parse().map_err(|_| invalid())?,
            "variant" => self.variant = Variant::from_name(value).ok_or_else(invalid)?,
            "threads" => {
                self.threads = value
                    .parse()
                    .ok()
                    .filter(|&t: &usize| t > 0)
                    .ok_or_else(invalid)?
            }
            "difficulty" => self.depth = Difficulty::from_name(value).ok_or_else(invalid)?.depth(),
            "stockweight" => self.weights.stock = value.parse().map_err(|_| invalid())?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

/// Loads a config from a JSON file at the given path.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&data)
}

/// Loads a config from a JSON string.
pub fn load_config_from_str(json: &str) -> Result<EngineConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}
