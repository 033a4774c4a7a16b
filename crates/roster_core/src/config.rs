//! # Roster Configuration
//!
//! Tunables for id allocation and roster assembly, loadable from JSON.
//!
//! ```rust
//! use roster_core::config::RosterConfig;
//!
//! let config = RosterConfig::default();
//! let fixed = RosterConfig::deterministic(42);
//! assert_eq!(fixed.allocator.seed, Some(42));
//! # let _ = config;
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::ConfigError;
use crate::models::{MAX_SKILL, MIN_SKILL};

/// Env var holding a path to a JSON config file.
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG_PATH";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;
pub const DEFAULT_MAX_ID: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Rejection-sampling ceiling.
    pub max_attempts: u32,
    pub min_id: i64,
    pub max_id: i64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, min_id: 1, max_id: DEFAULT_MAX_ID, seed: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Flat skill given to temporary players.
    pub default_skill: u8,
    /// Players per team requested from the balancing service.
    pub team_size: usize,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self { default_skill: crate::models::DEFAULT_SKILL, team_size: 6 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RosterConfig {
    #[serde(default)]
    pub allocator: AllocatorConfig,
    #[serde(default)]
    pub assembly: AssemblyConfig,
}

impl RosterConfig {
    /// Reproducible id allocation (tests, replays).
    pub fn deterministic(seed: u64) -> Self {
        let mut cfg = Self::default();
        cfg.allocator.seed = Some(seed);
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads from `ROSTER_CONFIG_PATH` if set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_file(Path::new(path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let alloc = &self.allocator;
        if alloc.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "allocator.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if alloc.min_id < 1 || alloc.min_id > alloc.max_id {
            return Err(ConfigError::Invalid {
                field: "allocator.min_id",
                reason: format!("range {}..={} is empty or not positive", alloc.min_id, alloc.max_id),
            });
        }
        if alloc.max_id > DEFAULT_MAX_ID {
            return Err(ConfigError::Invalid {
                field: "allocator.max_id",
                reason: format!("must not exceed {}", DEFAULT_MAX_ID),
            });
        }

        let assembly = &self.assembly;
        if !(MIN_SKILL..=MAX_SKILL).contains(&assembly.default_skill) {
            return Err(ConfigError::Invalid {
                field: "assembly.default_skill",
                reason: format!("must be between {} and {}", MIN_SKILL, MAX_SKILL),
            });
        }
        if assembly.team_size == 0 {
            return Err(ConfigError::Invalid {
                field: "assembly.team_size",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
