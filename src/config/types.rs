//! Configuration data types.

use crate::weighted::Weight;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub global: GlobalConfig,

    /// Pools to simulate
    #[serde(default)]
    pub pools: Vec<PoolConfig>,
}

/// Global configuration settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Json,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Selection algorithm.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Classic LVS weighted round robin.
    RoundRobin,
    /// Nginx smooth weighted round robin.
    #[default]
    Smooth,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::RoundRobin => f.write_str("round_robin"),
            Algorithm::Smooth => f.write_str("smooth"),
        }
    }
}

/// A weighted pool of targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Unique name for this pool
    pub name: String,

    /// Selection algorithm
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Number of selections to run
    #[serde(default = "default_rounds")]
    pub rounds: usize,

    /// Targets, in selection order
    pub targets: Vec<TargetConfig>,

    /// Failures to inject (smooth pools only)
    #[serde(default)]
    pub failures: Vec<FailureConfig>,
}

/// Individual target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Target name, returned as the selection payload
    pub name: String,

    /// Weight (default: 1). Zero keeps the target listed but unselected.
    #[serde(default = "default_weight")]
    pub weight: Weight,
}

/// A failure reported against a target before a given round.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FailureConfig {
    /// Name of the failing target
    pub target: String,

    /// Zero-based round before which the failure is applied
    pub round: usize,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Json
}

fn default_rounds() -> usize {
    10
}

fn default_weight() -> Weight {
    1
}
