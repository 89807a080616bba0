//! Configuration validation.

use crate::config::{Algorithm, Config};
use crate::weighted::Weight;
use std::collections::HashSet;

/// Validate the configuration.
///
/// Checks for:
/// - At least one pool, with unique non-empty names
/// - Every pool has targets with unique non-empty names
/// - No negative weights, and a pool's total weight fits in `Weight`
/// - At least one round per pool
/// - Failures only on smooth pools, naming a known target within range
///
/// # Returns
///
/// `Ok(())` if valid, or an error message describing every problem found.
pub fn validate_config(config: &Config) -> Result<(), String> {
    let mut errors = Vec::new();

    if config.pools.is_empty() {
        errors.push("at least one pool must be defined".to_string());
    }

    let mut pool_names = HashSet::new();

    for pool in &config.pools {
        if pool.name.is_empty() {
            errors.push("pool name cannot be empty".to_string());
        }

        if !pool_names.insert(pool.name.as_str()) {
            errors.push(format!("duplicate pool name: {}", pool.name));
        }

        if pool.rounds == 0 {
            errors.push(format!("pool '{}' must run at least one round", pool.name));
        }

        if pool.targets.is_empty() {
            errors.push(format!("pool '{}' must have at least one target", pool.name));
        }

        let mut target_names = HashSet::new();
        for target in &pool.targets {
            if target.name.is_empty() {
                errors.push(format!("target name cannot be empty in pool '{}'", pool.name));
            }

            if !target_names.insert(target.name.as_str()) {
                errors.push(format!(
                    "duplicate target name '{}' in pool '{}'",
                    target.name, pool.name
                ));
            }

            // Zero is allowed: listed but never selected
            if target.weight < 0 {
                errors.push(format!(
                    "target '{}' in pool '{}' has negative weight {}",
                    target.name, pool.name, target.weight
                ));
            }
        }

        let total = pool
            .targets
            .iter()
            .filter(|t| t.weight > 0)
            .try_fold(0 as Weight, |sum, t| sum.checked_add(t.weight));
        if total.is_none() {
            errors.push(format!("total weight of pool '{}' overflows", pool.name));
        }

        if !pool.failures.is_empty() && pool.algorithm != Algorithm::Smooth {
            errors.push(format!(
                "pool '{}' injects failures but uses {} (only smooth supports failures)",
                pool.name, pool.algorithm
            ));
        }

        for failure in &pool.failures {
            if !target_names.contains(failure.target.as_str()) {
                errors.push(format!(
                    "failure in pool '{}' references non-existent target '{}'",
                    pool.name, failure.target
                ));
            }

            if failure.round >= pool.rounds {
                errors.push(format!(
                    "failure of '{}' in pool '{}' at round {} is beyond the last round",
                    failure.target, pool.name, failure.round
                ));
            }
        }
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.global.log_level.to_lowercase().as_str()) {
        errors.push(format!(
            "invalid log level '{}', must be one of: {}",
            config.global.log_level,
            valid_levels.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}
