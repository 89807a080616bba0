//! A named pool of targets driven by the configured selector.

use crate::config::{Algorithm, PoolConfig};
use crate::simulate::{Report, TargetTally};
use crate::weighted::{
    Item, RoundRobinWeighted, Selector, SmoothItem, SmoothRoundRobin, Weight, Weighted,
};
use tracing::{debug, warn};

/// Selector over target names, chosen by [`Algorithm`].
#[derive(Debug)]
enum PoolSelector {
    RoundRobin(RoundRobinWeighted<Item<String>>),
    Smooth(SmoothRoundRobin<SmoothItem<String>>),
}

/// A pool of weighted targets with its failure schedule.
#[derive(Debug)]
pub struct Pool {
    name: String,
    algorithm: Algorithm,
    rounds: usize,
    selector: PoolSelector,
    /// (round, target index) pairs, sorted by round.
    failures: Vec<(usize, usize)>,
}

impl Pool {
    /// Build a pool from configuration.
    ///
    /// Failures naming unknown targets are skipped with a warning; the
    /// configuration validator rejects them before this point.
    pub fn from_config(config: &PoolConfig) -> Self {
        let selector = match config.algorithm {
            Algorithm::RoundRobin => {
                let mut wrr = RoundRobinWeighted::new();
                for target in &config.targets {
                    wrr.add(Item::new(target.name.clone(), target.weight));
                }
                PoolSelector::RoundRobin(wrr)
            }
            Algorithm::Smooth => {
                let mut swrr = SmoothRoundRobin::new();
                for target in &config.targets {
                    swrr.add(SmoothItem::new(target.name.clone(), target.weight));
                }
                PoolSelector::Smooth(swrr)
            }
        };

        let mut failures: Vec<(usize, usize)> = config
            .failures
            .iter()
            .filter_map(|failure| {
                let index = config.targets.iter().position(|t| t.name == failure.target);
                if index.is_none() {
                    warn!(pool = %config.name, target = %failure.target, "ignoring failure for unknown target");
                }
                index.map(|i| (failure.round, i))
            })
            .collect();
        failures.sort_by_key(|&(round, _)| round);

        Self {
            name: config.name.clone(),
            algorithm: config.algorithm,
            rounds: config.rounds,
            selector,
            failures,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Configured number of rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Target names in insertion order.
    pub fn targets(&self) -> Vec<&String> {
        match &self.selector {
            PoolSelector::RoundRobin(wrr) => wrr.all(),
            PoolSelector::Smooth(swrr) => swrr.all(),
        }
    }

    fn weights(&self) -> Vec<Weight> {
        match &self.selector {
            PoolSelector::RoundRobin(wrr) => wrr.entries().iter().map(|e| e.weight()).collect(),
            PoolSelector::Smooth(swrr) => swrr.entries().iter().map(|e| e.weight()).collect(),
        }
    }

    /// Select the next target.
    pub fn select(&mut self) -> Option<&String> {
        match &mut self.selector {
            PoolSelector::RoundRobin(wrr) => wrr.next(),
            PoolSelector::Smooth(swrr) => swrr.next(),
        }
    }

    /// Restart selection from a clean state.
    pub fn reset(&mut self) {
        match &mut self.selector {
            PoolSelector::RoundRobin(wrr) => wrr.reset(),
            PoolSelector::Smooth(swrr) => swrr.reset(),
        }
    }

    /// Mark the target at `index` as failed.
    ///
    /// Returns the lowered effective weight, or `None` if the pool's
    /// algorithm has no failure handling or the index is out of range.
    pub fn fail(&mut self, index: usize) -> Option<Weight> {
        match &mut self.selector {
            PoolSelector::RoundRobin(_) => None,
            PoolSelector::Smooth(swrr) => swrr.fail(index),
        }
    }

    /// Run `rounds` selections from a clean state and report the outcome.
    ///
    /// Scheduled failures are applied before the selection of their round.
    /// Failures scheduled at or after `rounds` are skipped and counted in the
    /// report.
    pub fn run(&mut self, rounds: usize) -> Report {
        debug!(pool = %self.name, algorithm = %self.algorithm, rounds, "running pool");
        self.reset();

        let failures = self.failures.clone();
        let skipped_failures = failures.iter().filter(|&&(at, _)| at >= rounds).count();
        if skipped_failures > 0 {
            warn!(
                pool = %self.name,
                rounds,
                skipped = skipped_failures,
                "failures scheduled beyond the last round will not be applied"
            );
        }
        let mut pending = failures.iter().peekable();
        let mut picks = Vec::with_capacity(rounds);

        for round in 0..rounds {
            while let Some(&(_, index)) = pending.next_if(|(at, _)| *at == round) {
                self.fail(index);
            }
            picks.push(self.select().cloned());
        }

        let tally = self
            .targets()
            .into_iter()
            .zip(self.weights())
            .map(|(name, weight)| TargetTally {
                name: name.clone(),
                weight,
                picks: picks.iter().filter(|p| p.as_ref() == Some(name)).count(),
            })
            .collect();

        Report {
            pool: self.name.clone(),
            algorithm: self.algorithm,
            picks,
            tally,
            skipped_failures,
        }
    }
}
