//! Selection reports.

use crate::config::Algorithm;
use crate::weighted::Weight;
use std::fmt;

/// Outcome of running a pool for a number of rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Pool name.
    pub pool: String,
    /// Algorithm used.
    pub algorithm: Algorithm,
    /// Target picked in each round, `None` when nothing was selectable.
    pub picks: Vec<Option<String>>,
    /// Per-target counts in insertion order.
    pub tally: Vec<TargetTally>,
    /// Scheduled failures that fell outside the run.
    pub skipped_failures: usize,
}

/// How often one target was picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTally {
    pub name: String,
    pub weight: Weight,
    pub picks: usize,
}

impl Report {
    /// Rounds in which no target was selectable.
    pub fn misses(&self) -> usize {
        self.picks.iter().filter(|p| p.is_none()).count()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "pool {} ({}, {} rounds)",
            self.pool,
            self.algorithm,
            self.picks.len()
        )?;

        let sequence: Vec<&str> = self
            .picks
            .iter()
            .map(|p| p.as_deref().unwrap_or("-"))
            .collect();
        writeln!(f, "  sequence: {}", sequence.join(" "))?;

        let width = self.tally.iter().map(|t| t.name.len()).max().unwrap_or(0);
        let rounds = self.picks.len().max(1);
        for t in &self.tally {
            let share = t.picks as f64 * 100.0 / rounds as f64;
            writeln!(
                f,
                "  {:<width$}  weight {:>4}  picked {:>6} ({:5.1}%)",
                t.name, t.weight, t.picks, share
            )?;
        }

        if self.misses() > 0 {
            writeln!(f, "  no selection: {}", self.misses())?;
        }
        if self.skipped_failures > 0 {
            writeln!(f, "  failures not applied: {}", self.skipped_failures)?;
        }
        Ok(())
    }
}
