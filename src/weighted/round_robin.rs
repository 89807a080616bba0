//! Classic weighted round-robin (LVS/IPVS scheduling).
//!
//! See <http://kb.linuxvirtualserver.org/wiki/Weighted_Round-Robin_Scheduling>.

use super::{gcd, Selector, Weight, Weighted};
use tracing::trace;

/// Weighted round-robin selector using GCD stepping.
///
/// Every positive weight is folded into a running GCD and maximum when it is
/// added. Selection walks a cursor over the entries while lowering a threshold
/// by the GCD each time the cursor wraps; the first entry whose weight reaches
/// the threshold wins. For weights `{5, 1, 1}` one full cycle is
/// `A A A A A B C`.
///
/// Zero and negative weights are stored and listed but never selected (unless
/// the entry is alone).
#[derive(Debug)]
pub struct RoundRobinWeighted<W> {
    items: Vec<W>,
    /// GCD of all positive weights, 0 until one is added.
    gcd: Weight,
    max_weight: Weight,
    /// Last visited index. `None` before the first scan step.
    cursor: Option<usize>,
    /// Current selection threshold.
    current_weight: Weight,
}

impl<W: Weighted> RoundRobinWeighted<W> {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            gcd: 0,
            max_weight: 0,
            cursor: None,
            current_weight: 0,
        }
    }

    /// GCD of all positive weights added so far.
    pub fn gcd(&self) -> Weight {
        self.gcd
    }

    /// Largest weight added so far, 0 if none is positive.
    pub fn max_weight(&self) -> Weight {
        self.max_weight
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[W] {
        &self.items
    }

    fn next_index(&mut self) -> Option<usize> {
        let n = self.items.len();

        debug_assert!(
            self.gcd > 0 || self.max_weight == 0,
            "gcd is zero while a positive weight is present"
        );

        loop {
            let i = self.cursor.map_or(0, |i| (i + 1) % n);
            self.cursor = Some(i);

            if i == 0 {
                self.current_weight -= self.gcd;
                if self.current_weight <= 0 {
                    self.current_weight = self.max_weight;
                    if self.current_weight == 0 {
                        // All weights are non-positive. Rewind so the next
                        // call lands on this branch again.
                        self.cursor = None;
                        return None;
                    }
                }
            }

            if self.items[i].weight() >= self.current_weight {
                return Some(i);
            }
        }
    }
}

impl<W: Weighted> Default for RoundRobinWeighted<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Weighted> Selector for RoundRobinWeighted<W> {
    type Entry = W;

    fn add(&mut self, entry: W) {
        let weight = entry.weight();
        if weight > 0 {
            if self.gcd == 0 {
                self.gcd = weight;
                self.max_weight = weight;
                self.cursor = None;
                self.current_weight = 0;
            } else {
                self.gcd = gcd(self.gcd, weight);
                self.max_weight = self.max_weight.max(weight);
            }
        }
        self.items.push(entry);
    }

    fn all(&self) -> Vec<&W::Item> {
        self.items.iter().map(Weighted::item).collect()
    }

    fn remove_all(&mut self) {
        trace!(entries = self.items.len(), "removing all weighted entries");
        self.items.clear();
        self.gcd = 0;
        self.max_weight = 0;
        self.cursor = None;
        self.current_weight = 0;
    }

    fn reset(&mut self) {
        trace!("resetting weighted round-robin cursor");
        self.cursor = None;
        self.current_weight = 0;
    }

    fn next(&mut self) -> Option<&W::Item> {
        match self.items.len() {
            0 => None,
            1 => Some(self.items[0].item()),
            _ => {
                let i = self.next_index()?;
                Some(self.items[i].item())
            }
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
