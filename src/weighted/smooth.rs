//! Smooth weighted round-robin, as implemented by Nginx.
//!
//! On each selection every entry's current weight grows by its effective
//! weight, the entry with the greatest current weight wins, and the winner's
//! current weight is lowered by the total distributed in that round.
//!
//! For weights `{5, 1, 1}` this yields `a a b a c a a`, spreading the light
//! entries through the cycle instead of emitting the heavy one in a burst.
//!
//! See <https://github.com/phusion/nginx/commit/27e94984486058d73157038f7950a0a36ecc6e35>.

use super::{Selector, SmoothWeighted, Weight, Weighted};
use tracing::{debug, trace};

/// Smooth weighted round-robin selector.
///
/// The selector owns its entries; their current and effective weights are
/// mutated in place on every call to [`Selector::next`].
#[derive(Debug)]
pub struct SmoothRoundRobin<W> {
    items: Vec<W>,
}

impl<W: SmoothWeighted> SmoothRoundRobin<W> {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Entries in insertion order, with their running state.
    pub fn entries(&self) -> &[W] {
        &self.items
    }

    /// Penalize the entry at `index` (insertion order) after a failure.
    ///
    /// Returns the lowered effective weight, or `None` if `index` is out of
    /// range. Selection restores the weight gradually.
    pub fn fail(&mut self, index: usize) -> Option<Weight> {
        let entry = self.items.get_mut(index)?;
        entry.fail();
        let effective = entry.effective_weight();
        debug!(index, effective_weight = effective, "entry marked as failed");
        Some(effective)
    }

    /// Run one round and return the winning index.
    ///
    /// Sums are carried in `i128` so large weights cannot overflow. A
    /// non-winning accumulator that leaves the `Weight` range saturates.
    fn next_index(&mut self) -> Option<usize> {
        let mut total: i128 = 0;
        let mut best: Option<(usize, i128)> = None;

        for (i, entry) in self.items.iter_mut().enumerate() {
            let effective = entry.effective_weight();
            let current = i128::from(entry.current_weight()) + i128::from(effective);
            entry.set_current_weight(saturate(current));
            total += i128::from(effective);

            // Recover toward the nominal weight
            if effective < entry.weight() {
                entry.set_effective_weight(effective + 1);
            }

            // Strict comparison: earlier entries win ties
            if best.is_none_or(|(_, best_current)| current > best_current) {
                best = Some((i, current));
            }
        }

        let (i, current) = best?;
        self.items[i].set_current_weight(saturate(current - total));
        Some(i)
    }
}

fn saturate(value: i128) -> Weight {
    value.clamp(i128::from(Weight::MIN), i128::from(Weight::MAX)) as Weight
}

impl<W: SmoothWeighted> Default for SmoothRoundRobin<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: SmoothWeighted> Selector for SmoothRoundRobin<W> {
    type Entry = W;

    fn add(&mut self, entry: W) {
        self.items.push(entry);
    }

    fn all(&self) -> Vec<&W::Item> {
        self.items.iter().map(Weighted::item).collect()
    }

    fn remove_all(&mut self) {
        trace!(entries = self.items.len(), "removing all smooth weighted entries");
        self.items.clear();
    }

    fn reset(&mut self) {
        trace!("resetting smooth weighted state");
        for entry in &mut self.items {
            let weight = entry.weight();
            entry.set_effective_weight(weight);
            entry.set_current_weight(0);
        }
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
