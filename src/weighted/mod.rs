//! Weighted selection algorithms.
//!
//! Two interchangeable selectors are provided:
//! - [`RoundRobinWeighted`]: classic LVS weighted round robin (GCD stepping)
//! - [`SmoothRoundRobin`]: Nginx smooth weighted round robin
//!
//! Neither selector synchronizes internally. Callers sharing one across
//! threads must wrap it in their own lock.

mod item;
mod round_robin;
mod smooth;

pub use item::{Item, SmoothItem};
pub use round_robin::RoundRobinWeighted;
pub use smooth::SmoothRoundRobin;

/// Weight value. Zero and negative weights are accepted but never selected.
pub type Weight = i64;

/// Capability contract for items held by [`RoundRobinWeighted`].
pub trait Weighted {
    /// Caller-defined payload returned from selection.
    type Item;

    /// The payload, returned unexamined.
    fn item(&self) -> &Self::Item;

    /// Static weight of this entry.
    fn weight(&self) -> Weight;
}

/// Capability contract for items held by [`SmoothRoundRobin`].
///
/// The current and effective weights are written only by the selector that
/// owns the entry.
pub trait SmoothWeighted: Weighted {
    /// Running accumulator, starts at 0.
    fn current_weight(&self) -> Weight;

    fn set_current_weight(&mut self, weight: Weight);

    /// Working weight, starts at [`Weighted::weight`].
    fn effective_weight(&self) -> Weight;

    fn set_effective_weight(&mut self, weight: Weight);

    /// Penalize this entry after an observed failure.
    ///
    /// Lowers the effective weight by the nominal weight, floored at 0.
    /// Selection ramps it back up by one point per round.
    fn fail(&mut self) {
        let lowered = self.effective_weight().saturating_sub(self.weight()).max(0);
        self.set_effective_weight(lowered);
    }
}

/// Common surface of both selection strategies.
pub trait Selector {
    /// Stored entry type.
    type Entry: Weighted;

    /// Append an entry. Insertion order is significant.
    fn add(&mut self, entry: Self::Entry);

    /// Payloads of every entry, in insertion order.
    fn all(&self) -> Vec<&<Self::Entry as Weighted>::Item>;

    /// Drop every entry and return to the freshly constructed state.
    fn remove_all(&mut self);

    /// Restart the selection cycle, keeping the entries.
    fn reset(&mut self);

    /// Select the next payload, or `None` if nothing is selectable.
    fn next(&mut self) -> Option<&<Self::Entry as Weighted>::Item>;

    /// Number of entries held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Greatest common divisor of two positive weights.
pub fn gcd(mut a: Weight, mut b: Weight) -> Weight {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.abs()
}
