//! Ready-made entry types for both selectors.

use super::{SmoothWeighted, Weight, Weighted};

/// A payload paired with a static weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    item: T,
    weight: Weight,
}

impl<T> Item<T> {
    pub fn new(item: T, weight: Weight) -> Self {
        Self { item, weight }
    }

    /// Consume the entry, returning the payload.
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> Weighted for Item<T> {
    type Item = T;

    fn item(&self) -> &T {
        &self.item
    }

    fn weight(&self) -> Weight {
        self.weight
    }
}

/// A payload carrying the running state used by smooth weighted round robin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmoothItem<T> {
    item: T,
    weight: Weight,
    current_weight: Weight,
    effective_weight: Weight,
}

impl<T> SmoothItem<T> {
    /// Create an entry with current weight 0 and effective weight equal to
    /// `weight`.
    pub fn new(item: T, weight: Weight) -> Self {
        Self {
            item,
            weight,
            current_weight: 0,
            effective_weight: weight,
        }
    }

    /// Consume the entry, returning the payload.
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> Weighted for SmoothItem<T> {
    type Item = T;

    fn item(&self) -> &T {
        &self.item
    }

    fn weight(&self) -> Weight {
        self.weight
    }
}

impl<T> SmoothWeighted for SmoothItem<T> {
    fn current_weight(&self) -> Weight {
        self.current_weight
    }

    fn set_current_weight(&mut self, weight: Weight) {
        self.current_weight = weight;
    }

    fn effective_weight(&self) -> Weight {
        self.effective_weight
    }

    fn set_effective_weight(&mut self, weight: Weight) {
        self.effective_weight = weight;
    }
}

impl<T> From<(T, Weight)> for Item<T> {
    fn from((item, weight): (T, Weight)) -> Self {
        Self::new(item, weight)
    }
}

impl<T> From<(T, Weight)> for SmoothItem<T> {
    fn from((item, weight): (T, Weight)) -> Self {
        Self::new(item, weight)
    }
}
