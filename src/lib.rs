//! rrweight - weighted round-robin selection
//!
//! This crate provides two interchangeable selectors that pick items from a
//! weighted collection in proportion to their weights:
//! - Classic weighted round robin (LVS GCD stepping)
//! - Smooth weighted round robin (Nginx current-weight scoring)
//!
//! The `rrweight` binary drives pools described in a YAML file through either
//! selector and prints the resulting distribution.

pub mod config;
pub mod simulate;
pub mod util;
pub mod weighted;

pub use config::Config;
pub use weighted::{
    Item, RoundRobinWeighted, Selector, SmoothItem, SmoothRoundRobin, SmoothWeighted, Weight,
    Weighted,
};
