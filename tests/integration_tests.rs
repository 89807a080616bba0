//! Integration tests for rrweight.
//!
//! These exercise the public selector API and the configuration-driven
//! simulation end to end.

use rrweight::config::{load_config, Algorithm};
use rrweight::simulate::Pool;
use rrweight::{
    Item, RoundRobinWeighted, Selector, SmoothItem, SmoothRoundRobin, SmoothWeighted, Weight,
    Weighted,
};
use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use tempfile::NamedTempFile;

/// A caller-defined entry type: the selectors only see the weight fields.
#[derive(Debug)]
struct Upstream {
    addr: SocketAddr,
    weight: Weight,
    current: Weight,
    effective: Weight,
}

impl Upstream {
    fn new(addr: &str, weight: Weight) -> Self {
        Self {
            addr: addr.parse().unwrap(),
            weight,
            current: 0,
            effective: weight,
        }
    }
}

impl Weighted for Upstream {
    type Item = SocketAddr;

    fn item(&self) -> &SocketAddr {
        &self.addr
    }

    fn weight(&self) -> Weight {
        self.weight
    }
}

impl SmoothWeighted for Upstream {
    fn current_weight(&self) -> Weight {
        self.current
    }

    fn set_current_weight(&mut self, weight: Weight) {
        self.current = weight;
    }

    fn effective_weight(&self) -> Weight {
        self.effective
    }

    fn set_effective_weight(&mut self, weight: Weight) {
        self.effective = weight;
    }
}

fn drain<S: Selector>(selector: &mut S, n: usize) -> Vec<<S::Entry as Weighted>::Item>
where
    <S::Entry as Weighted>::Item: Clone,
{
    (0..n).map(|_| selector.next().unwrap().clone()).collect()
}

fn counts<T: std::hash::Hash + Eq>(picks: Vec<T>) -> HashMap<T, usize> {
    let mut map = HashMap::new();
    for pick in picks {
        *map.entry(pick).or_insert(0) += 1;
    }
    map
}

#[test]
fn test_custom_entry_type_smooth() {
    let mut swrr = SmoothRoundRobin::new();
    swrr.add(Upstream::new("10.0.0.1:80", 5));
    swrr.add(Upstream::new("10.0.0.2:80", 1));
    swrr.add(Upstream::new("10.0.0.3:80", 1));

    let picks: Vec<String> = drain(&mut swrr, 7).iter().map(|a| a.ip().to_string()).collect();
    assert_eq!(
        picks,
        [
            "10.0.0.1", "10.0.0.1", "10.0.0.2", "10.0.0.1", "10.0.0.3", "10.0.0.1", "10.0.0.1"
        ]
    );
}

#[test]
fn test_custom_entry_type_round_robin() {
    let mut wrr = RoundRobinWeighted::new();
    wrr.add(Upstream::new("10.0.0.1:80", 2));
    wrr.add(Upstream::new("10.0.0.2:80", 6));

    let first: SocketAddr = "10.0.0.1:80".parse().unwrap();
    let second: SocketAddr = "10.0.0.2:80".parse().unwrap();
    let tally = counts(drain(&mut wrr, 80));
    assert_eq!(tally[&first], 20);
    assert_eq!(tally[&second], 60);
}

#[test]
fn test_both_strategies_through_trait() {
    fn check<S: Selector>(mut selector: S, make: impl Fn(&'static str, Weight) -> S::Entry)
    where
        <S::Entry as Weighted>::Item: Clone + std::hash::Hash + Eq + std::fmt::Debug,
    {
        assert!(selector.next().is_none());

        selector.add(make("a", 5));
        selector.add(make("b", 1));
        selector.add(make("c", 1));
        assert_eq!(selector.len(), 3);

        // Full cycles distribute exactly by weight
        let tally = counts(drain(&mut selector, 70));
        assert_eq!(tally.values().sum::<usize>(), 70);
        let mut per_item: Vec<usize> = tally.into_values().collect();
        per_item.sort_unstable();
        assert_eq!(per_item, [10, 10, 50]);

        selector.remove_all();
        assert!(selector.is_empty());
        assert!(selector.all().is_empty());
        assert!(selector.next().is_none());
    }

    check(RoundRobinWeighted::<Item<&str>>::new(), Item::new);
    check(SmoothRoundRobin::<SmoothItem<&str>>::new(), SmoothItem::new);
}

#[test]
fn test_reset_matches_fresh_selector() {
    let weights = [("a", 4), ("b", 3), ("c", 2)];

    let mut used = SmoothRoundRobin::new();
    let mut fresh = SmoothRoundRobin::new();
    for (name, weight) in weights {
        used.add(SmoothItem::new(name, weight));
        fresh.add(SmoothItem::new(name, weight));
    }
    drain(&mut used, 5);
    used.fail(1);
    used.reset();
    assert_eq!(drain(&mut used, 18), drain(&mut fresh, 18));

    let mut used = RoundRobinWeighted::new();
    let mut fresh = RoundRobinWeighted::new();
    for (name, weight) in weights {
        used.add(Item::new(name, weight));
        fresh.add(Item::new(name, weight));
    }
    drain(&mut used, 5);
    used.reset();
    assert_eq!(drain(&mut used, 18), drain(&mut fresh, 18));
}

#[test]
fn test_simulation_from_file() {
    let yaml = r#"
global:
  log_level: debug
  log_format: pretty

pools:
  - name: lvs
    algorithm: round_robin
    rounds: 7
    targets:
      - { name: a, weight: 5 }
      - { name: b, weight: 1 }
      - { name: c, weight: 1 }
  - name: nginx
    rounds: 7
    targets:
      - { name: a, weight: 5 }
      - { name: b, weight: 1 }
      - { name: c, weight: 1 }
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.pools[1].algorithm, Algorithm::Smooth);

    let sequences: Vec<String> = config
        .pools
        .iter()
        .map(|p| {
            let report = Pool::from_config(p).run(p.rounds);
            report
                .picks
                .iter()
                .map(|pick| pick.as_deref().unwrap_or("-"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    assert_eq!(sequences, ["a a a a a b c", "a a b a c a a"]);
}

#[test]
fn test_simulation_rejects_bad_file() {
    let yaml = r#"
pools:
  - name: broken
    algorithm: round_robin
    targets:
      - { name: a, weight: -1 }
    failures:
      - { target: a, round: 0 }
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let err = load_config(file.path()).unwrap_err().to_string();
    assert!(err.contains("negative weight"));
    assert!(err.contains("only smooth supports failures"));
}
