//! Frequency distributions over per-level word or tag sequences

use crate::aggregate::LevelAggregate;
use crate::config::{FreqKind, FreqScope};
use crate::level::LevelKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Counts of each distinct item, most frequent first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqDist<T> {
    /// Sorted by descending count; ties keep first-seen order
    entries: Vec<(T, usize)>,
    total: usize,
}

impl<T: Eq + Hash + Clone> FreqDist<T> {
    /// Count items in one pass
    pub fn compute<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut counts: IndexMap<T, usize> = IndexMap::new();
        let mut total = 0;
        for item in items {
            *counts.entry(item.clone()).or_insert(0) += 1;
            total += 1;
        }
        let mut entries: Vec<(T, usize)> = counts.into_iter().collect();
        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries, total }
    }
}

impl<T> FreqDist<T> {
    /// All `(item, count)` pairs, most frequent first
    pub fn entries(&self) -> &[(T, usize)] {
        &self.entries
    }

    /// The `n` most frequent pairs
    pub fn most_common(&self, n: usize) -> &[(T, usize)] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Running totals over the `n` most frequent items
    pub fn cumulative(&self, n: usize) -> Vec<usize> {
        self.most_common(n)
            .iter()
            .scan(0, |acc, (_, count)| {
                *acc += count;
                Some(*acc)
            })
            .collect()
    }

    /// Number of items counted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct items
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// distinct / total, 0.0 for an empty distribution
    pub fn type_token_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.distinct() as f64 / self.total as f64
        }
    }

    /// Items seen exactly once
    pub fn hapaxes(&self) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter(|(_, count)| *count == 1)
            .map(|(item, _)| item)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// One row of a level report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreqRow {
    pub item: String,
    pub count: usize,
    pub cumulative: usize,
}

/// Frequency summary for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFreqReport {
    pub total: usize,
    pub distinct: usize,
    pub type_token_ratio: f64,
    pub hapaxes: usize,
    pub top: Vec<FreqRow>,
}

impl LevelFreqReport {
    pub fn from_dist(dist: &FreqDist<String>, top_n: usize) -> Self {
        let cumulative = dist.cumulative(top_n);
        let top = dist
            .most_common(top_n)
            .iter()
            .zip(cumulative)
            .map(|((item, count), cumulative)| FreqRow {
                item: item.clone(),
                count: *count,
                cumulative,
            })
            .collect();
        Self {
            total: dist.total(),
            distinct: dist.distinct(),
            type_token_ratio: dist.type_token_ratio(),
            hapaxes: dist.hapaxes().count(),
            top,
        }
    }
}

/// Frequency reports for the levels selected by the scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreqReport {
    pub kind: FreqKind,
    pub levels: IndexMap<LevelKey, LevelFreqReport>,
}

impl FreqReport {
    /// Compute per-level distributions in aggregate order.
    ///
    /// `FreqScope::First` stops after the first level holding any items. That is
    /// the lowest level with data in aggregate order, not the first document
    /// processed.
    pub fn build(aggregate: &LevelAggregate, kind: FreqKind, scope: FreqScope, top_n: usize) -> Self {
        let mut levels = IndexMap::new();
        for (key, bucket) in aggregate.iter() {
            let items = bucket.items(kind);
            if scope == FreqScope::First && items.is_empty() {
                continue;
            }
            let dist = FreqDist::compute(items);
            levels.insert(*key, LevelFreqReport::from_dist(&dist, top_n));
            if scope == FreqScope::First {
                break;
            }
        }
        Self { kind, levels }
    }
}
