//! Per-level accumulation of tagged sentences
//!
//! `LevelAggregate` is the plain data (and what gets serialized);
//! `Aggregator` owns one for the duration of a run and applies the
//! configured modes and unknown-level policy on every `record`.

use crate::config::{AggregateModes, FreqKind, UnknownLevelPolicy};
use crate::error::{PipelineError, PipelineResult};
use crate::level::{Level, LevelKey};
use crate::models::TaggedSentence;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Everything accumulated for one level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBucket {
    /// One tag list per sentence (statistics path)
    #[serde(default)]
    pub tag_lists: Vec<Vec<String>>,
    /// Flat tag sequence (frequency path, `pos`)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Flat word sequence (frequency path, `words`)
    #[serde(default)]
    pub words: Vec<String>,
}

impl LevelBucket {
    pub fn is_empty(&self) -> bool {
        self.tag_lists.is_empty() && self.tags.is_empty() && self.words.is_empty()
    }

    /// Flat sequence used by a frequency distribution of the given kind
    pub fn items(&self, kind: FreqKind) -> &[String] {
        match kind {
            FreqKind::Words => &self.words,
            FreqKind::Pos => &self.tags,
        }
    }
}

/// Ordered level -> bucket mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelAggregate {
    buckets: IndexMap<LevelKey, LevelBucket>,
}

impl Default for LevelAggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelAggregate {
    /// Aggregate pre-seeded with every CEFR level, in level order
    pub fn new() -> Self {
        Self::initialize(&Level::ALL)
    }

    /// Aggregate with one empty bucket per given level
    pub fn initialize(levels: &[Level]) -> Self {
        let buckets = levels
            .iter()
            .map(|level| (LevelKey::from(*level), LevelBucket::default()))
            .collect();
        Self { buckets }
    }

    pub fn get(&self, key: LevelKey) -> Option<&LevelBucket> {
        self.buckets.get(&key)
    }

    pub fn contains(&self, key: LevelKey) -> bool {
        self.buckets.contains_key(&key)
    }

    /// Buckets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&LevelKey, &LevelBucket)> {
        self.buckets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &LevelKey> {
        self.buckets.keys()
    }

    /// Number of buckets (not items)
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no bucket holds any data
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(LevelBucket::is_empty)
    }

    fn bucket_mut(&mut self, key: LevelKey) -> &mut LevelBucket {
        self.buckets.entry(key).or_default()
    }
}

/// Folds tagged sentences into a `LevelAggregate`
#[derive(Debug)]
pub struct Aggregator {
    modes: AggregateModes,
    unknown: UnknownLevelPolicy,
    aggregate: LevelAggregate,
}

impl Aggregator {
    pub fn new(modes: AggregateModes, unknown: UnknownLevelPolicy) -> Self {
        Self {
            modes,
            unknown,
            aggregate: LevelAggregate::new(),
        }
    }

    pub fn modes(&self) -> AggregateModes {
        self.modes
    }

    /// Resolve the bucket for a document's level.
    ///
    /// Unclassified documents fail with `MissingLevelKey` under the `fail`
    /// policy and go to the `UNKNOWN` bucket under `bucket`.
    pub fn key_for(&self, level: Option<Level>, file: &str) -> PipelineResult<LevelKey> {
        match (level, self.unknown) {
            (Some(level), _) => Ok(LevelKey::Level(level)),
            (None, UnknownLevelPolicy::Bucket) => Ok(LevelKey::Unknown),
            (None, UnknownLevelPolicy::Fail) => Err(PipelineError::MissingLevelKey {
                file: file.to_string(),
            }),
        }
    }

    /// Fold one tagged sentence into the aggregate
    pub fn record(
        &mut self,
        level: Option<Level>,
        file: &str,
        sentence: &TaggedSentence,
    ) -> PipelineResult<()> {
        if !self.modes.any() {
            return Ok(());
        }
        let key = self.key_for(level, file)?;
        let modes = self.modes;
        let bucket = self.aggregate.bucket_mut(key);

        if modes.pos_stats {
            bucket.tag_lists.push(sentence.tags());
        }
        match modes.freq_dist {
            Some(FreqKind::Pos) => bucket.tags.extend(sentence.tags()),
            Some(FreqKind::Words) => bucket.words.extend(sentence.words()),
            None => {}
        }
        Ok(())
    }

    pub fn aggregate(&self) -> &LevelAggregate {
        &self.aggregate
    }

    /// Hand over the finished aggregate (read-only from here on)
    pub fn finish(self) -> LevelAggregate {
        self.aggregate
    }
}
