//! POS matrix: per-level tag lists plus the tag vocabulary header

use crate::aggregate::LevelAggregate;
use crate::level::LevelKey;
use indexmap::{IndexMap, IndexSet};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Header key naming the tag vocabulary row
pub const CLASSES_KEY: &str = "CLASSES";

/// Tag lists grouped by level, with the vocabulary that indexes them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosMatrix {
    /// Distinct tags in first-seen order across the whole aggregate
    pub classes: Vec<String>,
    pub rows: IndexMap<LevelKey, Vec<Vec<String>>>,
}

impl PosMatrix {
    /// Build from the statistics path of an aggregate.
    ///
    /// Levels keep aggregate order and lists keep insertion order, so the
    /// result depends only on the order documents were processed in.
    pub fn build(aggregate: &LevelAggregate) -> Self {
        let mut classes: IndexSet<&str> = IndexSet::new();
        let mut rows = IndexMap::new();

        for (key, bucket) in aggregate.iter() {
            for tag in bucket.tag_lists.iter().flatten() {
                classes.insert(tag.as_str());
            }
            rows.insert(*key, bucket.tag_lists.clone());
        }

        Self {
            classes: classes.into_iter().map(str::to_string).collect(),
            rows,
        }
    }

    /// Total number of tag-list rows
    pub fn row_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

// JSON form: {"CLASSES": [...], "A1": [[...], ...], ...}
impl Serialize for PosMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len() + 1))?;
        map.serialize_entry(CLASSES_KEY, &self.classes)?;
        for (key, lists) in &self.rows {
            map.serialize_entry(key.as_str(), lists)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::config::{AggregateModes, UnknownLevelPolicy};
    use crate::level::Level;
    use crate::models::{TaggedSentence, TaggedToken};

    fn sentence(tags: &[&str]) -> TaggedSentence {
        let tokens: Vec<TaggedToken> = tags.iter().map(|t| TaggedToken::new("w", *t)).collect();
        TaggedSentence {
            text: "w".into(),
            word_count: tokens.len(),
            verb_count: 0,
            tokens,
        }
    }

    fn stats() -> Aggregator {
        let modes = AggregateModes {
            pos_stats: true,
            freq_dist: None,
        };
        Aggregator::new(modes, UnknownLevelPolicy::Fail)
    }

    #[test]
    fn test_classes_first_seen_across_levels() {
        let mut agg = stats();
        // B2 recorded first, but A1 precedes it in aggregate order
        agg.record(Some(Level::B2), "b", &sentence(&["NNS", "VBP", "RB"])).unwrap();
        agg.record(Some(Level::A1), "a", &sentence(&["DT", "NN", "VBZ"])).unwrap();
        agg.record(Some(Level::A1), "a", &sentence(&["DT", "NNS"])).unwrap();

        let matrix = PosMatrix::build(agg.aggregate());
        assert_eq!(matrix.classes, vec!["DT", "NN", "VBZ", "NNS", "VBP", "RB"]);
        assert_eq!(matrix.row_count(), 3);
        assert_eq!(
            matrix.rows[&LevelKey::Level(Level::A1)],
            vec![vec!["DT", "NN", "VBZ"], vec!["DT", "NNS"]]
        );
    }

    #[test]
    fn test_classes_unique_and_complete() {
        let mut agg = stats();
        agg.record(Some(Level::C1), "c", &sentence(&["NN", "NN", "IN", "NN"])).unwrap();
        agg.record(Some(Level::C2), "c", &sentence(&["IN", "JJ"])).unwrap();
        let matrix = PosMatrix::build(agg.aggregate());
        assert_eq!(matrix.classes, vec!["NN", "IN", "JJ"]);
    }

    #[test]
    fn test_empty_aggregate() {
        let matrix = PosMatrix::build(&LevelAggregate::new());
        assert!(matrix.classes.is_empty());
        assert_eq!(matrix.rows.len(), 7);
        assert_eq!(matrix.row_count(), 0);
    }

    #[test]
    fn test_json_puts_classes_first() {
        let mut agg = stats();
        agg.record(Some(Level::A2), "a", &sentence(&["UH"])).unwrap();
        let json = serde_json::to_string(&PosMatrix::build(agg.aggregate())).unwrap();
        assert!(json.starts_with(r#"{"CLASSES":["UH"],"A1":[],"A2":[["UH"]]"#));
    }
}
