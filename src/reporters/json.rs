//! JSON reporter
//!
//! Pretty-printed direct dump of a result structure: per-document tagged
//! sentences, the POS matrix, an aggregate or a frequency report.

use crate::error::PipelineResult;
use serde::Serialize;

/// Render any serializable result as indented JSON
pub fn render<T: Serialize + ?Sized>(data: &T) -> PipelineResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentTags, SentenceRecord, TaggedToken};
    use crate::reporters::tests::test_matrix;

    #[test]
    fn test_matrix_json_valid() {
        let json_str = render(&test_matrix()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["CLASSES"].as_array().expect("classes array").len(), 6);
        assert_eq!(parsed["A1"][0][1], "NN");
        assert!(json_str.contains('\n'));
    }

    #[test]
    fn test_document_tags_layout() {
        let mut tags = DocumentTags::new();
        tags.insert(
            "The cat sleeps.".into(),
            SentenceRecord {
                wordcount: 4,
                verb_count: 1,
                pos: vec![
                    TaggedToken::new("The", "DT"),
                    TaggedToken::new("cat", "NN"),
                    TaggedToken::new("sleeps", "VBZ"),
                    TaggedToken::new(".", "."),
                ],
            },
        );
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&tags).expect("render JSON")).expect("parse JSON");
        let entry = &parsed["The cat sleeps."];
        assert_eq!(entry["wordcount"], 4);
        assert_eq!(entry["verb_count"], 1);
        assert_eq!(entry["pos"][2], serde_json::json!(["sleeps", "VBZ"]));
    }

    #[test]
    fn test_empty_document() {
        let json_str = render(&DocumentTags::new()).expect("render JSON");
        assert_eq!(json_str, "{}");
    }
}
