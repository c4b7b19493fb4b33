//! Matrix (CSV-like) reporter
//!
//! ```text
//! CLASSES,DT,NN,VBZ,NNS,VBP,RB
//! A1,DT,NN,VBZ
//! B2,NNS,VBP,RB
//! ```
//!
//! The first line declares the tag vocabulary; every following line is one
//! tag list prefixed by its level, in level order then insertion order.
//! The key is always followed by a comma, even when the list is empty.
//!
//! Values are not quoted. The Penn comma tag is itself `,`, so a row such as
//! `A1,NN,,,VBZ` carries three tags (`NN`, `,`, `VBZ`); readers that split
//! on commas see empty fields there. Use `pos_matrix.json` when the tags
//! must round-trip.

use crate::matrix::{PosMatrix, CLASSES_KEY};

/// Render the matrix in its line-oriented form
pub fn render(matrix: &PosMatrix) -> String {
    let mut out = String::new();
    push_line(&mut out, CLASSES_KEY, &matrix.classes);
    for (key, lists) in &matrix.rows {
        for list in lists {
            push_line(&mut out, key.as_str(), list);
        }
    }
    out
}

fn push_line(out: &mut String, key: &str, values: &[String]) {
    out.push_str(key);
    out.push(',');
    out.push_str(&values.join(","));
    out.push('\n');
}
