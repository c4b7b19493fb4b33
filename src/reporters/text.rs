//! Text (terminal) reporter for frequency distributions

use crate::freq::{FreqReport, LevelFreqReport};
use console::style;

/// Longest item shown before truncation
const ITEM_WIDTH: usize = 24;

/// Render per-level frequency tables
pub fn render_freq_report(report: &FreqReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} ({})\n",
        style("Frequency distribution").bold(),
        report.kind
    ));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));

    if report.levels.is_empty() {
        out.push_str(&format!("{}\n", style("No data for any level.").dim()));
        return out;
    }

    for (key, level) in &report.levels {
        out.push_str(&format!(
            "\n{}  total: {}  distinct: {}  type/token: {:.3}  hapaxes: {}\n",
            style(key).cyan().bold(),
            level.total,
            level.distinct,
            level.type_token_ratio,
            level.hapaxes
        ));
        render_rows(&mut out, level);
    }
    out
}

fn render_rows(out: &mut String, level: &LevelFreqReport) {
    if level.top.is_empty() {
        out.push_str(&format!("  {}\n", style("(empty)").dim()));
        return;
    }
    out.push_str(&format!(
        "  {}\n",
        style(format!("{:>3}  {:<ITEM_WIDTH$}  {:>7}  {:>7}", "#", "ITEM", "COUNT", "CUM")).dim()
    ));
    for (i, row) in level.top.iter().enumerate() {
        // Truncate on chars to stay UTF-8 safe
        let item: String = if row.item.chars().count() > ITEM_WIDTH {
            let head: String = row.item.chars().take(ITEM_WIDTH - 3).collect();
            format!("{head}...")
        } else {
            row.item.clone()
        };
        out.push_str(&format!(
            "  {:>3}  {:<ITEM_WIDTH$}  {:>7}  {:>7}\n",
            i + 1,
            item,
            row.count,
            row.cumulative
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FreqKind;
    use crate::freq::FreqRow;
    use crate::level::{Level, LevelKey};
    use indexmap::IndexMap;

    fn report() -> FreqReport {
        let mut levels = IndexMap::new();
        levels.insert(
            LevelKey::Level(Level::A2),
            LevelFreqReport {
                total: 3,
                distinct: 2,
                type_token_ratio: 2.0 / 3.0,
                hapaxes: 1,
                top: vec![
                    FreqRow { item: "the".into(), count: 2, cumulative: 2 },
                    FreqRow { item: "x".repeat(40), count: 1, cumulative: 3 },
                ],
            },
        );
        levels.insert(
            LevelKey::Level(Level::C1),
            LevelFreqReport {
                total: 0,
                distinct: 0,
                type_token_ratio: 0.0,
                hapaxes: 0,
                top: Vec::new(),
            },
        );
        FreqReport { kind: FreqKind::Words, levels }
    }

    #[test]
    fn test_render_contains_levels_and_rows() {
        let out = console::strip_ansi_codes(&render_freq_report(&report())).to_string();
        assert!(out.contains("Frequency distribution (words)"));
        assert!(out.contains("A2  total: 3  distinct: 2  type/token: 0.667"));
        assert!(out.contains("the"));
        assert!(out.contains(&format!("{}...", "x".repeat(ITEM_WIDTH - 3))));
        assert!(out.contains("(empty)"));
    }

    #[test]
    fn test_render_no_levels() {
        let empty = FreqReport {
            kind: FreqKind::Pos,
            levels: IndexMap::new(),
        };
        let out = console::strip_ansi_codes(&render_freq_report(&empty)).to_string();
        assert!(out.contains("No data for any level."));
    }
}
