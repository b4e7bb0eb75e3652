//! Terminal rendering of cards and the detail panel
//!
//! Every call renders the whole output again; nothing is patched in place.

use microbiobase_common::detail::{BreakpointTable, DetailView, SectionBody};
use microbiobase_common::{classification_counts, filter, CanonicalItem, Category, FavoriteStore, FilterResult};

const STAR_ON: &str = "★";
const STAR_OFF: &str = "☆";

/// One card
pub fn render_card(item: &CanonicalItem, favorite: bool) -> String {
    let star = if favorite { STAR_ON } else { STAR_OFF };
    let mut lines = vec![format!("{} {}  [{}]", star, item.name, item.id)];

    if !item.classification.is_empty() {
        lines.push(format!("  {}", item.classification));
    }
    if !item.gram_status.is_empty() {
        lines.push(format!("  Gram: {}", item.gram_status));
    }
    if !item.morphology.is_empty() {
        lines.push(format!("  Morphology: {}", item.morphology));
    }

    lines.join("\n")
}

/// Card list followed by the count line
pub fn render_cards(result: &FilterResult, favorites: &FavoriteStore) -> String {
    let mut out = String::new();

    for item in &result.visible {
        out.push_str(&render_card(item, favorites.is_favorite(&item.id)));
        out.push_str("\n\n");
    }

    out.push_str(&result.summary());
    out
}

/// Built-in categories followed by the classifications found in the dataset
pub fn render_categories(items: &[CanonicalItem], favorites: &FavoriteStore) -> String {
    let mut lines: Vec<String> = Category::builtins()
        .iter()
        .map(|category| {
            let count = filter(items, "", category, favorites).visible_count();
            format!("{:<14} {}", category.to_string(), count)
        })
        .collect();

    for (label, count) in classification_counts(items) {
        lines.push(format!("{:<14} {}", label, count));
    }

    lines.join("\n")
}

/// Detail panel
pub fn render_detail(view: &DetailView) -> String {
    let mut lines = vec![format!("== {} ==", view.header.name)];

    if let Some(image) = &view.header.image {
        lines.push(format!("Image: {}", image));
    }

    if !view.tags.is_empty() {
        let tags: Vec<String> = view.tags.iter().map(|t| format!("[{}]", t)).collect();
        lines.push(tags.join(" "));
    }

    for section in &view.sections {
        lines.push(String::new());
        lines.push(section.title.to_string());

        match &section.body {
            SectionBody::Paragraph(text) => lines.push(format!("  {}", text)),
            SectionBody::List(entries) => {
                lines.extend(entries.iter().map(|e| format!("  - {}", e)));
            }
            SectionBody::Table(table) => lines.extend(render_table(table)),
        }
    }

    lines.join("\n")
}

/// Breakpoint table with padded columns
fn render_table(table: &BreakpointTable) -> Vec<String> {
    let header = [table.column_header, "S", "I", "R"];

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip([&row.name, &row.s, &row.i, &row.r]) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect();
        format!("  {}", padded.join("  ").trim_end())
    };

    let mut lines = vec![format_row(header)];
    for row in &table.rows {
        lines.push(format_row([row.name.as_str(), row.s.as_str(), row.i.as_str(), row.r.as_str()]));
    }
    lines
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use microbiobase_common::{normalize, project};
    use serde_json::json;

    fn items() -> Vec<CanonicalItem> {
        normalize(&json!([
            {"name": "Staphylococcus aureus", "classificacao": "Bactéria", "gram": "Gram+", "morfologia": "Cocos",
             "antibioticos": [{"nome": "Oxacilina", "breakpoint": {"S": "<=2", "R": ">=4"}}]},
            {"name": "Penicilina", "type": "antibiotic", "breakpoints": {"Streptococcus": {"S": "<=0.06"}}}
        ]))
    }

    #[test]
    fn test_card_lines() {
        let items = items();
        let card = render_card(&items[0], true);
        assert_eq!(
            card,
            "★ Staphylococcus aureus  [staphylococcus_aureus]\n  Bactéria\n  Gram: Gram+\n  Morphology: Cocos"
        );

        let bare = render_card(&items[1], false);
        assert_eq!(bare, "☆ Penicilina  [penicilina]");
    }

    #[test]
    fn test_cards_end_with_summary() {
        let items = items();
        let favorites = FavoriteStore::new();
        let result = filter(&items, "zzz", &Category::All, &favorites);
        assert_eq!(render_cards(&result, &favorites), "Showing 0 of 2");
    }

    #[test]
    fn test_detail_antibiogram() {
        let items = items();
        let text = render_detail(&project(&items[0]));
        assert!(text.starts_with("== Staphylococcus aureus =="));
        assert!(text.contains("[Bactéria] [Gram+] [Cocos]"));
        assert!(text.contains("Antibiogram\n  Antibiotic  S    I  R"));
        assert!(text.contains("  Oxacilina   <=2  -  >=4"));
    }

    #[test]
    fn test_detail_interpretation() {
        let items = items();
        let text = render_detail(&project(&items[1]));
        assert!(text.contains("Clinical Interpretation Indicators"));
        assert!(text.contains("Microbial Group"));
        assert!(text.contains("Streptococcus"));
    }

    #[test]
    fn test_categories_counts() {
        let items = items();
        let favorites = FavoriteStore::from_ids(vec!["penicilina".to_string()]);
        let text = render_categories(&items, &favorites);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("{:<14} 2", "all"));
        assert_eq!(lines[1], format!("{:<14} 1", "favorites"));
        assert_eq!(lines[2], format!("{:<14} 1", "antibiotics"));
        assert_eq!(lines[3], format!("{:<14} 1", "gram+"));
        assert_eq!(lines[5], format!("{:<14} 1", "Bactéria"));
    }

    #[test]
    fn test_pad_counts_chars() {
        assert_eq!(pad("é", 3), "é  ");
        assert_eq!(pad("long", 2), "long");
    }
}
