//! Favorites workbook (shared library)
//!
//! Two sheets: one row per favorite, then every breakpoint row of those
//! favorites. The workbook is assembled in memory and returned as bytes.

use crate::detail::{COLUMN_ANTIBIOTIC, COLUMN_MICROBIAL_GROUP};
use crate::error::Result;
use crate::types::{CanonicalItem, ItemKind};
use rust_xlsxwriter::*;

const ITEM_COLUMNS: [(&str, f64); 8] = [
    ("Name", 28.0),
    ("Kind", 12.0),
    ("Classification", 18.0),
    ("Gram", 14.0),
    ("Morphology", 22.0),
    ("Description", 48.0),
    ("Culture", 32.0),
    ("Resistance Mechanisms", 36.0),
];

const BREAKPOINT_COLUMNS: [(&str, f64); 5] = [
    ("Item", 28.0),
    ("Antibiotic / Microbial Group", 30.0),
    ("S", 10.0),
    ("I", 10.0),
    ("R", 10.0),
];

/// Build the favorites workbook
///
/// # Arguments
/// * `items` - favorited items, in display order
/// * `title` - sheet title row
/// * `generated_at` - timestamp printed under the title
pub fn generate_favorites_workbook(
    items: &[&CanonicalItem],
    title: &str,
    generated_at: &str,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let title_format = Format::new()
        .set_bold()
        .set_font_size(16.0)
        .set_align(FormatAlign::Center);

    let note_format = Format::new()
        .set_italic()
        .set_font_size(9.0)
        .set_font_color(Color::RGB(0x555555));

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_font_size(11.0)
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let centered_format = value_format.clone().set_align(FormatAlign::Center);

    // favorites sheet
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Favorites")?;

        let last_col = (ITEM_COLUMNS.len() - 1) as u16;
        sheet.merge_range(0, 0, 0, last_col, title, &title_format)?;
        sheet.write_string_with_format(1, 0, generated_at, &note_format)?;

        for (col, (label, width)) in ITEM_COLUMNS.iter().enumerate() {
            let col = col as u16;
            sheet.set_column_width(col, *width)?;
            sheet.write_string_with_format(3, col, *label, &header_format)?;
        }
        sheet.set_freeze_panes(4, 0)?;

        for (offset, item) in items.iter().enumerate() {
            let row = 4 + offset as u32;
            let values = [
                item.name.clone(),
                item.kind.to_string(),
                item.classification.clone(),
                item.gram_status.clone(),
                item.morphology.clone(),
                item.description.clone(),
                item.culture_notes.clone(),
                item.resistance_mechanisms.join("\n"),
            ];
            for (col, value) in values.iter().enumerate() {
                sheet.write_string_with_format(row, col as u16, value, &value_format)?;
            }
        }
    }

    // breakpoints sheet
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Breakpoints")?;

        for (col, (label, width)) in BREAKPOINT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            sheet.set_column_width(col, *width)?;
            sheet.write_string_with_format(0, col, *label, &header_format)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        let mut row: u32 = 1;
        for item in items {
            for antibiotic in &item.antibiotics {
                let bp = antibiotic.interpretation();
                let group = format!("{} ({})", antibiotic.name, reference_label(item.kind));

                sheet.write_string_with_format(row, 0, &item.name, &value_format)?;
                sheet.write_string_with_format(row, 1, &group, &value_format)?;
                sheet.write_string_with_format(row, 2, &bp.s, &centered_format)?;
                sheet.write_string_with_format(row, 3, &bp.i, &centered_format)?;
                sheet.write_string_with_format(row, 4, &bp.r, &centered_format)?;
                row += 1;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// What an embedded reference row is, seen from its owning item
fn reference_label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Microbe => COLUMN_ANTIBIOTIC,
        ItemKind::Antibiotic => COLUMN_MICROBIAL_GROUP,
    }
}
