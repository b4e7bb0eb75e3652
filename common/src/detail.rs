//! Detail panel projection
//!
//! Pure mapping from an item to what the detail panel shows. Sections keep a
//! fixed order and are omitted when they have nothing to show.

use crate::types::{CanonicalItem, ItemKind};
use serde::Serialize;

pub const SECTION_DESCRIPTION: &str = "Description";
pub const SECTION_CULTURE: &str = "Culture";
pub const SECTION_RESISTANCE: &str = "Resistance Mechanisms";
pub const SECTION_ANTIBIOGRAM: &str = "Antibiogram";
pub const SECTION_INTERPRETATION: &str = "Clinical Interpretation Indicators";

pub const COLUMN_ANTIBIOTIC: &str = "Antibiotic";
pub const COLUMN_MICROBIAL_GROUP: &str = "Microbial Group";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub header: DetailHeader,
    pub tags: Vec<String>,
    pub sections: Vec<DetailSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailHeader {
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSection {
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum SectionBody {
    Paragraph(String),
    List(Vec<String>),
    Table(BreakpointTable),
}

/// S/I/R table; `column_header` names the first column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakpointTable {
    pub column_header: &'static str,
    pub rows: Vec<BreakpointRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakpointRow {
    pub name: String,
    pub s: String,
    pub i: String,
    pub r: String,
}

impl DetailView {
    pub fn section(&self, title: &str) -> Option<&DetailSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn section_titles(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.title).collect()
    }
}

/// Project an item into its detail view
pub fn project(item: &CanonicalItem) -> DetailView {
    let tags = [&item.classification, &item.gram_status, &item.morphology]
        .into_iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect();

    let mut sections = Vec::new();

    if !item.description.is_empty() {
        sections.push(DetailSection {
            title: SECTION_DESCRIPTION,
            body: SectionBody::Paragraph(item.description.clone()),
        });
    }

    if !item.culture_notes.is_empty() {
        sections.push(DetailSection {
            title: SECTION_CULTURE,
            body: SectionBody::Paragraph(item.culture_notes.clone()),
        });
    }

    if !item.resistance_mechanisms.is_empty() {
        sections.push(DetailSection {
            title: SECTION_RESISTANCE,
            body: SectionBody::List(item.resistance_mechanisms.clone()),
        });
    }

    if !item.antibiotics.is_empty() {
        let (title, column_header) = match item.kind {
            ItemKind::Microbe => (SECTION_ANTIBIOGRAM, COLUMN_ANTIBIOTIC),
            ItemKind::Antibiotic => (SECTION_INTERPRETATION, COLUMN_MICROBIAL_GROUP),
        };
        sections.push(DetailSection {
            title,
            body: SectionBody::Table(breakpoint_table(item, column_header)),
        });
    }

    DetailView {
        header: DetailHeader {
            name: item.name.clone(),
            image: item.image_ref.clone(),
        },
        tags,
        sections,
    }
}

fn breakpoint_table(item: &CanonicalItem, column_header: &'static str) -> BreakpointTable {
    let rows = item
        .antibiotics
        .iter()
        .map(|antibiotic| {
            let bp = antibiotic.interpretation();
            BreakpointRow {
                name: antibiotic.name.clone(),
                s: bp.s,
                i: bp.i,
                r: bp.r,
            }
        })
        .collect();

    BreakpointTable { column_header, rows }
}
