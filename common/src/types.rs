//! Canonical item types
//!
//! Every dataset dialect is normalized into these shapes:
//! - CanonicalItem: one microbe or antibiotic
//! - AntibioticRef: an embedded antibiotic (or organism group) row
//! - Breakpoint: the S/I/R interpretation triple

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker for an unknown S/I/R value
pub const UNKNOWN_BREAKPOINT: &str = "-";

/// Item kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Microbe,
    Antibiotic,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Microbe => write!(f, "microbe"),
            ItemKind::Antibiotic => write!(f, "antibiotic"),
        }
    }
}

/// Clinical interpretation triple (Susceptible / Intermediate / Resistant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    #[serde(rename = "S")]
    pub s: String,
    #[serde(rename = "I")]
    pub i: String,
    #[serde(rename = "R")]
    pub r: String,
}

impl Breakpoint {
    /// All three values unknown
    pub fn unknown() -> Self {
        Self {
            s: UNKNOWN_BREAKPOINT.to_string(),
            i: UNKNOWN_BREAKPOINT.to_string(),
            r: UNKNOWN_BREAKPOINT.to_string(),
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Antibiotic embedded in a microbe record, or organism group embedded in an antibiotic record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntibioticRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<Breakpoint>,
}

impl AntibioticRef {
    /// Breakpoint for display; references without one read as all unknown
    pub fn interpretation(&self) -> Breakpoint {
        self.breakpoint.clone().unwrap_or_default()
    }
}

/// Normalized microbe or antibiotic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub classification: String,
    pub morphology: String,
    pub gram_status: String,
    pub antibiotics: Vec<AntibioticRef>,
    pub resistance_mechanisms: Vec<String>,
    pub culture_notes: String,
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Original record, kept for fields not modeled here
    pub source_record: Value,
}

impl CanonicalItem {
    pub fn is_antibiotic(&self) -> bool {
        self.kind == ItemKind::Antibiotic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_default() {
        let item = CanonicalItem::default();
        assert_eq!(item.id, "");
        assert_eq!(item.kind, ItemKind::Microbe);
        assert!(item.antibiotics.is_empty());
        assert!(item.image_ref.is_none());
    }

    #[test]
    fn test_item_serialize_camel_case() {
        let item = CanonicalItem {
            id: "e_coli".to_string(),
            name: "E. coli".to_string(),
            gram_status: "Gram-".to_string(),
            culture_notes: "MacConkey".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&item).expect("serialize failed");
        assert!(json.contains("\"gramStatus\":\"Gram-\""));
        assert!(json.contains("\"cultureNotes\":\"MacConkey\""));
        assert!(json.contains("\"kind\":\"microbe\""));
        assert!(!json.contains("imageRef"));
    }

    #[test]
    fn test_breakpoint_serialize_letters() {
        let bp = Breakpoint {
            s: "<=2".to_string(),
            ..Breakpoint::unknown()
        };
        let json = serde_json::to_string(&bp).expect("serialize failed");
        assert_eq!(json, r#"{"S":"<=2","I":"-","R":"-"}"#);
    }

    #[test]
    fn test_interpretation_without_breakpoint() {
        let r = AntibioticRef {
            name: "Vancomycin".to_string(),
            breakpoint: None,
        };
        assert_eq!(r.interpretation(), Breakpoint::unknown());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ItemKind::Antibiotic.to_string(), "antibiotic");
        assert_eq!(ItemKind::Microbe.to_string(), "microbe");
    }
}
