//! Dataset normalizer
//!
//! Turns heterogeneous raw JSON into `CanonicalItem`s.
//!
//! ## Rules
//! 1. Input is a bare array or an object wrapping the array under a collection key
//! 2. Each field is resolved through the alias table (first usable value wins)
//! 3. Antibiotic records expand their per-group breakpoint mapping into `antibiotics`
//! 4. Nothing is rejected: malformed values degrade to empty defaults

use crate::alias::{first_match, is_empty_value, value_as_text, AliasConfig, CanonicalField};
use crate::types::{AntibioticRef, Breakpoint, CanonicalItem, ItemKind, UNKNOWN_BREAKPOINT};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Normalize with the built-in alias table
pub fn normalize(raw: &Value) -> Vec<CanonicalItem> {
    normalize_with(raw, &AliasConfig::builtin())
}

/// Normalize with a custom alias table
///
/// Unknown shapes yield an empty list, never an error.
pub fn normalize_with(raw: &Value, aliases: &AliasConfig) -> Vec<CanonicalItem> {
    let Some(records) = extract_records(raw, aliases) else {
        tracing::debug!("dataset has no record array, nothing to normalize");
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record, index, aliases))
        .collect()
}

/// Locate the record array
fn extract_records<'a>(raw: &'a Value, aliases: &AliasConfig) -> Option<&'a Vec<Value>> {
    match raw {
        Value::Array(records) => Some(records),
        Value::Object(wrapper) => aliases
            .collection_keys
            .iter()
            .find_map(|key| wrapper.get(key).and_then(Value::as_array)),
        _ => None,
    }
}

/// Normalize one raw record; `index` is its position in the dataset
pub fn normalize_record(raw: &Value, index: usize, aliases: &AliasConfig) -> CanonicalItem {
    let empty = Map::new();
    let record = match raw.as_object() {
        Some(record) => record,
        None => {
            tracing::debug!(index, "record is not an object, using empty fields");
            &empty
        }
    };

    let name = aliases.resolve_text(record, CanonicalField::Name);
    let classification = aliases.resolve_text(record, CanonicalField::Classification);

    let mut gram_status = aliases.resolve_text(record, CanonicalField::Gram);
    if gram_status.is_empty() {
        gram_status = derive_gram_status(&classification);
    }

    let kind = resolve_kind(record, aliases);

    let mut antibiotics = aliases
        .resolve(record, CanonicalField::Antibiotics, |v| antibiotic_refs(v, aliases))
        .unwrap_or_default();
    if kind == ItemKind::Antibiotic {
        if let Some(groups) = expand_breakpoint_groups(record, aliases) {
            antibiotics = groups;
        }
    }

    let mut resistance_mechanisms = aliases
        .resolve(record, CanonicalField::Resistance, string_list)
        .unwrap_or_default();
    if resistance_mechanisms.is_empty() {
        resistance_mechanisms = resistance_from_tags(record, aliases);
    }

    let image = aliases.resolve_text(record, CanonicalField::Image);

    let id = match aliases.resolve_text(record, CanonicalField::Id) {
        explicit if !explicit.is_empty() => explicit,
        _ => derive_id(&name, index),
    };

    CanonicalItem {
        id,
        name,
        description: aliases.resolve_text(record, CanonicalField::Description),
        classification,
        morphology: aliases.resolve_text(record, CanonicalField::Morphology),
        gram_status,
        antibiotics,
        resistance_mechanisms,
        culture_notes: aliases.resolve_text(record, CanonicalField::Culture),
        kind,
        image_ref: (!image.is_empty()).then_some(image),
        source_record: raw.clone(),
    }
}

/// Item id from its name, or `item_<index>` when unnamed
pub fn derive_id(name: &str, index: usize) -> String {
    lazy_static::lazy_static! {
        static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    if name.is_empty() {
        return format!("item_{}", index);
    }

    NON_ALNUM.replace_all(&name.to_lowercase(), "_").into_owned()
}

/// Classification doubles as gram status when it mentions "gram"
fn derive_gram_status(classification: &str) -> String {
    if classification.to_lowercase().contains("gram") {
        classification.to_string()
    } else {
        String::new()
    }
}

fn resolve_kind(record: &Map<String, Value>, aliases: &AliasConfig) -> ItemKind {
    let Some(tag) = aliases.resolve(record, CanonicalField::Kind, value_as_text) else {
        return ItemKind::Microbe;
    };

    let tag = tag.trim().to_lowercase();
    if aliases
        .antibiotic_kinds
        .iter()
        .any(|kind| kind.to_lowercase() == tag)
    {
        ItemKind::Antibiotic
    } else {
        ItemKind::Microbe
    }
}

/// Antibiotic list in any of its shapes:
/// - `["Ampicillin", ...]`
/// - `[{"nome": "Ampicillin", "breakpoint": {"S": ...}}, ...]`
/// - `{"Ampicillin": {"S": ...}, ...}`
fn antibiotic_refs(value: &Value, aliases: &AliasConfig) -> Option<Vec<AntibioticRef>> {
    let refs: Vec<AntibioticRef> = match value {
        Value::Array(entries) => entries
            .iter()
            .filter(|entry| !entry.is_null())
            .map(|entry| antibiotic_ref(entry, aliases))
            .collect(),
        Value::String(name) => vec![AntibioticRef {
            name: name.clone(),
            breakpoint: None,
        }],
        Value::Object(by_name) => by_name
            .iter()
            .map(|(name, bp)| AntibioticRef {
                name: name.clone(),
                breakpoint: Some(breakpoint_from(bp)),
            })
            .collect(),
        _ => Vec::new(),
    };

    (!refs.is_empty()).then_some(refs)
}

fn antibiotic_ref(entry: &Value, aliases: &AliasConfig) -> AntibioticRef {
    match entry {
        Value::Object(fields) => AntibioticRef {
            name: first_match(fields, &aliases.reference_name_keys, value_as_text).unwrap_or_default(),
            breakpoint: first_match(fields, &aliases.breakpoint_keys, |v| Some(breakpoint_from(v))),
        },
        other => AntibioticRef {
            name: value_as_text(other).unwrap_or_default(),
            breakpoint: None,
        },
    }
}

/// Expand `{"Group": {"S": .., "I": .., "R": ..}, ...}` into one reference per group,
/// in document order. Only applies when the first group value is an object.
fn expand_breakpoint_groups(record: &Map<String, Value>, aliases: &AliasConfig) -> Option<Vec<AntibioticRef>> {
    let groups = aliases
        .breakpoint_group_keys
        .iter()
        .filter_map(|key| record.get(key))
        .find_map(Value::as_object)?;

    let (_, first) = groups.iter().next()?;
    if !first.is_object() {
        return None;
    }

    Some(
        groups
            .iter()
            .map(|(group, bp)| AntibioticRef {
                name: group.clone(),
                breakpoint: Some(breakpoint_from(bp)),
            })
            .collect(),
    )
}

/// S/I/R triple; anything missing becomes the unknown marker
pub fn breakpoint_from(value: &Value) -> Breakpoint {
    let read = |key: &str| {
        value
            .get(key)
            .filter(|v| !is_empty_value(v))
            .and_then(value_as_text)
            .unwrap_or_else(|| UNKNOWN_BREAKPOINT.to_string())
    };

    Breakpoint {
        s: read("S"),
        i: read("I"),
        r: read("R"),
    }
}

/// Array of scalars, or a single string
fn string_list(value: &Value) -> Option<Vec<String>> {
    let list: Vec<String> = match value {
        Value::Array(entries) => entries.iter().filter_map(value_as_text).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    };

    (!list.is_empty()).then_some(list)
}

/// Resistance mechanisms picked out of the generic tag list
fn resistance_from_tags(record: &Map<String, Value>, aliases: &AliasConfig) -> Vec<String> {
    let keywords: Vec<String> = aliases
        .resistance_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    aliases
        .resolve(record, CanonicalField::Tags, string_list)
        .unwrap_or_default()
        .into_iter()
        .filter(|tag| {
            let lower = tag.to_lowercase();
            keywords.iter().any(|k| lower.contains(k.as_str()))
        })
        .collect()
}

/// Ids claimed by more than one item, in first-seen order
pub fn duplicate_ids(items: &[CanonicalItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for item in items {
        if !seen.insert(item.id.as_str()) && reported.insert(item.id.as_str()) {
            duplicates.push(item.id.clone());
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =============================================
    // input shape
    // =============================================

    #[test]
    fn test_non_array_inputs_yield_nothing() {
        for raw in [json!(null), json!({}), json!("text"), json!(7), json!({"items": "x"})] {
            assert!(normalize(&raw).is_empty(), "expected no items for {}", raw);
        }
    }

    #[test]
    fn test_empty_array() {
        assert!(normalize(&json!([])).is_empty());
    }

    #[test]
    fn test_wrapped_collections() {
        let items = normalize(&json!({"items": [{"name": "A"}]}));
        assert_eq!(items.len(), 1);

        let data = normalize(&json!({"data": [{"name": "A"}, {"name": "B"}]}));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_items_key_preferred_over_data() {
        let items = normalize(&json!({"data": [{"name": "D"}], "items": [{"name": "I"}]}));
        assert_eq!(items[0].name, "I");
    }

    #[test]
    fn test_non_object_record_degrades() {
        let items = normalize(&json!(["just a string", null]));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "item_0");
        assert_eq!(items[0].name, "");
        assert_eq!(items[1].id, "item_1");
        assert_eq!(items[0].source_record, json!("just a string"));
    }

    // =============================================
    // id
    // =============================================

    #[test]
    fn test_derive_id_from_name() {
        assert_eq!(derive_id("Staphylococcus aureus", 0), "staphylococcus_aureus");
        assert_eq!(derive_id("E. coli", 0), "e_coli");
        assert_eq!(derive_id("", 3), "item_3");
    }

    #[test]
    fn test_derive_id_non_ascii() {
        assert_eq!(derive_id("Bactéria", 0), "bact_ria");
        assert_eq!(derive_id("(MRSA)", 0), "_mrsa_");
    }

    #[test]
    fn test_unnamed_record_index() {
        let items = normalize(&json!([{"name": "A"}, {"name": "B"}, {"name": "C"}, {"descricao": "sem nome"}]));
        assert_eq!(items[3].id, "item_3");
    }

    #[test]
    fn test_explicit_id_wins() {
        let items = normalize(&json!([{"id": "custom", "name": "Named"}]));
        assert_eq!(items[0].id, "custom");
    }

    #[test]
    fn test_duplicates_not_deduplicated() {
        let items = normalize(&json!([{"name": "Same"}, {"name": "Same"}]));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, items[1].id);
        assert_eq!(duplicate_ids(&items), vec!["same".to_string()]);
    }

    // =============================================
    // field resolution
    // =============================================

    #[test]
    fn test_portuguese_fields() {
        let items = normalize(&json!([{
            "nome": "Streptococcus pyogenes",
            "descricao": "Faringite",
            "classificacao": "Bactéria",
            "morfologia": "Cocos em cadeia",
            "cultivo": "Ágar sangue",
            "imagem": "img/strep.png"
        }]));
        let item = &items[0];
        assert_eq!(item.name, "Streptococcus pyogenes");
        assert_eq!(item.description, "Faringite");
        assert_eq!(item.classification, "Bactéria");
        assert_eq!(item.morphology, "Cocos em cadeia");
        assert_eq!(item.culture_notes, "Ágar sangue");
        assert_eq!(item.image_ref.as_deref(), Some("img/strep.png"));
    }

    #[test]
    fn test_gram_derived_from_classification() {
        let items = normalize(&json!([
            {"name": "A", "classification": "Gram-positive coccus"},
            {"name": "B", "classification": "Fungo"},
            {"name": "C", "classification": "Gram-negative", "gram": "Gram-"}
        ]));
        assert_eq!(items[0].gram_status, "Gram-positive coccus");
        assert_eq!(items[1].gram_status, "");
        assert_eq!(items[2].gram_status, "Gram-");
    }

    #[test]
    fn test_kind_defaults_to_microbe() {
        let items = normalize(&json!([{"name": "A"}, {"name": "B", "type": "antibiotic"}, {"name": "C", "tipo": "Antibiótico"}, {"name": "D", "type": "virus"}]));
        assert_eq!(items[0].kind, ItemKind::Microbe);
        assert_eq!(items[1].kind, ItemKind::Antibiotic);
        assert_eq!(items[2].kind, ItemKind::Antibiotic);
        assert_eq!(items[3].kind, ItemKind::Microbe);
    }

    // =============================================
    // antibiotics / breakpoints
    // =============================================

    #[test]
    fn test_string_antibiotics() {
        let items = normalize(&json!([{"name": "A", "antibioticos": ["Ampicilina", "Gentamicina"]}]));
        let refs = &items[0].antibiotics;
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "Ampicilina");
        assert!(refs[0].breakpoint.is_none());
    }

    #[test]
    fn test_object_antibiotics_with_breakpoint_aliases() {
        let items = normalize(&json!([{
            "name": "A",
            "antibioticos_recomendados": [
                {"nome": "Oxacilina", "breakpoint": {"S": "<=2", "R": ">=4"}},
                {"name": "Vancomicina", "bp": {"S": 2, "I": "4-8", "R": 16}},
                {"nome": "Linezolida", "breakpoints": {}}
            ]
        }]));
        let refs = &items[0].antibiotics;
        assert_eq!(refs[0].name, "Oxacilina");
        assert_eq!(refs[0].interpretation(), Breakpoint { s: "<=2".into(), i: "-".into(), r: ">=4".into() });
        assert_eq!(refs[1].name, "Vancomicina");
        assert_eq!(refs[1].interpretation(), Breakpoint { s: "2".into(), i: "4-8".into(), r: "16".into() });
        assert_eq!(refs[2].interpretation(), Breakpoint::unknown());
    }

    #[test]
    fn test_antibiotic_breakpoint_groups_expand_in_order() {
        let items = normalize(&json!([{
            "name": "Penicilina",
            "type": "antibiotic",
            "breakpoints": {
                "Streptococcus": {"S": "<=0.06", "I": "0.12-2", "R": ">=4"},
                "Staphylococcus": {"S": "<=0.12", "R": ">=0.25"},
                "Enterococcus": {"S": "<=8"}
            }
        }]));
        let refs = &items[0].antibiotics;
        assert_eq!(refs.len(), 3);
        let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Streptococcus", "Staphylococcus", "Enterococcus"]);
        assert_eq!(refs[1].interpretation().i, "-");
        assert_eq!(refs[2].interpretation().r, "-");
    }

    #[test]
    fn test_breakpoint_groups_ignored_for_microbes() {
        let items = normalize(&json!([{
            "name": "X",
            "breakpoints": {"Group": {"S": "1"}}
        }]));
        assert!(items[0].antibiotics.is_empty());
    }

    #[test]
    fn test_flat_breakpoints_not_expanded() {
        let items = normalize(&json!([{
            "name": "Y",
            "type": "antibiotic",
            "breakpoints": {"S": "<=1", "R": ">=4"}
        }]));
        assert!(items[0].antibiotics.is_empty());
    }

    #[test]
    fn test_missing_values_use_marker() {
        let bp = breakpoint_from(&json!({"S": null, "I": ""}));
        assert_eq!(bp.s, UNKNOWN_BREAKPOINT);
        assert_eq!(bp.i, UNKNOWN_BREAKPOINT);
        assert_eq!(bp.r, UNKNOWN_BREAKPOINT);

        let bp = breakpoint_from(&json!("not an object"));
        assert_eq!(bp, Breakpoint::unknown());
    }

    // =============================================
    // resistance
    // =============================================

    #[test]
    fn test_resistance_explicit() {
        let items = normalize(&json!([{"name": "A", "resistencia": ["mecA", "PBP2a"]}]));
        assert_eq!(items[0].resistance_mechanisms, vec!["mecA", "PBP2a"]);
    }

    #[test]
    fn test_resistance_from_tags() {
        let items = normalize(&json!([{
            "name": "A",
            "tags": ["hospitalar", "Resistência à meticilina", "Beta-lactamase", "cocos"]
        }]));
        assert_eq!(
            items[0].resistance_mechanisms,
            vec!["Resistência à meticilina", "Beta-lactamase"]
        );
    }

    #[test]
    fn test_resistance_empty_list_falls_back_to_tags() {
        let items = normalize(&json!([{"name": "A", "resistance": [], "tags": ["ESBL resistance"]}]));
        assert_eq!(items[0].resistance_mechanisms, vec!["ESBL resistance"]);
    }

    // =============================================
    // end to end
    // =============================================

    #[test]
    fn test_e_coli_record() {
        let raw: Value = serde_json::from_str(r#"[{"name":"E. coli","classificacao":"Bactéria","gram":"Gram-"}]"#).unwrap();
        let items = normalize(&raw);
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.id, "e_coli");
        assert_eq!(item.name, "E. coli");
        assert_eq!(item.classification, "Bactéria");
        assert_eq!(item.gram_status, "Gram-");
        assert_eq!(item.kind, ItemKind::Microbe);
        assert!(item.antibiotics.is_empty());
        assert_eq!(item.source_record, raw[0]);
    }
}
