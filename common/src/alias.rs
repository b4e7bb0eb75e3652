//! Field alias table
//!
//! Datasets name the same concept differently (Portuguese and English keys,
//! several spellings per language). Each canonical field carries an ordered
//! list of source keys; the first key holding a usable value wins.
//!
//! The table is plain data: a new dialect is a JSON file, not a code change.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical fields resolved through aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Id,
    Name,
    Description,
    Classification,
    Morphology,
    Gram,
    Antibiotics,
    Resistance,
    Culture,
    Kind,
    Image,
    Tags,
}

/// Source keys for one canonical field, highest priority first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    pub field: CanonicalField,
    pub aliases: Vec<String>,
}

impl FieldAliases {
    fn new(field: CanonicalField, aliases: &[&str]) -> Self {
        Self {
            field,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Alias definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Per-field alias lists
    pub fields: Vec<FieldAliases>,
    /// Keys under which a wrapping object exposes the record array
    pub collection_keys: Vec<String>,
    /// Keys holding the S/I/R container inside an antibiotic reference
    pub breakpoint_keys: Vec<String>,
    /// Keys holding the name inside an antibiotic reference
    pub reference_name_keys: Vec<String>,
    /// Keys holding the per-group breakpoint mapping of an antibiotic record
    pub breakpoint_group_keys: Vec<String>,
    /// Kind values meaning "antibiotic" (compared case-insensitively)
    pub antibiotic_kinds: Vec<String>,
    /// Tag keywords marking a resistance mechanism (case-insensitive substring)
    pub resistance_keywords: Vec<String>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl AliasConfig {
    /// Built-in Portuguese/English dialect
    pub fn builtin() -> Self {
        use CanonicalField::*;

        Self {
            fields: vec![
                FieldAliases::new(Id, &["id"]),
                FieldAliases::new(Name, &["name", "nome", "nome_comum", "nome_popular"]),
                FieldAliases::new(
                    Description,
                    &["description", "descricao", "importancia_clinica", "summary"],
                ),
                FieldAliases::new(
                    Classification,
                    &["classification", "classificacao", "classificacao_principal"],
                ),
                FieldAliases::new(Morphology, &["morfologia", "morphology"]),
                FieldAliases::new(Gram, &["gram"]),
                FieldAliases::new(
                    Antibiotics,
                    &["antibioticos", "antibioticos_recomendados", "breakdowns"],
                ),
                FieldAliases::new(Resistance, &["resistencia", "resistencias", "resistance"]),
                FieldAliases::new(
                    Culture,
                    &["cultivo", "cultivo_recomendado", "culture", "cultivo_padrao"],
                ),
                FieldAliases::new(Kind, &["type", "tipo"]),
                FieldAliases::new(Image, &["image", "imagem"]),
                FieldAliases::new(Tags, &["tags"]),
            ],
            collection_keys: strings(&["items", "data"]),
            breakpoint_keys: strings(&["breakpoint", "breakpoints", "bp"]),
            reference_name_keys: strings(&["nome", "name"]),
            breakpoint_group_keys: strings(&["breakpoints"]),
            antibiotic_kinds: strings(&["antibiotic", "antibiotico", "antibiótico"]),
            resistance_keywords: strings(&["resist", "beta"]),
        }
    }

    /// Load a dialect file and merge it over the built-in table
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a dialect from JSON and merge it over the built-in table
    pub fn from_json(json: &str) -> Result<Self> {
        let custom: AliasFile = serde_json::from_str(json)?;
        let mut config = Self::builtin();
        config.merge(&custom);
        Ok(config)
    }

    /// Aliases for a field, in priority order
    pub fn aliases_for(&self, field: CanonicalField) -> &[String] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.aliases.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve a field: walk the aliases in order and return the first value
    /// that `extract` accepts. Null and empty values are never offered.
    pub fn resolve<T, F>(&self, record: &Map<String, Value>, field: CanonicalField, extract: F) -> Option<T>
    where
        F: Fn(&Value) -> Option<T>,
    {
        first_match(record, self.aliases_for(field), extract)
    }

    /// Resolve a field to text, empty when nothing matches
    pub fn resolve_text(&self, record: &Map<String, Value>, field: CanonicalField) -> String {
        self.resolve(record, field, value_as_text).unwrap_or_default()
    }

    /// Extend the table with a dialect; new aliases go after existing ones
    pub fn merge(&mut self, other: &AliasFile) {
        for custom in &other.fields {
            match self.fields.iter_mut().find(|f| f.field == custom.field) {
                Some(existing) => extend_unique(&mut existing.aliases, &custom.aliases),
                None => self.fields.push(custom.clone()),
            }
        }
        extend_unique(&mut self.collection_keys, &other.collection_keys);
        extend_unique(&mut self.breakpoint_keys, &other.breakpoint_keys);
        extend_unique(&mut self.reference_name_keys, &other.reference_name_keys);
        extend_unique(&mut self.breakpoint_group_keys, &other.breakpoint_group_keys);
        extend_unique(&mut self.antibiotic_kinds, &other.antibiotic_kinds);
        extend_unique(&mut self.resistance_keywords, &other.resistance_keywords);
    }
}

/// Dialect file contents; every list is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasFile {
    pub fields: Vec<FieldAliases>,
    pub collection_keys: Vec<String>,
    pub breakpoint_keys: Vec<String>,
    pub reference_name_keys: Vec<String>,
    pub breakpoint_group_keys: Vec<String>,
    pub antibiotic_kinds: Vec<String>,
    pub resistance_keywords: Vec<String>,
}

fn extend_unique(target: &mut Vec<String>, extra: &[String]) {
    for value in extra {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

/// First usable value among `keys`
pub fn first_match<T, F>(record: &Map<String, Value>, keys: &[String], extract: F) -> Option<T>
where
    F: Fn(&Value) -> Option<T>,
{
    keys.iter()
        .filter_map(|key| record.get(key))
        .filter(|value| !is_empty_value(value))
        .find_map(extract)
}

/// Null, "", [] and {} count as absent
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Scalars as text; containers are not text
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
