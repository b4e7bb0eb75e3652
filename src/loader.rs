//! Dataset loading
//!
//! The primary dataset is read asynchronously. When it is missing or not
//! valid JSON the fallback is read instead; when that fails too the outcome
//! carries zero items and a message for the user. Nothing here panics and
//! nothing is retried.

use crate::error::{MicroBioError, Result};
use microbiobase_common::{duplicate_ids, normalize_with, AliasConfig, CanonicalItem};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Dataset compiled into the binary, used as the default fallback
pub const EMBEDDED_DATASET: &str = include_str!("../data/data.json");

/// Shown when neither the dataset nor its fallback could be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load the local dataset (data.json). \
Check that the file exists and is valid JSON, point --dataset or MICROBIOBASE_DATASET at it, \
and run the command again.";

/// Where to look when the primary dataset fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// The dataset compiled into the binary
    Embedded,
    File(PathBuf),
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    Fallback,
    Failed,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub items: Vec<CanonicalItem>,
    pub source: LoadSource,
    /// User-visible message when nothing could be loaded
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        self.source != LoadSource::Failed
    }
}

/// Load and normalize the dataset
pub async fn load_dataset(primary: &Path, fallback: &Fallback, aliases: &AliasConfig) -> LoadOutcome {
    match read_primary(primary).await {
        Ok(raw) => {
            let items = normalize(&raw, aliases);
            info!(path = %primary.display(), count = items.len(), "dataset loaded");
            return LoadOutcome {
                items,
                source: LoadSource::Primary,
                error: None,
            };
        }
        Err(e) => error!(path = %primary.display(), error = %e, "failed to load dataset"),
    }

    match read_fallback(fallback) {
        Ok(Some(raw)) => {
            let items = normalize(&raw, aliases);
            warn!(count = items.len(), "using fallback dataset");
            return LoadOutcome {
                items,
                source: LoadSource::Fallback,
                error: None,
            };
        }
        Ok(None) => {}
        Err(e) => error!(error = %e, "failed to parse fallback dataset"),
    }

    LoadOutcome {
        items: Vec::new(),
        source: LoadSource::Failed,
        error: Some(LOAD_ERROR_MESSAGE.to_string()),
    }
}

async fn read_primary(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(MicroBioError::DatasetNotFound(path.display().to_string()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Synchronous read of the fallback blob
fn read_fallback(fallback: &Fallback) -> Result<Option<Value>> {
    let content = match fallback {
        Fallback::Disabled => return Ok(None),
        Fallback::Embedded => EMBEDDED_DATASET.to_string(),
        Fallback::File(path) => std::fs::read_to_string(path)?,
    };

    Ok(Some(serde_json::from_str(&content)?))
}

fn normalize(raw: &Value, aliases: &AliasConfig) -> Vec<CanonicalItem> {
    let items = normalize_with(raw, aliases);

    let duplicates = duplicate_ids(&items);
    if !duplicates.is_empty() {
        warn!(ids = ?duplicates, "dataset has duplicate item ids; lookups use the first match");
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use microbiobase_common::ItemKind;

    #[test]
    fn test_embedded_dataset_normalizes() {
        let raw: Value = serde_json::from_str(EMBEDDED_DATASET).expect("embedded dataset must be valid JSON");
        let items = normalize(&raw, &AliasConfig::builtin());
        assert!(!items.is_empty());
        assert!(items.iter().any(|i| i.kind == ItemKind::Antibiotic));
        assert!(duplicate_ids(&items).is_empty());
    }

    #[test]
    fn test_disabled_fallback() {
        assert!(read_fallback(&Fallback::Disabled).unwrap().is_none());
    }
}
